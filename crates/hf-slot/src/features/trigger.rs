//! Bonus trigger check

use serde::{Deserialize, Serialize};

use crate::symbols::Grid;

/// Outcome of inspecting a base-game grid for the respin trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerCheck {
    pub hold_count: usize,
    pub triggered: bool,
}

impl TriggerCheck {
    /// Count HOLD symbols over all cells; trigger at `trigger_count` or more
    pub fn inspect(grid: &Grid, trigger_count: usize) -> Self {
        let hold_count = grid.cells().iter().filter(|s| s.is_hold()).count();
        Self {
            hold_count,
            triggered: hold_count >= trigger_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{CELLS, Symbol};

    fn grid_with_holds(count: usize) -> Grid {
        let mut cells = [Symbol::Queen; CELLS];
        for cell in cells.iter_mut().take(count) {
            *cell = Symbol::Hold;
        }
        Grid::from_cells(cells)
    }

    #[test]
    fn test_five_holds_never_trigger() {
        for count in 0..=5 {
            let check = TriggerCheck::inspect(&grid_with_holds(count), 6);
            assert_eq!(check.hold_count, count);
            assert!(!check.triggered);
        }
    }

    #[test]
    fn test_six_or_more_holds_trigger() {
        for count in 6..=CELLS {
            assert!(TriggerCheck::inspect(&grid_with_holds(count), 6).triggered);
        }
    }
}
