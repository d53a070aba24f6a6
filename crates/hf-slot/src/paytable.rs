//! Paytable, payline table and line win evaluation

use serde::{Deserialize, Serialize};

use crate::symbols::{Grid, REELS, Symbol};

/// Fewest consecutive matches that pay
pub const MIN_MATCH: usize = 3;

/// Pay multipliers for one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayEntry {
    pub symbol: Symbol,
    /// Multipliers for 3, 4, 5 of a kind (index 0 = 3oak, etc.)
    pub pays: [u32; 3],
}

impl PayEntry {
    pub fn new(symbol: Symbol, pays: [u32; 3]) -> Self {
        Self { symbol, pays }
    }

    /// Get pay multiplier for a match count
    pub fn pay(&self, match_count: usize) -> u32 {
        if match_count < MIN_MATCH {
            return 0;
        }
        self.pays.get(match_count - MIN_MATCH).copied().unwrap_or(0)
    }
}

/// Symbol payouts by match count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayTable {
    entries: Vec<PayEntry>,
}

impl PayTable {
    pub fn new(entries: Vec<PayEntry>) -> Self {
        Self { entries }
    }

    /// Paytable of the built-in "Three Pigs" game. WILD and HOLD pay nothing on their own.
    pub fn three_pigs() -> Self {
        Self::new(vec![
            PayEntry::new(Symbol::Ace, [5, 15, 60]),
            PayEntry::new(Symbol::King, [5, 15, 50]),
            PayEntry::new(Symbol::Queen, [4, 12, 40]),
            PayEntry::new(Symbol::Jack, [4, 10, 30]),
            PayEntry::new(Symbol::Ten, [3, 8, 25]),
            PayEntry::new(Symbol::P1, [10, 40, 150]),
            PayEntry::new(Symbol::P2, [12, 50, 200]),
            PayEntry::new(Symbol::P3, [15, 60, 250]),
            PayEntry::new(Symbol::Wild, [0, 0, 0]),
            PayEntry::new(Symbol::Hold, [0, 0, 0]),
        ])
    }

    pub fn get(&self, symbol: Symbol) -> Option<&PayEntry> {
        self.entries.iter().find(|e| e.symbol == symbol)
    }

    pub fn entries(&self) -> &[PayEntry] {
        &self.entries
    }
}

/// A payline: one row index per reel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payline {
    /// Row positions for each reel (e.g., [1, 0, 0, 0, 1] for a "V" shape)
    pub positions: Vec<u8>,
}

impl Payline {
    pub fn new(positions: [u8; REELS]) -> Self {
        Self {
            positions: positions.to_vec(),
        }
    }

    /// Same row across all reels
    pub fn straight(row: u8) -> Self {
        Self::new([row; REELS])
    }

    /// Row on a given reel
    pub fn row(&self, reel: usize) -> usize {
        self.positions[reel] as usize
    }
}

/// The 25 fixed lines of the built-in game
pub fn standard_25_paylines() -> Vec<Payline> {
    vec![
        // Straight lines
        Payline::straight(1),
        Payline::straight(0),
        Payline::straight(2),
        // V shapes
        Payline::new([0, 1, 2, 1, 0]),
        Payline::new([2, 1, 0, 1, 2]),
        Payline::new([0, 0, 1, 0, 0]),
        Payline::new([2, 2, 1, 2, 2]),
        // Zigzag
        Payline::new([1, 0, 1, 2, 1]),
        Payline::new([1, 2, 1, 0, 1]),
        Payline::new([0, 1, 1, 1, 0]),
        Payline::new([2, 1, 1, 1, 2]),
        Payline::new([1, 1, 0, 1, 1]),
        Payline::new([1, 1, 2, 1, 1]),
        // W shapes
        Payline::new([0, 1, 0, 1, 0]),
        Payline::new([2, 1, 2, 1, 2]),
        Payline::new([0, 2, 2, 2, 0]),
        Payline::new([2, 0, 0, 0, 2]),
        Payline::new([0, 2, 1, 2, 0]),
        Payline::new([2, 0, 1, 0, 2]),
        Payline::new([1, 0, 0, 0, 1]),
        Payline::new([1, 2, 2, 2, 1]),
        // Steps
        Payline::new([0, 1, 2, 2, 2]),
        Payline::new([2, 1, 0, 0, 0]),
        Payline::new([0, 0, 2, 0, 0]),
        Payline::new([2, 2, 0, 2, 2]),
    ]
}

/// A win result on a single payline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineWin {
    /// Payline index
    pub line_index: usize,
    /// Target symbol (first non-wild from the left)
    pub symbol: Symbol,
    /// Number of consecutive matches from reel 0
    pub match_count: usize,
    /// Bet multiplier paid
    pub multiplier: u32,
    /// Positions of winning symbols (reel, row)
    pub positions: Vec<(usize, usize)>,
    /// Wild positions included
    pub wild_positions: Vec<(usize, usize)>,
}

/// Result of evaluating a grid against every payline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub line_wins: Vec<LineWin>,
    /// Sum of line multipliers, in bet units
    pub total_multiplier: u64,
}

impl Evaluation {
    pub fn is_win(&self) -> bool {
        self.total_multiplier > 0
    }

    pub fn win_count(&self) -> usize {
        self.line_wins.len()
    }
}

/// Score a grid against all paylines. Lines are independent; every winning line pays.
pub fn evaluate(grid: &Grid, paytable: &PayTable, paylines: &[Payline]) -> Evaluation {
    let line_wins: Vec<LineWin> = paylines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| evaluate_line(grid, index, line, paytable))
        .collect();

    let total_multiplier = line_wins.iter().map(|w| w.multiplier as u64).sum();

    Evaluation {
        line_wins,
        total_multiplier,
    }
}

/// Score one payline.
///
/// The target is the first non-wild symbol met scanning left to right; the
/// run stops at the first cell that is neither the target nor WILD, and cells
/// after the break never count. An all-WILD line has no target and pays nothing.
pub fn evaluate_line(
    grid: &Grid,
    line_index: usize,
    payline: &Payline,
    paytable: &PayTable,
) -> Option<LineWin> {
    let mut target: Option<Symbol> = None;
    let mut positions = Vec::with_capacity(REELS);
    let mut wild_positions = Vec::new();

    for reel in 0..REELS {
        let row = payline.row(reel);
        let symbol = grid.at(reel, row);

        if target.is_none() && !symbol.is_wild() {
            target = Some(symbol);
        }

        if symbol.is_wild() {
            wild_positions.push((reel, row));
        } else if Some(symbol) != target {
            break;
        }
        positions.push((reel, row));
    }

    let symbol = target?;
    let match_count = positions.len();
    if match_count < MIN_MATCH {
        return None;
    }

    let multiplier = paytable.get(symbol)?.pay(match_count);
    if multiplier == 0 {
        return None;
    }

    Some(LineWin {
        line_index,
        symbol,
        match_count,
        multiplier,
        positions,
        wild_positions,
    })
}
