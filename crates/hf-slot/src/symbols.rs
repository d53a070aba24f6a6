//! Symbol definitions, reel strips and the visible grid

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rng::RandomSource;

/// Number of reels (columns)
pub const REELS: usize = 5;
/// Visible rows per reel
pub const ROWS: usize = 3;
/// Total visible cells
pub const CELLS: usize = REELS * ROWS;

/// A reel symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
    P1,
    P2,
    P3,
    #[serde(rename = "WILD")]
    Wild,
    #[serde(rename = "HOLD")]
    Hold,
}

impl Symbol {
    /// Every symbol, lowest rank first
    pub const ALL: [Symbol; 10] = [
        Symbol::Ten,
        Symbol::Jack,
        Symbol::Queen,
        Symbol::King,
        Symbol::Ace,
        Symbol::P1,
        Symbol::P2,
        Symbol::P3,
        Symbol::Wild,
        Symbol::Hold,
    ];

    pub fn is_wild(self) -> bool {
        self == Symbol::Wild
    }

    pub fn is_hold(self) -> bool {
        self == Symbol::Hold
    }

    /// Short label, same as the serialized form
    pub fn label(self) -> &'static str {
        match self {
            Symbol::Ten => "10",
            Symbol::Jack => "J",
            Symbol::Queen => "Q",
            Symbol::King => "K",
            Symbol::Ace => "A",
            Symbol::P1 => "P1",
            Symbol::P2 => "P2",
            Symbol::P3 => "P3",
            Symbol::Wild => "WILD",
            Symbol::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A cyclic reel strip. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Symbol>", into = "Vec<Symbol>")]
pub struct ReelStrip {
    symbols: Vec<Symbol>,
}

impl ReelStrip {
    /// Create a reel strip; an empty sequence is a configuration error
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, ConfigError> {
        if symbols.is_empty() {
            return Err(ConfigError::EmptyReelStrip);
        }
        Ok(Self { symbols })
    }

    /// Get symbol at position (wraps around)
    pub fn symbol_at(&self, position: usize) -> Symbol {
        self.symbols[position % self.symbols.len()]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false` for a constructed strip
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

impl TryFrom<Vec<Symbol>> for ReelStrip {
    type Error = ConfigError;

    fn try_from(symbols: Vec<Symbol>) -> Result<Self, Self::Error> {
        Self::new(symbols)
    }
}

impl From<ReelStrip> for Vec<Symbol> {
    fn from(strip: ReelStrip) -> Self {
        strip.symbols
    }
}

/// Stop offset drawn for each reel
pub type ReelStops = [usize; REELS];

/// Exactly one strip per reel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ReelStrip>", into = "Vec<ReelStrip>")]
pub struct ReelSet {
    strips: [ReelStrip; REELS],
}

impl ReelSet {
    pub fn new(strips: Vec<ReelStrip>) -> Result<Self, ConfigError> {
        let found = strips.len();
        let strips = <[ReelStrip; REELS]>::try_from(strips).map_err(|_| ConfigError::ReelCount {
            expected: REELS,
            found,
        })?;
        Ok(Self { strips })
    }

    pub fn strips(&self) -> &[ReelStrip; REELS] {
        &self.strips
    }

    pub fn strip(&self, reel: usize) -> &ReelStrip {
        &self.strips[reel]
    }

    /// Draw one uniform stop per reel, reels independent of each other
    pub fn draw_stops<R: RandomSource + ?Sized>(&self, rng: &mut R) -> ReelStops {
        std::array::from_fn(|reel| rng.below(self.strips[reel].len()))
    }

    /// Visible grid for a set of stops: rows 0..3 show `stop`, `stop + 1`, `stop + 2`
    pub fn grid_at(&self, stops: &ReelStops) -> Grid {
        Grid::from_fn(|reel, row| self.strips[reel].symbol_at(stops[reel] + row))
    }

    /// Iterate every symbol on every strip
    pub fn all_symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.strips.iter().flat_map(|strip| strip.symbols.iter().copied())
    }
}

impl TryFrom<Vec<ReelStrip>> for ReelSet {
    type Error = ConfigError;

    fn try_from(strips: Vec<ReelStrip>) -> Result<Self, Self::Error> {
        Self::new(strips)
    }
}

impl From<ReelSet> for Vec<ReelStrip> {
    fn from(set: ReelSet) -> Self {
        set.strips.into()
    }
}

/// Visible 5×3 symbol window, stored reel by reel (`index = reel * ROWS + row`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cells: [Symbol; CELLS],
}

impl Grid {
    /// Flat cell index for a (reel, row) pair
    pub const fn index(reel: usize, row: usize) -> usize {
        reel * ROWS + row
    }

    /// (reel, row) pair for a flat cell index
    pub const fn position(index: usize) -> (usize, usize) {
        (index / ROWS, index % ROWS)
    }

    pub fn from_cells(cells: [Symbol; CELLS]) -> Self {
        Self { cells }
    }

    /// Build from columns, one `[top, middle, bottom]` array per reel
    pub fn from_reels(reels: [[Symbol; ROWS]; REELS]) -> Self {
        Self::from_fn(|reel, row| reels[reel][row])
    }

    pub fn from_fn(mut f: impl FnMut(usize, usize) -> Symbol) -> Self {
        let cells = std::array::from_fn(|index| {
            let (reel, row) = Self::position(index);
            f(reel, row)
        });
        Self { cells }
    }

    /// A grid showing one symbol everywhere
    pub fn filled(symbol: Symbol) -> Self {
        Self {
            cells: [symbol; CELLS],
        }
    }

    /// Copy with one cell replaced
    pub fn with(mut self, reel: usize, row: usize, symbol: Symbol) -> Self {
        self.cells[Self::index(reel, row)] = symbol;
        self
    }

    pub fn at(&self, reel: usize, row: usize) -> Symbol {
        self.cells[Self::index(reel, row)]
    }

    pub fn cells(&self) -> &[Symbol; CELLS] {
        &self.cells
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells.iter().filter(|&&s| s == symbol).count()
    }

    /// Flat indices of every cell showing `symbol`
    pub fn positions_of(&self, symbol: Symbol) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, s)| **s == symbol)
            .map(|(index, _)| index)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            let line: Vec<String> = (0..REELS)
                .map(|reel| format!("{:>4}", self.at(reel, row).label()))
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Reel strips of the built-in "Three Pigs" game
pub fn three_pigs_strips() -> ReelSet {
    use self::Symbol::{
        Ace as A, Hold as H, Jack as J, King as K, P1, P2, P3, Queen as Q, Ten as T, Wild as W,
    };

    let strip = |symbols: &[Symbol]| ReelStrip {
        symbols: symbols.to_vec(),
    };

    ReelSet {
        strips: [
            strip(&[T, J, Q, K, A, P1, P2, P3, W, T, Q, H, K, A, P1, J, W, T, H, Q, K, A, P2, J]),
            strip(&[J, Q, K, A, P1, W, T, Q, K, P2, H, A, P3, J, W, T, Q, K, A, P1, J, H]),
            strip(&[T, Q, K, A, P2, W, T, Q, K, A, P1, P3, J, W, T, Q, K, A, P2, J, H]),
            strip(&[T, J, Q, K, A, P1, P2, W, T, Q, K, A, P3, J, W, T, Q, K, A, P2, J, H]),
            strip(&[T, Q, K, A, P1, P2, P3, W, T, Q, K, A, P1, J, W, T, Q, K, A, P2, J, H]),
        ],
    }
}
