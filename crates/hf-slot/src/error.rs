//! Error types for the slot engine

use thiserror::Error;

use crate::symbols::Symbol;

/// Game configuration rejected at load time
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Expected {expected} reel strips, found {found}")]
    ReelCount { expected: usize, found: usize },

    #[error("Reel strip is empty")]
    EmptyReelStrip,

    #[error("No paytable entry for symbol {0}")]
    MissingPayEntry(Symbol),

    #[error("Duplicate paytable entry for symbol {0}")]
    DuplicatePayEntry(Symbol),

    #[error("Payline table is empty")]
    NoPaylines,

    #[error("Payline {line} has {found} positions, expected {expected}")]
    PaylineLength {
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("Payline {line} uses row {row} on reel {reel}, rows are 0..{rows}")]
    PaylineRow {
        line: usize,
        reel: usize,
        row: u8,
        rows: usize,
    },

    #[error("{name} must be within [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },

    #[error("{name} range is inverted: {min} > {max}")]
    InvertedRange {
        name: &'static str,
        min: u64,
        max: u64,
    },

    #[error("{0} must be at least 1")]
    ZeroValue(&'static str),

    #[error("Jackpot thresholds must be strictly ascending within (0, 1]")]
    JackpotThresholds,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stake rejected before reaching the engine
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetError {
    #[error("Bet must be a positive number of credits")]
    Zero,
}

/// Misuse of the respin state machine
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureError {
    #[error("Respin feature already resolved")]
    AlreadyResolved,
}

/// Umbrella error for callers that mix engine operations
#[derive(Error, Debug)]
pub enum SlotError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bet(#[from] BetError),

    #[error(transparent)]
    Feature(#[from] FeatureError),
}

/// Result type alias
pub type SlotResult<T> = Result<T, SlotError>;
