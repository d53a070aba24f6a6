//! Bet and base spin result

use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::error::BetError;
use crate::paytable::LineWin;
use crate::symbols::{Grid, ReelStops};

/// Credit stake for one spin, never zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Bet(NonZeroU64);

impl Bet {
    pub fn new(credits: u64) -> Result<Self, BetError> {
        NonZeroU64::new(credits).map(Self).ok_or(BetError::Zero)
    }

    pub fn credits(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for Bet {
    type Error = BetError;

    fn try_from(credits: u64) -> Result<Self, Self::Error> {
        Self::new(credits)
    }
}

impl From<Bet> for u64 {
    fn from(bet: Bet) -> Self {
        bet.credits()
    }
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Complete base spin result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// Stop offset drawn on each reel
    pub stops: ReelStops,
    pub grid: Grid,
    pub bet: Bet,
    pub line_wins: Vec<LineWin>,
    /// Sum of line multipliers
    pub win_multiplier: u64,
    /// `win_multiplier × bet`, in credits
    pub total_win: u64,
    pub hold_count: usize,
    pub feature_triggered: bool,
}

impl SpinOutcome {
    pub fn is_win(&self) -> bool {
        self.total_win > 0
    }

    /// Win as a multiple of the bet
    pub fn win_ratio(&self) -> f64 {
        self.total_win as f64 / self.bet.credits() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bet_rejected() {
        assert_eq!(Bet::new(0), Err(BetError::Zero));
        assert_eq!(Bet::try_from(0u64), Err(BetError::Zero));
        assert_eq!(Bet::new(25).map(Bet::credits), Ok(25));
    }

    #[test]
    fn test_bet_serde() {
        let bet = Bet::new(7).unwrap();
        assert_eq!(serde_json::to_string(&bet).unwrap(), "7");
        assert_eq!(serde_json::from_str::<Bet>("7").unwrap(), bet);
        assert!(serde_json::from_str::<Bet>("0").is_err());
    }
}
