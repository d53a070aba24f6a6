//! Simulation configuration

use serde::{Deserialize, Serialize};

use crate::{Result, SimError};

/// Configuration for simulation runs and sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of base spins
    pub spins: u64,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Stake per spin in credits
    pub bet: u64,

    /// Independent batches; each gets its own RNG stream
    pub batches: usize,

    /// Balance a session starts with
    pub starting_balance: u64,

    /// Smallest bet a session accepts
    pub min_bet: u64,

    /// Largest bet a session accepts
    pub max_bet: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            spins: 100_000,
            seed: None,
            bet: 1,
            batches: 8,
            starting_balance: 1000,
            min_bet: 1,
            max_bet: 50,
        }
    }
}

impl SimConfig {
    /// Quick run for CI
    pub fn ci() -> Self {
        Self {
            spins: 10_000,
            batches: 4,
            ..Default::default()
        }
    }

    /// Long run for RTP measurement
    pub fn exhaustive() -> Self {
        Self {
            spins: 10_000_000,
            batches: 64,
            ..Default::default()
        }
    }

    /// Minimal config for sanity checks
    pub fn minimal() -> Self {
        Self {
            spins: 100,
            batches: 1,
            ..Default::default()
        }
    }

    /// Builder: set spin count
    pub fn with_spins(mut self, spins: u64) -> Self {
        self.spins = spins;
        self
    }

    /// Builder: set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder: set bet
    pub fn with_bet(mut self, bet: u64) -> Self {
        self.bet = bet;
        self
    }

    /// Builder: set batch count
    pub fn with_batches(mut self, batches: usize) -> Self {
        self.batches = batches;
        self
    }

    /// Builder: set starting balance
    pub fn with_starting_balance(mut self, balance: u64) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Clamp a requested bet into the session limits
    pub fn clamp_bet(&self, bet: u64) -> u64 {
        bet.clamp(self.min_bet, self.max_bet)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batches == 0 {
            return Err(SimError::InvalidConfig("batches must be at least 1".into()));
        }
        if self.min_bet == 0 {
            return Err(SimError::InvalidConfig("min_bet must be at least 1".into()));
        }
        if self.min_bet > self.max_bet {
            return Err(SimError::InvalidConfig(format!(
                "bet limits inverted: {} > {}",
                self.min_bet, self.max_bet
            )));
        }
        if self.bet == 0 {
            return Err(SimError::InvalidConfig("bet must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(SimConfig::ci().spins, 10_000);
        assert!(SimConfig::exhaustive().spins > SimConfig::default().spins);
        assert_eq!(SimConfig::minimal().batches, 1);
        for config in [SimConfig::default(), SimConfig::ci(), SimConfig::exhaustive()] {
            config.validate().unwrap();
        }
    }

    #[test]
    fn test_bet_clamped_to_limits() {
        let config = SimConfig::default();
        assert_eq!(config.clamp_bet(0), 1);
        assert_eq!(config.clamp_bet(17), 17);
        assert_eq!(config.clamp_bet(51), 50);
    }

    #[test]
    fn test_validate_rejects_zero_batches() {
        let config = SimConfig::default().with_batches(0);
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_serde_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{"spins": 5, "seed": 9}"#).unwrap();
        assert_eq!(config.spins, 5);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_bet, 50);
    }
}
