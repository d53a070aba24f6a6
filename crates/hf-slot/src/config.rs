//! Game configuration
//!
//! A [`GameConfig`] bundles the static game data (reel strips, paytable,
//! paylines) with the respin and prize tunables. It loads from JSON or YAML
//! and is validated before any loader returns it.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::features::{PrizeConfig, RespinConfig};
use crate::paytable::{PayTable, Payline, standard_25_paylines};
use crate::symbols::{REELS, ROWS, ReelSet, three_pigs_strips};

/// Complete game definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Game name
    pub name: String,
    pub reels: ReelSet,
    pub paytable: PayTable,
    pub paylines: Vec<Payline>,
    #[serde(default)]
    pub respin: RespinConfig,
    #[serde(default)]
    pub prizes: PrizeConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::three_pigs()
    }
}

impl GameConfig {
    /// The built-in "Three Pigs" game
    pub fn three_pigs() -> Self {
        Self {
            name: "Three Pigs".into(),
            reels: three_pigs_strips(),
            paytable: PayTable::three_pigs(),
            paylines: standard_25_paylines(),
            respin: RespinConfig::default(),
            prizes: PrizeConfig::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.yaml`/`.yml` is parsed as YAML, anything else as JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        log::debug!("Loading game config from {}", path.display());
        if is_yaml {
            Self::from_yaml_str(&text)
        } else {
            Self::from_json_str(&text)
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yml::to_string(self)?)
    }

    /// Check everything the engine relies on at spin time
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for entry in self.paytable.entries() {
            if !seen.insert(entry.symbol) {
                return Err(ConfigError::DuplicatePayEntry(entry.symbol));
            }
        }
        for symbol in self.reels.all_symbols() {
            if !seen.contains(&symbol) {
                return Err(ConfigError::MissingPayEntry(symbol));
            }
        }

        if self.paylines.is_empty() {
            return Err(ConfigError::NoPaylines);
        }
        for (line, payline) in self.paylines.iter().enumerate() {
            if payline.positions.len() != REELS {
                return Err(ConfigError::PaylineLength {
                    line,
                    found: payline.positions.len(),
                    expected: REELS,
                });
            }
            if let Some((reel, &row)) = payline
                .positions
                .iter()
                .enumerate()
                .find(|&(_, &row)| row as usize >= ROWS)
            {
                return Err(ConfigError::PaylineRow {
                    line,
                    reel,
                    row,
                    rows: ROWS,
                });
            }
        }

        self.respin.validate()?;
        self.prizes.validate()?;
        Ok(())
    }
}
