//! Prize reveal for a resolved respin board

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rng::RandomSource;
use crate::spin::Bet;
use crate::symbols::CELLS;

use super::respin::TileLevel;

/// Jackpot tiers a brick tile can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JackpotTier {
    Mini,
    Minor,
    Major,
}

impl JackpotTier {
    /// Smallest tier first
    pub const ALL: [JackpotTier; 3] = [JackpotTier::Mini, JackpotTier::Minor, JackpotTier::Major];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Mini => "Mini",
            Self::Minor => "Minor",
            Self::Major => "Major",
        }
    }
}

/// Inclusive multiplier range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeRange {
    pub min: u32,
    pub max: u32,
}

impl PrizeRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    fn roll<R: RandomSource + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.between(self.min, self.max)
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                name,
                min: self.min as u64,
                max: self.max as u64,
            });
        }
        Ok(())
    }
}

/// A jackpot band: a brick roll below `below` pays `multiplier`.
/// Bands are checked in order, so `below` values are cumulative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JackpotRule {
    pub tier: JackpotTier,
    pub below: f64,
    pub multiplier: u32,
}

/// Prize tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrizeConfig {
    pub straw: PrizeRange,
    pub wood: PrizeRange,
    /// Brick prize when no jackpot band is hit
    pub brick: PrizeRange,
    pub brick_jackpots: Vec<JackpotRule>,
}

impl Default for PrizeConfig {
    fn default() -> Self {
        Self {
            straw: PrizeRange::new(2, 10),
            wood: PrizeRange::new(5, 25),
            brick: PrizeRange::new(10, 50),
            brick_jackpots: vec![
                JackpotRule {
                    tier: JackpotTier::Major,
                    below: 0.02,
                    multiplier: 500,
                },
                JackpotRule {
                    tier: JackpotTier::Minor,
                    below: 0.05,
                    multiplier: 200,
                },
                JackpotRule {
                    tier: JackpotTier::Mini,
                    below: 0.12,
                    multiplier: 75,
                },
            ],
        }
    }
}

impl PrizeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.straw.validate("straw prize")?;
        self.wood.validate("wood prize")?;
        self.brick.validate("brick prize")?;

        let mut previous = 0.0;
        for rule in &self.brick_jackpots {
            if !(rule.below > previous && rule.below <= 1.0) {
                return Err(ConfigError::JackpotThresholds);
            }
            previous = rule.below;
        }
        Ok(())
    }

    /// Roll the multiplier for one tile
    pub fn roll<R: RandomSource + ?Sized>(
        &self,
        level: TileLevel,
        rng: &mut R,
    ) -> (u32, Option<JackpotTier>) {
        match level {
            TileLevel::Empty => (0, None),
            TileLevel::Straw => (self.straw.roll(rng), None),
            TileLevel::Wood => (self.wood.roll(rng), None),
            TileLevel::Brick => {
                let roll = rng.unit();
                match self.brick_jackpots.iter().find(|rule| roll < rule.below) {
                    Some(rule) => (rule.multiplier, Some(rule.tier)),
                    None => (self.brick.roll(rng), None),
                }
            }
        }
    }
}

/// Revealed prize for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPrize {
    pub level: TileLevel,
    pub multiplier: u32,
    /// multiplier × bet
    pub amount: u64,
    pub jackpot: Option<JackpotTier>,
}

/// Prizes for every cell of a resolved board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeBoard {
    cells: [CellPrize; CELLS],
    total: u64,
}

impl PrizeBoard {
    pub fn cells(&self) -> &[CellPrize; CELLS] {
        &self.cells
    }

    /// Credit amount per cell
    pub fn amounts(&self) -> [u64; CELLS] {
        std::array::from_fn(|cell| self.cells[cell].amount)
    }

    /// Total bonus win in credits
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Cells that hit a jackpot, with their tier
    pub fn jackpots(&self) -> impl Iterator<Item = (usize, JackpotTier)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(cell, prize)| prize.jackpot.map(|tier| (cell, tier)))
    }

    pub fn jackpot_count(&self, tier: JackpotTier) -> usize {
        self.jackpots().filter(|&(_, t)| t == tier).count()
    }
}

/// Convert final tile levels into credit prizes. Cells are rolled in index order.
pub fn reveal_prizes<R: RandomSource + ?Sized>(
    tiles: &[TileLevel; CELLS],
    bet: Bet,
    config: &PrizeConfig,
    rng: &mut R,
) -> PrizeBoard {
    let cells: [CellPrize; CELLS] = std::array::from_fn(|cell| {
        let level = tiles[cell];
        let (multiplier, jackpot) = config.roll(level, rng);
        CellPrize {
            level,
            multiplier,
            amount: u64::from(multiplier).saturating_mul(bet.credits()),
            jackpot,
        }
    });
    let total = cells.iter().fold(0u64, |acc, c| acc.saturating_add(c.amount));

    PrizeBoard { cells, total }
}
