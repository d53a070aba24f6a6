//! Sticky-tile respin feature
//!
//! The round starts from the HOLD cells of the triggering grid. Each tick may
//! land new tiles on empty cells and upgrades occupied ones, until the respin
//! counter runs out or the board fills up. Prizes are revealed once, on the
//! tick (or skip) that resolves the round.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, FeatureError};
use crate::rng::RandomSource;
use crate::spin::Bet;
use crate::symbols::{CELLS, Grid};

use super::prize::{PrizeBoard, PrizeConfig, reveal_prizes};

/// Respin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespinConfig {
    /// HOLD symbols needed on a base grid to start the feature
    pub trigger_count: usize,
    /// Counter value at start and after every tick that lands a tile
    pub initial_respins: u8,
    pub min_landing_attempts: u32,
    pub max_landing_attempts: u32,
    /// Success chance of each landing attempt
    pub landing_chance: f64,
    /// Upgrade chance of each occupied tile per tick
    pub upgrade_chance: f64,
}

impl Default for RespinConfig {
    fn default() -> Self {
        Self {
            trigger_count: 6,
            initial_respins: 3,
            min_landing_attempts: 1,
            max_landing_attempts: 3,
            landing_chance: 0.45,
            upgrade_chance: 0.25,
        }
    }
}

impl RespinConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trigger_count == 0 {
            return Err(ConfigError::ZeroValue("trigger_count"));
        }
        if self.initial_respins == 0 {
            return Err(ConfigError::ZeroValue("initial_respins"));
        }
        if self.min_landing_attempts > self.max_landing_attempts {
            return Err(ConfigError::InvertedRange {
                name: "landing attempts",
                min: self.min_landing_attempts as u64,
                max: self.max_landing_attempts as u64,
            });
        }
        for (name, value) in [
            ("landing_chance", self.landing_chance),
            ("upgrade_chance", self.upgrade_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }
        Ok(())
    }
}

/// Upgrade tier of a bonus cell
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TileLevel {
    #[default]
    Empty = 0,
    Straw = 1,
    Wood = 2,
    Brick = 3,
}

impl TileLevel {
    pub fn is_occupied(self) -> bool {
        self != Self::Empty
    }

    /// One level up, capped at `Brick`
    pub fn upgraded(self) -> Self {
        match self {
            Self::Empty => Self::Straw,
            Self::Straw => Self::Wood,
            Self::Wood | Self::Brick => Self::Brick,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RespinPhase {
    /// Tiles placed from the trigger grid, no tick played yet
    Seeded,
    Running,
    /// Terminal; prizes are revealed
    Resolved,
}

/// What a single tick did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    /// 1-based tick number
    pub tick: u32,
    /// Cells that went from empty to straw, in landing order
    pub landed: Vec<usize>,
    /// Cells whose level went up, in index order
    pub upgraded: Vec<usize>,
    pub spins_remaining: u8,
    pub resolved: bool,
}

/// State of an active respin round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespinFeature {
    tiles: [TileLevel; CELLS],
    spins_remaining: u8,
    phase: RespinPhase,
    ticks: u32,
    bet: Bet,
    prizes: Option<PrizeBoard>,
}

impl RespinFeature {
    /// Seed a round from the triggering grid: every HOLD cell starts as straw
    pub fn start(grid: &Grid, bet: Bet, initial_respins: u8) -> Self {
        let tiles = std::array::from_fn(|cell| {
            if grid.cells()[cell].is_hold() {
                TileLevel::Straw
            } else {
                TileLevel::Empty
            }
        });
        let feature = Self {
            tiles,
            spins_remaining: initial_respins,
            phase: RespinPhase::Seeded,
            ticks: 0,
            bet,
            prizes: None,
        };
        log::info!(
            "Respin feature started: {} seeded tiles, {} respins, bet {}",
            feature.occupied_count(),
            initial_respins,
            bet
        );
        feature
    }

    /// Play exactly one tick
    pub fn advance<R: RandomSource + ?Sized>(
        &mut self,
        config: &RespinConfig,
        prize_config: &PrizeConfig,
        rng: &mut R,
    ) -> Result<TickOutcome, FeatureError> {
        if self.is_resolved() {
            log::warn!("Advance called on a resolved respin feature");
            return Err(FeatureError::AlreadyResolved);
        }
        self.phase = RespinPhase::Running;
        self.ticks += 1;

        // Landing
        let mut empties = self.empty_cells();
        let attempts = rng
            .between(config.min_landing_attempts, config.max_landing_attempts)
            .min(u32::try_from(empties.len()).unwrap_or(u32::MAX));
        let mut landed = Vec::new();
        for _ in 0..attempts {
            if rng.chance(config.landing_chance) {
                let cell = empties.remove(rng.below(empties.len()));
                self.tiles[cell] = TileLevel::Straw;
                landed.push(cell);
            }
        }

        // Upgrades, including tiles that just landed
        let mut upgraded = Vec::new();
        for (cell, tile) in self.tiles.iter_mut().enumerate() {
            if tile.is_occupied() && rng.chance(config.upgrade_chance) {
                let next = tile.upgraded();
                if next != *tile {
                    *tile = next;
                    upgraded.push(cell);
                }
            }
        }

        if landed.is_empty() {
            self.spins_remaining = self.spins_remaining.saturating_sub(1);
        } else {
            self.spins_remaining = config.initial_respins;
        }

        let resolved = self.spins_remaining == 0 || self.is_full();
        if resolved {
            self.resolve(prize_config, rng);
        }

        log::debug!(
            "Respin tick {}: landed {:?}, upgraded {:?}, {} left",
            self.ticks,
            landed,
            upgraded,
            self.spins_remaining
        );

        Ok(TickOutcome {
            tick: self.ticks,
            landed,
            upgraded,
            spins_remaining: self.spins_remaining,
            resolved,
        })
    }

    /// Resolve now with the current tiles. Calling it again returns the same board.
    pub fn skip<R: RandomSource + ?Sized>(
        &mut self,
        prize_config: &PrizeConfig,
        rng: &mut R,
    ) -> &PrizeBoard {
        if !self.is_resolved() {
            log::info!("Respin feature skipped after {} ticks", self.ticks);
        }
        self.resolve(prize_config, rng)
    }

    fn resolve<R: RandomSource + ?Sized>(
        &mut self,
        prize_config: &PrizeConfig,
        rng: &mut R,
    ) -> &PrizeBoard {
        self.phase = RespinPhase::Resolved;
        let tiles = &self.tiles;
        let bet = self.bet;
        self.prizes.get_or_insert_with(|| {
            let board = reveal_prizes(tiles, bet, prize_config, rng);
            log::info!(
                "Respin feature resolved: {} tiles, bonus win {}",
                tiles.iter().filter(|t| t.is_occupied()).count(),
                board.total()
            );
            board
        })
    }

    pub fn tiles(&self) -> &[TileLevel; CELLS] {
        &self.tiles
    }

    pub fn spins_remaining(&self) -> u8 {
        self.spins_remaining
    }

    pub fn phase(&self) -> RespinPhase {
        self.phase
    }

    pub fn is_resolved(&self) -> bool {
        self.phase == RespinPhase::Resolved
    }

    /// Ticks played so far
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn bet(&self) -> Bet {
        self.bet
    }

    /// Revealed prizes, present once resolved
    pub fn prizes(&self) -> Option<&PrizeBoard> {
        self.prizes.as_ref()
    }

    /// Bonus win in credits, 0 until resolved
    pub fn total_win(&self) -> u64 {
        self.prizes.as_ref().map_or(0, PrizeBoard::total)
    }

    pub fn is_full(&self) -> bool {
        self.tiles.iter().all(|t| t.is_occupied())
    }

    pub fn occupied_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_occupied()).count()
    }

    /// Indices of empty cells, ascending
    pub fn empty_cells(&self) -> Vec<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_occupied())
            .map(|(cell, _)| cell)
            .collect()
    }
}
