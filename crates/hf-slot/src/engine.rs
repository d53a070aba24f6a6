//! Slot engine facade
//!
//! Holds a validated [`GameConfig`] and wires the stages together:
//! stops → grid → line evaluation → trigger check, then the respin round.
//! The engine is immutable; all round state lives in the values it returns.

use crate::config::GameConfig;
use crate::error::{ConfigError, FeatureError};
use crate::features::{PrizeBoard, RespinFeature, TickOutcome, TriggerCheck};
use crate::paytable::{Evaluation, evaluate};
use crate::rng::RandomSource;
use crate::spin::{Bet, SpinOutcome};
use crate::symbols::{Grid, ReelStops};

/// Reel, payline and respin resolution engine
#[derive(Debug, Clone)]
pub struct SlotEngine {
    config: GameConfig,
}

impl SlotEngine {
    /// Create an engine; the config is validated first
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "Slot engine ready: {} ({} paylines)",
            config.name,
            config.paylines.len()
        );
        Ok(Self { config })
    }

    /// Engine for the built-in game
    pub fn three_pigs() -> Self {
        Self {
            config: GameConfig::three_pigs(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Play one base spin
    pub fn spin<R: RandomSource + ?Sized>(&self, bet: Bet, rng: &mut R) -> SpinOutcome {
        let stops = self.config.reels.draw_stops(rng);
        self.spin_from_stops(bet, stops)
    }

    /// Resolve a base spin for known stop offsets
    pub fn spin_from_stops(&self, bet: Bet, stops: ReelStops) -> SpinOutcome {
        let grid = self.grid_from_stops(&stops);
        let evaluation = self.evaluate(&grid);
        let trigger = TriggerCheck::inspect(&grid, self.config.respin.trigger_count);
        let total_win = evaluation.total_multiplier.saturating_mul(bet.credits());

        log::debug!(
            "Spin stops {:?}: {} winning lines, win {} (x{}), holds {}",
            stops,
            evaluation.win_count(),
            total_win,
            evaluation.total_multiplier,
            trigger.hold_count
        );

        SpinOutcome {
            stops,
            grid,
            bet,
            line_wins: evaluation.line_wins,
            win_multiplier: evaluation.total_multiplier,
            total_win,
            hold_count: trigger.hold_count,
            feature_triggered: trigger.triggered,
        }
    }

    pub fn grid_from_stops(&self, stops: &ReelStops) -> Grid {
        self.config.reels.grid_at(stops)
    }

    /// Score a grid against the configured paylines
    pub fn evaluate(&self, grid: &Grid) -> Evaluation {
        evaluate(grid, &self.config.paytable, &self.config.paylines)
    }

    /// Start the respin round for a spin that triggered it
    pub fn start_feature(&self, outcome: &SpinOutcome) -> Option<RespinFeature> {
        outcome.feature_triggered.then(|| {
            RespinFeature::start(&outcome.grid, outcome.bet, self.config.respin.initial_respins)
        })
    }

    /// Advance a round by one tick
    pub fn advance<R: RandomSource + ?Sized>(
        &self,
        feature: &mut RespinFeature,
        rng: &mut R,
    ) -> Result<TickOutcome, FeatureError> {
        feature.advance(&self.config.respin, &self.config.prizes, rng)
    }

    /// Resolve a round immediately with its current tiles
    pub fn skip<'a, R: RandomSource + ?Sized>(
        &self,
        feature: &'a mut RespinFeature,
        rng: &mut R,
    ) -> &'a PrizeBoard {
        feature.skip(&self.config.prizes, rng)
    }
}

impl Default for SlotEngine {
    fn default() -> Self {
        Self::three_pigs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::RespinPhase;
    use crate::symbols::{ROWS, ReelSet, ReelStrip, Symbol};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bet(credits: u64) -> Bet {
        Bet::new(credits).unwrap()
    }

    /// Every reel shows H H K at stop 0 and K Q J at stop 2
    fn hold_heavy_engine() -> SlotEngine {
        use Symbol::*;
        let mut config = GameConfig::three_pigs();
        let strip = ReelStrip::new(vec![Hold, Hold, King, Queen, Jack]).unwrap();
        config.reels = ReelSet::new(vec![strip; 5]).unwrap();
        SlotEngine::new(config).unwrap()
    }

    #[test]
    fn test_seeded_spins_are_reproducible() {
        let engine = SlotEngine::three_pigs();
        let mut a = StdRng::seed_from_u64(12345);
        let mut b = StdRng::seed_from_u64(12345);
        for _ in 0..100 {
            assert_eq!(engine.spin(bet(1), &mut a), engine.spin(bet(1), &mut b));
        }
    }

    #[test]
    fn test_win_scales_with_bet() {
        let engine = SlotEngine::three_pigs();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let stops = engine.config().reels.draw_stops(&mut rng);
            let one = engine.spin_from_stops(bet(1), stops);
            let five = engine.spin_from_stops(bet(5), stops);
            assert_eq!(five.total_win, one.total_win * 5);
            assert_eq!(one.total_win, one.win_multiplier);
        }
    }

    #[test]
    fn test_huge_bet_saturates_win() {
        let mut config = GameConfig::three_pigs();
        let strip = ReelStrip::new(vec![Symbol::Ace]).unwrap();
        config.reels = ReelSet::new(vec![strip; 5]).unwrap();
        let engine = SlotEngine::new(config).unwrap();

        let outcome = engine.spin_from_stops(bet(u64::MAX / 10), [0; 5]);
        assert!(outcome.win_multiplier > 10);
        assert_eq!(outcome.total_win, u64::MAX);
        assert!(outcome.win_ratio() > 9.0);
    }

    #[test]
    fn test_builtin_strips_show_at_most_five_holds() {
        let engine = SlotEngine::three_pigs();
        let max_holds: usize = engine
            .config()
            .reels
            .strips()
            .iter()
            .map(|strip| {
                (0..strip.len())
                    .map(|stop| {
                        (0..ROWS)
                            .filter(|row| strip.symbol_at(stop + row) == Symbol::Hold)
                            .count()
                    })
                    .max()
                    .unwrap_or(0)
            })
            .sum();
        assert_eq!(max_holds, 5);
    }

    #[test]
    fn test_hold_stops_trigger_feature() {
        let engine = hold_heavy_engine();
        let outcome = engine.spin_from_stops(bet(2), [0, 0, 0, 2, 2]);
        assert_eq!(outcome.hold_count, 6);
        assert!(outcome.feature_triggered);

        let feature = engine.start_feature(&outcome).unwrap();
        assert_eq!(feature.phase(), RespinPhase::Seeded);
        assert_eq!(feature.occupied_count(), 6);
        assert_eq!(feature.bet(), bet(2));
        for cell in outcome.grid.positions_of(Symbol::Hold) {
            assert!(feature.tiles()[cell].is_occupied());
        }
    }

    #[test]
    fn test_five_holds_do_not_trigger() {
        let engine = hold_heavy_engine();
        // H H K on reels 0-1, K Q J on reels 2-3, H K Q on reel 4
        let outcome = engine.spin_from_stops(bet(1), [0, 0, 2, 2, 1]);
        assert_eq!(outcome.hold_count, 5);
        assert!(!outcome.feature_triggered);
    }

    #[test]
    fn test_no_feature_without_trigger() {
        let engine = SlotEngine::three_pigs();
        let outcome = engine.spin_from_stops(bet(1), [0, 0, 0, 0, 0]);
        assert!(!outcome.feature_triggered);
        assert!(engine.start_feature(&outcome).is_none());
    }

    #[test]
    fn test_feature_runs_to_resolution() {
        let engine = hold_heavy_engine();
        let outcome = engine.spin_from_stops(bet(3), [0, 0, 0, 2, 2]);
        let mut feature = engine.start_feature(&outcome).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);

        let mut ticks = 0;
        while !feature.is_resolved() {
            engine.advance(&mut feature, &mut rng).unwrap();
            ticks += 1;
            assert!(ticks < 1_000);
        }
        let board = feature.prizes().unwrap();
        assert_eq!(board.total(), feature.total_win());
        assert_eq!(board.total() % 3, 0);
        assert!(engine.advance(&mut feature, &mut rng).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::three_pigs();
        config.respin.upgrade_chance = -0.1;
        assert!(SlotEngine::new(config).is_err());
    }
}
