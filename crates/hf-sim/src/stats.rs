//! Session and run statistics

use hf_slot::{JackpotTier, PrizeBoard, SpinOutcome};
use serde::{Deserialize, Serialize};

/// Jackpot hits per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JackpotCounts {
    pub mini: u64,
    pub minor: u64,
    pub major: u64,
}

impl JackpotCounts {
    pub fn record(&mut self, tier: JackpotTier) {
        match tier {
            JackpotTier::Mini => self.mini += 1,
            JackpotTier::Minor => self.minor += 1,
            JackpotTier::Major => self.major += 1,
        }
    }

    pub fn get(&self, tier: JackpotTier) -> u64 {
        match tier {
            JackpotTier::Mini => self.mini,
            JackpotTier::Minor => self.minor,
            JackpotTier::Major => self.major,
        }
    }

    pub fn total(&self) -> u64 {
        self.mini + self.minor + self.major
    }

    fn merge(&mut self, other: &Self) {
        self.mini += other.mini;
        self.minor += other.minor;
        self.major += other.major;
    }
}

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub total_bet: u64,
    /// Line wins from base spins
    pub base_win: u64,
    /// Prize totals from respin features
    pub feature_win: u64,
    /// Base spins with a line win
    pub wins: u64,
    pub features_triggered: u64,
    pub feature_ticks: u64,
    pub jackpots: JackpotCounts,
    /// Largest single win in credits (base spin or feature)
    pub biggest_win: u64,
}

impl SessionStats {
    pub fn record_spin(&mut self, outcome: &SpinOutcome) {
        self.total_spins += 1;
        self.total_bet = self.total_bet.saturating_add(outcome.bet.credits());
        self.base_win = self.base_win.saturating_add(outcome.total_win);
        if outcome.is_win() {
            self.wins += 1;
        }
        if outcome.feature_triggered {
            self.features_triggered += 1;
        }
        self.biggest_win = self.biggest_win.max(outcome.total_win);
    }

    pub fn record_feature(&mut self, board: &PrizeBoard, ticks: u32) {
        self.feature_win = self.feature_win.saturating_add(board.total());
        self.feature_ticks += u64::from(ticks);
        for (_, tier) in board.jackpots() {
            self.jackpots.record(tier);
        }
        self.biggest_win = self.biggest_win.max(board.total());
    }

    /// Fold another run's numbers into this one
    pub fn merge(&mut self, other: &Self) {
        self.total_spins += other.total_spins;
        self.total_bet = self.total_bet.saturating_add(other.total_bet);
        self.base_win = self.base_win.saturating_add(other.base_win);
        self.feature_win = self.feature_win.saturating_add(other.feature_win);
        self.wins += other.wins;
        self.features_triggered += other.features_triggered;
        self.feature_ticks += other.feature_ticks;
        self.jackpots.merge(&other.jackpots);
        self.biggest_win = self.biggest_win.max(other.biggest_win);
    }

    pub fn total_win(&self) -> u64 {
        self.base_win.saturating_add(self.feature_win)
    }

    /// Calculate RTP (percent)
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0 {
            (self.total_win() as f64 / self.total_bet as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Share of RTP paid by base game lines (percent)
    pub fn base_rtp(&self) -> f64 {
        if self.total_bet > 0 {
            (self.base_win as f64 / self.total_bet as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Calculate hit rate (percent of base spins with a line win)
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Average base spins between feature triggers
    pub fn feature_frequency(&self) -> Option<f64> {
        (self.features_triggered > 0)
            .then(|| self.total_spins as f64 / self.features_triggered as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hf_slot::{Bet, Grid, RespinFeature, SlotEngine, Symbol};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_empty_stats() {
        let stats = SessionStats::default();
        assert_eq!(stats.rtp(), 0.0);
        assert_eq!(stats.hit_rate(), 0.0);
        assert!(stats.feature_frequency().is_none());
    }

    #[test]
    fn test_record_spin_tracks_rtp_and_hits() {
        let engine = SlotEngine::three_pigs();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut stats = SessionStats::default();
        let mut won = 0;
        let mut hits = 0;
        for _ in 0..1_000 {
            let outcome = engine.spin(Bet::new(2).unwrap(), &mut rng);
            won += outcome.total_win;
            hits += u64::from(outcome.is_win());
            stats.record_spin(&outcome);
        }
        assert_eq!(stats.total_bet, 2_000);
        assert_eq!(stats.base_win, won);
        assert_eq!(stats.wins, hits);
        assert_relative_eq!(stats.rtp(), won as f64 / 2_000.0 * 100.0);
        assert_relative_eq!(stats.hit_rate(), hits as f64 / 10.0);
    }

    #[test]
    fn test_record_feature_sums_prizes() {
        let engine = SlotEngine::three_pigs();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut stats = SessionStats::default();
        let mut expected = 0;
        for _ in 0..300 {
            let mut feature =
                RespinFeature::start(&Grid::filled(Symbol::Hold), Bet::new(1).unwrap(), 3);
            // Skipped before any tick: all straw, so jackpots are impossible
            let board = engine.skip(&mut feature, &mut rng).clone();
            expected += board.total();
            stats.record_feature(&board, feature.ticks());
        }
        assert_eq!(stats.feature_win, expected);
        assert_eq!(stats.jackpots.total(), 0);
    }

    #[test]
    fn test_merge() {
        let mut a = SessionStats {
            total_spins: 10,
            total_bet: 10,
            base_win: 4,
            wins: 2,
            biggest_win: 3,
            ..Default::default()
        };
        let b = SessionStats {
            total_spins: 5,
            total_bet: 5,
            feature_win: 20,
            features_triggered: 1,
            biggest_win: 20,
            jackpots: JackpotCounts {
                mini: 1,
                ..Default::default()
            },
            ..Default::default()
        };
        a.merge(&b);
        assert_eq!(a.total_spins, 15);
        assert_eq!(a.total_win(), 24);
        assert_eq!(a.biggest_win, 20);
        assert_eq!(a.jackpots.mini, 1);
        assert_relative_eq!(a.rtp(), 160.0);
        assert_relative_eq!(a.feature_frequency().unwrap(), 15.0);
    }
}
