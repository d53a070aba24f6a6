//! Player session
//!
//! Balance and bet bookkeeping around the engine. A session debits the bet,
//! credits line wins, holds the active respin round between ticks and credits
//! its prizes when it resolves. The engine itself never touches balance.

use hf_slot::{Bet, RandomSource, RespinFeature, SlotEngine, SpinOutcome, TickOutcome};
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::scheduler::{FeatureRun, run_feature};
use crate::stats::SessionStats;
use crate::{Result, SimError};

/// What one [`Session::step`] did
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A base spin was played
    Spin(SpinOutcome),
    /// A respin tick was played; `feature_win` is set on the tick that resolved the round
    Tick {
        outcome: TickOutcome,
        feature_win: Option<u64>,
    },
}

/// One player's session
#[derive(Debug, Clone)]
pub struct Session {
    engine: SlotEngine,
    config: SimConfig,
    balance: u64,
    bet: Bet,
    last_win: u64,
    feature: Option<RespinFeature>,
    stats: SessionStats,
}

impl Session {
    pub fn new(engine: SlotEngine, config: SimConfig) -> Result<Self> {
        config.validate()?;
        let bet = Bet::new(config.clamp_bet(config.bet))?;
        Ok(Self {
            engine,
            balance: config.starting_balance,
            config,
            bet,
            last_win: 0,
            feature: None,
            stats: SessionStats::default(),
        })
    }

    pub fn engine(&self) -> &SlotEngine {
        &self.engine
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn bet(&self) -> Bet {
        self.bet
    }

    /// Win of the last spin or of the last resolved feature
    pub fn last_win(&self) -> u64 {
        self.last_win
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Respin round waiting for ticks, if any
    pub fn feature(&self) -> Option<&RespinFeature> {
        self.feature.as_ref()
    }

    pub fn in_feature(&self) -> bool {
        self.feature.is_some()
    }

    pub fn can_spin(&self) -> bool {
        !self.in_feature() && self.balance >= self.bet.credits()
    }

    /// Change the bet, clamped to the configured limits
    pub fn set_bet(&mut self, credits: u64) -> Result<Bet> {
        if self.in_feature() {
            return Err(SimError::FeatureActive);
        }
        self.bet = Bet::new(self.config.clamp_bet(credits))?;
        Ok(self.bet)
    }

    pub fn bet_up(&mut self) -> Result<Bet> {
        self.set_bet(self.bet.credits().saturating_add(1))
    }

    pub fn bet_down(&mut self) -> Result<Bet> {
        self.set_bet(self.bet.credits().saturating_sub(1))
    }

    /// Debit the bet, play a base spin, credit its line win and start the
    /// respin round if it triggered
    pub fn spin<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<SpinOutcome> {
        if self.in_feature() {
            return Err(SimError::FeatureActive);
        }
        let stake = self.bet.credits();
        if self.balance < stake {
            return Err(SimError::InsufficientBalance {
                balance: self.balance,
                bet: stake,
            });
        }

        self.balance -= stake;
        let outcome = self.engine.spin(self.bet, rng);
        self.balance = self.balance.saturating_add(outcome.total_win);
        self.last_win = outcome.total_win;
        self.stats.record_spin(&outcome);
        self.feature = self.engine.start_feature(&outcome);

        log::debug!(
            "Spin: bet {}, win {}, balance {}{}",
            stake,
            outcome.total_win,
            self.balance,
            if outcome.feature_triggered { ", respins triggered" } else { "" }
        );
        Ok(outcome)
    }

    /// Play one respin tick; credits the prizes when the round resolves
    pub fn tick<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<TickOutcome> {
        let feature = self.feature.as_mut().ok_or(SimError::NoActiveFeature)?;
        let outcome = self.engine.advance(feature, rng)?;
        if outcome.resolved {
            self.settle_feature();
        }
        Ok(outcome)
    }

    /// Resolve the active round immediately and credit it
    pub fn skip_feature<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<u64> {
        let feature = self.feature.as_mut().ok_or(SimError::NoActiveFeature)?;
        self.engine.skip(feature, rng);
        Ok(self.settle_feature())
    }

    /// Play the active round to the end and credit it
    pub fn finish_feature<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<FeatureRun> {
        let feature = self.feature.as_mut().ok_or(SimError::NoActiveFeature)?;
        let run = run_feature(&self.engine, feature, rng)?;
        self.settle_feature();
        Ok(run)
    }

    /// Tick the active round if there is one, otherwise play a base spin
    pub fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<SessionEvent> {
        if self.in_feature() {
            let outcome = self.tick(rng)?;
            let feature_win = outcome.resolved.then_some(self.last_win);
            Ok(SessionEvent::Tick {
                outcome,
                feature_win,
            })
        } else {
            self.spin(rng).map(SessionEvent::Spin)
        }
    }

    fn settle_feature(&mut self) -> u64 {
        let Some(feature) = self.feature.take() else {
            return 0;
        };
        let win = feature.total_win();
        if let Some(board) = feature.prizes() {
            self.stats.record_feature(board, feature.ticks());
        }
        self.balance = self.balance.saturating_add(win);
        self.last_win = win;
        log::info!(
            "Respin feature paid {} after {} ticks, balance {}",
            win,
            feature.ticks(),
            self.balance
        );
        win
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_slot::{GameConfig, ReelSet, ReelStrip, Symbol};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session() -> Session {
        Session::new(SlotEngine::three_pigs(), SimConfig::default()).unwrap()
    }

    /// Every stop shows at least six HOLD symbols
    fn hold_session() -> Session {
        let mut game = GameConfig::three_pigs();
        let strip = ReelStrip::new(vec![Symbol::Hold, Symbol::Hold, Symbol::Ace]).unwrap();
        game.reels = ReelSet::new(vec![strip; 5]).unwrap();
        Session::new(SlotEngine::new(game).unwrap(), SimConfig::default()).unwrap()
    }

    #[test]
    fn test_new_session_defaults() {
        let session = session();
        assert_eq!(session.balance(), 1000);
        assert_eq!(session.bet().credits(), 1);
        assert!(session.can_spin());
    }

    #[test]
    fn test_bet_limits() {
        let mut session = session();
        assert_eq!(session.set_bet(500).unwrap().credits(), 50);
        assert_eq!(session.bet_up().unwrap().credits(), 50);
        assert_eq!(session.set_bet(0).unwrap().credits(), 1);
        assert_eq!(session.bet_down().unwrap().credits(), 1);
        assert_eq!(session.bet_up().unwrap().credits(), 2);
    }

    #[test]
    fn test_spin_debits_and_credits() {
        let mut session = session();
        session.set_bet(5).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut expected = 1000;
        for _ in 0..50 {
            let outcome = session.spin(&mut rng).unwrap();
            expected = expected - 5 + outcome.total_win;
            assert_eq!(session.balance(), expected);
            assert_eq!(session.last_win(), outcome.total_win);
        }
        assert_eq!(session.stats().total_spins, 50);
        assert_eq!(session.stats().total_bet, 250);
    }

    #[test]
    fn test_spin_refused_when_balance_short() {
        let config = SimConfig::default().with_starting_balance(3).with_bet(5);
        let mut session = Session::new(SlotEngine::three_pigs(), config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert!(!session.can_spin());
        let err = session.spin(&mut rng).unwrap_err();
        assert!(matches!(err, SimError::InsufficientBalance { balance: 3, bet: 5 }));
        assert_eq!(session.balance(), 3);
        assert_eq!(session.stats().total_spins, 0);
    }

    #[test]
    fn test_feature_blocks_spins_until_settled() {
        let mut session = hold_session();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let outcome = session.spin(&mut rng).unwrap();
        assert!(outcome.feature_triggered);
        assert!(session.in_feature());
        assert!(matches!(session.spin(&mut rng), Err(SimError::FeatureActive)));
        assert!(matches!(session.set_bet(3), Err(SimError::FeatureActive)));

        let before = session.balance();
        let mut last = None;
        while session.in_feature() {
            last = Some(session.tick(&mut rng).unwrap());
        }
        assert!(last.unwrap().resolved);
        assert_eq!(session.balance(), before + session.last_win());
        assert_eq!(session.stats().feature_win, session.last_win());
        assert!(matches!(session.tick(&mut rng), Err(SimError::NoActiveFeature)));
    }

    #[test]
    fn test_skip_and_finish_credit_feature() {
        let mut session = hold_session();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        session.spin(&mut rng).unwrap();
        let before = session.balance();
        let win = session.skip_feature(&mut rng).unwrap();
        assert!(win > 0);
        assert_eq!(session.balance(), before + win);

        session.spin(&mut rng).unwrap();
        let before = session.balance();
        let run = session.finish_feature(&mut rng).unwrap();
        assert_eq!(session.balance(), before + run.total_win());
        assert!(!session.in_feature());
        assert_eq!(session.stats().features_triggered, 2);
    }

    #[test]
    fn test_step_alternates_spin_and_ticks() {
        let mut session = hold_session();
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        assert!(matches!(session.step(&mut rng).unwrap(), SessionEvent::Spin(_)));
        loop {
            match session.step(&mut rng).unwrap() {
                SessionEvent::Tick {
                    feature_win: Some(win),
                    ..
                } => {
                    assert_eq!(win, session.last_win());
                    break;
                }
                SessionEvent::Tick { .. } => {}
                SessionEvent::Spin(_) => panic!("spin while a feature was active"),
            }
        }
        assert!(matches!(session.step(&mut rng).unwrap(), SessionEvent::Spin(_)));
    }
}
