//! Turn-based respin scheduler
//!
//! Plays a respin round tick by tick until it resolves. This is the "external
//! scheduler" side of the engine contract: it owns the loop, the engine owns
//! the state transitions.

use hf_slot::{PrizeBoard, RandomSource, RespinFeature, SlotEngine, TickOutcome};
use serde::{Deserialize, Serialize};

use crate::{Result, SimError};

/// A completed respin round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRun {
    pub ticks: Vec<TickOutcome>,
    pub prizes: PrizeBoard,
}

impl FeatureRun {
    pub fn total_win(&self) -> u64 {
        self.prizes.total()
    }

    pub fn tick_count(&self) -> u32 {
        self.ticks.len() as u32
    }
}

/// Advance `feature` until it resolves, calling `on_tick` after every tick
pub fn run_feature_with<R, F>(
    engine: &SlotEngine,
    feature: &mut RespinFeature,
    rng: &mut R,
    mut on_tick: F,
) -> Result<FeatureRun>
where
    R: RandomSource + ?Sized,
    F: FnMut(&TickOutcome, &RespinFeature),
{
    let mut ticks = Vec::new();
    while !feature.is_resolved() {
        let outcome = engine.advance(feature, rng)?;
        on_tick(&outcome, feature);
        ticks.push(outcome);
    }

    let prizes = feature.prizes().cloned().ok_or(SimError::NoActiveFeature)?;
    Ok(FeatureRun { ticks, prizes })
}

/// Advance `feature` until it resolves
pub fn run_feature<R: RandomSource + ?Sized>(
    engine: &SlotEngine,
    feature: &mut RespinFeature,
    rng: &mut R,
) -> Result<FeatureRun> {
    run_feature_with(engine, feature, rng, |_, _| {})
}
