//! Injected random source
//!
//! Every random decision the engine makes goes through [`RandomSource`].
//! It is implemented for all [`rand::Rng`] types, so callers pass a seeded
//! `StdRng`/`ChaCha8Rng` for reproducible runs or `rand::rng()` for live play.

use rand::Rng;

/// Random draws used by the spin resolver, the respin ticks and the prize reveal
pub trait RandomSource {
    /// Uniform integer in `[0, upper)`. `upper` must be non-zero.
    fn below(&mut self, upper: usize) -> usize;

    /// Uniform integer in `[low, high]`
    fn between(&mut self, low: u32, high: u32) -> u32;

    /// Uniform real in `[0, 1)`
    fn unit(&mut self) -> f64;

    /// `true` with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn below(&mut self, upper: usize) -> usize {
        self.random_range(0..upper)
    }

    fn between(&mut self, low: u32, high: u32) -> u32 {
        self.random_range(low..=high)
    }

    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Replays queued draws; an exhausted queue falls back to the lowest value
/// (`below` → 0, `between` → `low`) and to a unit roll of 0.999.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedSource {
    below: std::collections::VecDeque<usize>,
    between: std::collections::VecDeque<u32>,
    unit: std::collections::VecDeque<f64>,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn belows(mut self, values: impl IntoIterator<Item = usize>) -> Self {
        self.below.extend(values);
        self
    }

    pub(crate) fn betweens(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.between.extend(values);
        self
    }

    pub(crate) fn units(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.unit.extend(values);
        self
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn below(&mut self, upper: usize) -> usize {
        let value = self.below.pop_front().unwrap_or(0);
        assert!(value < upper, "scripted draw {value} out of range 0..{upper}");
        value
    }

    fn between(&mut self, low: u32, high: u32) -> u32 {
        let value = self.between.pop_front().unwrap_or(low);
        assert!((low..=high).contains(&value), "scripted draw {value} out of range {low}..={high}");
        value
    }

    fn unit(&mut self) -> f64 {
        self.unit.pop_front().unwrap_or(0.999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rng_draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            assert!(rng.below(24) < 24);
            assert!((2..=10).contains(&rng.between(2, 10)));
            let u = rng.unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!((0..100).all(|_| !rng.chance(0.0)));
        assert!((0..100).all(|_| rng.chance(1.0)));
    }

    #[test]
    fn test_scripted_source_replays_then_falls_back() {
        let mut src = ScriptedSource::new().belows([3]).betweens([7]).units([0.1]);
        assert_eq!(src.below(5), 3);
        assert_eq!(src.below(5), 0);
        assert_eq!(src.between(2, 10), 7);
        assert_eq!(src.between(2, 10), 2);
        assert!(src.chance(0.45));
        assert!(!src.chance(0.45));
    }
}
