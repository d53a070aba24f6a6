//! Seed and RNG stream generation

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Use the given seed, or draw one from the OS so the run can be replayed later
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(s) => s,
        None => ChaCha8Rng::from_os_rng().random(),
    }
}

/// RNG for one batch: the run seed keys the generator, the batch index picks the stream
pub fn batch_rng(seed: u64, batch: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(batch as u64);
    rng
}

/// Split `total` spins over `batches`, earlier batches taking the remainder
pub fn split_spins(total: u64, batches: usize) -> Vec<u64> {
    if batches == 0 {
        return Vec::new();
    }
    let base = total / batches as u64;
    let extra = (total % batches as u64) as usize;
    (0..batches)
        .map(|batch| base + u64::from(batch < extra))
        .collect()
}
