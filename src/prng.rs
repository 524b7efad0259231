//! Module J: deterministic pseudo-randomness.
//!
//! The search and curation pipeline both need randomness that is fully
//! reproducible from a seed, so runs can be replayed and tested. `rand`'s
//! seedable generators, used the same way the teacher's `grid/random.rs`
//! seeds `StdRng`, are the idiomatic choice for the actual shuffling the
//! search does; [`sine_random`] is kept alongside it for callers that only
//! need a single deterministic float from an integer and don't want to
//! carry a generator around (e.g. the per-attempt ordering perturbation).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A single deterministic float in `[0, 1)` derived from `seed`.
///
/// `x = sin(seed) * 10000; x - floor(x)`. Any stable deterministic mapping
/// from seed to float would satisfy the determinism requirement; this one
/// is cheap and needs no generator state.
pub fn sine_random(seed: u64) -> f64 {
    let x = (seed as f64).sin() * 10000.0;
    x - x.floor()
}

/// A seeded generator for callers that need a sequence of random draws
/// (shuffles, sampling) rather than a single float.
pub fn rng_for_seed(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn next_f64(seed: u64) -> f64 {
    rng_for_seed(seed).gen::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_random_is_deterministic_and_bounded() {
        crate::logging::init_logger(true);
        for seed in [0, 1, 42, 1_000_000] {
            let value = sine_random(seed);
            assert!((0.0..1.0).contains(&value));
            assert_eq!(value, sine_random(seed));
        }
    }

    #[test]
    fn same_seed_yields_same_rng_sequence() {
        let mut a = rng_for_seed(7);
        let mut b = rng_for_seed(7);
        let draws_a: Vec<f64> = (0..5).map(|_| a.gen()).collect();
        let draws_b: Vec<f64> = (0..5).map(|_| b.gen()).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn different_seeds_usually_diverge() {
        assert_ne!(next_f64(1), next_f64(2));
    }
}
