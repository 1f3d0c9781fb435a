//! Deterministic xorshift64 PRNG.
//!
//! Drives the ambient excitation scheduler: a fixed seed must reproduce the
//! same sequence of randomized excitation targets across runs and platforms,
//! so the generator is pure integer arithmetic with no platform-dependent
//! floating point in its core.

use serde::{Deserialize, Serialize};

/// Xorshift64 PRNG with shift parameters (13, 7, 17).
///
/// Same seed always produces the same sequence. A seed of 0 is replaced with
/// a non-zero fallback, since 0 is a fixed point of the xorshift recurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed (0 is replaced with a fallback).
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1), built from the upper 53 bits for full
    /// mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_matches_pinned_golden_value() {
        // xorshift64(seed=42, shifts=13,7,17). If this changes, ambient
        // excitation schedules from earlier runs are no longer reproducible.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_is_replaced_with_fallback() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0, "seed=0 must not yield the fixed point");
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift64::new(777);
        let mut b = Xorshift64::new(777);
        for i in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at index {i}");
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Xorshift64::new(1);
        let mut b = Xorshift64::new(2);
        assert!((0..10).any(|_| a.next_u64() != b.next_u64()));
    }

    #[test]
    fn next_f64_stays_in_unit_interval() {
        let mut rng = Xorshift64::new(12345);
        for i in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "value {v} out of range at {i}");
        }
    }

    #[test]
    fn serde_roundtrip_preserves_mid_stream_state() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for i in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64(), "diverged at {i}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_range_in_bounds_for_any_seed(
                seed: u64,
                min in -1e6_f64..1e6,
                span in 1e-3_f64..1e6,
            ) {
                let max = min + span;
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_range(min, max);
                    prop_assert!(v >= min && v < max, "{v} outside [{min}, {max})");
                }
            }

            #[test]
            fn next_f64_roughly_uniform(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                let mut buckets = [0u32; 10];
                for _ in 0..10_000 {
                    let idx = (rng.next_f64() * 10.0).min(9.0) as usize;
                    buckets[idx] += 1;
                }
                // Loose bound (expected ~1000 per bucket) to avoid flakiness.
                for (i, &count) in buckets.iter().enumerate() {
                    prop_assert!(count >= 500, "bucket {i} has {count}/10000 for seed {seed}");
                }
            }
        }
    }
}
