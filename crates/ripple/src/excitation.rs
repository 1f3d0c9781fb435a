//! Excitation mapping: pointer input, the "no excitation" sentinel, and the
//! ambient scheduler.
//!
//! The kernel always receives a concrete excitation point. "No excitation"
//! is represented by a sentinel far outside the world extent, where the
//! cosine falloff is uniformly zero, so the kernel stays a branch-free total
//! function over its inputs.

use glam::DVec2;
use wavefield_core::prng::Xorshift64;
use wavefield_core::sampler::WorldExtent;

/// Distance (in world units) the sentinel sits beyond the extent corner.
/// Far larger than any plausible excitation radius.
pub const SENTINEL_MARGIN: f64 = 10_000.0;

/// Cosine excitation falloff.
///
/// `(cos(clamp(dist * π / radius, 0, π)) + 1) * strength`: maximal
/// `2 * strength` at distance 0, zero at `dist >= radius`, monotonically
/// non-increasing in between.
pub fn falloff(dist: f64, radius: f64, strength: f64) -> f64 {
    ((dist * std::f64::consts::PI / radius).clamp(0.0, std::f64::consts::PI)).cos() * strength
        + strength
}

/// Per-tick excitation input.
///
/// Holds at most one target; setting it again before a tick overwrites
/// (last write wins). It does not persist: the engine clears it after every
/// tick, so a caller must re-assert it each tick to sustain excitation.
#[derive(Debug, Clone, Default)]
pub struct Excitation {
    target: Option<DVec2>,
}

impl Excitation {
    /// No active excitation.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sets (or clears) the target for the next tick.
    pub fn set(&mut self, target: Option<DVec2>) {
        self.target = target;
    }

    /// Whether a real target is active this tick.
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// Clears the target; called by the engine after each tick.
    pub fn clear(&mut self) {
        self.target = None;
    }

    /// The kernel's excitation point: the target if active, otherwise the
    /// sentinel [`SENTINEL_MARGIN`] units beyond the extent corner.
    pub fn resolve(&self, extent: &WorldExtent) -> DVec2 {
        self.target.unwrap_or_else(|| {
            DVec2::new(
                extent.width() + SENTINEL_MARGIN,
                extent.height() + SENTINEL_MARGIN,
            )
        })
    }
}

/// Substitute excitation source for ambient-animation configurations.
///
/// Re-rolls a pseudo-random in-extent target on a fixed period of simulated
/// seconds, keeping the surface visibly animated absent real input.
/// Deterministic for a fixed PRNG seed.
#[derive(Debug, Clone)]
pub struct AmbientExciter {
    rng: Xorshift64,
    period: f64,
    elapsed: f64,
    target: DVec2,
}

impl AmbientExciter {
    /// Creates an exciter with the given re-roll period in simulated seconds.
    pub fn new(seed: u64, period: f64, extent: &WorldExtent) -> Self {
        let mut rng = Xorshift64::new(seed);
        let target = roll_target(&mut rng, extent);
        Self {
            rng,
            period,
            elapsed: 0.0,
            target,
        }
    }

    /// Advances simulated time and returns the current target, re-rolling
    /// it each time a full period has elapsed.
    pub fn advance(&mut self, dt: f64, extent: &WorldExtent) -> DVec2 {
        self.elapsed += dt;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            self.target = roll_target(&mut self.rng, extent);
        }
        self.target
    }

    /// The current target without advancing time.
    pub fn target(&self) -> DVec2 {
        self.target
    }
}

fn roll_target(rng: &mut Xorshift64, extent: &WorldExtent) -> DVec2 {
    DVec2::new(
        rng.next_range(0.0, extent.width()),
        rng.next_range(0.0, extent.height()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extent() -> WorldExtent {
        WorldExtent::new(100.0, 80.0).unwrap()
    }

    // ---- falloff ----

    #[test]
    fn falloff_is_twice_strength_at_distance_zero() {
        assert!((falloff(0.0, 10.0, 0.5) - 1.0).abs() < 1e-12);
        assert!((falloff(0.0, 3.0, 2.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn falloff_is_zero_at_and_beyond_radius() {
        assert!(falloff(10.0, 10.0, 0.5).abs() < 1e-12);
        assert!(falloff(25.0, 10.0, 0.5).abs() < 1e-12);
        assert!(falloff(1e7, 10.0, 0.5).abs() < 1e-12);
    }

    #[test]
    fn falloff_is_monotonically_non_increasing() {
        let radius = 12.0;
        let strength = 0.7;
        let mut last = falloff(0.0, radius, strength);
        for i in 1..=200 {
            let d = i as f64 * 0.1;
            let v = falloff(d, radius, strength);
            assert!(
                v <= last + 1e-12,
                "falloff increased at d={d}: {v} > {last}"
            );
            last = v;
        }
    }

    #[test]
    fn falloff_is_never_negative() {
        for i in 0..500 {
            let d = i as f64 * 0.07;
            assert!(falloff(d, 9.0, 1.5) >= -1e-12);
        }
    }

    // ---- Excitation mapper ----

    #[test]
    fn inactive_excitation_resolves_to_sentinel() {
        let e = Excitation::none();
        let p = e.resolve(&extent());
        assert!(p.x >= SENTINEL_MARGIN && p.y >= SENTINEL_MARGIN);
    }

    #[test]
    fn sentinel_contribution_is_zero_everywhere_in_extent() {
        let ext = extent();
        let sentinel = Excitation::none().resolve(&ext);
        // The farthest in-extent point is still ~10000 units from the
        // sentinel, far beyond any recommended radius (<= 100).
        for &(x, y) in &[(0.0, 0.0), (100.0, 80.0), (50.0, 40.0)] {
            let dist = sentinel.distance(DVec2::new(x, y));
            assert!(falloff(dist, 100.0, 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn set_overwrites_previous_target() {
        let mut e = Excitation::none();
        e.set(Some(DVec2::new(1.0, 1.0)));
        e.set(Some(DVec2::new(7.0, 3.0)));
        assert_eq!(e.resolve(&extent()), DVec2::new(7.0, 3.0));
        e.set(None);
        assert!(!e.is_active());
    }

    #[test]
    fn clear_deactivates() {
        let mut e = Excitation::none();
        e.set(Some(DVec2::new(2.0, 2.0)));
        e.clear();
        assert!(!e.is_active());
    }

    // ---- AmbientExciter ----

    #[test]
    fn ambient_targets_are_inside_the_extent() {
        let ext = extent();
        let mut amb = AmbientExciter::new(42, 5.0, &ext);
        for _ in 0..50 {
            let t = amb.advance(5.0, &ext);
            assert!(t.x >= 0.0 && t.x < ext.width(), "x out of extent: {}", t.x);
            assert!(t.y >= 0.0 && t.y < ext.height(), "y out of extent: {}", t.y);
        }
    }

    #[test]
    fn ambient_target_is_stable_within_a_period() {
        let ext = extent();
        let mut amb = AmbientExciter::new(7, 5.0, &ext);
        let first = amb.target();
        assert_eq!(amb.advance(1.0, &ext), first);
        assert_eq!(amb.advance(3.9, &ext), first);
    }

    #[test]
    fn ambient_target_rerolls_after_the_period() {
        let ext = extent();
        let mut amb = AmbientExciter::new(7, 5.0, &ext);
        let first = amb.target();
        let next = amb.advance(5.0, &ext);
        assert_ne!(next, first, "target should re-roll once the period elapses");
    }

    #[test]
    fn ambient_schedule_is_deterministic_per_seed() {
        let ext = extent();
        let mut a = AmbientExciter::new(123, 5.0, &ext);
        let mut b = AmbientExciter::new(123, 5.0, &ext);
        for _ in 0..20 {
            assert_eq!(a.advance(2.5, &ext), b.advance(2.5, &ext));
        }
    }

    // ---- Property-based tests ----

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn falloff_bounded_by_twice_strength(
                dist in 0.0_f64..1e4,
                radius in 1.0_f64..100.0,
                strength in 0.1_f64..2.0,
            ) {
                let v = falloff(dist, radius, strength);
                prop_assert!(v >= -1e-12 && v <= 2.0 * strength + 1e-12, "v={v}");
            }

            #[test]
            fn falloff_zero_beyond_radius(
                excess in 0.0_f64..1e4,
                radius in 1.0_f64..100.0,
                strength in 0.1_f64..2.0,
            ) {
                prop_assert!(falloff(radius + excess, radius, strength).abs() < 1e-9);
            }
        }
    }
}
