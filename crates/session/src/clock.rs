//! Wall-time to tick-count conversion.
//!
//! The engine advances in fixed logical ticks; callers render at whatever
//! frame rate they like. [`TickClock`] accumulates elapsed wall time and
//! reports how many whole ticks are due, carrying the remainder forward so
//! no simulated time is lost across frames.

/// Default tick rate in ticks per second.
pub const DEFAULT_TICK_RATE: f64 = 30.0;

/// Upper bound on ticks released by a single [`TickClock::advance`] call.
///
/// After a long stall (breakpoint, suspended laptop) the accumulator would
/// otherwise demand thousands of catch-up ticks in one frame; past this
/// bound the backlog is dropped instead.
pub const MAX_TICKS_PER_ADVANCE: u32 = 8;

/// Accumulating fixed-step tick scheduler.
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: f64,
    accumulator: f64,
}

impl TickClock {
    /// Creates a clock running at `ticks_per_second` (must be positive and
    /// finite; the variants all use [`DEFAULT_TICK_RATE`]).
    pub fn new(ticks_per_second: f64) -> Self {
        Self {
            interval: 1.0 / ticks_per_second,
            accumulator: 0.0,
        }
    }

    /// Seconds of simulated time per tick.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Adds `dt` seconds of elapsed wall time and returns the number of
    /// whole ticks now due, at most [`MAX_TICKS_PER_ADVANCE`]. The
    /// sub-tick remainder carries over to the next call.
    pub fn advance(&mut self, dt: f64) -> u32 {
        self.accumulator += dt.max(0.0);
        let due = (self.accumulator / self.interval) as u32;
        if due > MAX_TICKS_PER_ADVANCE {
            self.accumulator = 0.0;
            return MAX_TICKS_PER_ADVANCE;
        }
        self.accumulator -= due as f64 * self.interval;
        due
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE)
    }
}
