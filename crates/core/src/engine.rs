//! The core `Engine` trait implemented by every height-field simulation.
//!
//! The trait is object-safe so drivers can hold a `Box<dyn Engine>` and
//! switch simulation variants at runtime.

use crate::error::EngineError;
use crate::field::Field;
use crate::sampler::SurfaceSampler;
use glam::DVec2;
use serde_json::Value;

/// A tick-based height-field simulation.
///
/// One [`tick`](Engine::tick) advances the field by a fixed logical time
/// unit. Excitation input does not persist: a caller must re-assert it via
/// [`excite`](Engine::excite) before every tick it should affect.
///
/// This trait is **object-safe**: `Box<dyn Engine>` and `&dyn Engine` work.
pub trait Engine {
    /// Advances the simulation by one tick.
    ///
    /// The tick is a bounded, synchronous transformation; for a well-formed
    /// engine it is a total function over its inputs. The `Result` exists
    /// for engines with fallible backends.
    fn tick(&mut self) -> Result<(), EngineError>;

    /// Sets the excitation input for the next tick.
    ///
    /// `None` means no active excitation this tick. Calling this more than
    /// once between ticks overwrites the previous value (last write wins).
    fn excite(&mut self, target: Option<DVec2>);

    /// Runs the engine's stabilization pass over the current state.
    ///
    /// Fire-and-forget: used to recover from visible numeric instability or
    /// to manually calm the surface. Not scheduled automatically.
    fn smooth(&mut self);

    /// The current (readable) height field.
    fn height_field(&self) -> &Field;

    /// A sampler over the current height field, valid until the next tick.
    fn sampler(&self) -> SurfaceSampler<'_>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}
