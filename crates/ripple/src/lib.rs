#![deny(unsafe_code)]
//! Damped wave-propagation height-field engine.
//!
//! Advances a 2D height grid with the stylized second-order wave recurrence
//! (not Navier-Stokes): each tick, every cell reads its 4-connected
//! neighborhood of the frozen current buffer and writes
//! `(avg_neighbors - previous) * viscosity + excitation` into the alternate
//! buffer, then the buffers swap roles. Heights are unconstrained; extreme
//! parameters can diverge, and the explicitly triggered smoothing pass is
//! the designed manual mitigation.

pub mod excitation;
pub mod seeder;

use glam::DVec2;
use serde_json::{json, Value};
use wavefield_core::buffer::{DoubleBuffer, WaveState};
use wavefield_core::error::EngineError;
use wavefield_core::field::{EdgeMode, Field};
use wavefield_core::params::{param_f64, param_usize};
use wavefield_core::sampler::{SurfaceSampler, WorldExtent};
use wavefield_core::Engine;

use excitation::Excitation;
use seeder::SeederConfig;

/// Default damping coefficient (recommended range [0.9, 0.999]).
const DEFAULT_VISCOSITY: f64 = 0.98;
/// Default excitation radius in world units (recommended range [1, 100]).
const DEFAULT_EXCITATION_RADIUS: f64 = 10.0;
/// Default excitation strength (recommended range [0.1, 2.0]).
const DEFAULT_EXCITATION_STRENGTH: f64 = 0.5;
/// Default iteration count for one smoothing pass.
const DEFAULT_SMOOTHING_ITERATIONS: usize = 10;

/// Tunable simulation parameters.
///
/// Externally mutable at any time via [`Ripple::set_params`]; the kernel
/// reads them once per tick. Ranges are recommendations, not enforced —
/// divergence under bad values is accepted by design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleParams {
    /// Damping coefficient in [0, 1): wave-energy dissipation rate.
    pub viscosity: f64,
    /// Excitation falloff radius in world units (> 0).
    pub excitation_radius: f64,
    /// Excitation strength (>= 0); peak contribution is twice this.
    pub excitation_strength: f64,
    /// Iterations run by one [`Ripple::smooth`] call.
    pub smoothing_iterations: usize,
}

impl Default for RippleParams {
    fn default() -> Self {
        Self {
            viscosity: DEFAULT_VISCOSITY,
            excitation_radius: DEFAULT_EXCITATION_RADIUS,
            excitation_strength: DEFAULT_EXCITATION_STRENGTH,
            smoothing_iterations: DEFAULT_SMOOTHING_ITERATIONS,
        }
    }
}

impl RippleParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            viscosity: param_f64(params, "viscosity", DEFAULT_VISCOSITY),
            excitation_radius: param_f64(params, "excitation_radius", DEFAULT_EXCITATION_RADIUS),
            excitation_strength: param_f64(
                params,
                "excitation_strength",
                DEFAULT_EXCITATION_STRENGTH,
            ),
            smoothing_iterations: param_usize(
                params,
                "smoothing_iterations",
                DEFAULT_SMOOTHING_ITERATIONS,
            ),
        }
    }
}

/// The height-field wave engine.
///
/// Owns the double-buffered `(height, previous)` grid state, the per-tick
/// excitation input, and the tunables. Constructed once per session with a
/// noise-seeded initial field; destroyed with the session — no persistence.
#[derive(Debug)]
pub struct Ripple {
    buffer: DoubleBuffer,
    extent: WorldExtent,
    params: RippleParams,
    excitation: Excitation,
    ticks: u64,
}

impl Ripple {
    /// Creates an engine with a noise-seeded initial field.
    ///
    /// Both the height and previous components start at the seeded values
    /// (zero initial velocity), in both buffer regions.
    pub fn new(
        width: usize,
        height: usize,
        edge_mode: EdgeMode,
        extent: WorldExtent,
        noise_seed: u32,
        seeder: &SeederConfig,
        params: RippleParams,
    ) -> Result<Self, EngineError> {
        let field = seeder::seed_field(width, height, edge_mode, noise_seed, seeder)?;
        Ok(Self::from_field(field, extent, params))
    }

    /// Creates an engine from a pre-built height field, with zero initial
    /// velocity.
    pub fn from_field(field: Field, extent: WorldExtent, params: RippleParams) -> Self {
        Self {
            buffer: DoubleBuffer::new(WaveState::from_seeded(field)),
            extent,
            params,
            excitation: Excitation::none(),
            ticks: 0,
        }
    }

    /// Creates an engine from a JSON params object, extracting both the
    /// tick tunables and the `seed_*` seeder keys.
    pub fn from_json(
        width: usize,
        height: usize,
        edge_mode: EdgeMode,
        extent: WorldExtent,
        noise_seed: u32,
        json_params: &Value,
    ) -> Result<Self, EngineError> {
        Self::new(
            width,
            height,
            edge_mode,
            extent,
            noise_seed,
            &SeederConfig::from_json(json_params),
            RippleParams::from_json(json_params),
        )
    }

    /// The current buffer region (read-only).
    pub fn state(&self) -> &WaveState {
        self.buffer.current()
    }

    /// The world extent fixed at construction.
    pub fn extent(&self) -> WorldExtent {
        self.extent
    }

    /// Current tunables.
    pub fn ripple_params(&self) -> RippleParams {
        self.params
    }

    /// Replaces the tunables; takes effect from the next tick (last write
    /// wins).
    pub fn set_params(&mut self, params: RippleParams) {
        self.params = params;
    }

    /// Completed tick count.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Engine for Ripple {
    fn tick(&mut self) -> Result<(), EngineError> {
        let p = self.params;
        let target = self.excitation.resolve(&self.extent);

        let cur_field = self.buffer.current().height();
        let w = cur_field.width();
        let h = cur_field.height();
        let edge = cur_field.edge_mode();
        let cell_w = self.extent.width() / w as f64;
        let cell_h = self.extent.height() / h as f64;

        let (cur, alt) = self.buffer.split();
        let heights = cur.height().data();
        let previous = cur.previous().data();
        let (alt_height, alt_previous) = alt.components_mut();
        let alt_height = alt_height.data_mut();
        let alt_previous = alt_previous.data_mut();

        for y in 0..h {
            let ym = offset(y, -1, h, edge);
            let yp = offset(y, 1, h, edge);
            for x in 0..w {
                let idx = y * w + x;
                let xm = offset(x, -1, w, edge);
                let xp = offset(x, 1, w, edge);

                let neighbors =
                    heights[ym * w + x] + heights[yp * w + x] + heights[y * w + xm]
                        + heights[y * w + xp];
                let mut new_height = (0.5 * neighbors - previous[idx]) * p.viscosity;

                let px = (x as f64 + 0.5) * cell_w;
                let py = (y as f64 + 0.5) * cell_h;
                let dist = DVec2::new(px, py).distance(target);
                new_height +=
                    excitation::falloff(dist, p.excitation_radius, p.excitation_strength);

                alt_height[idx] = new_height;
                alt_previous[idx] = heights[idx];
            }
        }

        self.buffer.swap();
        // Excitation does not persist: callers re-assert it each tick.
        self.excitation.clear();
        self.ticks += 1;
        Ok(())
    }

    fn excite(&mut self, target: Option<DVec2>) {
        self.excitation.set(target);
    }

    fn smooth(&mut self) {
        for _ in 0..self.params.smoothing_iterations {
            let edge = self.buffer.current().height().edge_mode();
            let (cur, alt) = self.buffer.split();
            let (alt_height, alt_previous) = alt.components_mut();
            blur_into(cur.height(), alt_height, edge);
            blur_into(cur.previous(), alt_previous, edge);
            self.buffer.swap();
        }
    }

    fn height_field(&self) -> &Field {
        self.buffer.current().height()
    }

    fn sampler(&self) -> SurfaceSampler<'_> {
        SurfaceSampler::new(self.height_field(), self.extent)
    }

    fn params(&self) -> Value {
        json!({
            "viscosity": self.params.viscosity,
            "excitation_radius": self.params.excitation_radius,
            "excitation_strength": self.params.excitation_strength,
            "smoothing_iterations": self.params.smoothing_iterations,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "viscosity": {
                "type": "number",
                "default": DEFAULT_VISCOSITY,
                "min": 0.9,
                "max": 0.999,
                "description": "Damping coefficient: wave-energy dissipation rate"
            },
            "excitation_radius": {
                "type": "number",
                "default": DEFAULT_EXCITATION_RADIUS,
                "min": 1.0,
                "max": 100.0,
                "description": "Excitation falloff radius in world units"
            },
            "excitation_strength": {
                "type": "number",
                "default": DEFAULT_EXCITATION_STRENGTH,
                "min": 0.1,
                "max": 2.0,
                "description": "Excitation strength; peak contribution is twice this"
            },
            "smoothing_iterations": {
                "type": "integer",
                "default": DEFAULT_SMOOTHING_ITERATIONS,
                "min": 1,
                "max": 50,
                "description": "Iterations run by one smoothing pass"
            }
        })
    }
}

/// Edge-aware neighbor coordinate: `(coord + delta)` resolved along one axis.
fn offset(coord: usize, delta: isize, size: usize, edge: EdgeMode) -> usize {
    let c = coord as isize + delta;
    match edge {
        EdgeMode::Wrap => c.rem_euclid(size as isize) as usize,
        EdgeMode::Clamp => c.clamp(0, size as isize - 1) as usize,
    }
}

/// One smoothing iteration: 4-neighborhood local average written into `dst`.
///
/// Kernel weights:
/// ```text
///         1/8
///   1/8   1/2   1/8
///         1/8
/// ```
///
/// Weights sum to 1, so on a wrapped grid the field mean is preserved; a
/// single-cell spike's peak strictly decreases every iteration.
fn blur_into(src: &Field, dst: &mut Field, edge: EdgeMode) {
    let w = src.width();
    let h = src.height();
    let data = src.data();
    let out = dst.data_mut();
    for y in 0..h {
        let ym = offset(y, -1, h, edge);
        let yp = offset(y, 1, h, edge);
        for x in 0..w {
            let xm = offset(x, -1, w, edge);
            let xp = offset(x, 1, w, edge);
            let neighbors =
                data[ym * w + x] + data[yp * w + x] + data[y * w + xm] + data[y * w + xp];
            out[y * w + x] = 0.5 * data[y * w + x] + 0.125 * neighbors;
        }
    }
}
