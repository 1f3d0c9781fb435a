#![deny(unsafe_code)]
//! Session driver: named variants, tick scheduling, and input routing.
//!
//! A [`Session`] owns one ripple engine plus the pieces a host application
//! needs around it: the fixed-step [`TickClock`](clock::TickClock), the
//! optional ambient exciter that keeps the surface alive without input, and
//! the variant preset that configured them. Hosts call
//! [`Session::update`] once per frame with elapsed wall time and the
//! current pointer position (if any); everything else is internal.

pub mod clock;
#[cfg(feature = "png")]
pub mod snapshot;

use glam::DVec2;
use serde_json::Value;
use wavefield_core::error::EngineError;
use wavefield_core::field::{EdgeMode, Field};
use wavefield_core::params::{param_f64, param_usize};
use wavefield_core::sampler::{SurfaceSampler, WorldExtent};
use wavefield_core::seed::Seed;
use wavefield_core::Engine;
use wavefield_ripple::excitation::AmbientExciter;
use wavefield_ripple::seeder::SeederConfig;
use wavefield_ripple::{Ripple, RippleParams};

use clock::TickClock;

/// Re-roll period for ambient excitation, in simulated seconds.
pub const DEFAULT_AMBIENT_PERIOD: f64 = 5.0;

/// All registered variant names, in presentation order.
pub const VARIANT_NAMES: [&str; 3] = ["pond", "pool", "droplet"];

/// A named configuration preset.
struct Variant {
    width: usize,
    height: usize,
    edge_mode: EdgeMode,
    params: RippleParams,
    ambient_period: Option<f64>,
}

/// Looks up a variant preset by name.
fn variant(name: &str) -> Result<Variant, EngineError> {
    match name {
        // Calm default: toroidal surface, gentle damping, slow ambient drops.
        "pond" => Ok(Variant {
            width: 128,
            height: 128,
            edge_mode: EdgeMode::Wrap,
            params: RippleParams::default(),
            ambient_period: Some(DEFAULT_AMBIENT_PERIOD),
        }),
        // Walled basin: reflective edges, long-lived waves, input-driven only.
        "pool" => Ok(Variant {
            width: 192,
            height: 192,
            edge_mode: EdgeMode::Clamp,
            params: RippleParams {
                viscosity: 0.995,
                excitation_radius: 16.0,
                ..RippleParams::default()
            },
            ambient_period: None,
        }),
        // Busy surface: small grid, sharp strong impacts, frequent ambient.
        "droplet" => Ok(Variant {
            width: 96,
            height: 96,
            edge_mode: EdgeMode::Wrap,
            params: RippleParams {
                excitation_radius: 6.0,
                excitation_strength: 1.2,
                ..RippleParams::default()
            },
            ambient_period: Some(2.5),
        }),
        other => Err(EngineError::UnknownVariant(other.to_string())),
    }
}

/// JSON overrides applied on top of a variant's preset parameters.
fn merge_params(base: RippleParams, overrides: &Value) -> RippleParams {
    RippleParams {
        viscosity: param_f64(overrides, "viscosity", base.viscosity),
        excitation_radius: param_f64(overrides, "excitation_radius", base.excitation_radius),
        excitation_strength: param_f64(
            overrides,
            "excitation_strength",
            base.excitation_strength,
        ),
        smoothing_iterations: param_usize(
            overrides,
            "smoothing_iterations",
            base.smoothing_iterations,
        ),
    }
}

/// One running simulation: engine, clock, and input routing.
#[derive(Debug)]
pub struct Session {
    variant_name: String,
    engine: Ripple,
    clock: TickClock,
    ambient: Option<AmbientExciter>,
}

impl Session {
    /// Builds a session from a reproducible [`Seed`].
    ///
    /// The seed's `variant` selects the preset; its `params` object
    /// overrides individual tunables; its `ticks` count is replayed as a
    /// warm-up before the session is handed back, so two identical seeds
    /// yield bit-identical surfaces.
    pub fn new(seed: &Seed) -> Result<Self, EngineError> {
        seed.validate()?;
        let preset = variant(&seed.variant)?;
        let extent = WorldExtent::new(seed.world_width, seed.world_height)?;
        let params = merge_params(preset.params, &seed.params);
        let seeder = SeederConfig::from_json(&seed.params);

        let mut engine = Ripple::new(
            seed.width,
            seed.height,
            preset.edge_mode,
            extent,
            seed.seed as u32,
            &seeder,
            params,
        )?;
        for _ in 0..seed.ticks {
            engine.tick()?;
        }

        let ambient = preset
            .ambient_period
            .map(|period| AmbientExciter::new(seed.seed, period, &extent));

        Ok(Self {
            variant_name: seed.variant.clone(),
            engine,
            clock: TickClock::default(),
            ambient,
        })
    }

    /// Builds a session from a variant name at its preset resolution.
    pub fn from_name(name: &str, seed: u64) -> Result<Self, EngineError> {
        let preset = variant(name)?;
        Self::new(&Seed::new(name, preset.width, preset.height, seed))
    }

    /// The registered variant names.
    pub fn list_variants() -> &'static [&'static str] {
        &VARIANT_NAMES
    }

    /// Preset grid resolution for a variant name.
    pub fn preset_dimensions(name: &str) -> Result<(usize, usize), EngineError> {
        let preset = variant(name)?;
        Ok((preset.width, preset.height))
    }

    /// The variant this session was built from.
    pub fn variant_name(&self) -> &str {
        &self.variant_name
    }

    /// Advances the session by `dt` seconds of wall time, running however
    /// many whole ticks fall due and returning that count.
    ///
    /// A real `pointer` position takes priority; otherwise the ambient
    /// exciter (if the variant has one) supplies the target.
    pub fn update(&mut self, dt: f64, pointer: Option<DVec2>) -> Result<u32, EngineError> {
        let due = self.clock.advance(dt);
        let interval = self.clock.interval();
        let extent = self.engine.extent();
        for _ in 0..due {
            let target = match pointer {
                Some(p) => Some(p),
                None => self
                    .ambient
                    .as_mut()
                    .map(|a| a.advance(interval, &extent)),
            };
            self.engine.excite(target);
            self.engine.tick()?;
        }
        Ok(due)
    }

    /// Runs the engine's smoothing pass immediately.
    pub fn smooth(&mut self) {
        self.engine.smooth();
    }

    /// The current height field.
    pub fn height_field(&self) -> &Field {
        self.engine.height_field()
    }

    /// A sampler over the current surface.
    pub fn sampler(&self) -> SurfaceSampler<'_> {
        self.engine.sampler()
    }

    /// Current engine parameters as JSON.
    pub fn params(&self) -> Value {
        self.engine.params()
    }

    /// Replaces the engine tunables; effective from the next tick.
    pub fn set_params(&mut self, params: RippleParams) {
        self.engine.set_params(params);
    }

    /// The underlying engine.
    pub fn engine(&self) -> &Ripple {
        &self.engine
    }
}
