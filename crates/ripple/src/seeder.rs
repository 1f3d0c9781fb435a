//! Initial height-field seeding via layered coherent noise.
//!
//! Sums several octaves of Perlin noise per cell, amplitude decaying by
//! `persistence` while frequency grows by `lacunarity`. The octave sum is
//! normalized so the field stays within `±amplitude` even at full
//! constructive interference. Deterministic: the same noise seed and
//! configuration produce a bit-identical field on every run.

use noise::{NoiseFn, Perlin};
use wavefield_core::error::EngineError;
use wavefield_core::field::{EdgeMode, Field};
use wavefield_core::params::{param_f64, param_usize};
use serde_json::Value;

/// Default peak amplitude of the seeded field.
const DEFAULT_AMPLITUDE: f64 = 0.5;
/// Default octave count.
const DEFAULT_OCTAVES: usize = 4;
/// Default per-octave amplitude decay.
const DEFAULT_PERSISTENCE: f64 = 0.5;
/// Default per-octave frequency growth.
const DEFAULT_LACUNARITY: f64 = 2.0;
/// Default base frequency in noise-space units per cell.
const DEFAULT_FREQUENCY: f64 = 0.05;

/// Configuration for the noise field seeder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeederConfig {
    /// Peak height of the seeded field.
    pub amplitude: f64,
    /// Number of noise octaves summed per cell (observed range 2..=15).
    pub octaves: usize,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Base frequency: noise-space units per grid cell.
    pub frequency: f64,
}

impl Default for SeederConfig {
    fn default() -> Self {
        Self {
            amplitude: DEFAULT_AMPLITUDE,
            octaves: DEFAULT_OCTAVES,
            persistence: DEFAULT_PERSISTENCE,
            lacunarity: DEFAULT_LACUNARITY,
            frequency: DEFAULT_FREQUENCY,
        }
    }
}

impl SeederConfig {
    /// Extracts a configuration from a JSON object, falling back to
    /// defaults for missing keys.
    pub fn from_json(params: &Value) -> Self {
        Self {
            amplitude: param_f64(params, "seed_amplitude", DEFAULT_AMPLITUDE),
            octaves: param_usize(params, "seed_octaves", DEFAULT_OCTAVES),
            persistence: param_f64(params, "seed_persistence", DEFAULT_PERSISTENCE),
            lacunarity: param_f64(params, "seed_lacunarity", DEFAULT_LACUNARITY),
            frequency: param_f64(params, "seed_frequency", DEFAULT_FREQUENCY),
        }
    }
}

/// Produces the initial height field.
///
/// The per-cell value is a `cfg.octaves`-octave Perlin sum at coordinates
/// `(x, y) * cfg.frequency`, scaled so the maximum possible magnitude equals
/// `cfg.amplitude`.
pub fn seed_field(
    width: usize,
    height: usize,
    edge_mode: EdgeMode,
    noise_seed: u32,
    cfg: &SeederConfig,
) -> Result<Field, EngineError> {
    let mut field = Field::new(width, height, edge_mode)?;
    if cfg.octaves == 0 {
        return Ok(field);
    }

    let perlin = Perlin::new(noise_seed);

    // Sum of octave amplitudes, for normalization to ±amplitude.
    let mut total_amp = 0.0;
    let mut amp = 1.0;
    for _ in 0..cfg.octaves {
        total_amp += amp;
        amp *= cfg.persistence;
    }
    let scale = if total_amp > 0.0 {
        cfg.amplitude / total_amp
    } else {
        0.0
    };

    let data = field.data_mut();
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0;
            let mut amp = 1.0;
            let mut freq = cfg.frequency;
            for _ in 0..cfg.octaves {
                sum += perlin.get([x as f64 * freq, y as f64 * freq]) * amp;
                amp *= cfg.persistence;
                freq *= cfg.lacunarity;
            }
            data[y * width + x] = sum * scale;
        }
    }
    Ok(field)
}
