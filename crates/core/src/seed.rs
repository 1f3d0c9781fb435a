//! Reproducible recipe for a simulation session.
//!
//! A [`Seed`] captures everything needed to recreate a surface exactly:
//! variant name, grid resolution, world extent, parameter overrides, PRNG
//! seed, and tick count. State itself is never persisted — only the recipe.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Reproducible recipe for a height-field session.
///
/// Two identical `Seed` values fed to the same binary produce bit-identical
/// surfaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub variant: String,
    pub width: usize,
    pub height: usize,
    pub world_width: f64,
    pub world_height: f64,
    pub params: serde_json::Value,
    pub seed: u64,
    pub ticks: usize,
}

impl Seed {
    /// Creates a seed with default params (`{}`) and zero ticks.
    pub fn new(variant: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            variant: variant.to_string(),
            width,
            height,
            world_width: width as f64,
            world_height: height as f64,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            ticks: 0,
        }
    }

    /// Validates dimensions (non-zero, non-overflowing) and world extent
    /// (positive, finite).
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(EngineError::InvalidDimensions)?;
        if !(self.world_width.is_finite()
            && self.world_height.is_finite()
            && self.world_width > 0.0
            && self.world_height > 0.0)
        {
            return Err(EngineError::InvalidExtent {
                width: self.world_width,
                height: self.world_height,
            });
        }
        Ok(())
    }
}
