//! Read-only continuous sampling of the current height field.
//!
//! [`SurfaceSampler`] is the sole surface the rendering layer consumes: it
//! borrows the current buffer for the duration of a frame and exposes the
//! grid as a continuous scalar field over normalized [0, 1]² coordinates,
//! with a finite-difference gradient for surface-normal derivation.

use crate::error::EngineError;
use crate::field::Field;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Physical size of the simulated surface in world units.
///
/// Distinct from the grid resolution: excitation distances and gradient
/// scaling are expressed in world units, the grid only in cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldExtent {
    width: f64,
    height: f64,
}

impl WorldExtent {
    /// Creates an extent, validating that both sides are positive and finite.
    pub fn new(width: f64, height: f64) -> Result<Self, EngineError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(EngineError::InvalidExtent { width, height });
        }
        Ok(Self { width, height })
    }

    /// World width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// World height.
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Borrowed, read-only view of a height field as a continuous surface.
pub struct SurfaceSampler<'a> {
    field: &'a Field,
    extent: WorldExtent,
}

impl<'a> SurfaceSampler<'a> {
    /// Creates a sampler over `field` with the given world extent.
    pub fn new(field: &'a Field, extent: WorldExtent) -> Self {
        Self { field, extent }
    }

    /// Bilinearly interpolated height at normalized coordinates `(u, v)`.
    ///
    /// Coordinates are clamped into [0, 1]; the four surrounding cells are
    /// resolved through the field's edge policy.
    pub fn height(&self, u: f64, v: f64) -> f64 {
        let gx = u.clamp(0.0, 1.0) * (self.field.width() - 1) as f64;
        let gy = v.clamp(0.0, 1.0) * (self.field.height() - 1) as f64;
        let x0 = gx.floor() as isize;
        let y0 = gy.floor() as isize;
        let fx = gx - x0 as f64;
        let fy = gy - y0 as f64;

        let h00 = self.field.get(x0, y0);
        let h10 = self.field.get(x0 + 1, y0);
        let h01 = self.field.get(x0, y0 + 1);
        let h11 = self.field.get(x0 + 1, y0 + 1);

        let top = h00 + (h10 - h00) * fx;
        let bottom = h01 + (h11 - h01) * fx;
        top + (bottom - top) * fy
    }

    /// Height gradient `(d h / d world_x, d h / d world_y)` at `(u, v)`.
    ///
    /// Uses the same 4-connected central-difference stencil as the
    /// propagation kernel, evaluated at the nearest cell and scaled by the
    /// cells-per-world-unit ratio of each axis.
    pub fn gradient(&self, u: f64, v: f64) -> DVec2 {
        let x = (u.clamp(0.0, 1.0) * (self.field.width() - 1) as f64).round() as isize;
        let y = (v.clamp(0.0, 1.0) * (self.field.height() - 1) as f64).round() as isize;

        let east = self.field.get(x + 1, y);
        let west = self.field.get(x - 1, y);
        let south = self.field.get(x, y + 1);
        let north = self.field.get(x, y - 1);

        let cells_per_unit_x = self.field.width() as f64 / self.extent.width();
        let cells_per_unit_y = self.field.height() as f64 / self.extent.height();

        DVec2::new(
            (east - west) * 0.5 * cells_per_unit_x,
            (south - north) * 0.5 * cells_per_unit_y,
        )
    }

    /// The world extent this sampler scales gradients by.
    pub fn extent(&self) -> WorldExtent {
        self.extent
    }
}
