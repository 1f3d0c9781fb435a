//! Grayscale PNG snapshots of a height field.
//!
//! Debug/inspection output only: the surface min maps to black, the max to
//! white, everything between linearly. A flat field renders mid-gray.

use std::path::Path;

use image::{GrayImage, Luma};
use wavefield_core::error::EngineError;
use wavefield_core::field::Field;

/// Writes the field as an 8-bit grayscale PNG, one pixel per cell.
pub fn write_png(field: &Field, path: &Path) -> Result<(), EngineError> {
    let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &v in field.data() {
        min = min.min(v);
        max = max.max(v);
    }
    let span = max - min;

    let img = GrayImage::from_fn(field.width() as u32, field.height() as u32, |x, y| {
        let v = field.get(x as isize, y as isize);
        let level = if span > 0.0 {
            ((v - min) / span * 255.0).round() as u8
        } else {
            128
        };
        Luma([level])
    });
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))
}
