//! Two-dimensional scalar height grid with an explicit edge-addressing policy.
//!
//! A `Field` stores `width * height` f64 values in row-major layout. Values
//! are **not** clamped: heights are unconstrained floats, and divergence
//! under extreme simulation parameters is accepted rather than guarded.
//! Signed-coordinate access resolves out-of-range indices through the
//! field's [`EdgeMode`], chosen at construction and fixed for its lifetime.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// How coordinates outside the grid are resolved.
///
/// An explicit constructor-time choice because it materially affects edge
/// artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgeMode {
    /// Toroidal wrap-around: `x = -1` reads the last column. The default.
    #[default]
    Wrap,
    /// Clamp to the nearest edge cell. Suited to open, non-tiling surfaces
    /// where wrap-around ripples would be visible.
    Clamp,
}

/// A 2D scalar field of unconstrained f64 values.
#[derive(Debug, Clone)]
pub struct Field {
    width: usize,
    height: usize,
    edge_mode: EdgeMode,
    data: Vec<f64>,
}

impl Field {
    /// Creates a zero-filled field of the given dimensions.
    ///
    /// Returns `EngineError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize, edge_mode: EdgeMode) -> Result<Self, EngineError> {
        Self::filled(width, height, edge_mode, 0.0)
    }

    /// Creates a field filled with `value` (unclamped).
    ///
    /// Returns `EngineError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn filled(
        width: usize,
        height: usize,
        edge_mode: EdgeMode,
        value: f64,
    ) -> Result<Self, EngineError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            edge_mode,
            data: vec![value; len],
        })
    }

    /// Creates a field from a pre-built row-major data vector, validating
    /// that `data.len() == width * height`.
    pub fn from_data(
        width: usize,
        height: usize,
        edge_mode: EdgeMode,
        data: Vec<f64>,
    ) -> Result<Self, EngineError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(EngineError::DimensionMismatch {
                lhs_w: width,
                lhs_h: height,
                rhs_w: data.len(),
                rhs_h: 1,
            });
        }
        Ok(Self {
            width,
            height,
            edge_mode,
            data,
        })
    }

    /// Field width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The edge-addressing policy fixed at construction.
    pub fn edge_mode(&self) -> EdgeMode {
        self.edge_mode
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable access to the underlying row-major data.
    ///
    /// Kernel hot paths write through this directly rather than paying
    /// per-cell coordinate resolution.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Resolves a signed coordinate to an in-range index along one axis.
    fn resolve(&self, coord: isize, size: usize) -> usize {
        match self.edge_mode {
            EdgeMode::Wrap => coord.rem_euclid(size as isize) as usize,
            EdgeMode::Clamp => coord.clamp(0, size as isize - 1) as usize,
        }
    }

    /// Converts signed coordinates to a flat index via the edge policy.
    fn index(&self, x: isize, y: isize) -> usize {
        let xi = self.resolve(x, self.width);
        let yi = self.resolve(y, self.height);
        yi * self.width + xi
    }

    /// Gets the value at `(x, y)`, resolving out-of-range coordinates
    /// through the edge policy.
    pub fn get(&self, x: isize, y: isize) -> f64 {
        self.data[self.index(x, y)]
    }

    /// Sets the value at `(x, y)` (unclamped), resolving out-of-range
    /// coordinates through the edge policy.
    pub fn set(&mut self, x: isize, y: isize, value: f64) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Overwrites every cell with `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Largest absolute value in the field, 0.0 for the all-zero field.
    ///
    /// Used by stability checks: under the damped wave recurrence with
    /// viscosity < 1 and no excitation, this is non-increasing.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize, EngineError> {
    if width == 0 || height == 0 {
        return Err(EngineError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .ok_or(EngineError::InvalidDimensions)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Construction ----

    #[test]
    fn new_creates_zero_filled_field() {
        let field = Field::new(4, 3, EdgeMode::Wrap).unwrap();
        assert_eq!(field.width(), 4);
        assert_eq!(field.height(), 3);
        assert_eq!(field.data().len(), 12);
        assert!(field.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(Field::new(0, 5, EdgeMode::Wrap).is_err());
        assert!(Field::new(5, 0, EdgeMode::Wrap).is_err());
        assert!(Field::new(0, 0, EdgeMode::Clamp).is_err());
    }

    #[test]
    fn overflow_dimensions_are_rejected() {
        assert!(Field::new(usize::MAX, 2, EdgeMode::Wrap).is_err());
        assert!(Field::filled(2, usize::MAX, EdgeMode::Wrap, 1.0).is_err());
    }

    #[test]
    fn filled_does_not_clamp_values() {
        // Heights are unconstrained: values far outside [0, 1] survive.
        let field = Field::filled(2, 2, EdgeMode::Wrap, -37.5).unwrap();
        assert!(field.data().iter().all(|&v| v == -37.5));
    }

    #[test]
    fn from_data_creates_field_from_vec() {
        let field =
            Field::from_data(3, 2, EdgeMode::Clamp, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap();
        assert_eq!(field.width(), 3);
        assert_eq!(field.height(), 2);
        assert!((field.get(2, 1) - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn from_data_rejects_wrong_length() {
        assert!(Field::from_data(2, 2, EdgeMode::Wrap, vec![0.1, 0.2, 0.3]).is_err());
        assert!(Field::from_data(0, 5, EdgeMode::Wrap, vec![]).is_err());
    }

    // ---- get/set ----

    #[test]
    fn get_after_set_returns_exact_value() {
        let mut field = Field::new(4, 4, EdgeMode::Wrap).unwrap();
        field.set(2, 3, 1234.5);
        assert!((field.get(2, 3) - 1234.5).abs() < f64::EPSILON);
    }

    #[test]
    fn set_does_not_clamp_value() {
        let mut field = Field::new(2, 2, EdgeMode::Wrap).unwrap();
        field.set(0, 0, 2.5);
        field.set(1, 1, -0.5);
        assert!((field.get(0, 0) - 2.5).abs() < f64::EPSILON);
        assert!((field.get(1, 1) + 0.5).abs() < f64::EPSILON);
    }

    // ---- Wrap addressing ----

    #[test]
    fn wrap_resolves_negative_coordinates() {
        let mut field = Field::new(4, 4, EdgeMode::Wrap).unwrap();
        field.set(3, 3, 0.8);
        assert!((field.get(-1, -1) - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn wrap_resolves_overflowing_coordinates() {
        let mut field = Field::new(4, 4, EdgeMode::Wrap).unwrap();
        field.set(1, 2, 0.3);
        assert!((field.get(5, 6) - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn wrap_set_with_large_negative_coordinates() {
        let mut field = Field::new(4, 4, EdgeMode::Wrap).unwrap();
        // -5 rem_euclid 4 = 3, -9 rem_euclid 4 = 3
        field.set(-5, -9, 0.33);
        assert!((field.get(3, 3) - 0.33).abs() < f64::EPSILON);
    }

    // ---- Clamp addressing ----

    #[test]
    fn clamp_resolves_negative_to_first_cell() {
        let mut field = Field::new(4, 4, EdgeMode::Clamp).unwrap();
        field.set(0, 0, 0.9);
        assert!((field.get(-3, -100) - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn clamp_resolves_overflow_to_last_cell() {
        let mut field = Field::new(4, 4, EdgeMode::Clamp).unwrap();
        field.set(3, 3, 0.7);
        assert!((field.get(4, 999) - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn clamp_and_wrap_agree_in_range() {
        let mut wrap = Field::new(3, 3, EdgeMode::Wrap).unwrap();
        let mut clamp = Field::new(3, 3, EdgeMode::Clamp).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                let v = (y * 3 + x) as f64;
                wrap.set(x, y, v);
                clamp.set(x, y, v);
            }
        }
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(wrap.get(x, y).to_bits(), clamp.get(x, y).to_bits());
            }
        }
    }

    // ---- fill / max_abs ----

    #[test]
    fn fill_overwrites_every_cell() {
        let mut field = Field::filled(3, 3, EdgeMode::Wrap, 5.0).unwrap();
        field.fill(-1.0);
        assert!(field.data().iter().all(|&v| v == -1.0));
    }

    #[test]
    fn max_abs_finds_largest_magnitude() {
        let mut field = Field::new(3, 3, EdgeMode::Wrap).unwrap();
        field.set(1, 1, -7.0);
        field.set(2, 2, 3.0);
        assert!((field.max_abs() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn max_abs_of_zero_field_is_zero() {
        let field = Field::new(5, 5, EdgeMode::Clamp).unwrap();
        assert_eq!(field.max_abs(), 0.0);
    }

    // ---- data_mut / clone ----

    #[test]
    fn data_mut_allows_direct_write() {
        let mut field = Field::new(2, 2, EdgeMode::Wrap).unwrap();
        field.data_mut()[3] = 0.42;
        assert!((field.get(1, 1) - 0.42).abs() < f64::EPSILON);
    }

    #[test]
    fn clone_produces_independent_copy() {
        let mut original = Field::new(3, 3, EdgeMode::Wrap).unwrap();
        original.set(1, 1, 0.5);
        let clone = original.clone();
        original.set(1, 1, 0.9);
        assert!((clone.get(1, 1) - 0.5).abs() < f64::EPSILON);
        assert_eq!(clone.edge_mode(), EdgeMode::Wrap);
    }

    // ---- Property-based tests ----

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn dimension() -> impl Strategy<Value = usize> {
            1_usize..=64
        }

        fn any_coord() -> impl Strategy<Value = isize> {
            -1000_isize..=1000
        }

        fn any_value() -> impl Strategy<Value = f64> {
            (-1e9_f64..1e9).prop_filter("must not be NaN", |v| !v.is_nan())
        }

        proptest! {
            #[test]
            fn get_after_set_is_identity_unclamped(
                w in dimension(),
                h in dimension(),
                x in any_coord(),
                y in any_coord(),
                v in any_value(),
            ) {
                let mut field = Field::new(w, h, EdgeMode::Wrap).unwrap();
                field.set(x, y, v);
                prop_assert_eq!(field.get(x, y).to_bits(), v.to_bits());
            }

            #[test]
            fn wrap_is_periodic_in_both_axes(
                w in dimension(),
                h in dimension(),
                x in any_coord(),
                y in any_coord(),
                v in any_value(),
            ) {
                let mut field = Field::new(w, h, EdgeMode::Wrap).unwrap();
                field.set(x, y, v);
                let (iw, ih) = (w as isize, h as isize);
                prop_assert_eq!(
                    field.get(x, y).to_bits(),
                    field.get(x + iw, y + ih).to_bits()
                );
            }

            #[test]
            fn clamp_never_reads_outside_the_grid(
                w in dimension(),
                h in dimension(),
                x in any_coord(),
                y in any_coord(),
            ) {
                // Mark the whole interior; every resolved read must land on a
                // marked cell.
                let field = Field::filled(w, h, EdgeMode::Clamp, 1.0).unwrap();
                prop_assert_eq!(field.get(x, y).to_bits(), 1.0_f64.to_bits());
            }
        }
    }
}
