//! Helpers for extracting typed parameters from a `serde_json::Value` object.
//!
//! Tunables arrive as loosely typed JSON (CLI `--params`, variant presets).
//! Each helper takes the object, a key, and a default; a missing key or a
//! wrong-typed value falls back to the default. These never fail — by
//! design, parameter validation is left to caller discipline.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or
/// wrong type. JSON integers are accepted and widened.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing,
/// negative, fractional, or wrong type.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}
