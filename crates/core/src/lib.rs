#![deny(unsafe_code)]
//! Core types for the wavefield height-field simulation system.
//!
//! Provides the [`Engine`] trait, the unclamped [`Field`] grid with explicit
//! edge addressing, the [`DoubleBuffer`]/[`WaveState`] pair enforcing the
//! read/write-separation invariant, the [`SurfaceSampler`] consumed by
//! renderers, the [`Xorshift64`] PRNG, the reproducible [`Seed`], and JSON
//! parameter helpers.

pub mod buffer;
pub mod engine;
pub mod error;
pub mod field;
pub mod params;
pub mod prng;
pub mod sampler;
pub mod seed;

pub use buffer::{DoubleBuffer, WaveState};
pub use engine::Engine;
pub use error::EngineError;
pub use field::{EdgeMode, Field};
pub use prng::Xorshift64;
pub use sampler::{SurfaceSampler, WorldExtent};
pub use seed::Seed;
