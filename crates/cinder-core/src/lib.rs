//! Cinder Core - Foundational types for the Cinder particle engine
//!
//! This crate provides the core types that all other Cinder crates depend on:
//! - `EffectId` - Stable effect-instance identifiers
//! - `Vec2`, `Rect`, `Color` - Spatial and color types
//! - `Rng32` - Deterministic xorshift PRNG for all sampling
//! - Error types and Result alias

mod error;
mod id;
mod rand;
mod types;

pub use error::{CinderError, Result};
pub use id::EffectId;
pub use rand::Rng32;
pub use types::{Color, Rect, Vec2};
