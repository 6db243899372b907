//! Cinder Particles - pooled CPU particle simulation
//!
//! Provides per-emitter particle simulation with:
//! - Fixed-capacity pool with a free-list for O(1) spawn and stable indices
//! - Continuous rate-based emission with catch-up, plus instantaneous bursts
//! - Velocity/acceleration/gravity/drag integration per particle
//! - Size, color, and alpha curves over each particle's life
//! - A per-particle hook for external forces (e.g. flow-field coupling)

pub mod curves;
pub mod emitter;
pub mod particle;
pub mod range;
pub mod settings;

pub use emitter::ParticleEmitter;
pub use particle::{Particle, ParticlePool};
pub use range::RangedValue;
pub use settings::{BlendMode, EmissionShape, EmitterSettings};
