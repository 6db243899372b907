//! Cinder FX - the driver-facing effect layer
//!
//! Owns active effect instances (one particle emitter each, optionally
//! coupled to a flow field), advances them every frame, and packs alive
//! particles into instance buffers for an external renderer.

pub mod draw;
pub mod stage;

pub use draw::{EffectDrawData, ParticleInstance};
pub use stage::{EffectInstance, EffectStage};
