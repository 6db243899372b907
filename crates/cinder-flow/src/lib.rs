//! Cinder Flow - time-evolving 2D force fields
//!
//! A coarse grid of unit vectors derived from seeded 3D simplex noise
//! (two spatial axes plus time), recomputed once per tick and sampled
//! with bilinear interpolation at arbitrary world positions. Effect
//! logic feeds the sampled force into particle velocities to get
//! organic, turbulent motion (smoke, embers, wisps).

pub mod field;
pub mod noise;

pub use field::{FieldSettings, VectorField};
pub use noise::SimplexNoise;
