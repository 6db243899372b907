//! Lightweight xorshift32 PRNG — no external crate needed
//!
//! All particle and noise sampling goes through this so that a driver
//! seeding it explicitly gets fully reproducible simulations.

use crate::Vec2;

pub struct Rng32 {
    state: u32,
}

impl Rng32 {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns a random angle in [0, 2pi)
    pub fn angle(&mut self) -> f32 {
        self.range(0.0, std::f32::consts::TAU)
    }

    /// Returns a random point on the unit circle
    pub fn on_unit_circle(&mut self) -> Vec2 {
        Vec2::from_angle(self.angle())
    }
}
