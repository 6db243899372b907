//! Particle state and the fixed-capacity free-list pool

use cinder_core::{Color, Vec2};

/// Full transient state of one particle.
///
/// Owned exclusively by its pool; after death all fields are stale until
/// the slot is re-claimed by a later spawn.
#[derive(Clone)]
pub struct Particle {
    pub alive: bool,
    pub age: f32,
    pub lifetime: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub start_size: f32,
    pub end_size: f32,
    pub size: f32,
    pub color: Color,
    pub alpha: f32,
}

impl Particle {
    pub fn dead() -> Self {
        Self {
            alive: false,
            age: 0.0,
            lifetime: 0.0,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            rotation: 0.0,
            rotation_speed: 0.0,
            start_size: 0.0,
            end_size: 0.0,
            size: 0.0,
            color: Color::WHITE,
            alpha: 1.0,
        }
    }

    /// Normalized age in [0, 1]
    pub fn life_ratio(&self) -> f32 {
        if self.lifetime <= 0.0 {
            1.0
        } else {
            (self.age / self.lifetime).min(1.0)
        }
    }
}

/// Fixed-capacity pool with an index free-list: O(1) spawn and release,
/// and slot indices that stay stable for a particle's whole life.
pub struct ParticlePool {
    slots: Vec<Particle>,
    free: Vec<u32>,
    alive_count: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        let slots = vec![Particle::dead(); capacity];
        // Reversed so the first spawns claim slots 0, 1, 2, ...
        let free = (0..capacity as u32).rev().collect();
        Self {
            slots,
            free,
            alive_count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// Claim a free slot, returning its index. The slot is marked alive;
    /// the caller initializes every other field. Returns None when the
    /// pool is exhausted — living particles are never evicted.
    pub fn spawn(&mut self) -> Option<usize> {
        let index = self.free.pop()? as usize;
        self.slots[index].alive = true;
        self.alive_count += 1;
        Some(index)
    }

    /// Return a slot to the free list. Releasing an already-dead slot is
    /// a caller bug; the debug assertion catches it in tests.
    pub fn release(&mut self, index: usize) {
        debug_assert!(self.slots[index].alive);
        self.slots[index].alive = false;
        self.free.push(index as u32);
        self.alive_count -= 1;
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.slots.get_mut(index)
    }

    /// Infallible mutable access to one slot; indices come from `spawn`
    /// or a scan bounded by `capacity()`.
    pub fn slot_mut(&mut self, index: usize) -> &mut Particle {
        &mut self.slots[index]
    }

    /// All slots, dead ones included — callers check `alive`.
    pub fn slots(&self) -> &[Particle] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [Particle] {
        &mut self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_spawn_and_release() {
        let mut pool = ParticlePool::new(4);
        assert_eq!(pool.alive_count(), 0);

        let a = pool.spawn().unwrap();
        let b = pool.spawn().unwrap();
        let c = pool.spawn().unwrap();
        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(pool.alive_count(), 3);

        pool.release(b);
        assert_eq!(pool.alive_count(), 2);
        assert!(!pool.get(b).unwrap().alive);

        // Freed slot is reused before the untouched one
        let d = pool.spawn().unwrap();
        assert_eq!(d, b);
    }

    #[test]
    fn pool_exhaustion_returns_none() {
        let mut pool = ParticlePool::new(2);
        assert!(pool.spawn().is_some());
        assert!(pool.spawn().is_some());
        assert!(pool.spawn().is_none());
        assert_eq!(pool.alive_count(), 2);
    }

    #[test]
    fn indices_stay_stable_across_other_releases() {
        let mut pool = ParticlePool::new(3);
        let a = pool.spawn().unwrap();
        let b = pool.spawn().unwrap();
        pool.get_mut(b).unwrap().position = Vec2::new(7.0, 8.0);

        pool.release(a);
        let p = pool.get(b).unwrap();
        assert!(p.alive);
        assert_eq!(p.position, Vec2::new(7.0, 8.0));
    }

    #[test]
    fn life_ratio_clamps() {
        let mut p = Particle::dead();
        p.lifetime = 2.0;
        p.age = 1.0;
        assert!((p.life_ratio() - 0.5).abs() < 1e-6);
        p.age = 5.0;
        assert_eq!(p.life_ratio(), 1.0);
        p.lifetime = 0.0;
        assert_eq!(p.life_ratio(), 1.0);
    }
}
