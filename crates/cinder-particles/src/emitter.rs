//! The particle emitter: emission, physics integration, lifetime curves

use crate::curves::{fade_in_out, lerp_color, lerp_f32};
use crate::particle::{Particle, ParticlePool};
use crate::settings::{EmissionShape, EmitterSettings};
use cinder_core::{Rng32, Vec2};

/// Owns a fixed-capacity particle pool plus the emission and physics rules
/// for one effect instance.
///
/// All operations run synchronously on the frame-loop thread; views handed
/// out by [`particle_mut`](Self::particle_mut) are invalidated by the next
/// pool-mutating call and must not be retained across it.
pub struct ParticleEmitter {
    settings: EmitterSettings,
    pool: ParticlePool,
    /// Accumulated seconds since the last continuous emission
    emission_timer: f32,
    pub position: Vec2,
    /// When false the emitter is frozen: no emission and no aging,
    /// leaving alive particles exactly as they are.
    pub is_active: bool,
}

impl ParticleEmitter {
    pub fn new(settings: EmitterSettings) -> Self {
        let pool = ParticlePool::new(settings.max_particles);
        Self {
            settings,
            pool,
            emission_timer: 0.0,
            position: Vec2::ZERO,
            is_active: true,
        }
    }

    pub fn settings(&self) -> &EmitterSettings {
        &self.settings
    }

    pub fn alive_count(&self) -> usize {
        self.pool.alive_count()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Transient read view of one pool slot (dead slots included)
    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.pool.get(index)
    }

    /// Transient mutable view of one pool slot, for external per-particle
    /// behaviors. Prefer the hook passed to [`update_with`](Self::update_with)
    /// where possible.
    pub fn particle_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.pool.get_mut(index)
    }

    /// All pool slots for a read-only draw pass; callers check `alive`.
    pub fn particles(&self) -> &[Particle] {
        self.pool.slots()
    }

    /// Emit one particle, returning its slot index, or None when the pool
    /// is exhausted (emission is dropped, living particles stay).
    pub fn emit_and_get_index(&mut self, rng: &mut Rng32) -> Option<usize> {
        let index = self.pool.spawn()?;
        let s = &self.settings;

        let offset = match s.shape {
            EmissionShape::Point => Vec2::ZERO,
            EmissionShape::Circle { radius, edge_only } => {
                let r = if edge_only {
                    radius
                } else {
                    rng.range(0.0, radius)
                };
                rng.on_unit_circle() * r
            }
            EmissionShape::Rect { extents } => Vec2::new(
                rng.range(-extents[0], extents[0]),
                rng.range(-extents[1], extents[1]),
            ),
            EmissionShape::Line { length, angle } => {
                Vec2::from_angle(angle) * rng.range(-0.5, 0.5) * length
            }
        };

        let p = self.pool.slot_mut(index);
        p.age = 0.0;
        p.lifetime = s.lifetime.sample(rng);
        p.position = self.position + offset;
        p.velocity = Vec2::new(s.velocity_x.sample(rng), s.velocity_y.sample(rng));
        p.acceleration = Vec2::new(s.acceleration_x.sample(rng), s.acceleration_y.sample(rng));
        p.start_size = s.start_size.sample(rng);
        p.end_size = s.end_size.sample(rng);
        p.size = p.start_size;
        p.rotation = s.rotation.sample(rng);
        p.rotation_speed = s.rotation_speed.sample(rng);
        p.color = s.start_color;
        p.alpha = s.start_alpha;

        Some(index)
    }

    /// Emit one particle, discarding the index
    pub fn emit(&mut self, rng: &mut Rng32) {
        let _ = self.emit_and_get_index(rng);
    }

    /// Emit `count` particles at once, returning how many got a slot
    pub fn emit_burst(&mut self, count: usize, rng: &mut Rng32) -> usize {
        let mut emitted = 0;
        for _ in 0..count {
            if self.emit_and_get_index(rng).is_none() {
                break;
            }
            emitted += 1;
        }
        emitted
    }

    /// Advance emission and per-particle physics by `dt` seconds
    pub fn update(&mut self, dt: f32, rng: &mut Rng32) {
        self.update_with(dt, rng, |_| {});
    }

    /// Like [`update`](Self::update), with a hook invoked once per alive
    /// particle before that particle is aged and integrated. This is the
    /// extension point for external forces such as flow-field coupling.
    pub fn update_with<F>(&mut self, dt: f32, rng: &mut Rng32, mut hook: F)
    where
        F: FnMut(&mut Particle),
    {
        if !self.is_active {
            return;
        }
        let dt = dt * self.settings.time_scale;

        // Emission first, so a particle born this frame also ages and is
        // visually updated this frame.
        if self.settings.emission_rate > 0.0 {
            let interval = 1.0 / self.settings.emission_rate;
            self.emission_timer += dt;
            while self.emission_timer >= interval {
                self.emission_timer -= interval;
                self.emit(rng);
            }
        }

        for index in 0..self.pool.capacity() {
            let s = &self.settings;
            let p = self.pool.slot_mut(index);
            if !p.alive {
                continue;
            }

            hook(p);

            p.age += dt;
            if p.age >= p.lifetime {
                self.pool.release(index);
                continue;
            }
            let t = p.life_ratio();

            // Motion before appearance, so the final-frame position
            // reflects this tick's movement.
            p.velocity += (p.acceleration + s.gravity) * dt;
            if s.drag > 0.0 {
                let factor = (1.0 - s.drag * dt).max(0.0);
                p.velocity = p.velocity * factor;
            }
            p.position += p.velocity * dt;
            p.rotation += p.rotation_speed * dt;

            p.color = lerp_color(s.start_color, s.end_color, t);
            if s.interpolate_size {
                p.size = lerp_f32(p.start_size, p.end_size, t);
            }
            p.alpha = if s.alpha_fade_in_out {
                s.start_alpha * fade_in_out(t)
            } else {
                lerp_f32(s.start_alpha, s.end_alpha, t)
            };
        }
    }
}
