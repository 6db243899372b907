//! Renderer handoff: packed instance data for alive particles

use bytemuck::{Pod, Zeroable};
use cinder_core::EffectId;
use cinder_particles::{BlendMode, Particle};

/// GPU instance data for one particle quad.
/// 48 bytes, three vec4 rows.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleInstance {
    /// x, y = world position, z = size, w = rotation
    pub pos_size_rot: [f32; 4],
    /// RGBA; the particle's alpha curve is folded into the A channel
    pub color: [f32; 4],
    /// x, y = velocity (for directional streak stretching under additive
    /// blending), z = render depth, w unused
    pub velocity_depth: [f32; 4],
}

impl ParticleInstance {
    pub fn from_particle(p: &Particle, depth: f32) -> Self {
        Self {
            pos_size_rot: [p.position.x, p.position.y, p.size, p.rotation],
            color: [p.color.r, p.color.g, p.color.b, p.color.a * p.alpha],
            velocity_depth: [p.velocity.x, p.velocity.y, depth, 0.0],
        }
    }
}

/// Draw data for one effect, consumed by the renderer
pub struct EffectDrawData<'a> {
    pub effect_id: EffectId,
    pub instances: &'a [ParticleInstance],
    pub blend_mode: BlendMode,
    pub depth: f32,
    pub texture: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinder_core::{Color, Vec2};

    #[test]
    fn particle_instance_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 48);
        assert_eq!(std::mem::align_of::<ParticleInstance>(), 4);
    }

    #[test]
    fn alpha_folds_into_color() {
        let mut p = Particle::dead();
        p.position = Vec2::new(1.0, 2.0);
        p.size = 3.0;
        p.color = Color::new(1.0, 0.5, 0.0, 0.8);
        p.alpha = 0.5;

        let inst = ParticleInstance::from_particle(&p, 7.0);
        assert_eq!(inst.pos_size_rot[0], 1.0);
        assert_eq!(inst.pos_size_rot[2], 3.0);
        assert!((inst.color[3] - 0.4).abs() < 1e-6);
        assert_eq!(inst.velocity_depth[2], 7.0);
    }
}
