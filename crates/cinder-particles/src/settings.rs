//! Emitter configuration (constructible in code or parsed from TOML)

use crate::range::{toml_f32, RangedValue};
use cinder_core::{CinderError, Color, Result, Vec2};

/// Blend mode for particle rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlendMode {
    Alpha,
    Additive,
}

/// Emission shape: where a newborn particle appears relative to the
/// emitter position.
#[derive(Debug, Clone, Copy)]
pub enum EmissionShape {
    Point,
    /// Uniform angle; radius either fixed at the edge (`edge_only`) or
    /// uniform in [0, radius].
    Circle { radius: f32, edge_only: bool },
    Rect { extents: [f32; 2] },
    /// A segment of `length` centered on the emitter, rotated by `angle`
    /// radians.
    Line { length: f32, angle: f32 },
}

/// Per-effect configuration, shared read-only across every emitter
/// instance of the same effect type.
#[derive(Debug, Clone)]
pub struct EmitterSettings {
    pub max_particles: usize,
    pub shape: EmissionShape,
    /// Particles per second of continuous emission; 0 disables it
    pub emission_rate: f32,
    pub lifetime: RangedValue,
    pub velocity_x: RangedValue,
    pub velocity_y: RangedValue,
    pub acceleration_x: RangedValue,
    pub acceleration_y: RangedValue,
    pub start_size: RangedValue,
    pub end_size: RangedValue,
    /// When false, size stays at its sampled start value for the whole life
    pub interpolate_size: bool,
    pub start_color: Color,
    pub end_color: Color,
    pub start_alpha: f32,
    pub end_alpha: f32,
    /// Parabolic fade peaking at mid-life instead of a linear start→end lerp
    pub alpha_fade_in_out: bool,
    pub drag: f32,
    pub gravity: Vec2,
    pub rotation: RangedValue,
    pub rotation_speed: RangedValue,
    pub blend_mode: BlendMode,
    /// Render depth; draw groups are sorted back-to-front on this
    pub depth: f32,
    pub time_scale: f32,
    /// Opaque texture handle passed through to the renderer
    pub texture: String,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            max_particles: 64,
            shape: EmissionShape::Point,
            emission_rate: 10.0,
            lifetime: RangedValue::between(1.0, 2.0),
            velocity_x: RangedValue::between(-5.0, 5.0),
            velocity_y: RangedValue::between(-5.0, 5.0),
            acceleration_x: RangedValue::fixed(0.0),
            acceleration_y: RangedValue::fixed(0.0),
            start_size: RangedValue::fixed(1.0),
            end_size: RangedValue::fixed(0.0),
            interpolate_size: true,
            start_color: Color::WHITE,
            end_color: Color::WHITE,
            start_alpha: 1.0,
            end_alpha: 0.0,
            alpha_fade_in_out: false,
            drag: 0.0,
            gravity: Vec2::ZERO,
            rotation: RangedValue::fixed(0.0),
            rotation_speed: RangedValue::fixed(0.0),
            blend_mode: BlendMode::Alpha,
            depth: 0.0,
            time_scale: 1.0,
            texture: String::new(),
        }
    }
}

impl EmitterSettings {
    /// Up-front validation for drivers that want it; the simulation itself
    /// assumes settings are well-formed and never re-checks per frame.
    pub fn validate(&self) -> Result<()> {
        if self.max_particles == 0 {
            return Err(CinderError::ValidationError(
                "max_particles must be greater than zero".into(),
            ));
        }
        if self.emission_rate < 0.0 {
            return Err(CinderError::ValueOutOfRange {
                field: "emission_rate".into(),
                min: 0.0,
                max: f64::INFINITY,
                value: self.emission_rate as f64,
            });
        }
        Ok(())
    }

    /// Parse an EmitterSettings from a TOML component table
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut settings = Self::default();

        if let Some(v) = table.get("max_particles") {
            let n = v.as_integer().unwrap_or(64) as usize;
            settings.max_particles = n.min(10000);
        }
        if let Some(v) = table.get("emission_rate") {
            settings.emission_rate = toml_f32(v, settings.emission_rate);
        }
        if let Some(v) = table.get("lifetime") {
            settings.lifetime = RangedValue::from_toml(v, settings.lifetime);
        }
        if let Some(v) = table.get("velocity_x") {
            settings.velocity_x = RangedValue::from_toml(v, settings.velocity_x);
        }
        if let Some(v) = table.get("velocity_y") {
            settings.velocity_y = RangedValue::from_toml(v, settings.velocity_y);
        }
        if let Some(v) = table.get("acceleration_x") {
            settings.acceleration_x = RangedValue::from_toml(v, settings.acceleration_x);
        }
        if let Some(v) = table.get("acceleration_y") {
            settings.acceleration_y = RangedValue::from_toml(v, settings.acceleration_y);
        }
        if let Some(v) = table.get("start_size") {
            settings.start_size = RangedValue::from_toml(v, settings.start_size);
        }
        if let Some(v) = table.get("end_size") {
            settings.end_size = RangedValue::from_toml(v, settings.end_size);
        }
        if let Some(v) = table.get("interpolate_size") {
            settings.interpolate_size = v.as_bool().unwrap_or(true);
        }
        if let Some(v) = table.get("start_color") {
            settings.start_color = toml_color(v, settings.start_color);
        }
        if let Some(v) = table.get("end_color") {
            settings.end_color = toml_color(v, settings.end_color);
        }
        if let Some(v) = table.get("start_alpha") {
            settings.start_alpha = toml_f32(v, settings.start_alpha);
        }
        if let Some(v) = table.get("end_alpha") {
            settings.end_alpha = toml_f32(v, settings.end_alpha);
        }
        if let Some(v) = table.get("alpha_fade_in_out") {
            settings.alpha_fade_in_out = v.as_bool().unwrap_or(false);
        }
        if let Some(v) = table.get("drag") {
            settings.drag = toml_f32(v, settings.drag);
        }
        if let Some(v) = table.get("gravity") {
            settings.gravity = toml_vec2(v, settings.gravity);
        }
        if let Some(v) = table.get("rotation") {
            settings.rotation = RangedValue::from_toml(v, settings.rotation);
        }
        if let Some(v) = table.get("rotation_speed") {
            settings.rotation_speed = RangedValue::from_toml(v, settings.rotation_speed);
        }
        if let Some(v) = table.get("blend_mode") {
            settings.blend_mode = match v.as_str().unwrap_or("alpha") {
                "additive" => BlendMode::Additive,
                _ => BlendMode::Alpha,
            };
        }
        if let Some(v) = table.get("depth") {
            settings.depth = toml_f32(v, settings.depth);
        }
        if let Some(v) = table.get("time_scale") {
            settings.time_scale = toml_f32(v, settings.time_scale);
        }
        if let Some(v) = table.get("texture") {
            if let Some(s) = v.as_str() {
                settings.texture = s.to_string();
            }
        }

        // Emission shape
        let shape_str = table
            .get("shape")
            .and_then(|v| v.as_str())
            .unwrap_or("point");
        let shape_radius = table
            .get("shape_radius")
            .map(|v| toml_f32(v, 0.5))
            .unwrap_or(0.5);
        let shape_edge_only = table
            .get("shape_edge_only")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let shape_extents = table
            .get("shape_extents")
            .map(|v| toml_arr2(v, [0.5, 0.5]))
            .unwrap_or([0.5, 0.5]);
        let shape_length = table
            .get("shape_length")
            .map(|v| toml_f32(v, 1.0))
            .unwrap_or(1.0);
        let shape_angle = table
            .get("shape_angle")
            .map(|v| toml_f32(v, 0.0))
            .unwrap_or(0.0);

        settings.shape = match shape_str {
            "circle" => EmissionShape::Circle {
                radius: shape_radius,
                edge_only: shape_edge_only,
            },
            "rect" => EmissionShape::Rect {
                extents: shape_extents,
            },
            "line" => EmissionShape::Line {
                length: shape_length,
                angle: shape_angle,
            },
            _ => EmissionShape::Point,
        };

        settings
    }
}

// ── TOML helpers (integer/float coercion lives in range.rs) ──

fn toml_arr2(v: &toml::Value, default: [f32; 2]) -> [f32; 2] {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 2 {
            return [toml_f32(&arr[0], default[0]), toml_f32(&arr[1], default[1])];
        }
    }
    default
}

fn toml_vec2(v: &toml::Value, default: Vec2) -> Vec2 {
    Vec2::from_array(toml_arr2(v, default.to_array()))
}

fn toml_color(v: &toml::Value, default: Color) -> Color {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 4 {
            return Color::new(
                toml_f32(&arr[0], default.r),
                toml_f32(&arr[1], default.g),
                toml_f32(&arr[2], default.b),
                toml_f32(&arr[3], default.a),
            );
        }
    }
    default
}
