//! A coarse grid of noise-driven unit vectors with bilinear sampling

use crate::noise::SimplexNoise;
use cinder_core::{CinderError, Rect, Result, Vec2};

/// Configuration for one vector field, parsed from a `flow_field`
/// component table or built in code.
#[derive(Debug, Clone)]
pub struct FieldSettings {
    /// World-space region the grid covers
    pub bounds: Rect,
    pub grid_width: usize,
    pub grid_height: usize,
    /// Spatial frequency of the noise; higher values give busier flow
    pub noise_scale: f32,
    /// Multiplier applied to sampled vectors at query time
    pub force_magnitude: f32,
    /// How fast the field evolves over time
    pub time_speed: f32,
    /// Blend toward straight-up flow: 0 is pure turbulence, 1 is pure
    /// directional (rising smoke)
    pub upward_bias: f32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            bounds: Rect::from_bounds(0.0, 0.0, 100.0, 100.0),
            grid_width: 16,
            grid_height: 16,
            noise_scale: 0.1,
            force_magnitude: 10.0,
            time_speed: 0.5,
            upward_bias: 0.0,
        }
    }
}

impl FieldSettings {
    /// Parse FieldSettings from a TOML component table
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut settings = Self::default();

        if let Some(v) = table.get("bounds") {
            if let Some(arr) = v.as_array() {
                if arr.len() >= 4 {
                    settings.bounds = Rect::from_bounds(
                        toml_f32(&arr[0], 0.0),
                        toml_f32(&arr[1], 0.0),
                        toml_f32(&arr[2], 100.0),
                        toml_f32(&arr[3], 100.0),
                    );
                }
            }
        }
        if let Some(v) = table.get("grid_width") {
            settings.grid_width = v.as_integer().unwrap_or(16).max(2) as usize;
        }
        if let Some(v) = table.get("grid_height") {
            settings.grid_height = v.as_integer().unwrap_or(16).max(2) as usize;
        }
        if let Some(v) = table.get("noise_scale") {
            settings.noise_scale = toml_f32(v, settings.noise_scale);
        }
        if let Some(v) = table.get("force_magnitude") {
            settings.force_magnitude = toml_f32(v, settings.force_magnitude);
        }
        if let Some(v) = table.get("time_speed") {
            settings.time_speed = toml_f32(v, settings.time_speed);
        }
        if let Some(v) = table.get("upward_bias") {
            settings.upward_bias = toml_f32(v, settings.upward_bias).clamp(0.0, 1.0);
        }

        settings
    }
}

/// A time-evolving 2D force field over a coarse grid.
///
/// The whole grid is recomputed once per [`update`](Self::update) and
/// [`force_at`](Self::force_at) is a pure read, so grid resolution (not
/// particle count) bounds the per-frame noise cost.
pub struct VectorField {
    settings: FieldSettings,
    noise: SimplexNoise,
    /// Row-major grid of unit (or zero) vectors
    grid: Vec<Vec2>,
    /// World-space spacing between adjacent grid nodes
    cell_pitch: Vec2,
    time: f32,
}

impl VectorField {
    /// Build a field and compute its initial grid. Both grid dimensions
    /// must be at least 2 for the bilinear corner lookups.
    pub fn new(settings: FieldSettings, seed: u32) -> Result<Self> {
        if settings.grid_width < 2 || settings.grid_height < 2 {
            return Err(CinderError::ValidationError(format!(
                "flow field grid must be at least 2x2, got {}x{}",
                settings.grid_width, settings.grid_height
            )));
        }

        let cell_pitch = Vec2::new(
            settings.bounds.size.x / (settings.grid_width - 1) as f32,
            settings.bounds.size.y / (settings.grid_height - 1) as f32,
        );
        let grid = vec![Vec2::ZERO; settings.grid_width * settings.grid_height];

        let mut field = Self {
            noise: SimplexNoise::with_seed(seed),
            grid,
            cell_pitch,
            time: 0.0,
            settings,
        };
        field.recompute();
        Ok(field)
    }

    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// The stored vector at a grid node (for debug draws and tests)
    pub fn node(&self, x: usize, y: usize) -> Vec2 {
        self.grid[y * self.settings.grid_width + x]
    }

    /// Advance field time and recompute every grid node
    pub fn update(&mut self, dt: f32) {
        self.time += dt * self.settings.time_speed;
        self.recompute();
    }

    fn recompute(&mut self) {
        let s = &self.settings;
        for y in 0..s.grid_height {
            for x in 0..s.grid_width {
                let n = self.noise.sample(
                    x as f32 * s.noise_scale,
                    y as f32 * s.noise_scale,
                    self.time,
                );
                // Map the scalar to an angle in [0, 2pi) and blend the
                // resulting direction toward straight up
                let angle = (n * 0.5 + 0.5) * std::f32::consts::TAU;
                let turbulent = Vec2::from_angle(angle);
                let blended = Vec2::lerp(turbulent, Vec2::UP, s.upward_bias);
                self.grid[y * s.grid_width + x] = blended.normalized();
            }
        }
    }

    /// Sample the force at a world position. Positions outside the bounds
    /// clamp to the edge of the grid; the result varies smoothly as the
    /// query point moves within a cell.
    pub fn force_at(&self, position: Vec2) -> Vec2 {
        let s = &self.settings;
        let local = position - s.bounds.min;

        let fx = (local.x / self.cell_pitch.x).clamp(0.0, (s.grid_width - 1) as f32);
        let fy = (local.y / self.cell_pitch.y).clamp(0.0, (s.grid_height - 1) as f32);

        let x0 = (fx as usize).min(s.grid_width - 2);
        let y0 = (fy as usize).min(s.grid_height - 2);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let v00 = self.node(x0, y0);
        let v10 = self.node(x0 + 1, y0);
        let v01 = self.node(x0, y0 + 1);
        let v11 = self.node(x0 + 1, y0 + 1);

        let bottom = Vec2::lerp(v00, v10, tx);
        let top = Vec2::lerp(v01, v11, tx);

        Vec2::lerp(bottom, top, ty) * s.force_magnitude
    }
}

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_field(upward_bias: f32) -> VectorField {
        let settings = FieldSettings {
            bounds: Rect::from_bounds(0.0, 0.0, 30.0, 30.0),
            grid_width: 4,
            grid_height: 4,
            noise_scale: 0.3,
            force_magnitude: 2.0,
            time_speed: 1.0,
            upward_bias,
        };
        VectorField::new(settings, 42).unwrap()
    }

    #[test]
    fn rejects_degenerate_grid() {
        let settings = FieldSettings {
            grid_width: 1,
            ..Default::default()
        };
        assert!(VectorField::new(settings, 0).is_err());
    }

    #[test]
    fn nodes_are_unit_or_zero() {
        let field = small_field(0.4);
        for y in 0..4 {
            for x in 0..4 {
                let len = field.node(x, y).length();
                assert!(len < 1e-6 || (len - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn full_bias_points_straight_up() {
        let field = small_field(1.0);
        for y in 0..4 {
            for x in 0..4 {
                let v = field.node(x, y);
                assert!(v.x.abs() < 1e-5);
                assert!((v.y - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn force_scales_with_magnitude() {
        let field = small_field(1.0);
        let f = field.force_at(Vec2::new(15.0, 15.0));
        // Unit up vector times force_magnitude = 2.0
        assert!(f.x.abs() < 1e-4);
        assert!((f.y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn sampling_is_continuous_within_a_cell() {
        let field = small_field(0.0);
        // Steps of 0.1 world units inside one 10-unit cell; bilinear
        // interpolation bounds the delta by the per-cell vector difference
        // scaled by the fractional step
        let mut prev = field.force_at(Vec2::new(5.0, 5.0));
        for i in 1..50 {
            let p = Vec2::new(5.0 + i as f32 * 0.1, 5.0);
            let cur = field.force_at(p);
            let delta = (cur - prev).length();
            // max per-step delta: |v10 - v00| * (0.1 / 10) * magnitude <= 2 * 0.01 * 2
            assert!(delta <= 0.05, "discontinuous jump: {delta}");
            prev = cur;
        }
    }

    #[test]
    fn out_of_bounds_queries_clamp() {
        let field = small_field(0.5);
        let inside = field.force_at(Vec2::new(0.0, 0.0));
        let outside = field.force_at(Vec2::new(-100.0, -100.0));
        assert_eq!(inside, outside);

        let far = field.force_at(Vec2::new(1e6, 1e6));
        assert!(far.x.is_finite() && far.y.is_finite());
    }

    #[test]
    fn update_evolves_the_field() {
        let mut field = small_field(0.0);
        let before: Vec<Vec2> = (0..4)
            .flat_map(|y| (0..4).map(move |x| (x, y)))
            .map(|(x, y)| field.node(x, y))
            .collect();
        field.update(1.5);
        assert!((field.time() - 1.5).abs() < 1e-6);
        let changed = (0..4)
            .flat_map(|y| (0..4).map(move |x| (x, y)))
            .any(|(x, y)| field.node(x, y) != before[y * 4 + x]);
        assert!(changed);
    }

    #[test]
    fn same_seed_gives_identical_fields() {
        let a = small_field(0.2);
        let b = small_field(0.2);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(a.node(x, y), b.node(x, y));
            }
        }
    }

    #[test]
    fn parse_from_toml() {
        let toml_str = r#"
bounds = [0, 0, 200.0, 100]
grid_width = 8
grid_height = 6
noise_scale = 0.25
force_magnitude = 5.0
upward_bias = 1.7
"#;
        let table: toml::value::Table = toml::from_str(toml_str).unwrap();
        let settings = FieldSettings::from_toml(&table);
        assert_eq!(settings.grid_width, 8);
        assert_eq!(settings.grid_height, 6);
        assert!((settings.bounds.size.x - 200.0).abs() < 0.01);
        // Bias is clamped into [0, 1]
        assert!((settings.upward_bias - 1.0).abs() < 1e-6);
    }
}
