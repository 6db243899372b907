//! Value-over-lifetime interpolation curves

use cinder_core::Color;

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two RGBA colors
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        lerp_f32(a.r, b.r, t),
        lerp_f32(a.g, b.g, t),
        lerp_f32(a.b, b.b, t),
        lerp_f32(a.a, b.a, t),
    )
}

/// Parabolic fade: 0 at t = 0 and t = 1, peaking at 1 when t = 0.5.
/// Used for particles that fade in and back out over their life.
pub fn fade_in_out(t: f32) -> f32 {
    let x = 2.0 * t - 1.0;
    1.0 - x * x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_f32_endpoints() {
        assert!((lerp_f32(0.0, 10.0, 0.0) - 0.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 1.0) - 10.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn lerp_color_midpoint() {
        let white = Color::WHITE;
        let clear = Color::new(0.0, 0.0, 0.0, 0.0);
        let mid = lerp_color(white, clear, 0.5);
        for c in &mid.to_array() {
            assert!((*c - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn fade_curve_boundary_values() {
        assert!(fade_in_out(0.0).abs() < 1e-6);
        assert!(fade_in_out(1.0).abs() < 1e-6);
        assert!((fade_in_out(0.5) - 1.0).abs() < 1e-6);
        // Symmetric around the midpoint
        assert!((fade_in_out(0.25) - fade_in_out(0.75)).abs() < 1e-6);
    }
}
