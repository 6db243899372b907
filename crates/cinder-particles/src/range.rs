//! Ranged scalar values: a fixed constant or a uniform random range

use cinder_core::Rng32;

/// Either a fixed scalar or a uniform random range, used throughout emitter
/// settings to give per-particle variance (e.g. initial speed 10..25).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangedValue {
    min: f32,
    max: f32,
}

impl RangedValue {
    /// A degenerate range that always samples to `value`
    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// A uniform range. An inverted pair is normalized so `min <= max`
    /// always holds.
    pub fn between(a: f32, b: f32) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Uniform sample in [min, max). A fixed value returns itself.
    pub fn sample(&self, rng: &mut Rng32) -> f32 {
        if self.min == self.max {
            self.min
        } else {
            rng.range(self.min, self.max)
        }
    }

    /// Parse from a TOML value: a bare number is a fixed value,
    /// a two-element array is [min, max].
    pub fn from_toml(v: &toml::Value, default: Self) -> Self {
        if let Some(arr) = v.as_array() {
            if arr.len() >= 2 {
                return Self::between(
                    toml_f32(&arr[0], default.min),
                    toml_f32(&arr[1], default.max),
                );
            }
            return default;
        }
        Self::fixed(toml_f32(v, default.min))
    }
}

impl Default for RangedValue {
    fn default() -> Self {
        Self::fixed(0.0)
    }
}

/// Coerce a TOML number (integer or float) to f32; shared by every
/// settings parser in this crate.
pub(crate) fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}
