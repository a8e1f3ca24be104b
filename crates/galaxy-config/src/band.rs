//! Closed numeric ranges that random parameters are sampled from.

use serde::{Deserialize, Serialize};

/// A `[min, max]` range. Sampling draws from `[min, max)`, or yields `min`
/// when the band is degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f32,
    pub max: f32,
}

impl Band {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A band symmetric around zero: `[-half_width, half_width]`.
    pub const fn symmetric(half_width: f32) -> Self {
        Self {
            min: -half_width,
            max: half_width,
        }
    }

    /// Both ends are finite and `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Largest absolute value reachable inside the band.
    pub fn magnitude(&self) -> f32 {
        self.min.abs().max(self.max.abs())
    }
}
