use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Directional light. `direction` is the way the light travels, so surfaces facing
/// `-direction` are lit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    pub direction: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for Light {
    /// Light arriving from above and behind the viewer.
    fn default() -> Self {
        Self {
            direction: [0.0, -1.0, 1.0],
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

impl Light {
    pub fn directional(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            direction: direction.to_array(),
            color: color.to_array(),
            intensity,
        }
    }

    /// Reverse of the travel direction, keeping its length.
    pub fn to_light_raw(&self) -> Vec3 {
        -Vec3::from_array(self.direction)
    }

    pub fn to_light(&self) -> Vec3 {
        self.to_light_raw().normalize_or_zero()
    }

    pub fn radiance(&self) -> Vec3 {
        Vec3::from_array(self.color).max(Vec3::ZERO) * self.intensity.max(0.0)
    }
}
