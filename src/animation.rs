use serde::{Deserialize, Serialize};

use crate::Orientation;

pub const MIN_SPEED: f32 = 0.05;
pub const MAX_SPEED: f32 = 20.0;

/// Per-frame angle increments, in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spin {
    pub a: f32,
    pub b: f32,
}

impl Default for Spin {
    fn default() -> Self {
        Self { a: 0.04, b: 0.02 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animator {
    a: f32,
    b: f32,
    spin: Spin,
    speed: f32,
    paused: bool,
    frame: u64,
}

impl Animator {
    pub fn new(spin: Spin) -> Self {
        Self {
            a: 0.0,
            b: 0.0,
            spin,
            speed: 1.0,
            paused: false,
            frame: 0,
        }
    }

    pub fn angles(&self) -> (f32, f32) {
        (self.a, self.b)
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::new(self.a, self.b)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = if speed.is_finite() {
            speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            1.0
        };
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Advances one frame. Angles wrap at a full turn so they never lose precision.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        self.a = (self.a + self.spin.a * self.speed) % std::f32::consts::TAU;
        self.b = (self.b + self.spin.b * self.speed) % std::f32::consts::TAU;
        self.frame += 1;
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(Spin::default())
    }
}
