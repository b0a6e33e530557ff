use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::error::GeometryError;

const MIN_STEP: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusGeometry {
    /// Radius of the tube (R1).
    pub tube_radius: f32,
    /// Distance from the torus center to the tube center (R2).
    pub ring_radius: f32,
}

impl Default for TorusGeometry {
    fn default() -> Self {
        Self {
            tube_radius: 1.0,
            ring_radius: 2.0,
        }
    }
}

impl TorusGeometry {
    pub fn new(tube_radius: f32, ring_radius: f32) -> Self {
        Self {
            tube_radius,
            ring_radius,
        }
    }

    /// Largest distance of any surface point from the center.
    pub fn extent(&self) -> f32 {
        self.tube_radius + self.ring_radius
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        check_radius("tube_radius", self.tube_radius)?;
        check_radius("ring_radius", self.ring_radius)
    }

    /// Samples one surface point in object space.
    pub fn sample(&self, theta: f32, phi: f32, orientation: &Orientation) -> SurfaceSample {
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_p, cos_p) = phi.sin_cos();
        let u = orientation.ring_axis(sin_p, cos_p);
        let normal = u * cos_t + orientation.tube_axis * sin_t;
        SurfaceSample {
            theta,
            phi,
            position: u * self.ring_radius + normal * self.tube_radius,
            normal,
        }
    }
}

fn check_radius(name: &'static str, value: f32) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::RadiusNotPositive { name, value })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleSteps {
    pub theta: f32,
    pub phi: f32,
}

impl Default for SampleSteps {
    fn default() -> Self {
        Self {
            theta: 0.07,
            phi: 0.02,
        }
    }
}

impl SampleSteps {
    pub fn validate(&self) -> Result<(), GeometryError> {
        check_step("theta", self.theta)?;
        check_step("phi", self.phi)
    }

    pub fn theta_count(&self) -> usize {
        step_count(self.theta)
    }

    pub fn phi_count(&self) -> usize {
        step_count(self.phi)
    }

    pub fn total(&self) -> usize {
        self.theta_count().saturating_mul(self.phi_count())
    }

    /// Angles `0, step, 2*step, ...` strictly below a full turn.
    pub fn thetas(&self) -> impl Iterator<Item = f32> {
        angles(self.theta)
    }

    pub fn phis(&self) -> impl Iterator<Item = f32> {
        angles(self.phi)
    }
}

fn check_step(name: &'static str, value: f32) -> Result<(), GeometryError> {
    if value.is_finite() && (MIN_STEP..=TAU).contains(&value) {
        Ok(())
    } else {
        Err(GeometryError::StepOutOfRange { name, value })
    }
}

fn step_count(step: f32) -> usize {
    if !step.is_finite() || step < MIN_STEP {
        return 0;
    }
    angles(step).count()
}

fn angles(step: f32) -> impl Iterator<Item = f32> {
    let valid = step.is_finite() && step >= MIN_STEP;
    (0u32..)
        .map(move |i| i as f32 * step)
        .take_while(move |&a| valid && a < TAU)
}

/// Rotation of the torus: `a` about the X axis, `b` about the Z axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    pub a: f32,
    pub b: f32,
    sin_a: f32,
    cos_a: f32,
    sin_b: f32,
    cos_b: f32,
    tube_axis: Vec3,
}

impl Orientation {
    pub fn new(a: f32, b: f32) -> Self {
        let (sin_a, cos_a) = a.sin_cos();
        let (sin_b, cos_b) = b.sin_cos();
        Self {
            a,
            b,
            sin_a,
            cos_a,
            sin_b,
            cos_b,
            tube_axis: Vec3::new(-cos_a * sin_b, cos_a * cos_b, sin_a),
        }
    }

    pub fn sin_b(&self) -> f32 {
        self.sin_b
    }

    fn ring_axis(&self, sin_p: f32, cos_p: f32) -> Vec3 {
        Vec3::new(
            self.cos_b * cos_p + self.sin_a * self.sin_b * sin_p,
            self.sin_b * cos_p - self.sin_a * self.cos_b * sin_p,
            self.cos_a * sin_p,
        )
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSample {
    pub theta: f32,
    pub phi: f32,
    pub position: Vec3,
    pub normal: Vec3,
}
