use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Which grid axis the projection scale is fitted to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    /// Grid width only. Tall tori may spill past the top and bottom rows.
    Width,
    /// Width or height in cell units, whichever is shorter.
    #[default]
    Shorter,
}

/// Fixed viewer looking down +Z at a torus centered `distance` units away.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Distance from the eye to the torus center (K2).
    pub distance: f32,
    pub zoom: f32,
    /// Width of a character cell divided by its height.
    pub cell_aspect: f32,
    pub fit: Fit,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            distance: 5.0,
            zoom: 1.0,
            cell_aspect: 0.5,
            fit: Fit::Shorter,
        }
    }
}

impl Camera {
    pub fn new(distance: f32) -> Self {
        Self {
            distance,
            ..Self::default()
        }
    }

    pub fn validate(&self, extent: f32) -> Result<(), GeometryError> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(GeometryError::ZoomNotPositive { value: self.zoom });
        }
        if !self.distance.is_finite() || self.distance <= extent {
            return Err(GeometryError::ViewerTooClose {
                distance: self.distance,
                extent,
            });
        }
        Ok(())
    }

    pub fn to_view(&self, object_pos: Vec3) -> Vec3 {
        object_pos + Vec3::new(0.0, 0.0, self.distance)
    }

    /// Maps a view-space z onto `[0, 1]` across the torus depth range (0 = nearest).
    pub fn normalized_depth(&self, view_z: f32, extent: f32) -> f32 {
        if extent <= 0.0 {
            return 0.0;
        }
        ((view_z - self.distance + extent) / (2.0 * extent)).clamp(0.0, 1.0)
    }

    /// Builds the screen projection for a grid so that a torus of `extent` fills about
    /// three quarters of the fitted axis.
    pub fn projector(&self, width: usize, height: usize, extent: f32) -> Projector {
        let cell_aspect = if self.cell_aspect.is_finite() && self.cell_aspect > 0.0 {
            self.cell_aspect
        } else {
            0.5
        };
        let w = width as f32;
        let h = height as f32;
        let span = match self.fit {
            Fit::Width => w,
            Fit::Shorter => w.min(h / cell_aspect),
        };
        let k1 = if extent > 0.0 {
            self.zoom * span * self.distance * 3.0 / (8.0 * extent)
        } else {
            0.0
        };
        Projector {
            width,
            height,
            // whole-cell center, as odd grids put it left of and above the midpoint
            half_w: (width / 2) as f32,
            half_h: (height / 2) as f32,
            k1,
            cell_aspect,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub x: usize,
    pub y: usize,
    /// One over view-space z; larger is nearer.
    pub ooz: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    width: usize,
    height: usize,
    half_w: f32,
    half_h: f32,
    k1: f32,
    cell_aspect: f32,
}

impl Projector {
    pub fn k1(&self) -> f32 {
        self.k1
    }

    pub fn project(&self, view_pos: Vec3) -> Option<Projected> {
        if view_pos.z.is_nan() || view_pos.z <= 0.0 {
            return None;
        }
        let ooz = view_pos.z.recip();
        // Truncation toward zero, so cells just left of or above the grid round into it.
        let xp = (self.half_w + self.k1 * ooz * view_pos.x) as i64;
        let yp = (self.half_h - self.k1 * ooz * view_pos.y * self.cell_aspect) as i64;
        if xp < 0 || yp < 0 || xp >= self.width as i64 || yp >= self.height as i64 {
            return None;
        }
        Some(Projected {
            x: xp as usize,
            y: yp as usize,
            ooz,
        })
    }
}
