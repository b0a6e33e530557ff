use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{types::Rgb8, Light, Orientation};

/// Everything a shader sees about one surface point.
#[derive(Clone, Copy, Debug)]
pub struct ShadeInput {
    pub view_pos: Vec3,
    pub normal: Vec3,
    /// Normalized depth across the torus, 0 = nearest.
    pub depth: f32,
    /// Surface parameters of the point: angle around the tube and around the ring.
    pub theta: f32,
    pub phi: f32,
    pub orientation: Orientation,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadeSample {
    pub intensity: f32,
    pub rgb: Vec3,
}

pub trait Shader {
    /// Returns `None` when the point must not be plotted at all. Such points also leave the
    /// depth buffer untouched.
    fn shade(&self, input: &ShadeInput) -> Option<ShadeSample>;
}

fn luma(rgb: Vec3) -> f32 {
    0.2126 * rgb.x + 0.7152 * rgb.y + 0.0722 * rgb.z
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaderId {
    #[default]
    Classic,
    #[serde(alias = "depth")]
    DepthBlend,
    Phong,
}

impl fmt::Display for ShaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderId::Classic => "classic",
            ShaderId::DepthBlend => "depthblend",
            ShaderId::Phong => "phong",
        })
    }
}

impl FromStr for ShaderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" | "lambert" => Ok(ShaderId::Classic),
            "depthblend" | "depth-blend" | "depth" => Ok(ShaderId::DepthBlend),
            "phong" => Ok(ShaderId::Phong),
            _ => Err(format!("invalid shader: {s}")),
        }
    }
}

/// `N . L` against an unnormalized light vector, scaled so that a twelve glyph ramp lands
/// on `trunc(8 * L)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassicShader {
    pub light: Light,
}

impl Shader for ClassicShader {
    fn shade(&self, input: &ShadeInput) -> Option<ShadeSample> {
        let l = input.normal.dot(self.light.to_light_raw());
        if l <= 0.0 {
            return None;
        }
        let t = (l * 8.0 / 11.0).clamp(0.0, 1.0);
        Some(ShadeSample {
            intensity: t,
            rgb: Vec3::splat(t),
        })
    }
}

/// Luminance `cosθ·cosφ·sinB − N.z + bias`, blended with depth. The light sits behind the
/// viewer, with an extra sweep term that grows with the B rotation. The scene light is
/// ignored.
#[derive(Clone, Copy, Debug)]
pub struct DepthBlendShader {
    pub bias: f32,
    pub light_weight: f32,
    pub depth_weight: f32,
}

impl Default for DepthBlendShader {
    fn default() -> Self {
        Self {
            bias: 0.5,
            light_weight: 0.7,
            depth_weight: 0.3,
        }
    }
}

impl Shader for DepthBlendShader {
    fn shade(&self, input: &ShadeInput) -> Option<ShadeSample> {
        let sweep = input.theta.cos() * input.phi.cos() * input.orientation.sin_b();
        let l = sweep - input.normal.z + self.bias;
        if l <= 0.0 {
            return None;
        }
        let t = (l * self.light_weight + input.depth * self.depth_weight).clamp(0.0, 1.0);
        Some(ShadeSample {
            intensity: t,
            rgb: Vec3::splat(t),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhongParams {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
    pub base_color: Rgb8,
}

impl Default for PhongParams {
    fn default() -> Self {
        Self {
            ambient: 0.1,
            diffuse: 0.7,
            specular: 0.6,
            shininess: 32.0,
            base_color: Rgb8::new(230, 160, 80),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PhongShader {
    pub light: Light,
    pub params: PhongParams,
}

fn view_dir_from_view_pos(view_pos: Vec3) -> Vec3 {
    let v = (-view_pos).normalize_or_zero();
    if v.length_squared() > 0.0 {
        v
    } else {
        Vec3::new(0.0, 0.0, -1.0)
    }
}

impl Shader for PhongShader {
    fn shade(&self, input: &ShadeInput) -> Option<ShadeSample> {
        let p = &self.params;
        let n = input.normal.normalize_or_zero();
        let l = self.light.to_light();
        let v = view_dir_from_view_pos(input.view_pos);
        let radiance = self.light.radiance();

        let ndotl = n.dot(l).max(0.0);
        let spec = if ndotl > 0.0 && p.specular > 0.0 {
            let r = 2.0 * n.dot(l) * n - l;
            r.dot(v).max(0.0).powf(p.shininess.max(1.0))
        } else {
            0.0
        };

        let ambient = p.ambient.max(0.0);
        let diffuse = p.diffuse.max(0.0) * ndotl;
        let specular = p.specular.max(0.0) * spec;

        let intensity = (ambient + (diffuse + specular) * luma(radiance)).clamp(0.0, 1.0);
        let base = p.base_color.to_unit();
        let rgb = base * (Vec3::splat(ambient) + radiance * diffuse) + radiance * specular;
        Some(ShadeSample { intensity, rgb })
    }
}

#[derive(Clone, Copy, Debug)]
pub enum BuiltinShader {
    Classic(ClassicShader),
    DepthBlend(DepthBlendShader),
    Phong(PhongShader),
}

impl BuiltinShader {
    pub fn new(id: ShaderId, light: Light, phong: PhongParams) -> Self {
        match id {
            ShaderId::Classic => BuiltinShader::Classic(ClassicShader { light }),
            ShaderId::DepthBlend => BuiltinShader::DepthBlend(DepthBlendShader::default()),
            ShaderId::Phong => BuiltinShader::Phong(PhongShader {
                light,
                params: phong,
            }),
        }
    }

    pub fn from_id(id: ShaderId) -> Self {
        Self::new(id, Light::default(), PhongParams::default())
    }

    pub fn id(&self) -> ShaderId {
        match self {
            BuiltinShader::Classic(_) => ShaderId::Classic,
            BuiltinShader::DepthBlend(_) => ShaderId::DepthBlend,
            BuiltinShader::Phong(_) => ShaderId::Phong,
        }
    }
}

impl Shader for BuiltinShader {
    fn shade(&self, input: &ShadeInput) -> Option<ShadeSample> {
        match self {
            BuiltinShader::Classic(s) => s.shade(input),
            BuiltinShader::DepthBlend(s) => s.shade(input),
            BuiltinShader::Phong(s) => s.shade(input),
        }
    }
}
