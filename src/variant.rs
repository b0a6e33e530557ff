use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{
    camera::{Camera, Fit},
    config::DonutConfig,
    shader::ShaderId,
    targets::PresentMode,
    types::{ColorMode, ColorSchemeKind},
};

/// The three flavors of the animation, from plain ASCII to interactive Phong shading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    #[serde(alias = "ascii", alias = "plain")]
    Basic,
    #[serde(alias = "colour", alias = "colorized")]
    Color,
    #[serde(alias = "phong")]
    Interactive,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Basic, Variant::Color, Variant::Interactive];

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Basic => "basic",
            Variant::Color => "color",
            Variant::Interactive => "interactive",
        }
    }

    pub fn is_interactive(self) -> bool {
        self == Variant::Interactive
    }

    pub fn preset(self) -> DonutConfig {
        let base = DonutConfig {
            variant: self,
            ..DonutConfig::default()
        };
        match self {
            Variant::Basic => base,
            Variant::Color => DonutConfig {
                width: 110,
                height: 50,
                camera: Camera {
                    fit: Fit::Width,
                    ..Camera::default()
                },
                ramp: "extended".to_string(),
                shader: ShaderId::DepthBlend,
                color_scheme: ColorSchemeKind::Depth,
                color_mode: ColorMode::Ansi16,
                ..base
            },
            Variant::Interactive => DonutConfig {
                width: 80,
                height: 40,
                ramp: "extended".to_string(),
                shader: ShaderId::Phong,
                color_scheme: ColorSchemeKind::Shaded,
                color_mode: ColorMode::Auto,
                present_mode: PresentMode::Diff,
                ..base
            },
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" | "ascii" | "plain" => Ok(Variant::Basic),
            "color" | "colour" | "colorized" => Ok(Variant::Color),
            "interactive" | "phong" => Ok(Variant::Interactive),
            _ => Err(format!("invalid variant: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid_and_distinct() {
        for v in Variant::ALL {
            let cfg = v.preset();
            assert_eq!(cfg.variant, v);
            cfg.validate().unwrap();
            assert_eq!(v.to_string().parse::<Variant>().unwrap(), v);
        }
        let basic = Variant::Basic.preset();
        assert_eq!((basic.width, basic.height), (80, 24));
        assert_eq!(basic.shader, ShaderId::Classic);
        assert_eq!(basic.color_mode, ColorMode::Mono);

        let color = Variant::Color.preset();
        assert_eq!((color.width, color.height), (110, 50));
        assert_eq!(color.color_scheme, ColorSchemeKind::Depth);
        assert_eq!(color.camera.fit, Fit::Width);
        assert_eq!(basic.camera.fit, Fit::Shorter);

        let interactive = Variant::Interactive.preset();
        assert_eq!(interactive.present_mode, PresentMode::Diff);
        assert!(interactive.variant.is_interactive());
    }

    #[test]
    fn aliases_parse() {
        assert_eq!("Colour".parse::<Variant>().unwrap(), Variant::Color);
        let v: Variant = serde_json::from_str(r#""colorized""#).unwrap();
        assert_eq!(v, Variant::Color);
        let v: Variant = serde_json::from_str(r#""plain""#).unwrap();
        assert_eq!(v, Variant::Basic);
        assert_eq!("phong".parse::<Variant>().unwrap(), Variant::Interactive);
        assert!("gpu".parse::<Variant>().is_err());
    }
}
