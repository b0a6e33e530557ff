use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts a linear `[0, 1]` triple, clamping each channel.
    pub fn from_unit(rgb: glam::Vec3) -> Self {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        Self::new(q(rgb.x), q(rgb.y), q(rgb.z))
    }

    pub fn to_unit(self) -> glam::Vec3 {
        glam::Vec3::new(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }

    pub fn to_le_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Ordered list of colors indexed by a scalar in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb8>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb8>) -> Self {
        Self { colors }
    }

    /// Red, green, yellow, blue, magenta, cyan, white: the seven foreground colors of the
    /// classic ANSI set, ordered from nearest to farthest.
    pub fn ansi_rainbow() -> Self {
        Self::new(vec![
            Rgb8::new(128, 0, 0),
            Rgb8::new(0, 128, 0),
            Rgb8::new(128, 128, 0),
            Rgb8::new(0, 0, 128),
            Rgb8::new(128, 0, 128),
            Rgb8::new(0, 128, 128),
            Rgb8::new(192, 192, 192),
        ])
    }

    pub fn colors(&self) -> &[Rgb8] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn pick(&self, t: f32) -> Rgb8 {
        if self.colors.is_empty() {
            return Rgb8::WHITE;
        }
        let last = self.colors.len() - 1;
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let i = (t * last as f32) as usize;
        self.colors[i.min(last)]
    }
}

/// How the renderer assigns a foreground color to each plotted cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    Mono,
    DepthBands(Palette),
    Shaded,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme::Mono
    }
}

/// Serializable selector for a [`ColorScheme`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSchemeKind {
    #[default]
    Mono,
    Depth,
    Shaded,
}

impl ColorSchemeKind {
    pub fn to_scheme(self) -> ColorScheme {
        match self {
            ColorSchemeKind::Mono => ColorScheme::Mono,
            ColorSchemeKind::Depth => ColorScheme::DepthBands(Palette::ansi_rainbow()),
            ColorSchemeKind::Shaded => ColorScheme::Shaded,
        }
    }
}

impl FromStr for ColorSchemeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mono" | "none" => Ok(ColorSchemeKind::Mono),
            "depth" | "bands" | "rainbow" => Ok(ColorSchemeKind::Depth),
            "shaded" | "phong" => Ok(ColorSchemeKind::Shaded),
            _ => Err(format!("invalid color scheme: {s}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Truecolor,
    Ansi256,
    Ansi16,
    Mono,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColorMode::Auto => "auto",
            ColorMode::Truecolor => "truecolor",
            ColorMode::Ansi256 => "ansi256",
            ColorMode::Ansi16 => "ansi16",
            ColorMode::Mono => "mono",
        };
        f.write_str(s)
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "truecolor" | "true" | "24bit" | "24-bit" => Ok(ColorMode::Truecolor),
            "ansi256" | "ansi-256" | "256" | "xterm256" | "xterm-256" => Ok(ColorMode::Ansi256),
            "ansi16" | "ansi-16" | "16" | "ansi" => Ok(ColorMode::Ansi16),
            "mono" | "monochrome" | "none" => Ok(ColorMode::Mono),
            _ => Err(format!("invalid color mode: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rainbow_picks_by_depth() {
        let p = Palette::ansi_rainbow();
        assert_eq!(p.len(), 7);
        assert_eq!(p.pick(0.0), Rgb8::new(128, 0, 0));
        assert_eq!(p.pick(1.0), Rgb8::new(192, 192, 192));
        // trunc(0.5 * 6) = 3 -> blue
        assert_eq!(p.pick(0.5), Rgb8::new(0, 0, 128));
        assert_eq!(p.pick(-3.0), p.pick(0.0));
        assert_eq!(p.pick(f32::NAN), p.pick(0.0));
    }

    #[test]
    fn empty_palette_is_white() {
        assert_eq!(Palette::new(Vec::new()).pick(0.3), Rgb8::WHITE);
    }

    #[test]
    fn color_mode_parse_and_display() {
        assert_eq!("auto".parse::<ColorMode>().unwrap(), ColorMode::Auto);
        assert_eq!("TRUECOLOR".parse::<ColorMode>().unwrap(), ColorMode::Truecolor);
        assert_eq!("ansi-256".parse::<ColorMode>().unwrap(), ColorMode::Ansi256);
        assert_eq!("16".parse::<ColorMode>().unwrap(), ColorMode::Ansi16);
        assert_eq!("mono".parse::<ColorMode>().unwrap(), ColorMode::Mono);
        assert!("nope".parse::<ColorMode>().is_err());

        for m in [
            ColorMode::Auto,
            ColorMode::Truecolor,
            ColorMode::Ansi256,
            ColorMode::Ansi16,
            ColorMode::Mono,
        ] {
            assert_eq!(m.to_string().parse::<ColorMode>().unwrap(), m);
        }
    }

    #[test]
    fn scheme_kind_builds_scheme() {
        assert_eq!(ColorSchemeKind::Mono.to_scheme(), ColorScheme::Mono);
        assert_eq!(
            "bands".parse::<ColorSchemeKind>().unwrap().to_scheme(),
            ColorScheme::DepthBands(Palette::ansi_rainbow())
        );
        assert!("plaid".parse::<ColorSchemeKind>().is_err());
    }

    #[test]
    fn unit_conversion_clamps() {
        let c = Rgb8::from_unit(glam::Vec3::new(2.0, -1.0, 0.5));
        assert_eq!(c, Rgb8::new(255, 0, 128));
    }
}
