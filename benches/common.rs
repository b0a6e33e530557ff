use asciidonut::glyph::AsciiRamp;
use asciidonut::shader::ShaderId;
use asciidonut::types::{ColorScheme, Palette};
use asciidonut::{Orientation, RendererConfig, Scene};

pub const WIDTH: usize = 160;
pub const HEIGHT: usize = 80;

/// Tilted so both faces and the hole are on screen.
pub fn make_scene() -> Scene {
    Scene::default().with_orientation(Orientation::new(1.1, 0.7))
}

pub fn make_config(shader: ShaderId) -> RendererConfig {
    RendererConfig::new(WIDTH, HEIGHT)
        .with_ascii_ramp(AsciiRamp::extended())
        .with_shader(shader)
        .with_color_scheme(ColorScheme::DepthBands(Palette::ansi_rainbow()))
}
