pub use crate::{
    targets::{BufferTarget, Cell, PresentMode},
    types::{ColorMode, ColorScheme, Palette, Rgb8},
    Animator, AsciiRamp, BuiltinShader, Camera, DebugView, DonutConfig, Light, Orientation,
    Renderer, RendererConfig, SampleSteps, Scene, ShadeSample, Shader, ShaderId, TorusGeometry,
    Variant,
};

pub use glam::Vec3;
