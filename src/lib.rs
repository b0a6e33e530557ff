#![forbid(unsafe_code)]

pub mod animation;
#[cfg(feature = "terminal")]
pub mod app;
pub mod camera;
pub mod config;
pub mod controls;
pub mod debug;
pub mod error;
pub mod gbuffer;
pub mod glyph;
pub mod light;
pub mod prelude;
pub mod profile;
pub mod raster;
pub mod renderer;
pub mod scene;
pub mod shader;
pub mod targets;
pub mod torus;
pub mod types;
pub mod variant;

pub use crate::{
    animation::{Animator, Spin},
    camera::{Camera, Projector},
    config::{Cli, DonutConfig},
    debug::DebugView,
    error::{ConfigError, DonutError, GeometryError},
    gbuffer::GBuffer,
    glyph::AsciiRamp,
    light::Light,
    renderer::{Renderer, RendererConfig},
    scene::Scene,
    shader::{BuiltinShader, PhongParams, ShadeSample, Shader, ShaderId},
    torus::{Orientation, SampleSteps, TorusGeometry},
    variant::Variant,
};
