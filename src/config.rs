use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::{
    animation::Spin,
    error::{ConfigError, GeometryError},
    glyph::AsciiRamp,
    renderer::RendererConfig,
    shader::{PhongParams, ShaderId},
    targets::PresentMode,
    types::{ColorMode, ColorSchemeKind},
    variant::Variant,
    Camera, DebugView, Light, Orientation, SampleSteps, Scene, TorusGeometry,
};

const MAX_GRID: usize = 1000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonutConfig {
    pub variant: Variant,
    pub width: usize,
    pub height: usize,
    pub geometry: TorusGeometry,
    pub steps: SampleSteps,
    pub camera: Camera,
    pub spin: Spin,
    /// Sleep between frames.
    pub frame_interval_ms: u64,
    /// Named ramp (`classic`, `extended`, `basic`, `blocks`) or literal glyphs.
    pub ramp: String,
    pub gamma: f32,
    pub shader: ShaderId,
    pub color_scheme: ColorSchemeKind,
    pub color_mode: ColorMode,
    pub present_mode: PresentMode,
    pub view: DebugView,
    pub light: Light,
    pub phong: PhongParams,
    /// Stop after this many frames; run forever when absent.
    pub frames: Option<u64>,
}

impl Default for DonutConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Basic,
            width: 80,
            height: 24,
            geometry: TorusGeometry::default(),
            steps: SampleSteps::default(),
            camera: Camera::default(),
            spin: Spin::default(),
            frame_interval_ms: 50,
            ramp: "classic".to_string(),
            gamma: 1.0,
            shader: ShaderId::Classic,
            color_scheme: ColorSchemeKind::Mono,
            color_mode: ColorMode::Mono,
            present_mode: PresentMode::Full,
            view: DebugView::Final,
            light: Light::default(),
            phong: PhongParams::default(),
            frames: None,
        }
    }
}

impl DonutConfig {
    /// Parses a JSON document on top of a variant preset. The preset is `variant` when given,
    /// else the document's own `variant` field, else basic.
    pub fn from_json_str(text: &str, variant: Option<Variant>) -> Result<Self, serde_json::Error> {
        let overlay: Value = serde_json::from_str(text)?;
        let variant = variant
            .or_else(|| {
                overlay
                    .get("variant")
                    .and_then(Value::as_str)
                    .and_then(|s| s.parse().ok())
            })
            .unwrap_or_default();

        let mut merged = serde_json::to_value(variant.preset())?;
        merge_json(&mut merged, overlay);
        // Spell the variant the way serde expects when the file used a parse alias.
        if let Value::Object(fields) = &mut merged {
            let named: Option<Variant> = fields
                .get("variant")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok());
            if named.is_some() {
                fields.insert("variant".to_string(), serde_json::to_value(variant)?);
            }
        }
        let mut cfg: DonutConfig = serde_json::from_value(merged)?;
        cfg.variant = variant;
        Ok(cfg)
    }

    pub fn load(path: &Path, variant: Option<Variant>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_json_str(&text, variant).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded configuration from {}", path.display());
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_GRID).contains(&self.width) || !(1..=MAX_GRID).contains(&self.height) {
            return Err(GeometryError::GridSize {
                width: self.width,
                height: self.height,
            }
            .into());
        }
        self.geometry.validate()?;
        self.steps.validate()?;
        self.camera.validate(self.geometry.extent())?;
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn ascii_ramp(&self) -> AsciiRamp {
        AsciiRamp::from_arg(&self.ramp).with_gamma(self.gamma)
    }

    pub fn renderer_config(&self) -> RendererConfig {
        RendererConfig::new(self.width, self.height)
            .with_ascii_ramp(self.ascii_ramp())
            .with_shader(self.shader)
            .with_phong(self.phong)
            .with_color_scheme(self.color_scheme.to_scheme())
            .with_debug_view(self.view)
            .with_steps(self.steps)
    }

    pub fn scene(&self, orientation: Orientation) -> Scene {
        Scene::new(self.geometry, self.camera)
            .with_light(self.light)
            .with_orientation(orientation)
    }
}

fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                merge_json(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}

pub const USAGE: &str = "\
usage: donut [options]

  --variant <basic|color|interactive>   which renderer to run (default basic)
  --config <path>                       JSON file layered over the variant preset
  --width <n> --height <n>              grid size in cells
  --ramp <name|glyphs>                  classic, extended, basic, blocks or literal glyphs
  --gamma <g>                           ramp gamma
  --shader <classic|depthblend|phong>
  --scheme <mono|depth|shaded>          how cells are colored
  --color <auto|truecolor|ansi256|ansi16|mono>
  --view <final|depth|normals>
  --frames <n>                          stop after n frames
  --interval <ms>                       sleep between frames
  --dump                                print frames as plain text
  -h, --help
";

const VALUE_FLAGS: &[&str] = &[
    "--variant",
    "--config",
    "--width",
    "--height",
    "--ramp",
    "--gamma",
    "--shader",
    "--scheme",
    "--color",
    "--view",
    "--frames",
    "--interval",
];

/// Command-line overrides. Every field left `None` keeps the preset or file value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cli {
    pub variant: Option<Variant>,
    pub config_path: Option<PathBuf>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub ramp: Option<String>,
    pub gamma: Option<f32>,
    pub shader: Option<ShaderId>,
    pub color_scheme: Option<ColorSchemeKind>,
    pub color_mode: Option<ColorMode>,
    pub view: Option<DebugView>,
    pub frames: Option<u64>,
    pub interval_ms: Option<u64>,
    pub dump: bool,
    pub help: bool,
}

impl Cli {
    /// Parses arguments, excluding the program name. Accepts `--flag value` and `--flag=value`.
    pub fn parse<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut cli = Cli::default();
        let mut i = 0usize;
        while i < args.len() {
            let arg = args[i].as_str();
            let (flag, inline) = match arg.split_once('=') {
                Some((f, v)) if f.starts_with("--") => (f, Some(v.to_string())),
                _ => (arg, None),
            };

            match flag {
                "-h" | "--help" => cli.help = true,
                "--dump" => cli.dump = true,
                _ if VALUE_FLAGS.contains(&flag) => {
                    let value = match inline {
                        Some(v) => v,
                        None => {
                            i += 1;
                            args.get(i)
                                .cloned()
                                .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?
                        }
                    };
                    cli.set(flag, value)?;
                }
                _ => return Err(ConfigError::UnknownFlag(arg.to_string())),
            }
            i += 1;
        }
        Ok(cli)
    }

    fn set(&mut self, flag: &str, value: String) -> Result<(), ConfigError> {
        match flag {
            "--variant" => self.variant = Some(parse_value(flag, &value)?),
            "--config" => self.config_path = Some(PathBuf::from(value)),
            "--width" => self.width = Some(parse_value(flag, &value)?),
            "--height" => self.height = Some(parse_value(flag, &value)?),
            "--ramp" => {
                if value.is_empty() {
                    return Err(invalid(flag, &value));
                }
                self.ramp = Some(value);
            }
            "--gamma" => self.gamma = Some(parse_value(flag, &value)?),
            "--shader" => self.shader = Some(parse_value(flag, &value)?),
            "--scheme" => self.color_scheme = Some(parse_value(flag, &value)?),
            "--color" => self.color_mode = Some(parse_value(flag, &value)?),
            "--view" => {
                self.view = Some(DebugView::parse(&value).ok_or_else(|| invalid(flag, &value))?)
            }
            "--frames" => self.frames = Some(parse_value(flag, &value)?),
            "--interval" => self.interval_ms = Some(parse_value(flag, &value)?),
            _ => return Err(ConfigError::UnknownFlag(flag.to_string())),
        }
        Ok(())
    }

    /// Builds the final configuration: preset, then file, then these overrides.
    pub fn resolve(&self) -> Result<DonutConfig, ConfigError> {
        let mut cfg = match &self.config_path {
            Some(path) => DonutConfig::load(path, self.variant)?,
            None => self.variant.unwrap_or_default().preset(),
        };
        self.apply(&mut cfg);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn apply(&self, cfg: &mut DonutConfig) {
        if let Some(v) = self.width {
            cfg.width = v;
        }
        if let Some(v) = self.height {
            cfg.height = v;
        }
        if let Some(v) = &self.ramp {
            cfg.ramp = v.clone();
        }
        if let Some(v) = self.gamma {
            cfg.gamma = v;
        }
        if let Some(v) = self.shader {
            cfg.shader = v;
        }
        if let Some(v) = self.color_scheme {
            cfg.color_scheme = v;
        }
        if let Some(v) = self.color_mode {
            cfg.color_mode = v;
        }
        if let Some(v) = self.view {
            cfg.view = v;
        }
        if let Some(v) = self.frames {
            cfg.frames = Some(v);
        }
        if let Some(v) = self.interval_ms {
            cfg.frame_interval_ms = v;
        }
    }
}

fn invalid(flag: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    }
}

fn parse_value<T: FromStr>(flag: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| invalid(flag, value))
}
