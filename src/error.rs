use std::{fmt, io, path::PathBuf};

#[derive(Clone, Debug, PartialEq)]
pub enum GeometryError {
    RadiusNotPositive { name: &'static str, value: f32 },
    StepOutOfRange { name: &'static str, value: f32 },
    ViewerTooClose { distance: f32, extent: f32 },
    ZoomNotPositive { value: f32 },
    GridSize { width: usize, height: usize },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GeometryError::RadiusNotPositive { name, value } => {
                write!(f, "{name} must be a positive finite number, got {value}")
            }
            GeometryError::StepOutOfRange { name, value } => {
                write!(f, "{name} step must lie in [0.0001, 2pi], got {value}")
            }
            GeometryError::ViewerTooClose { distance, extent } => write!(
                f,
                "viewer distance {distance} must exceed the torus extent {extent}"
            ),
            GeometryError::ZoomNotPositive { value } => {
                write!(f, "zoom must be a positive finite number, got {value}")
            }
            GeometryError::GridSize { width, height } => {
                write!(f, "grid size {width}x{height} must be within 1..=1000 on both axes")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

#[derive(Debug)]
pub enum ConfigError {
    UnknownFlag(String),
    MissingValue(String),
    InvalidValue { flag: String, value: String },
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Geometry(GeometryError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownFlag(flag) => write!(f, "unknown flag: {flag}"),
            ConfigError::MissingValue(flag) => write!(f, "missing value for {flag}"),
            ConfigError::InvalidValue { flag, value } => {
                write!(f, "invalid value for {flag}: {value}")
            }
            ConfigError::Read { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "cannot parse {}: {source}", path.display())
            }
            ConfigError::Geometry(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Geometry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GeometryError> for ConfigError {
    fn from(err: GeometryError) -> Self {
        ConfigError::Geometry(err)
    }
}

#[derive(Debug)]
pub enum DonutError {
    Io(io::Error),
    Config(ConfigError),
}

impl fmt::Display for DonutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DonutError::Io(err) => write!(f, "terminal i/o failed: {err}"),
            DonutError::Config(err) => write!(f, "configuration error: {err}"),
        }
    }
}

impl std::error::Error for DonutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DonutError::Io(err) => Some(err),
            DonutError::Config(err) => Some(err),
        }
    }
}

impl From<io::Error> for DonutError {
    fn from(err: io::Error) -> Self {
        DonutError::Io(err)
    }
}

impl From<ConfigError> for DonutError {
    fn from(err: ConfigError) -> Self {
        DonutError::Config(err)
    }
}

impl From<GeometryError> for DonutError {
    fn from(err: GeometryError) -> Self {
        DonutError::Config(ConfigError::Geometry(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn geometry_error_chains_through_donut_error() {
        let err: DonutError = GeometryError::ViewerTooClose {
            distance: 2.0,
            extent: 3.0,
        }
        .into();
        assert!(err.to_string().contains("viewer distance 2"));
        let cfg = err.source().expect("config source");
        assert!(cfg.source().is_some());
    }
}
