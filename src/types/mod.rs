pub mod color;

pub use color::{ColorMode, ColorScheme, ColorSchemeKind, Palette, Rgb8};
