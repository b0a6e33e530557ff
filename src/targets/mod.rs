use serde::{Deserialize, Serialize};

pub mod buffer;
#[cfg(feature = "terminal")]
pub mod terminal;

pub use buffer::{BufferTarget, Cell};
#[cfg(feature = "terminal")]
pub use terminal::{TerminalGuard, TerminalPresenter, TerminalPresenterConfig};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentMode {
    /// Clear the screen and redraw every row each frame.
    #[default]
    Full,
    /// Only rewrite runs of cells that changed since the previous frame.
    Diff,
}
