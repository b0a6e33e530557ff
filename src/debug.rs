use serde::{Deserialize, Serialize};

use crate::gbuffer::GBufferPixel;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugView {
    #[default]
    Final,
    Depth,
    Normals,
}

impl DebugView {
    pub fn as_str(self) -> &'static str {
        match self {
            DebugView::Final => "final",
            DebugView::Depth => "depth",
            DebugView::Normals => "normals",
        }
    }

    pub fn parse(s: &str) -> Option<DebugView> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "final" => DebugView::Final,
            "depth" => DebugView::Depth,
            "normals" | "normal" => DebugView::Normals,
            _ => return None,
        })
    }

    pub fn next(self) -> DebugView {
        match self {
            DebugView::Final => DebugView::Depth,
            DebugView::Depth => DebugView::Normals,
            DebugView::Normals => DebugView::Final,
        }
    }
}

/// Ramp position for a stored pixel under the given view.
pub fn scalar_for_view(view: DebugView, px: &GBufferPixel) -> f32 {
    match view {
        DebugView::Final => px.intensity,
        DebugView::Depth => (1.0 - px.depth).clamp(0.0, 1.0),
        // viewer looks down +Z, so facing normals have negative z
        DebugView::Normals => (0.5 - 0.5 * px.normal.z).clamp(0.0, 1.0),
    }
}
