use serde::{Deserialize, Serialize};
use tileboard_core::PackedColor;

/// Marker geometry and ring styling.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OverlayParams {
    /// Radius of the colored disc in pixels.
    pub radius: u32,
    /// Inset of the marker from the tile's edges.
    pub pad: u32,
    /// Horizontal step between markers sharing a tile.
    pub shift: u32,
    /// How far the contrast ring extends past the colored disc.
    pub ring_width: u32,
    pub ring_color: PackedColor,
}

impl Default for OverlayParams {
    fn default() -> Self {
        Self {
            radius: 10,
            pad: 10,
            shift: 10,
            ring_width: 2,
            ring_color: PackedColor::WHITE,
        }
    }
}
