use serde::{Deserialize, Serialize};

/// Parameters of the background-subtraction tile locator.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocatorParams {
    /// Minimal luminance difference (0..=255) for a pixel to count as changed.
    pub diff_threshold: u8,

    /// Smallest accepted box area in pixels; smaller blobs are noise.
    pub min_area: u64,

    /// Largest accepted box area in pixels; larger blobs are merged tiles or
    /// whole rows.
    pub max_area: u64,

    /// Number of 3x3 dilations (and then erosions) used to close thin gaps.
    pub close_iterations: u32,
}

impl Default for LocatorParams {
    fn default() -> Self {
        Self {
            diff_threshold: 25,
            min_area: 400,
            max_area: 80_000,
            close_iterations: 2,
        }
    }
}
