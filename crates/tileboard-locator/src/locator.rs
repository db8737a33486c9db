use serde::Serialize;
use tileboard_core::{BinaryMask, RasterImage, TileBox, TileSet};

use crate::components::external_bounding_boxes;
use crate::difference::{abs_diff, threshold_at_least};
use crate::morphology::close;
use crate::ordering::snake_order;
use crate::params::LocatorParams;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors returned by the tile locator.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    #[error(
        "background ({}x{}) and mixed ({}x{}) images differ in size",
        .background.0, .background.1, .mixed.0, .mixed.1
    )]
    DimensionMismatch {
        background: (usize, usize),
        mixed: (usize, usize),
    },
}

/// Why a candidate box was discarded by the area filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    TooSmall,
    TooLarge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RejectedBox {
    pub tile: TileBox,
    pub reason: RejectReason,
}

/// Intermediate products of a locate call, for tuning parameters.
#[derive(Clone, Debug)]
pub struct LocateDebug {
    /// Change mask after closing.
    pub mask: BinaryMask,
    /// Every external component box before area filtering.
    pub candidates: Vec<TileBox>,
    pub rejected: Vec<RejectedBox>,
    pub tiles: TileSet,
}

/// Background-subtraction tile locator.
#[derive(Clone, Debug, Default)]
pub struct TileLocator {
    params: LocatorParams,
}

impl TileLocator {
    pub fn new(params: LocatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LocatorParams {
        &self.params
    }

    /// Locate tiles that appear in `mixed` but not in `background`.
    ///
    /// Returns the boxes in snake order. An image pair without qualifying
    /// changes yields an empty set.
    pub fn locate(
        &self,
        background: &RasterImage,
        mixed: &RasterImage,
    ) -> Result<TileSet, LocateError> {
        Ok(self.locate_with_debug(background, mixed)?.tiles)
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, background, mixed),
            fields(width = background.width, height = background.height)
        )
    )]
    pub fn locate_with_debug(
        &self,
        background: &RasterImage,
        mixed: &RasterImage,
    ) -> Result<LocateDebug, LocateError> {
        if !background.is_compatible(mixed) {
            return Err(LocateError::DimensionMismatch {
                background: (background.width, background.height),
                mixed: (mixed.width, mixed.height),
            });
        }

        let p = &self.params;
        let diff = abs_diff(&mixed.to_luma(), &background.to_luma());
        let raw = threshold_at_least(&diff, p.diff_threshold);
        let mask = close(&raw, p.close_iterations);
        log::debug!(
            "change mask: {} px raw, {} px after {} closing iterations",
            raw.count(),
            mask.count(),
            p.close_iterations
        );

        let candidates = external_bounding_boxes(&mask);
        let mut kept = Vec::with_capacity(candidates.len());
        let mut rejected = Vec::new();
        for &tile in &candidates {
            let area = tile.area();
            if area < p.min_area {
                rejected.push(RejectedBox {
                    tile,
                    reason: RejectReason::TooSmall,
                });
            } else if area > p.max_area {
                rejected.push(RejectedBox {
                    tile,
                    reason: RejectReason::TooLarge,
                });
            } else {
                kept.push(tile);
            }
        }
        log::debug!(
            "{} candidate boxes, {} kept, {} rejected by area [{}, {}]",
            candidates.len(),
            kept.len(),
            rejected.len(),
            p.min_area,
            p.max_area
        );

        let tiles = TileSet::new(snake_order(&kept));

        Ok(LocateDebug {
            mask,
            candidates,
            rejected,
            tiles,
        })
    }
}
