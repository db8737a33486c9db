//! Tile locator: find tiles on a board by subtracting a blank reference.
//!
//! ## Quickstart
//!
//! ```
//! use tileboard_core::{ChannelOrder, PackedColor, RasterImage};
//! use tileboard_locator::{LocatorParams, TileLocator};
//!
//! let background = RasterImage::filled(200, 200, ChannelOrder::Rgb, PackedColor(0x202020));
//! let mut board = background.clone();
//! board.fill_rect(60, 60, 40, 40, PackedColor::WHITE);
//!
//! let tiles = TileLocator::new(LocatorParams::default())
//!     .locate(&background, &board)
//!     .unwrap();
//! assert_eq!(tiles.len(), 1);
//! ```
//!
//! Algorithm:
//! 1. Convert both images to luminance.
//! 2. Absolute per-pixel difference, thresholded into a change mask.
//! 3. Close the mask: dilate then erode with a 3x3 square, N times each.
//! 4. Label 8-connected components; drop those nested inside another
//!    component's hole; take each survivor's bounding box.
//! 5. Keep boxes whose area lies in `[min_area, max_area]`.
//! 6. Cluster boxes into rows and number them in snake order.

mod components;
mod difference;
mod locator;
mod morphology;
mod ordering;
mod params;

pub use components::external_bounding_boxes;
pub use difference::{abs_diff, threshold_at_least};
pub use locator::{LocateDebug, LocateError, RejectReason, RejectedBox, TileLocator};
pub use morphology::{close, dilate, erode};
pub use ordering::{cluster_rows, median_height, snake_order};
pub use params::LocatorParams;
