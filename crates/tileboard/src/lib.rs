//! High-level facade for the `tileboard-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core types, the tile locator, and the overlay compositor
//! - (feature `image`) file-level helpers that decode board images, locate
//!   tiles, draw team markers, and write the result
//! - JSON config and tile-cache files for the `tileboard` CLI
//!
//! ## Quickstart
//!
//! ```no_run
//! use tileboard::locator::LocatorParams;
//! use tileboard::overlay::{Occupant, OverlayParams};
//! use tileboard::core::PackedColor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tiles = tileboard::locate_files(
//!     "assets/background.png",
//!     "assets/board.png",
//!     &LocatorParams::default(),
//! )?;
//! let teams = vec![Occupant::new("red", PackedColor(0xFF0000), 0)];
//! tileboard::render_file(
//!     "assets/board.png",
//!     &tiles,
//!     &teams,
//!     "assets/board_state.png",
//!     &OverlayParams::default(),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `tileboard::core`: pixel buffers, packed colors, tile boxes and sets.
//! - `tileboard::locator`: background subtraction and snake-order numbering.
//! - `tileboard::overlay`: marker placement and anti-aliased compositing.
//! - `tileboard::io` (feature `image`): decode/encode through the `image` crate.

pub use tileboard_core as core;
pub use tileboard_locator as locator;
pub use tileboard_overlay as overlay;

pub use tileboard_core::{ChannelOrder, PackedColor, RasterImage, TileBox, TileSet};
pub use tileboard_locator::{LocateError, LocatorParams, TileLocator};
pub use tileboard_overlay::{Occupant, OverlayCompositor, OverlayParams, Palette, RenderReport};

mod config;
mod error;

pub use config::{
    load_occupants_json, load_tiles_json, write_tiles_json, CacheKey, TileCache, TileboardConfig,
};
pub use error::TileboardError;

#[cfg(feature = "image")]
pub mod io;
#[cfg(feature = "image")]
mod pipeline;

#[cfg(feature = "image")]
pub use pipeline::{locate_files, locate_files_with_debug, render_file, update_board, BoardUpdate};
