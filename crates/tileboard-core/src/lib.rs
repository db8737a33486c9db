//! Core types for board tile detection and overlay rendering.
//!
//! This crate is intentionally small. It owns the pixel-buffer types the
//! locator and compositor operate on, the tile geometry types they exchange,
//! and a minimal logger. It does *not* depend on any image codec.

mod image;
mod logger;
mod mask;
mod tile;

pub use image::{BufferError, ChannelOrder, GrayImage, PackedColor, RasterImage};
pub use mask::BinaryMask;
pub use tile::{TileBox, TileSet};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
