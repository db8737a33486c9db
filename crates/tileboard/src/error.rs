use std::path::PathBuf;

use tileboard_core::BufferError;
use tileboard_locator::LocateError;

/// Errors produced by the file-level helpers and the CLI.
#[derive(thiserror::Error, Debug)]
pub enum TileboardError {
    /// The image is missing, unreadable, or not a decodable raster format.
    #[cfg(feature = "image")]
    #[error("could not load image {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[cfg(feature = "image")]
    #[error("could not write image {}: {source}", .path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("could not read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Locate(#[from] LocateError),

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
