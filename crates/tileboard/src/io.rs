//! Image decoding and encoding through the `image` crate.

use std::fs;
use std::path::Path;

use image::ImageReader;
use tileboard_core::{BinaryMask, BufferError, ChannelOrder, RasterImage};

use crate::TileboardError;

/// Convert a decoded image into an RGB raster.
pub fn raster_from_dynamic(img: image::DynamicImage) -> RasterImage {
    let rgb = img.into_rgb8();
    RasterImage {
        width: rgb.width() as usize,
        height: rgb.height() as usize,
        order: ChannelOrder::Rgb,
        data: rgb.into_raw(),
    }
}

/// Convert a raster into an `image::RgbImage`, reordering BGR buffers.
pub fn raster_to_rgb_image(img: &RasterImage) -> Result<image::RgbImage, TileboardError> {
    let data = match img.order {
        ChannelOrder::Rgb => img.data.clone(),
        ChannelOrder::Bgr => img
            .data
            .chunks_exact(3)
            .flat_map(|px| ChannelOrder::Bgr.to_rgb([px[0], px[1], px[2]]))
            .collect(),
    };
    let (w, h) = dims_u32(img.width, img.height)?;
    image::RgbImage::from_raw(w, h, data).ok_or(TileboardError::Buffer(
        BufferError::InvalidDimensions {
            width: img.width,
            height: img.height,
        },
    ))
}

fn dims_u32(width: usize, height: usize) -> Result<(u32, u32), BufferError> {
    let w = u32::try_from(width).ok();
    let h = u32::try_from(height).ok();
    w.zip(h)
        .ok_or(BufferError::InvalidDimensions { width, height })
}

/// Build a raster from a raw interleaved 3-channel buffer.
pub fn raster_from_slice(
    width: u32,
    height: u32,
    order: ChannelOrder,
    pixels: &[u8],
) -> Result<RasterImage, TileboardError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some((w, h)) = w.zip(h) else {
        return Err(BufferError::InvalidDimensions {
            width: width as usize,
            height: height as usize,
        }
        .into());
    };
    Ok(RasterImage::from_raw(w, h, order, pixels.to_vec())?)
}

/// Decode an image file into an RGB raster.
///
/// Missing files and undecodable contents both map to
/// [`TileboardError::ImageLoad`].
pub fn load_raster(path: impl AsRef<Path>) -> Result<RasterImage, TileboardError> {
    let path = path.as_ref();
    let load_err = |source| TileboardError::ImageLoad {
        path: path.to_path_buf(),
        source,
    };
    let img = ImageReader::open(path)
        .map_err(|e| load_err(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| load_err(image::ImageError::IoError(e)))?
        .decode()
        .map_err(load_err)?;
    Ok(raster_from_dynamic(img))
}

fn ensure_parent(path: &Path) -> Result<(), TileboardError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Encode a raster; the format follows the file extension.
pub fn save_raster(img: &RasterImage, path: impl AsRef<Path>) -> Result<(), TileboardError> {
    let path = path.as_ref();
    ensure_parent(path)?;
    raster_to_rgb_image(img)?
        .save(path)
        .map_err(|source| TileboardError::ImageSave {
            path: path.to_path_buf(),
            source,
        })
}

/// Write a change mask as a black/white grayscale image.
pub fn save_mask(mask: &BinaryMask, path: impl AsRef<Path>) -> Result<(), TileboardError> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let gray = mask.to_gray();
    let (w, h) = dims_u32(gray.width, gray.height)?;
    let img = image::GrayImage::from_raw(w, h, gray.data).ok_or(TileboardError::Buffer(
        BufferError::InvalidDimensions {
            width: mask.width,
            height: mask.height,
        },
    ))?;
    img.save(path).map_err(|source| TileboardError::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}
