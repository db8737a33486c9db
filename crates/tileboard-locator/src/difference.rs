//! Luminance differencing and thresholding.

use tileboard_core::{BinaryMask, GrayImage};

/// Per-pixel `|a - b|`. Both images must have the same size.
pub fn abs_diff(a: &GrayImage, b: &GrayImage) -> GrayImage {
    debug_assert_eq!((a.width, a.height), (b.width, b.height));
    GrayImage {
        width: a.width,
        height: a.height,
        data: a
            .data
            .iter()
            .zip(&b.data)
            .map(|(&p, &q)| p.abs_diff(q))
            .collect(),
    }
}

/// Mask of pixels whose value is `>= threshold`.
///
/// A threshold of `0` marks every pixel.
pub fn threshold_at_least(img: &GrayImage, threshold: u8) -> BinaryMask {
    BinaryMask {
        width: img.width,
        height: img.height,
        data: img.data.iter().map(|&v| v >= threshold).collect(),
    }
}
