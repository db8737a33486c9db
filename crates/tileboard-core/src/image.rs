use serde::{Deserialize, Serialize};

/// Errors produced when wrapping caller-provided pixel buffers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("invalid pixel buffer length (expected {expected} bytes, got {got})")]
    InvalidBuffer { expected: usize, got: usize },

    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
}

/// Order of the three color channels inside one pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

impl ChannelOrder {
    /// Reorder a pixel given in `self` order into `[r, g, b]`.
    #[inline]
    pub fn to_rgb(self, px: [u8; 3]) -> [u8; 3] {
        match self {
            ChannelOrder::Rgb => px,
            ChannelOrder::Bgr => [px[2], px[1], px[0]],
        }
    }

    /// Reorder an `[r, g, b]` triple into `self` order.
    #[inline]
    pub fn from_rgb(self, rgb: [u8; 3]) -> [u8; 3] {
        // the swap is its own inverse
        self.to_rgb(rgb)
    }
}

/// Color packed as `0xRRGGBB`, the way chat platforms hand out role colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedColor(pub u32);

impl PackedColor {
    pub const WHITE: PackedColor = PackedColor(0xFF_FF_FF);
    pub const BLACK: PackedColor = PackedColor(0x00_00_00);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Unpack into `[r, g, b]`. Bits above the low 24 are ignored.
    #[inline]
    pub const fn rgb(self) -> [u8; 3] {
        [
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        ]
    }

    /// Unpack into the channel order of a target buffer.
    #[inline]
    pub fn to_channels(self, order: ChannelOrder) -> [u8; 3] {
        order.from_rgb(self.rgb())
    }

    /// `true` when no color bits are set (an unassigned role color).
    pub const fn is_unset(self) -> bool {
        self.0 & 0xFF_FF_FF == 0
    }
}

/// Owned, contiguous 3-channel 8-bit image.
///
/// Pixels are stored row-major, `width * height * 3` bytes, each pixel in
/// `order`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pub width: usize,
    pub height: usize,
    pub order: ChannelOrder,
    pub data: Vec<u8>,
}

/// Owned single-channel 8-bit image, row-major, `len = width * height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Black image of the given size.
    pub fn new(width: usize, height: usize, order: ChannelOrder) -> Self {
        Self {
            width,
            height,
            order,
            data: vec![0; width * height * 3],
        }
    }

    /// Image of the given size with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, order: ChannelOrder, color: PackedColor) -> Self {
        let px = color.to_channels(order);
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            order,
            data,
        }
    }

    /// Wrap a raw interleaved buffer, validating its length.
    pub fn from_raw(
        width: usize,
        height: usize,
        order: ChannelOrder,
        data: Vec<u8>,
    ) -> Result<Self, BufferError> {
        let Some(expected) = width.checked_mul(height).and_then(|n| n.checked_mul(3)) else {
            return Err(BufferError::InvalidDimensions { width, height });
        };
        if data.len() != expected {
            return Err(BufferError::InvalidBuffer {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            order,
            data,
        })
    }

    /// Same width and height.
    pub fn is_compatible(&self, other: &RasterImage) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some((y as usize * self.width + x as usize) * 3)
    }

    /// Pixel at `(x, y)` in the buffer's native channel order.
    #[inline]
    pub fn get_pixel(&self, x: i64, y: i64) -> Option<[u8; 3]> {
        let o = self.offset(x, y)?;
        Some([self.data[o], self.data[o + 1], self.data[o + 2]])
    }

    /// Write a pixel given in native channel order. Out-of-bounds writes are
    /// clipped and reported as `false`.
    #[inline]
    pub fn set_pixel(&mut self, x: i64, y: i64, px: [u8; 3]) -> bool {
        let Some(o) = self.offset(x, y) else {
            return false;
        };
        self.data[o..o + 3].copy_from_slice(&px);
        true
    }

    /// Pixel at `(x, y)` as a packed `0xRRGGBB` color.
    pub fn color_at(&self, x: i64, y: i64) -> Option<PackedColor> {
        let [r, g, b] = self.order.to_rgb(self.get_pixel(x, y)?);
        Some(PackedColor::from_rgb(r, g, b))
    }

    /// Fill an axis-aligned rectangle, clipped to the image.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: usize, height: usize, color: PackedColor) {
        let px = color.to_channels(self.order);
        for yy in y..y + height as i64 {
            for xx in x..x + width as i64 {
                self.set_pixel(xx, yy, px);
            }
        }
    }

    /// Stable 64-bit FNV-1a hash of the dimensions and RGB pixel values.
    ///
    /// Independent of the buffer's channel order, so the same picture hashes
    /// the same whether it was decoded as RGB or handed over as BGR.
    pub fn fingerprint(&self) -> u64 {
        const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0000_0100_0000_01b3;

        let feed = |h: u64, byte: u8| (h ^ byte as u64).wrapping_mul(PRIME);
        let mut h = (self.width as u64)
            .to_le_bytes()
            .into_iter()
            .chain((self.height as u64).to_le_bytes())
            .fold(OFFSET, feed);
        for px in self.data.chunks_exact(3) {
            h = self
                .order
                .to_rgb([px[0], px[1], px[2]])
                .into_iter()
                .fold(h, feed);
        }
        h
    }

    /// Convert to luminance with Rec. 601 weights in 14-bit fixed point.
    pub fn to_luma(&self) -> GrayImage {
        const R: u32 = 4899;
        const G: u32 = 9617;
        const B: u32 = 1868;
        const SHIFT: u32 = 14;

        let data = self
            .data
            .chunks_exact(3)
            .map(|px| {
                let [r, g, b] = self.order.to_rgb([px[0], px[1], px[2]]);
                let y = r as u32 * R + g as u32 * G + b as u32 * B;
                ((y + (1 << (SHIFT - 1))) >> SHIFT) as u8
            })
            .collect();

        GrayImage {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

impl GrayImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_color_unpacks_into_native_order() {
        let red = PackedColor(0xFF0000);
        assert_eq!(red.to_channels(ChannelOrder::Rgb), [255, 0, 0]);
        assert_eq!(red.to_channels(ChannelOrder::Bgr), [0, 0, 255]);

        let c = PackedColor(0x123456);
        assert_eq!(c.rgb(), [0x12, 0x34, 0x56]);
        assert_eq!(PackedColor::from_rgb(0x12, 0x34, 0x56), c);
    }

    #[test]
    fn unset_color_ignores_high_bits() {
        assert!(PackedColor(0).is_unset());
        assert!(PackedColor(0xFF00_0000).is_unset());
        assert!(!PackedColor(0x000001).is_unset());
    }

    #[test]
    fn from_raw_rejects_wrong_length() {
        let err = RasterImage::from_raw(2, 2, ChannelOrder::Rgb, vec![0; 11]).unwrap_err();
        assert_eq!(
            err,
            BufferError::InvalidBuffer {
                expected: 12,
                got: 11
            }
        );
    }

    #[test]
    fn bgr_pixels_read_back_as_the_same_color() {
        let mut img = RasterImage::new(4, 4, ChannelOrder::Bgr);
        img.fill_rect(1, 1, 2, 2, PackedColor(0x0000FF));
        assert_eq!(img.get_pixel(1, 1), Some([255, 0, 0]));
        assert_eq!(img.color_at(2, 2), Some(PackedColor(0x0000FF)));
        assert_eq!(img.color_at(0, 0), Some(PackedColor::BLACK));
        assert_eq!(img.get_pixel(4, 0), None);
    }

    #[test]
    fn set_pixel_clips_out_of_bounds() {
        let mut img = RasterImage::new(2, 2, ChannelOrder::Rgb);
        assert!(!img.set_pixel(-1, 0, [1, 2, 3]));
        assert!(!img.set_pixel(0, 2, [1, 2, 3]));
        assert!(img.set_pixel(1, 1, [1, 2, 3]));
        assert_eq!(img.get_pixel(1, 1), Some([1, 2, 3]));
    }

    #[test]
    fn fingerprint_tracks_pixels_and_size_but_not_channel_order() {
        let rgb = RasterImage::filled(8, 6, ChannelOrder::Rgb, PackedColor(0x3080C0));
        let bgr = RasterImage::filled(8, 6, ChannelOrder::Bgr, PackedColor(0x3080C0));
        assert_eq!(rgb.fingerprint(), bgr.fingerprint());

        let mut moved = rgb.clone();
        moved.set_pixel(7, 5, [0, 0, 0]);
        assert_ne!(rgb.fingerprint(), moved.fingerprint());

        let reshaped = RasterImage::filled(6, 8, ChannelOrder::Rgb, PackedColor(0x3080C0));
        assert_ne!(rgb.fingerprint(), reshaped.fingerprint());
    }

    #[test]
    fn luma_matches_rec601_for_primaries() {
        let mut img = RasterImage::new(4, 1, ChannelOrder::Rgb);
        img.set_pixel(0, 0, [255, 0, 0]);
        img.set_pixel(1, 0, [0, 255, 0]);
        img.set_pixel(2, 0, [0, 0, 255]);
        img.set_pixel(3, 0, [255, 255, 255]);
        let luma = img.to_luma();
        assert_eq!(luma.data, vec![76, 150, 29, 255]);
    }

    #[test]
    fn luma_is_independent_of_channel_order() {
        let rgb = RasterImage::filled(3, 3, ChannelOrder::Rgb, PackedColor(0x3080C0));
        let bgr = RasterImage::filled(3, 3, ChannelOrder::Bgr, PackedColor(0x3080C0));
        assert_ne!(rgb.data, bgr.data);
        assert_eq!(rgb.to_luma(), bgr.to_luma());
    }
}
