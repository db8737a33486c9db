use tileboard_core::{PackedColor, RasterImage};

/// Fill an anti-aliased disc centered on pixel `(cx, cy)`.
///
/// Pixel coverage is approximated from the distance between the pixel
/// center and the disc center: full inside `radius - 0.5`, none beyond
/// `radius + 0.5`, linear in between. Partially covered pixels are blended
/// with what is already in the image. The disc is clipped to the image.
pub fn fill_disc_aa(img: &mut RasterImage, cx: i64, cy: i64, radius: u32, color: PackedColor) {
    if radius == 0 {
        return;
    }
    let src = color.to_channels(img.order);
    let r = radius as f64;
    let reach = radius as i64 + 1;

    let x0 = (cx - reach).max(0);
    let y0 = (cy - reach).max(0);
    let x1 = (cx + reach).min(img.width as i64 - 1);
    let y1 = (cy + reach).min(img.height as i64 - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = (x - cx) as f64;
            let dy = (y - cy) as f64;
            let coverage = (r + 0.5 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            if coverage >= 1.0 {
                img.set_pixel(x, y, src);
                continue;
            }
            let Some(dst) = img.get_pixel(x, y) else {
                continue;
            };
            let out: [u8; 3] = std::array::from_fn(|c| {
                let v = src[c] as f64 * coverage + dst[c] as f64 * (1.0 - coverage);
                v.round().clamp(0.0, 255.0) as u8
            });
            img.set_pixel(x, y, out);
        }
    }
}
