use serde::Serialize;
use tileboard_core::{RasterImage, TileBox, TileSet};

use crate::draw::fill_disc_aa;
use crate::occupant::{group_by_tile, Occupant};
use crate::params::OverlayParams;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A marker that was drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlacedMarker {
    pub label: String,
    pub tile_index: i64,
    /// Disc center in image pixels.
    pub center: (i64, i64),
}

/// An occupant whose tile index was not in the tile set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedOccupant {
    pub label: String,
    pub tile_index: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    pub placed: Vec<PlacedMarker>,
    pub skipped: Vec<SkippedOccupant>,
}

/// Marker centers for `count` occupants stacked on `tile`.
///
/// The first marker sits `pad + radius` in from the bottom-right corner,
/// each further one `shift` pixels to the left. Markers that would cross the
/// left padding are clamped onto it.
pub fn marker_centers(tile: &TileBox, count: usize, params: &OverlayParams) -> Vec<(i64, i64)> {
    let radius = params.radius as i64;
    let pad = params.pad as i64;
    let shift = params.shift as i64;

    let anchor_x = tile.right() - pad - radius;
    let anchor_y = tile.bottom() - pad - radius;
    let min_x = tile.x as i64 + pad + radius;

    (0..count as i64)
        .map(|k| {
            let cx = anchor_x - k * shift;
            let cx = if cx - radius < tile.x as i64 + pad { min_x } else { cx };
            (cx, anchor_y)
        })
        .collect()
}

/// Draws occupant markers onto a board image.
#[derive(Clone, Debug, Default)]
pub struct OverlayCompositor {
    params: OverlayParams,
}

impl OverlayCompositor {
    pub fn new(params: OverlayParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &OverlayParams {
        &self.params
    }

    /// Draw one marker per occupant into `board`.
    ///
    /// Occupants whose tile index is not in `tiles` are logged and reported
    /// as skipped; everything else is still drawn. With no occupants the
    /// image is left untouched.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, board, tiles, occupants),
            fields(tiles = tiles.len(), occupants = occupants.len())
        )
    )]
    pub fn render(
        &self,
        board: &mut RasterImage,
        tiles: &TileSet,
        occupants: &[Occupant],
    ) -> RenderReport {
        let p = &self.params;
        let mut report = RenderReport::default();
        let ring_radius = p.radius.saturating_add(p.ring_width);

        for group in group_by_tile(occupants) {
            let Some(tile) = tiles.get(group.tile_index) else {
                for o in &group.members {
                    log::warn!(
                        "skipped {:?}: tile index {} not in tile set of {}",
                        o.label,
                        o.tile_index,
                        tiles.len()
                    );
                    report.skipped.push(SkippedOccupant {
                        label: o.label.clone(),
                        tile_index: o.tile_index,
                    });
                }
                continue;
            };

            let centers = marker_centers(tile, group.members.len(), p);
            for (occ, &(cx, cy)) in group.members.iter().zip(&centers) {
                fill_disc_aa(board, cx, cy, ring_radius, p.ring_color);
                fill_disc_aa(board, cx, cy, p.radius, occ.color);
                report.placed.push(PlacedMarker {
                    label: occ.label.clone(),
                    tile_index: occ.tile_index,
                    center: (cx, cy),
                });
            }
        }

        log::debug!(
            "rendered {} markers, skipped {}",
            report.placed.len(),
            report.skipped.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileboard_core::{ChannelOrder, PackedColor};

    fn tb(x: i32, y: i32, w: u32, h: u32) -> TileBox {
        TileBox::new(x, y, w, h).unwrap()
    }

    fn board() -> RasterImage {
        RasterImage::filled(300, 200, ChannelOrder::Rgb, PackedColor(0x335577))
    }

    #[test]
    fn first_marker_sits_in_bottom_right_corner() {
        let c = marker_centers(&tb(0, 0, 100, 100), 1, &OverlayParams::default());
        assert_eq!(c, vec![(80, 80)]);
    }

    #[test]
    fn stacked_markers_shift_left_then_clamp() {
        let c = marker_centers(&tb(10, 0, 60, 50), 5, &OverlayParams::default());
        // anchor x = 70 - 20 = 50, min x = 10 + 20 = 30
        assert_eq!(c, vec![(50, 30), (40, 30), (30, 30), (30, 30), (30, 30)]);
    }

    #[test]
    fn narrow_tile_collapses_markers() {
        // narrower than 2 * radius + pad
        let c = marker_centers(&tb(0, 0, 25, 60), 2, &OverlayParams::default());
        assert_eq!(c[0], c[1]);
        assert_eq!(c[0], (20, 40));
    }

    #[test]
    fn red_marker_with_white_ring() {
        let mut img = RasterImage::filled(120, 120, ChannelOrder::Rgb, PackedColor::BLACK);
        let tiles = TileSet::new(vec![tb(0, 0, 100, 100)]);
        let occ = vec![Occupant::new("red", PackedColor(0xFF0000), 0)];
        let report = OverlayCompositor::default().render(&mut img, &tiles, &occ);

        assert_eq!(report.placed.len(), 1);
        assert_eq!(report.placed[0].center, (80, 80));
        assert_eq!(img.color_at(80, 80), Some(PackedColor(0xFF0000)));
        assert_eq!(img.color_at(89, 80), Some(PackedColor(0xFF0000)));
        assert_eq!(img.color_at(91, 80), Some(PackedColor::WHITE));
        assert_eq!(img.color_at(80, 69), Some(PackedColor::WHITE));
        assert_eq!(img.color_at(80, 94), Some(PackedColor::BLACK));
    }

    #[test]
    fn bgr_board_receives_unswapped_colors() {
        let mut img = RasterImage::filled(120, 120, ChannelOrder::Bgr, PackedColor::BLACK);
        let tiles = TileSet::new(vec![tb(0, 0, 100, 100)]);
        let occ = vec![Occupant::new("red", PackedColor(0xFF0000), 0)];
        OverlayCompositor::default().render(&mut img, &tiles, &occ);
        assert_eq!(img.get_pixel(80, 80), Some([0, 0, 255]));
        assert_eq!(img.color_at(80, 80), Some(PackedColor(0xFF0000)));
    }

    #[test]
    fn no_occupants_leaves_board_identical() {
        let original = board();
        let mut img = original.clone();
        let tiles = TileSet::new(vec![tb(0, 0, 100, 100)]);
        let report = OverlayCompositor::default().render(&mut img, &tiles, &[]);
        assert_eq!(report, RenderReport::default());
        assert_eq!(img, original);
    }

    #[test]
    fn out_of_range_occupants_are_skipped() {
        let mut img = board();
        let tiles = TileSet::new(vec![
            tb(0, 0, 100, 100),
            tb(100, 0, 100, 100),
            tb(200, 0, 100, 100),
        ]);
        let occ = vec![
            Occupant::new("lost", PackedColor(0x00FF00), 5),
            Occupant::new("ok", PackedColor(0xFF0000), 1),
            Occupant::new("neg", PackedColor(0x0000FF), -1),
        ];
        let report = OverlayCompositor::default().render(&mut img, &tiles, &occ);

        assert_eq!(report.placed.len(), 1);
        assert_eq!(report.placed[0].label, "ok");
        assert_eq!(report.placed[0].center, (180, 80));
        let skipped: Vec<(&str, i64)> = report
            .skipped
            .iter()
            .map(|s| (s.label.as_str(), s.tile_index))
            .collect();
        assert_eq!(skipped, vec![("lost", 5), ("neg", -1)]);
        assert_eq!(img.color_at(180, 80), Some(PackedColor(0xFF0000)));
    }

    #[test]
    fn every_occupant_of_a_missing_tile_is_reported() {
        let mut img = board();
        let tiles = TileSet::new(vec![tb(0, 0, 100, 100)]);
        let occ = vec![
            Occupant::new("a", PackedColor(0xFF0000), 3),
            Occupant::new("b", PackedColor(0x00FF00), 0),
            Occupant::new("c", PackedColor(0x0000FF), 3),
        ];
        let report = OverlayCompositor::default().render(&mut img, &tiles, &occ);
        let labels: Vec<&str> = report.skipped.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "c"]);
        assert_eq!(report.placed.len(), 1);
    }

    #[test]
    fn huge_ring_width_saturates_instead_of_overflowing() {
        let mut img = RasterImage::filled(40, 40, ChannelOrder::Rgb, PackedColor::BLACK);
        let tiles = TileSet::new(vec![tb(0, 0, 40, 40)]);
        let occ = vec![Occupant::new("red", PackedColor(0xFF0000), 0)];
        let params = OverlayParams {
            ring_width: u32::MAX,
            ..OverlayParams::default()
        };
        let report = OverlayCompositor::new(params).render(&mut img, &tiles, &occ);
        assert_eq!(report.placed[0].center, (20, 20));
        assert_eq!(img.color_at(20, 20), Some(PackedColor(0xFF0000)));
        assert_eq!(img.color_at(0, 0), Some(PackedColor::WHITE));
    }

    #[test]
    fn two_occupants_on_one_tile_get_distinct_centers() {
        let mut img = board();
        let tiles = TileSet::new(vec![tb(0, 0, 100, 100)]);
        let occ = vec![
            Occupant::new("a", PackedColor(0xFF0000), 0),
            Occupant::new("b", PackedColor(0x0000FF), 0),
        ];
        let report = OverlayCompositor::default().render(&mut img, &tiles, &occ);
        assert_eq!(report.placed[0].center, (80, 80));
        assert_eq!(report.placed[1].center, (70, 80));
        // the later marker is drawn on top
        assert_eq!(img.color_at(70, 80), Some(PackedColor(0x0000FF)));
        assert_eq!(img.color_at(89, 80), Some(PackedColor(0xFF0000)));
    }
}
