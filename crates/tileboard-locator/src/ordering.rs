//! Snake (boustrophedon) numbering of tile boxes.
//!
//! Rows are discovered greedily from top to bottom. Each row keeps an anchor
//! `y` that is half-blended toward every box added to it, so the anchor
//! drifts toward the row's later members instead of staying pinned to the
//! first one. Even rows then read left-to-right, odd rows right-to-left.

use tileboard_core::TileBox;

/// Median of box heights; the mean of the two middle values for even counts.
///
/// Returns `0.0` for an empty slice.
pub fn median_height(boxes: &[TileBox]) -> f64 {
    if boxes.is_empty() {
        return 0.0;
    }
    let mut heights: Vec<u32> = boxes.iter().map(|b| b.height).collect();
    heights.sort_unstable();
    let mid = heights.len() / 2;
    if heights.len() % 2 == 1 {
        heights[mid] as f64
    } else {
        (heights[mid - 1] as f64 + heights[mid] as f64) / 2.0
    }
}

/// Group boxes into rows.
///
/// Boxes are visited by ascending `y` (ties by `x`). A box joins the current
/// row when `|y - anchor| <= row_threshold`; otherwise it opens a new row.
pub fn cluster_rows(boxes: &[TileBox], row_threshold: f64) -> Vec<Vec<TileBox>> {
    let mut sorted = boxes.to_vec();
    sorted.sort_by_key(|b| (b.y, b.x));

    let mut rows: Vec<Vec<TileBox>> = Vec::new();
    let mut current: Vec<TileBox> = Vec::new();
    let mut anchor = 0.0f64;

    for b in sorted {
        let y = b.y as f64;
        if !current.is_empty() && (y - anchor).abs() > row_threshold {
            rows.push(std::mem::take(&mut current));
        }
        if current.is_empty() {
            anchor = y;
        } else {
            anchor = (anchor + y) / 2.0;
        }
        current.push(b);
    }
    if !current.is_empty() {
        rows.push(current);
    }

    rows
}

/// Order boxes in snake order; the position in the result is the tile index.
pub fn snake_order(boxes: &[TileBox]) -> Vec<TileBox> {
    if boxes.is_empty() {
        return Vec::new();
    }

    let row_threshold = median_height(boxes) * 0.5;
    let rows = cluster_rows(boxes, row_threshold);
    log::debug!(
        "snake order: {} boxes in {} rows (row threshold {:.1}px)",
        boxes.len(),
        rows.len(),
        row_threshold
    );

    let mut out = Vec::with_capacity(boxes.len());
    for (r, mut row) in rows.into_iter().enumerate() {
        if r % 2 == 0 {
            row.sort_by_key(|b| b.x);
        } else {
            row.sort_by_key(|b| std::cmp::Reverse(b.x));
        }
        out.extend(row);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tb(x: i32, y: i32, w: u32, h: u32) -> TileBox {
        TileBox::new(x, y, w, h).unwrap()
    }

    fn grid(rows: i32, cols: i32, size: u32, gap: i32) -> Vec<TileBox> {
        let step = size as i32 + gap;
        let mut v = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                v.push(tb(c * step, r * step, size, size));
            }
        }
        v
    }

    #[test]
    fn median_of_odd_and_even_counts() {
        assert_relative_eq!(median_height(&[]), 0.0);
        assert_relative_eq!(
            median_height(&[tb(0, 0, 1, 30), tb(0, 0, 1, 10), tb(0, 0, 1, 20)]),
            20.0
        );
        assert_relative_eq!(
            median_height(&[tb(0, 0, 1, 10), tb(0, 0, 1, 40), tb(0, 0, 1, 20), tb(0, 0, 1, 30)]),
            25.0
        );
    }

    #[test]
    fn snake_order_on_regular_grid() {
        let (rows, cols) = (4, 5);
        let mut boxes = grid(rows, cols, 40, 10);
        // scramble the input order
        boxes.reverse();
        boxes.swap(3, 11);

        let ordered = snake_order(&boxes);
        assert_eq!(ordered.len(), (rows * cols) as usize);
        for (idx, b) in ordered.iter().enumerate() {
            let row = idx as i32 / cols;
            let k = idx as i32 % cols;
            let col = if row % 2 == 0 { k } else { cols - 1 - k };
            assert_eq!((b.x, b.y), (col * 50, row * 50), "tile {idx}");
        }
    }

    #[test]
    fn jittered_rows_stay_together() {
        let boxes = vec![
            tb(0, 100, 40, 40),
            tb(50, 108, 40, 40),
            tb(100, 95, 40, 40),
            tb(0, 160, 40, 40),
            tb(50, 152, 40, 40),
        ];
        let rows = cluster_rows(&boxes, median_height(&boxes) * 0.5);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 2);

        let ordered = snake_order(&boxes);
        let xs: Vec<i32> = ordered.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![0, 50, 100, 50, 0]);
    }

    #[test]
    fn boundary_distance_joins_current_row() {
        // threshold is exactly 10 and the second box is 10px lower
        let boxes = vec![tb(0, 0, 20, 20), tb(30, 10, 20, 20)];
        assert_eq!(cluster_rows(&boxes, 10.0).len(), 1);
        assert_eq!(cluster_rows(&boxes, 9.5).len(), 2);
    }

    #[test]
    fn anchor_is_half_blended_toward_new_members() {
        // anchor: 0 -> 5 -> 7.5, so the box at 17 is 9.5 away and joins.
        // A true running mean (6.67) or the first member (0) would reject it.
        let boxes = vec![
            tb(0, 0, 20, 20),
            tb(30, 10, 20, 20),
            tb(60, 10, 20, 20),
            tb(90, 17, 20, 20),
        ];
        let rows = cluster_rows(&boxes, 10.0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 4);
    }

    #[test]
    fn empty_input_gives_empty_order() {
        assert!(snake_order(&[]).is_empty());
    }
}
