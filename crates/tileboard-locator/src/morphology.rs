//! Binary morphology with a 3x3 square structuring element.
//!
//! The square is separable, so each step runs as a horizontal 1x3 pass
//! followed by a vertical 3x1 pass. Pixels outside the image are ignored:
//! they never switch a border pixel on (dilate) or off (erode).

use tileboard_core::BinaryMask;

#[derive(Clone, Copy)]
enum Op {
    Dilate,
    Erode,
}

impl Op {
    #[inline]
    fn combine(self, a: bool, b: bool) -> bool {
        match self {
            Op::Dilate => a || b,
            Op::Erode => a && b,
        }
    }
}

fn pass_horizontal(src: &BinaryMask, op: Op) -> BinaryMask {
    let (w, h) = (src.width, src.height);
    let mut out = BinaryMask::new(w, h);
    for y in 0..h {
        let row = &src.data[y * w..(y + 1) * w];
        for x in 0..w {
            let mut v = row[x];
            if x > 0 {
                v = op.combine(v, row[x - 1]);
            }
            if x + 1 < w {
                v = op.combine(v, row[x + 1]);
            }
            out.data[y * w + x] = v;
        }
    }
    out
}

fn pass_vertical(src: &BinaryMask, op: Op) -> BinaryMask {
    let (w, h) = (src.width, src.height);
    let mut out = BinaryMask::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut v = src.data[y * w + x];
            if y > 0 {
                v = op.combine(v, src.data[(y - 1) * w + x]);
            }
            if y + 1 < h {
                v = op.combine(v, src.data[(y + 1) * w + x]);
            }
            out.data[y * w + x] = v;
        }
    }
    out
}

fn apply(mask: &BinaryMask, op: Op, iterations: u32) -> BinaryMask {
    let mut cur = mask.clone();
    for _ in 0..iterations {
        cur = pass_vertical(&pass_horizontal(&cur, op), op);
    }
    cur
}

/// Grow set regions by one pixel (8-neighborhood) per iteration.
pub fn dilate(mask: &BinaryMask, iterations: u32) -> BinaryMask {
    apply(mask, Op::Dilate, iterations)
}

/// Shrink set regions by one pixel (8-neighborhood) per iteration.
pub fn erode(mask: &BinaryMask, iterations: u32) -> BinaryMask {
    apply(mask, Op::Erode, iterations)
}

/// Morphological closing: `iterations` dilations followed by as many erosions.
pub fn close(mask: &BinaryMask, iterations: u32) -> BinaryMask {
    erode(&dilate(mask, iterations), iterations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&str]) -> BinaryMask {
        let width = rows[0].len();
        let mut m = BinaryMask::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                m.set(x, y, c == '#');
            }
        }
        m
    }

    fn rows_of(m: &BinaryMask) -> Vec<String> {
        (0..m.height)
            .map(|y| {
                (0..m.width)
                    .map(|x| if m.get(x, y) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn dilate_single_pixel_gives_square() {
        let m = mask_from_rows(&[".....", ".....", "..#..", ".....", "....."]);
        let d = dilate(&m, 1);
        assert_eq!(
            rows_of(&d),
            vec![".....", ".###.", ".###.", ".###.", "....."]
        );
        assert_eq!(dilate(&m, 2).count(), 25);
    }

    #[test]
    fn erode_removes_isolated_pixels_but_keeps_border_blobs() {
        let m = mask_from_rows(&["###..", "###..", "###.#", ".....", "....."]);
        let e = erode(&m, 1);
        // outside pixels do not erode the corner blob
        assert_eq!(
            rows_of(&e),
            vec!["##...", "##...", ".....", ".....", "....."]
        );
    }

    #[test]
    fn close_bridges_thin_gaps_without_growing_extent() {
        let m = mask_from_rows(&[
            "............",
            "............",
            "..####.###..",
            "..####.###..",
            "..####.###..",
            "............",
            "............",
        ]);
        let c = close(&m, 1);
        assert_eq!(
            rows_of(&c),
            vec![
                "............",
                "............",
                "..########..",
                "..########..",
                "..########..",
                "............",
                "............",
            ]
        );
    }

    #[test]
    fn zero_iterations_is_identity() {
        let m = mask_from_rows(&["#.#", ".#.", "#.#"]);
        assert_eq!(close(&m, 0), m);
    }
}
