//! Connected components of a change mask, reduced to bounding boxes.
//!
//! Foreground is 8-connected, background 4-connected. Only *external*
//! components are reported: a component that sits entirely inside a hole of
//! another component (e.g. the symbol drawn in the middle of an outlined
//! tile) does not get its own box.

use tileboard_core::{BinaryMask, TileBox};

const NEIGHBORS_8: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const NEIGHBORS_4: [(i64, i64); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

#[inline]
fn step(mask: &BinaryMask, idx: usize, (dx, dy): (i64, i64)) -> Option<usize> {
    let x = (idx % mask.width) as i64 + dx;
    let y = (idx / mask.width) as i64 + dy;
    if x < 0 || y < 0 || x >= mask.width as i64 || y >= mask.height as i64 {
        return None;
    }
    Some(y as usize * mask.width + x as usize)
}

/// Background pixels connected to the image border.
fn outer_background(mask: &BinaryMask) -> Vec<bool> {
    let (w, h) = (mask.width, mask.height);
    let mut outer = vec![false; w * h];
    let mut stack = Vec::new();

    let border = (0..w)
        .flat_map(|x| [x, (h - 1) * w + x])
        .chain((0..h).flat_map(|y| [y * w, y * w + w - 1]));
    for idx in border {
        if !mask.data[idx] && !outer[idx] {
            outer[idx] = true;
            stack.push(idx);
        }
    }

    while let Some(idx) = stack.pop() {
        for d in NEIGHBORS_4 {
            if let Some(n) = step(mask, idx, d) {
                if !mask.data[n] && !outer[n] {
                    outer[n] = true;
                    stack.push(n);
                }
            }
        }
    }

    outer
}

/// Bounding boxes of the external 8-connected components of `mask`, in
/// raster order of each component's first pixel.
pub fn external_bounding_boxes(mask: &BinaryMask) -> Vec<TileBox> {
    let (w, h) = (mask.width, mask.height);
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let outer = outer_background(mask);
    let mut visited = vec![false; w * h];
    let mut boxes = Vec::new();

    for start in 0..w * h {
        if !mask.data[start] || visited[start] {
            continue;
        }

        let (mut min_x, mut min_y) = (usize::MAX, usize::MAX);
        let (mut max_x, mut max_y) = (0usize, 0usize);
        let mut external = false;
        let mut stack = vec![start];
        visited[start] = true;

        while let Some(idx) = stack.pop() {
            let (x, y) = (idx % w, idx / w);
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);

            if !external {
                external = x == 0
                    || y == 0
                    || x == w - 1
                    || y == h - 1
                    || NEIGHBORS_4
                        .iter()
                        .filter_map(|&d| step(mask, idx, d))
                        .any(|n| outer[n]);
            }

            for d in NEIGHBORS_8 {
                if let Some(n) = step(mask, idx, d) {
                    if mask.data[n] && !visited[n] {
                        visited[n] = true;
                        stack.push(n);
                    }
                }
            }
        }

        if !external {
            continue;
        }
        if let Some(b) = TileBox::new(
            min_x as i32,
            min_y as i32,
            (max_x - min_x + 1) as u32,
            (max_y - min_y + 1) as u32,
        ) {
            boxes.push(b);
        }
    }

    boxes
}
