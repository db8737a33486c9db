use serde::{Deserialize, Serialize};

/// Axis-aligned tile bounding box in board-image pixels.
///
/// Serialized as an `[x, y, width, height]` tuple. Width and height are
/// always positive; [`TileBox::new`] and deserialization reject empty boxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[i64; 4]", into = "[i64; 4]")]
pub struct TileBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl TileBox {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self {
            x,
            y,
            width,
            height,
        })
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn contains(&self, px: i64, py: i64) -> bool {
        px >= self.x as i64 && py >= self.y as i64 && px < self.right() && py < self.bottom()
    }
}

impl From<TileBox> for [i64; 4] {
    fn from(b: TileBox) -> Self {
        [b.x as i64, b.y as i64, b.width as i64, b.height as i64]
    }
}

impl TryFrom<[i64; 4]> for TileBox {
    type Error = String;

    fn try_from([x, y, w, h]: [i64; 4]) -> Result<Self, Self::Error> {
        let x = i32::try_from(x).map_err(|_| format!("tile x out of range: {x}"))?;
        let y = i32::try_from(y).map_err(|_| format!("tile y out of range: {y}"))?;
        let width = u32::try_from(w).map_err(|_| format!("tile width out of range: {w}"))?;
        let height = u32::try_from(h).map_err(|_| format!("tile height out of range: {h}"))?;
        TileBox::new(x, y, width, height)
            .ok_or_else(|| format!("tile must have positive size, got {w}x{h}"))
    }
}

/// Ordered tile boxes; position `i` is the identity of board tile `i`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileSet(Vec<TileBox>);

impl TileSet {
    pub fn new(tiles: Vec<TileBox>) -> Self {
        Self(tiles)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tile by game-board index; `None` for negative or out-of-range indices.
    pub fn get(&self, index: i64) -> Option<&TileBox> {
        usize::try_from(index).ok().and_then(|i| self.0.get(i))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TileBox> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[TileBox] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<TileBox> {
        self.0
    }
}

impl FromIterator<TileBox> for TileSet {
    fn from_iter<I: IntoIterator<Item = TileBox>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TileSet {
    type Item = &'a TileBox;
    type IntoIter = std::slice::Iter<'a, TileBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_boxes() {
        assert!(TileBox::new(0, 0, 0, 5).is_none());
        assert!(TileBox::new(0, 0, 5, 0).is_none());
        let b = TileBox::new(3, 4, 5, 6).unwrap();
        assert_eq!(b.area(), 30);
        assert_eq!((b.right(), b.bottom()), (8, 10));
        assert!(b.contains(3, 4));
        assert!(!b.contains(8, 4));
    }

    #[test]
    fn tile_set_serializes_as_tuples() {
        let set = TileSet::new(vec![
            TileBox::new(100, 100, 40, 40).unwrap(),
            TileBox::new(0, 5, 10, 20).unwrap(),
        ]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[[100,100,40,40],[0,5,10,20]]");

        let back: TileSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn deserialization_rejects_invalid_boxes() {
        assert!(serde_json::from_str::<TileBox>("[0,0,0,10]").is_err());
        assert!(serde_json::from_str::<TileBox>("[0,0,-3,10]").is_err());
    }

    #[test]
    fn get_handles_negative_and_out_of_range() {
        let set: TileSet = (0..3)
            .filter_map(|i| TileBox::new(i * 10, 0, 10, 10))
            .collect();
        assert_eq!(set.get(-1), None);
        assert_eq!(set.get(3), None);
        assert_eq!(set.get(2).map(|b| b.x), Some(20));
    }
}
