use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tileboard_core::PackedColor;

/// Immutable name-to-color table used when an occupant has no color.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Palette(BTreeMap<String, PackedColor>);

impl Palette {
    /// Color used when neither the occupant nor the palette has one.
    pub const FALLBACK: PackedColor = PackedColor(0xF1_C4_0F);

    pub fn new(entries: impl IntoIterator<Item = (String, PackedColor)>) -> Self {
        Self(entries.into_iter().collect())
    }

    pub fn get(&self, name: &str) -> Option<PackedColor> {
        self.0.get(name).copied()
    }

    /// Pick the color to draw for `label`.
    ///
    /// An explicit color wins unless it is unset (`0`); then the palette
    /// entry for `label`, then [`Palette::FALLBACK`].
    pub fn resolve(&self, label: &str, color: PackedColor) -> PackedColor {
        if !color.is_unset() {
            return color;
        }
        self.get(label).unwrap_or(Self::FALLBACK)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_explicit_then_palette_then_fallback() {
        let palette = Palette::new([("blue".to_string(), PackedColor(0x0000FF))]);
        assert_eq!(palette.resolve("blue", PackedColor(0x00FF00)), PackedColor(0x00FF00));
        assert_eq!(palette.resolve("blue", PackedColor(0)), PackedColor(0x0000FF));
        assert_eq!(palette.resolve("green", PackedColor(0)), Palette::FALLBACK);
    }

    #[test]
    fn palette_json_is_a_plain_map() {
        let p: Palette = serde_json::from_str(r#"{ "red": 16711680 }"#).unwrap();
        assert_eq!(p.get("red"), Some(PackedColor(0xFF0000)));
        assert_eq!(p.len(), 1);
    }
}
