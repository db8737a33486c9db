//! JSON configuration and tile-set cache files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tileboard_core::{RasterImage, TileSet};
use tileboard_locator::LocatorParams;
use tileboard_overlay::{Occupant, OverlayParams, Palette};

use crate::TileboardError;

fn default_background_path() -> PathBuf {
    PathBuf::from("assets/background.png")
}

fn default_board_path() -> PathBuf {
    PathBuf::from("assets/board.png")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("assets/board_state.png")
}

/// Everything needed for one board update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileboardConfig {
    /// Blank board without tiles.
    #[serde(default = "default_background_path")]
    pub background_path: PathBuf,
    /// Board with tiles; also the canvas markers are drawn on.
    #[serde(default = "default_board_path")]
    pub board_path: PathBuf,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Where located tiles are cached. The cache is reused only while both
    /// images and the locator parameters are unchanged.
    #[serde(default)]
    pub tiles_cache: Option<PathBuf>,
    #[serde(default)]
    pub locator: LocatorParams,
    #[serde(default)]
    pub overlay: OverlayParams,
    #[serde(default)]
    pub palette: Palette,
    /// Draw a single marker per label instead of one per occupant.
    #[serde(default)]
    pub one_marker_per_team: bool,
    #[serde(default)]
    pub occupants: Vec<Occupant>,
}

impl Default for TileboardConfig {
    fn default() -> Self {
        Self {
            background_path: default_background_path(),
            board_path: default_board_path(),
            output_path: default_output_path(),
            tiles_cache: None,
            locator: LocatorParams::default(),
            overlay: OverlayParams::default(),
            palette: Palette::default(),
            one_marker_per_team: false,
            occupants: Vec::new(),
        }
    }
}

fn read_to_string(path: &Path) -> Result<String, TileboardError> {
    fs::read_to_string(path).map_err(|source| TileboardError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<(), TileboardError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

impl TileboardConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, TileboardError> {
        let raw = read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), TileboardError> {
        write_pretty(path.as_ref(), self)
    }

    /// Occupants to draw, with palette colors filled in and teams collapsed
    /// when `one_marker_per_team` is set.
    pub fn resolved_occupants(&self) -> Vec<Occupant> {
        let colored = self.occupants.iter().map(|o| Occupant {
            color: self.palette.resolve(&o.label, o.color),
            ..o.clone()
        });
        if self.one_marker_per_team {
            tileboard_overlay::aggregate_teams(colored)
        } else {
            colored.collect()
        }
    }
}

/// Read a tile set written by [`write_tiles_json`].
pub fn load_tiles_json(path: impl AsRef<Path>) -> Result<TileSet, TileboardError> {
    let raw = read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write a tile set as a JSON list of `[x, y, width, height]`.
pub fn write_tiles_json(path: impl AsRef<Path>, tiles: &TileSet) -> Result<(), TileboardError> {
    write_pretty(path.as_ref(), tiles)
}

/// What a cached tile set was located from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheKey {
    /// [`RasterImage::fingerprint`] of the blank board.
    pub background: u64,
    /// [`RasterImage::fingerprint`] of the board with tiles.
    pub board: u64,
    pub locator: LocatorParams,
}

impl CacheKey {
    pub fn new(background: &RasterImage, board: &RasterImage, locator: &LocatorParams) -> Self {
        Self {
            background: background.fingerprint(),
            board: board.fingerprint(),
            locator: locator.clone(),
        }
    }
}

/// Contents of the `tiles_cache` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileCache {
    pub key: CacheKey,
    pub tiles: TileSet,
}

impl TileCache {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, TileboardError> {
        let raw = read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), TileboardError> {
        write_pretty(path.as_ref(), self)
    }

    /// Tiles from the cache file at `path` if it was written for `key`.
    ///
    /// Stale and unreadable caches both give `None`, so the caller locates again
    /// and overwrites the file.
    pub fn lookup(path: &Path, key: &CacheKey) -> Option<TileSet> {
        if !path.exists() {
            return None;
        }
        match Self::load_json(path) {
            Ok(cache) if cache.key == *key => Some(cache.tiles),
            Ok(_) => {
                log::info!("tile cache {} is stale, locating again", path.display());
                None
            }
            Err(e) => {
                log::warn!("ignoring unreadable tile cache {}: {e}", path.display());
                None
            }
        }
    }
}

/// Read a JSON list of occupants.
pub fn load_occupants_json(path: impl AsRef<Path>) -> Result<Vec<Occupant>, TileboardError> {
    let raw = read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&raw)?)
}
