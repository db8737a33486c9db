//! End-to-end helpers over image files.

use std::path::{Path, PathBuf};

use tileboard_core::{RasterImage, TileSet};
use tileboard_locator::{LocateDebug, LocatorParams, TileLocator};
use tileboard_overlay::{Occupant, OverlayCompositor, OverlayParams, RenderReport};

use crate::config::{CacheKey, TileCache, TileboardConfig};
use crate::io::{load_raster, save_raster};
use crate::TileboardError;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Decode both images and locate tiles.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip_all, fields(background = %background.as_ref().display()))
)]
pub fn locate_files(
    background: impl AsRef<Path>,
    mixed: impl AsRef<Path>,
    params: &LocatorParams,
) -> Result<TileSet, TileboardError> {
    Ok(locate_files_with_debug(background, mixed, params)?.tiles)
}

/// Like [`locate_files`], keeping the mask and rejected candidates.
pub fn locate_files_with_debug(
    background: impl AsRef<Path>,
    mixed: impl AsRef<Path>,
    params: &LocatorParams,
) -> Result<LocateDebug, TileboardError> {
    let background = load_raster(background)?;
    let mixed = load_raster(mixed)?;
    let debug = TileLocator::new(params.clone()).locate_with_debug(&background, &mixed)?;
    log::info!("located {} tiles", debug.tiles.len());
    Ok(debug)
}

/// Decode `board`, draw the occupants, and write the result to `out`.
///
/// The rendered image is returned as well so callers can keep processing it.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip_all, fields(out = %out.as_ref().display()))
)]
pub fn render_file(
    board: impl AsRef<Path>,
    tiles: &TileSet,
    occupants: &[Occupant],
    out: impl AsRef<Path>,
    params: &OverlayParams,
) -> Result<(RasterImage, RenderReport), TileboardError> {
    let mut image = load_raster(board)?;
    let report = OverlayCompositor::new(params.clone()).render(&mut image, tiles, occupants);
    save_raster(&image, out.as_ref())?;
    log::info!(
        "saved board overlay to {} ({} markers)",
        out.as_ref().display(),
        report.placed.len()
    );
    Ok((image, report))
}

/// Outcome of [`update_board`].
#[derive(Debug, Clone)]
pub struct BoardUpdate {
    pub tiles: TileSet,
    /// `true` when the tiles came from the cache file.
    pub tiles_from_cache: bool,
    pub report: RenderReport,
    pub output_path: PathBuf,
}

/// Run a full board update: locate (or reuse cached) tiles, then render.
///
/// Both images are decoded on every call. The cached tile set is reused only
/// when it was located from images with the same pixels and the same
/// locator parameters; otherwise tiles are located again and the cache file
/// is rewritten.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip_all))]
pub fn update_board(config: &TileboardConfig) -> Result<BoardUpdate, TileboardError> {
    let background = load_raster(&config.background_path)?;
    let mut board = load_raster(&config.board_path)?;
    let key = CacheKey::new(&background, &board, &config.locator);

    let cached = config
        .tiles_cache
        .as_deref()
        .and_then(|path| TileCache::lookup(path, &key));
    let tiles_from_cache = cached.is_some();

    let tiles = match cached {
        Some(tiles) => {
            log::debug!("loaded {} tiles from cache", tiles.len());
            tiles
        }
        None => {
            let tiles = TileLocator::new(config.locator.clone()).locate(&background, &board)?;
            log::info!("located {} tiles", tiles.len());
            if let Some(path) = &config.tiles_cache {
                TileCache {
                    key,
                    tiles: tiles.clone(),
                }
                .write_json(path)?;
            }
            tiles
        }
    };

    let occupants = config.resolved_occupants();
    let report =
        OverlayCompositor::new(config.overlay.clone()).render(&mut board, &tiles, &occupants);
    save_raster(&board, &config.output_path)?;
    log::info!(
        "saved board overlay to {} ({} markers)",
        config.output_path.display(),
        report.placed.len()
    );

    Ok(BoardUpdate {
        tiles,
        tiles_from_cache,
        report,
        output_path: config.output_path.clone(),
    })
}
