//! Overlay compositor: draw occupant markers onto located board tiles.
//!
//! Each marker is a white-ringed colored disc anchored at the bottom-right
//! interior corner of its tile. Further occupants of the same tile shift
//! left by `shift` pixels and are clamped at the tile's left padding, so a
//! crowded tile overlaps its markers instead of spilling out of bounds.

mod compositor;
mod draw;
mod occupant;
mod palette;
mod params;

pub use compositor::{marker_centers, OverlayCompositor, PlacedMarker, RenderReport, SkippedOccupant};
pub use draw::fill_disc_aa;
pub use occupant::{aggregate_teams, group_by_tile, Occupant, OccupantGroup};
pub use palette::Palette;
pub use params::OverlayParams;
