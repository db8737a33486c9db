use serde::{Deserialize, Serialize};
use tileboard_core::PackedColor;

/// A labeled marker bound to a board tile.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Occupant {
    pub label: String,
    pub color: PackedColor,
    /// Index into the tile set; may be out of range, which skips the marker.
    pub tile_index: i64,
}

impl Occupant {
    pub fn new(label: impl Into<String>, color: PackedColor, tile_index: i64) -> Self {
        Self {
            label: label.into(),
            color,
            tile_index,
        }
    }
}

/// Occupants of one tile, in caller order. The order is the stacking order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupantGroup<'a> {
    pub tile_index: i64,
    pub members: Vec<&'a Occupant>,
}

/// Group occupants by tile.
///
/// Groups appear in the order their tile is first mentioned; members keep
/// their relative input order.
pub fn group_by_tile(occupants: &[Occupant]) -> Vec<OccupantGroup<'_>> {
    let mut groups: Vec<OccupantGroup<'_>> = Vec::new();
    for occ in occupants {
        match groups.iter_mut().find(|g| g.tile_index == occ.tile_index) {
            Some(group) => group.members.push(occ),
            None => groups.push(OccupantGroup {
                tile_index: occ.tile_index,
                members: vec![occ],
            }),
        }
    }
    groups
}

/// Collapse team members into one occupant per team.
///
/// Members are matched on `label` (the team name). The first member seen
/// decides the team's tile and color.
pub fn aggregate_teams(members: impl IntoIterator<Item = Occupant>) -> Vec<Occupant> {
    let mut teams: Vec<Occupant> = Vec::new();
    for member in members {
        if !teams.iter().any(|t| t.label == member.label) {
            teams.push(member);
        }
    }
    teams
}
