use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    Direction, Forest, Meadow, Pos, River, Rotation, RulesError, Tile, TileKind, TileSide, Zone,
    ZoneLike,
};

/// The color of a player. Players are ordered by color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 5] = [
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Yellow,
        PlayerColor::Purple,
    ];
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupantKind {
    /// Gatherers, fishers and hunters.
    Pawn,
    /// A hut guarding a water network.
    Hut,
}

impl OccupantKind {
    /// How many occupants of this kind every player owns.
    pub fn occupants_count(self) -> u32 {
        match self {
            OccupantKind::Pawn => 5,
            OccupantKind::Hut => 3,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Occupant {
    pub kind: OccupantKind,
    pub zone_id: u32,
}

impl Occupant {
    pub fn new(kind: OccupantKind, zone_id: u32) -> Self {
        Self { kind, zone_id }
    }

    pub fn tile_id(&self) -> u32 {
        self.zone_id / 10
    }
}

/// A tile on the board, with its orientation and at most one occupant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedTile {
    pub tile: Tile,
    /// `None` only for the start tile.
    pub placer: Option<PlayerColor>,
    pub rotation: Rotation,
    pub pos: Pos,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupant: Option<Occupant>,
}

impl PlacedTile {
    pub fn new(tile: Tile, placer: Option<PlayerColor>, rotation: Rotation, pos: Pos) -> Self {
        Self {
            tile,
            placer,
            rotation,
            pos,
            occupant: None,
        }
    }

    pub fn id(&self) -> u32 {
        self.tile.id
    }

    pub fn kind(&self) -> TileKind {
        self.tile.kind
    }

    /// The side facing `direction` once the rotation is applied.
    pub fn side(&self, direction: Direction) -> &TileSide {
        self.tile.side(direction.rotated(self.rotation.negated()))
    }

    pub fn zone_with_id(&self, zone_id: u32) -> Result<Zone, RulesError> {
        self.tile
            .zones()
            .into_iter()
            .find(|zone| zone.id() == zone_id)
            .ok_or(RulesError::ZoneNotFound { zone_id })
    }

    pub fn special_power_zone(&self) -> Option<Zone> {
        self.tile
            .zones()
            .into_iter()
            .find(|zone| zone.special_power().is_some())
    }

    pub fn forest_zones(&self) -> BTreeSet<Forest> {
        self.tile
            .zones()
            .into_iter()
            .filter_map(|zone| match zone {
                Zone::Forest(forest) => Some(forest),
                _ => None,
            })
            .collect()
    }

    pub fn meadow_zones(&self) -> BTreeSet<Meadow> {
        self.tile
            .zones()
            .into_iter()
            .filter_map(|zone| match zone {
                Zone::Meadow(meadow) => Some(meadow),
                _ => None,
            })
            .collect()
    }

    pub fn river_zones(&self) -> BTreeSet<River> {
        self.tile
            .zones()
            .into_iter()
            .filter_map(|zone| match zone {
                Zone::River(river) => Some(river),
                _ => None,
            })
            .collect()
    }

    /// Every occupant the placer of this tile could put on it.
    ///
    /// Pawns go on any side zone. Huts go on lakes, or on rivers that do
    /// not end in a lake.
    pub fn potential_occupants(&self) -> BTreeSet<Occupant> {
        let mut occupants = BTreeSet::new();
        if self.placer.is_none() {
            return occupants;
        }
        for zone in self.tile.zones() {
            match zone {
                Zone::Forest(_) | Zone::Meadow(_) => {
                    occupants.insert(Occupant::new(OccupantKind::Pawn, zone.id()));
                }
                Zone::River(river) => {
                    occupants.insert(Occupant::new(OccupantKind::Pawn, river.id));
                    if !river.has_lake() {
                        occupants.insert(Occupant::new(OccupantKind::Hut, river.id));
                    }
                }
                Zone::Lake(lake) => {
                    occupants.insert(Occupant::new(OccupantKind::Hut, lake.id));
                }
            }
        }
        occupants
    }

    pub fn with_occupant(&self, occupant: Occupant) -> Result<Self, RulesError> {
        if self.occupant.is_some() {
            return Err(RulesError::TileAlreadyOccupied { tile_id: self.id() });
        }
        Ok(Self {
            occupant: Some(occupant),
            ..self.clone()
        })
    }

    #[must_use]
    pub fn with_no_occupant(&self) -> Self {
        Self {
            occupant: None,
            ..self.clone()
        }
    }

    pub fn id_of_zone_occupied_by(&self, kind: OccupantKind) -> Option<u32> {
        self.occupant
            .filter(|occupant| occupant.kind == kind)
            .map(|occupant| occupant.zone_id)
    }
}
