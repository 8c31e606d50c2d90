use crate::{OccupantKind, PlayerColor, Pos};

/// Broad classification of a [`RulesError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A precondition of the operation was violated by the caller.
    InvalidArgument,
    /// A lookup did not find what it was asked for.
    NotFound,
}

/// The error type for all operations on areas, partitions and boards.
///
/// These signal misuse by the caller. A failing operation never changes
/// the value it was called on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RulesError {
    ZoneNotFound { zone_id: u32 },
    TileNotFound { tile_id: u32 },
    ZoneAlreadyPartitioned { zone_id: u32 },
    NegativeOpenConnections { zone_id: u32 },
    AreaNotInPartition { zone_id: u32 },
    AreaAlreadyOccupied { zone_id: u32 },
    OccupantNotInArea { zone_id: u32, color: PlayerColor },
    IncompatibleSides,
    PositionOutOfBoard { pos: Pos },
    IllegalPlacement { tile_id: u32, pos: Pos },
    TileAlreadyOccupied { tile_id: u32 },
    TileNotOccupied { tile_id: u32 },
    TileHasNoPlacer { tile_id: u32 },
    InvalidOccupant { kind: OccupantKind, zone_id: u32 },
}

impl RulesError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RulesError::ZoneNotFound { .. } | RulesError::TileNotFound { .. } => ErrorKind::NotFound,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

impl std::error::Error for RulesError {}

impl std::fmt::Display for RulesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesError::ZoneNotFound { zone_id } =>
                write!(f, "Zone {} is not known", zone_id),
            RulesError::TileNotFound { tile_id } =>
                write!(f, "Tile {} is not on the board", tile_id),
            RulesError::ZoneAlreadyPartitioned { zone_id } =>
                write!(f, "Zone {} already belongs to an area", zone_id),
            RulesError::NegativeOpenConnections { zone_id } =>
                write!(f, "Connecting the area of zone {} would leave a negative number of open connections", zone_id),
            RulesError::AreaNotInPartition { zone_id } =>
                write!(f, "The area containing zone {} is not part of the partition", zone_id),
            RulesError::AreaAlreadyOccupied { zone_id } =>
                write!(f, "The area containing zone {} is already occupied", zone_id),
            RulesError::OccupantNotInArea { zone_id, color } =>
                write!(f, "The area containing zone {} has no occupant of color {:?}", zone_id, color),
            RulesError::IncompatibleSides =>
                write!(f, "Tried to connect two tile sides of different kinds"),
            RulesError::PositionOutOfBoard { pos } =>
                write!(f, "Position ({}, {}) is outside of the board", pos.x, pos.y),
            RulesError::IllegalPlacement { tile_id, pos } =>
                write!(f, "Tile {} cannot be placed at ({}, {})", tile_id, pos.x, pos.y),
            RulesError::TileAlreadyOccupied { tile_id } =>
                write!(f, "Tile {} already has an occupant", tile_id),
            RulesError::TileNotOccupied { tile_id } =>
                write!(f, "Tile {} has no such occupant", tile_id),
            RulesError::TileHasNoPlacer { tile_id } =>
                write!(f, "Tile {} was not placed by a player, so it cannot be occupied", tile_id),
            RulesError::InvalidOccupant { kind, zone_id } =>
                write!(f, "An occupant of kind {:?} cannot occupy zone {}", kind, zone_id),
        }
    }
}
