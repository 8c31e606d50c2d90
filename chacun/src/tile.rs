use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Forest, Meadow, River, Zone};

/// The four cardinal directions, in clockwise order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    N,
    E,
    S,
    W,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    fn from_index(idx: u8) -> Self {
        Self::ALL[usize::from(idx % 4)]
    }

    pub fn rotated(self, rotation: Rotation) -> Self {
        Self::from_index(self as u8 + rotation.quarter_turns_cw())
    }

    pub fn opposite(self) -> Self {
        self.rotated(Rotation::HalfTurn)
    }
}

/// A rotation of a tile, in quarter turns clockwise.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Rotation {
    Zero,
    Right,
    HalfTurn,
    Left,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Zero,
        Rotation::Right,
        Rotation::HalfTurn,
        Rotation::Left,
    ];

    pub fn quarter_turns_cw(self) -> u8 {
        self as u8
    }

    pub fn degrees_cw(self) -> u16 {
        u16::from(self.quarter_turns_cw()) * 90
    }

    #[must_use]
    pub fn add(self, that: Rotation) -> Self {
        Self::ALL[usize::from((self as u8 + that as u8) % 4)]
    }

    #[must_use]
    pub fn negated(self) -> Self {
        Self::ALL[usize::from((4 - self as u8) % 4)]
    }
}

/// A position on the board. `y` grows towards the south.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i8,
    pub y: i8,
}

impl Pos {
    pub const ORIGIN: Pos = Pos { x: 0, y: 0 };

    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn translated(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Self {
        match direction {
            Direction::N => self.translated(0, -1),
            Direction::E => self.translated(1, 0),
            Direction::S => self.translated(0, 1),
            Direction::W => self.translated(-1, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Start,
    Normal,
    Menhir,
}

/// One edge of a tile.
///
/// The zones of a river side are listed clockwise: `meadow1` comes first
/// when walking around the tile in clockwise direction.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TileSide {
    Forest {
        forest: Forest,
    },
    Meadow {
        meadow: Meadow,
    },
    River {
        meadow1: Meadow,
        river: River,
        meadow2: Meadow,
    },
}

impl TileSide {
    /// The zones touching this side, in clockwise order.
    pub fn zones(&self) -> Vec<Zone> {
        match self {
            TileSide::Forest { forest } => vec![Zone::Forest(forest.clone())],
            TileSide::Meadow { meadow } => vec![Zone::Meadow(meadow.clone())],
            TileSide::River {
                meadow1,
                river,
                meadow2,
            } => vec![
                Zone::Meadow(meadow1.clone()),
                Zone::River(river.clone()),
                Zone::Meadow(meadow2.clone()),
            ],
        }
    }

    /// Whether two sides may touch on the board.
    pub fn is_same_kind_as(&self, that: &TileSide) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(that)
    }
}

/// A tile as printed, i.e. not yet placed on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: u32,
    pub kind: TileKind,
    /// Indexed by [`Direction`].
    pub sides: [TileSide; 4],
}

impl Tile {
    pub fn new(
        id: u32,
        kind: TileKind,
        north: TileSide,
        east: TileSide,
        south: TileSide,
        west: TileSide,
    ) -> Self {
        Self {
            id,
            kind,
            sides: [north, east, south, west],
        }
    }

    pub fn side(&self, direction: Direction) -> &TileSide {
        &self.sides[direction as usize]
    }

    /// The zones touching at least one side of the tile.
    pub fn side_zones(&self) -> BTreeSet<Zone> {
        self.sides.iter().flat_map(TileSide::zones).collect()
    }

    /// All zones of the tile: the side zones plus the lakes fed by its rivers.
    pub fn zones(&self) -> BTreeSet<Zone> {
        let mut zones = self.side_zones();
        let lakes: Vec<Zone> = zones
            .iter()
            .filter_map(|zone| match zone {
                Zone::River(River {
                    lake: Some(lake), ..
                }) => Some(Zone::Lake(lake.clone())),
                _ => None,
            })
            .collect();
        zones.extend(lakes);
        zones
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog, ZoneLike};

    #[test]
    fn rotations_compose() {
        for r1 in Rotation::ALL {
            assert_eq!(r1.add(r1.negated()), Rotation::Zero);
            for r2 in Rotation::ALL {
                assert_eq!(
                    r1.add(r2).quarter_turns_cw(),
                    (r1.quarter_turns_cw() + r2.quarter_turns_cw()) % 4
                );
            }
        }
        assert_eq!(Rotation::Left.degrees_cw(), 270);
    }

    #[test]
    fn directions_rotate_clockwise() {
        assert_eq!(Direction::N.rotated(Rotation::Right), Direction::E);
        assert_eq!(Direction::W.rotated(Rotation::Right), Direction::N);
        assert_eq!(Direction::E.rotated(Rotation::Left), Direction::N);
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
        }
    }

    #[test]
    fn neighbors_are_one_step_away() {
        let pos = Pos::new(3, -2);
        assert_eq!(pos.neighbor(Direction::N), Pos::new(3, -3));
        assert_eq!(pos.neighbor(Direction::E), Pos::new(4, -2));
        assert_eq!(pos.neighbor(Direction::S), Pos::new(3, -1));
        assert_eq!(pos.neighbor(Direction::W), Pos::new(2, -2));
    }

    #[test]
    fn start_tile_zones_include_its_lake() {
        let tile = catalog::start_tile();
        let side_ids: Vec<u32> = tile.side_zones().iter().map(Zone::id).collect();
        assert_eq!(side_ids.len(), 4);
        let ids: BTreeSet<u32> = tile.zones().iter().map(Zone::id).collect();
        assert_eq!(ids, BTreeSet::from([560, 561, 562, 563, 568]));
    }

    #[test]
    fn sides_match_on_kind_only() {
        let tile = catalog::start_tile();
        let other = catalog::tile(31).unwrap();
        assert!(tile.side(Direction::E).is_same_kind_as(tile.side(Direction::S)));
        assert!(tile.side(Direction::N).is_same_kind_as(other.side(Direction::N)));
        assert!(tile.side(Direction::W).is_same_kind_as(other.side(Direction::E)));
        assert!(!tile.side(Direction::N).is_same_kind_as(tile.side(Direction::W)));
    }
}
