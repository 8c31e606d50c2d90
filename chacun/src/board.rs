use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::{
    Animal, Area, BoundingBox, Direction, Forest, Meadow, Occupant, OccupantKind, PlacedTile,
    PlayerColor, Pos, River, Rotation, RulesError, Tile, TileSide, Water, ZoneLike,
    ZonePartitions,
};

/// How far from the origin tiles may be placed, in each direction.
pub const REACH: i8 = 12;
const WIDTH: usize = 2 * REACH as usize + 1;

/// The tiles placed so far, and the areas they form.
///
/// This is an immutable type: the "mutating" methods return a new board and
/// leave the old one intact, so earlier boards stay valid snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Row-major grid of `WIDTH * WIDTH` cells, north-west corner first.
    /// Boards derived from each other share their unchanged tiles.
    tiles: Vec<Option<Arc<PlacedTile>>>,
    /// Indexes into `tiles`, in the order the tiles were placed.
    ordered_tile_indexes: Vec<usize>,
    partitions: ZonePartitions,
    /// Only ever grows.
    cancelled_animals: BTreeSet<Animal>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            tiles: vec![None; WIDTH * WIDTH],
            ordered_tile_indexes: Vec::new(),
            partitions: ZonePartitions::new(),
            cancelled_animals: BTreeSet::new(),
        }
    }

    pub fn is_in_bounds(pos: Pos) -> bool {
        (-REACH..=REACH).contains(&pos.x) && (-REACH..=REACH).contains(&pos.y)
    }

    fn index(pos: Pos) -> Option<usize> {
        if !Self::is_in_bounds(pos) {
            return None;
        }
        let row = (pos.y + REACH) as usize;
        let col = (pos.x + REACH) as usize;
        Some(row * WIDTH + col)
    }

    /// Number of tiles on the board.
    pub fn len(&self) -> usize {
        self.ordered_tile_indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_tile_indexes.is_empty()
    }

    /// The placed tiles, in placement order.
    pub fn placed_tiles(&self) -> impl Iterator<Item = &PlacedTile> {
        self.ordered_tile_indexes
            .iter()
            .filter_map(|&idx| self.tiles[idx].as_deref())
    }

    /// The smallest area containing every placed tile, if any.
    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_coordinates_iter(self.placed_tiles().map(|tile| (tile.pos.x, tile.pos.y)))
    }

    pub fn tile_at(&self, pos: Pos) -> Option<&PlacedTile> {
        Self::index(pos).and_then(|idx| self.tiles[idx].as_deref())
    }

    pub fn tile_with_id(&self, tile_id: u32) -> Result<&PlacedTile, RulesError> {
        self.placed_tiles()
            .find(|tile| tile.id() == tile_id)
            .ok_or(RulesError::TileNotFound { tile_id })
    }

    pub fn last_placed_tile(&self) -> Option<&PlacedTile> {
        self.ordered_tile_indexes
            .last()
            .and_then(|&idx| self.tiles[idx].as_deref())
    }

    pub fn partitions(&self) -> &ZonePartitions {
        &self.partitions
    }

    pub fn cancelled_animals(&self) -> &BTreeSet<Animal> {
        &self.cancelled_animals
    }

    /// All occupants currently on the board.
    pub fn occupants(&self) -> BTreeSet<Occupant> {
        self.placed_tiles().filter_map(|tile| tile.occupant).collect()
    }

    /// How many occupants of the given kind this player has on the board.
    pub fn occupant_count(&self, player: PlayerColor, kind: OccupantKind) -> usize {
        self.placed_tiles()
            .filter(|tile| tile.placer == Some(player))
            .filter(|tile| tile.occupant.is_some_and(|occupant| occupant.kind == kind))
            .count()
    }

    pub fn forest_area(&self, forest: &Forest) -> Result<&Area<Forest>, RulesError> {
        self.partitions.forests().area_containing(forest)
    }

    pub fn meadow_area(&self, meadow: &Meadow) -> Result<&Area<Meadow>, RulesError> {
        self.partitions.meadows().area_containing(meadow)
    }

    pub fn river_area(&self, river: &River) -> Result<&Area<River>, RulesError> {
        self.partitions.rivers().area_containing(river)
    }

    /// The water network containing the given river or lake.
    pub fn river_system_area(&self, water: &impl ZoneLike) -> Result<&Area<Water>, RulesError> {
        self.partitions.river_systems().area_containing(water)
    }

    pub fn meadow_areas(&self) -> impl Iterator<Item = &Area<Meadow>> {
        self.partitions.meadows().areas()
    }

    pub fn river_system_areas(&self) -> impl Iterator<Item = &Area<Water>> {
        self.partitions.river_systems().areas()
    }

    /// The part of a meadow's area lying on the eight tiles around `pos`
    /// and on the tile at `pos` itself.
    ///
    /// The result keeps the occupants of the whole area and has no open
    /// connections.
    pub fn adjacent_meadow(&self, pos: Pos, meadow: &Meadow) -> Result<Area<Meadow>, RulesError> {
        let area = self.meadow_area(meadow)?;
        let mut zones = BTreeSet::new();
        for zone in area.zones() {
            let tile_pos = self.tile_with_id(zone.tile_id())?.pos;
            let dx = i16::from(tile_pos.x) - i16::from(pos.x);
            let dy = i16::from(tile_pos.y) - i16::from(pos.y);
            if dx.abs() <= 1 && dy.abs() <= 1 {
                zones.insert(zone.clone());
            }
        }
        Ok(Area::new(zones, area.occupants().to_vec(), 0))
    }

    /// Empty cells next to at least one tile, sorted by `y` then `x`.
    pub fn insertion_positions(&self) -> Vec<Pos> {
        let mut positions = BTreeSet::new();
        for tile in self.placed_tiles() {
            for direction in Direction::ALL {
                let pos = tile.pos.neighbor(direction);
                if Self::is_in_bounds(pos) && self.tile_at(pos).is_none() {
                    positions.insert((pos.y, pos.x));
                }
            }
        }
        positions
            .into_iter()
            .map(|(y, x)| Pos::new(x, y))
            .collect()
    }

    fn is_insertion_position(&self, pos: Pos) -> bool {
        Self::is_in_bounds(pos)
            && self.tile_at(pos).is_none()
            && Direction::ALL
                .into_iter()
                .any(|direction| self.tile_at(pos.neighbor(direction)).is_some())
    }

    // Whether every neighbor of `pos` has a side of the same kind facing it.
    fn sides_match<'a>(&self, pos: Pos, side: impl Fn(Direction) -> &'a TileSide) -> bool {
        Direction::ALL.into_iter().all(|direction| {
            match self.tile_at(pos.neighbor(direction)) {
                Some(neighbor) => neighbor
                    .side(direction.opposite())
                    .is_same_kind_as(side(direction)),
                None => true,
            }
        })
    }

    /// Could this tile be placed as it is?
    pub fn can_add_tile(&self, tile: &PlacedTile) -> bool {
        self.is_insertion_position(tile.pos) && self.sides_match(tile.pos, |d| tile.side(d))
    }

    /// Is there any position and rotation where this tile could be placed?
    pub fn could_place_tile(&self, tile: &Tile) -> bool {
        self.insertion_positions().into_iter().any(|pos| {
            Rotation::ALL.into_iter().any(|rotation| {
                self.sides_match(pos, |d| tile.side(d.rotated(rotation.negated())))
            })
        })
    }

    /// Places a tile. The first tile may go anywhere on the board, every
    /// later one must satisfy [`Self::can_add_tile`].
    ///
    /// The tile must not carry an occupant yet, see [`Self::with_occupant`].
    pub fn with_new_tile(&self, tile: PlacedTile) -> Result<Board, RulesError> {
        let idx = Self::index(tile.pos).ok_or(RulesError::PositionOutOfBoard { pos: tile.pos })?;
        if tile.occupant.is_some() {
            return Err(RulesError::TileAlreadyOccupied { tile_id: tile.id() });
        }
        if !self.is_empty() && !self.can_add_tile(&tile) {
            return Err(RulesError::IllegalPlacement {
                tile_id: tile.id(),
                pos: tile.pos,
            });
        }

        let mut partitions = self.partitions.clone();
        partitions.add_tile(&tile.tile)?;
        for direction in Direction::ALL {
            if let Some(neighbor) = self.tile_at(tile.pos.neighbor(direction)) {
                partitions.connect_sides(tile.side(direction), neighbor.side(direction.opposite()))?;
            }
        }
        debug!(
            tile_id = tile.id(),
            x = tile.pos.x,
            y = tile.pos.y,
            rotation = tile.rotation.degrees_cw(),
            "Placed tile"
        );

        let mut tiles = self.tiles.clone();
        tiles[idx] = Some(Arc::new(tile));
        let mut ordered_tile_indexes = self.ordered_tile_indexes.clone();
        ordered_tile_indexes.push(idx);
        Ok(Board {
            tiles,
            ordered_tile_indexes,
            partitions,
            cancelled_animals: self.cancelled_animals.clone(),
        })
    }

    /// Puts an occupant on its tile, on behalf of the player who placed the tile.
    pub fn with_occupant(&self, occupant: Occupant) -> Result<Board, RulesError> {
        let tile = self.tile_with_id(occupant.tile_id())?;
        let placer = tile
            .placer
            .ok_or(RulesError::TileHasNoPlacer { tile_id: tile.id() })?;
        if !tile.potential_occupants().contains(&occupant) {
            return Err(RulesError::InvalidOccupant {
                kind: occupant.kind,
                zone_id: occupant.zone_id,
            });
        }
        let zone = tile.zone_with_id(occupant.zone_id)?;
        let occupied = tile.with_occupant(occupant)?;

        let mut partitions = self.partitions.clone();
        partitions.add_initial_occupant(placer, occupant.kind, &zone)?;
        debug!(?placer, kind = ?occupant.kind, zone_id = occupant.zone_id, "Added occupant");
        Ok(self.with_replaced_tile(occupied, partitions))
    }

    /// Takes an occupant back from the board.
    pub fn without_occupant(&self, occupant: Occupant) -> Result<Board, RulesError> {
        let tile = self.tile_with_id(occupant.tile_id())?;
        if tile.occupant != Some(occupant) {
            return Err(RulesError::TileNotOccupied { tile_id: tile.id() });
        }
        let placer = tile
            .placer
            .ok_or(RulesError::TileHasNoPlacer { tile_id: tile.id() })?;
        let zone = tile.zone_with_id(occupant.zone_id)?;

        let mut partitions = self.partitions.clone();
        partitions.remove_occupant(placer, occupant.kind, &zone)?;
        debug!(?placer, kind = ?occupant.kind, zone_id = occupant.zone_id, "Removed occupant");
        Ok(self.with_replaced_tile(tile.with_no_occupant(), partitions))
    }

    /// Removes the gatherers from the given forests and the fishers from the
    /// given rivers. Huts stay where they are.
    pub fn without_gatherers_or_fishers_in(
        &self,
        forests: &BTreeSet<Area<Forest>>,
        rivers: &BTreeSet<Area<River>>,
    ) -> Result<Board, RulesError> {
        let mut partitions = self.partitions.clone();
        for forest in forests {
            partitions.clear_gatherers(forest)?;
        }
        for river in rivers {
            partitions.clear_fishers(river)?;
        }

        let mut tiles = self.tiles.clone();
        for tile in tiles.iter_mut().flatten() {
            let Some(zone_id) = tile.id_of_zone_occupied_by(OccupantKind::Pawn) else {
                continue;
            };
            if forests.iter().any(|area| area.contains(zone_id))
                || rivers.iter().any(|area| area.contains(zone_id))
            {
                debug!(tile_id = tile.id(), zone_id, "Returned pawn");
                *tile = Arc::new(tile.with_no_occupant());
            }
        }
        Ok(Board {
            tiles,
            ordered_tile_indexes: self.ordered_tile_indexes.clone(),
            partitions,
            cancelled_animals: self.cancelled_animals.clone(),
        })
    }

    #[must_use]
    pub fn with_more_cancelled_animals(&self, animals: impl IntoIterator<Item = Animal>) -> Board {
        let mut cancelled_animals = self.cancelled_animals.clone();
        cancelled_animals.extend(animals);
        Board {
            cancelled_animals,
            ..self.clone()
        }
    }

    /// The closed forests having a zone on the last placed tile.
    pub fn forests_closed_by_last_tile(&self) -> BTreeSet<Area<Forest>> {
        let Some(tile) = self.last_placed_tile() else {
            return BTreeSet::new();
        };
        tile.forest_zones()
            .iter()
            .filter_map(|forest| self.forest_area(forest).ok())
            .filter(|area| area.is_closed())
            .cloned()
            .collect()
    }

    /// The closed rivers having a zone on the last placed tile.
    pub fn rivers_closed_by_last_tile(&self) -> BTreeSet<Area<River>> {
        let Some(tile) = self.last_placed_tile() else {
            return BTreeSet::new();
        };
        tile.river_zones()
            .iter()
            .filter_map(|river| self.river_area(river).ok())
            .filter(|area| area.is_closed())
            .cloned()
            .collect()
    }

    // Swaps a tile for a copy differing only in its occupant.
    fn with_replaced_tile(&self, tile: PlacedTile, partitions: ZonePartitions) -> Board {
        let mut tiles = self.tiles.clone();
        if let Some(idx) = Self::index(tile.pos) {
            tiles[idx] = Some(Arc::new(tile));
        }
        Board {
            tiles,
            ordered_tile_indexes: self.ordered_tile_indexes.clone(),
            partitions,
            cancelled_animals: self.cancelled_animals.clone(),
        }
    }
}
