use std::collections::BTreeMap;

use crate::{
    Area, Forest, Meadow, OccupantKind, PlayerColor, River, RulesError, Tile, TileSide, Water,
    Zone, ZoneLike, ZonePartition,
};

/// The four partitions of the zones on the board.
///
/// Rivers appear twice: on their own in `rivers`, and together with the
/// lakes in `river_systems`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZonePartitions {
    forests: ZonePartition<Forest>,
    meadows: ZonePartition<Meadow>,
    rivers: ZonePartition<River>,
    river_systems: ZonePartition<Water>,
}

impl ZonePartitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forests(&self) -> &ZonePartition<Forest> {
        &self.forests
    }

    pub fn meadows(&self) -> &ZonePartition<Meadow> {
        &self.meadows
    }

    pub fn rivers(&self) -> &ZonePartition<River> {
        &self.rivers
    }

    pub fn river_systems(&self) -> &ZonePartition<Water> {
        &self.river_systems
    }

    /// Adds every zone of a newly placed tile as a singleton area.
    ///
    /// A zone has one open connection per side it touches. A river ending in
    /// a lake has one more, shared with the lake; in the river partition
    /// that end is not open, since the lake is not part of it. Each river is
    /// then joined to its lake in the river systems.
    pub fn add_tile(&mut self, tile: &Tile) -> Result<(), RulesError> {
        let mut open_connections: BTreeMap<u32, u32> = BTreeMap::new();
        for side in &tile.sides {
            for zone in side.zones() {
                *open_connections.entry(zone.local_id()).or_default() += 1;
            }
        }
        let zones = tile.zones();
        for zone in &zones {
            if let Zone::River(river) = zone {
                if let Some(lake) = &river.lake {
                    *open_connections.entry(river.local_id()).or_default() += 1;
                    *open_connections.entry(lake.local_id()).or_default() += 1;
                }
            }
        }

        for zone in &zones {
            let count = open_connections.get(&zone.local_id()).copied().unwrap_or(0);
            match zone {
                Zone::Forest(forest) => self.forests.add_singleton(forest.clone(), count)?,
                Zone::Meadow(meadow) => self.meadows.add_singleton(meadow.clone(), count)?,
                Zone::River(river) => {
                    let river_count = if river.has_lake() { count - 1 } else { count };
                    self.rivers.add_singleton(river.clone(), river_count)?;
                    self.river_systems
                        .add_singleton(Water::River(river.clone()), count)?;
                }
                Zone::Lake(lake) => self
                    .river_systems
                    .add_singleton(Water::Lake(lake.clone()), count)?,
            }
        }

        for zone in &zones {
            if let Zone::River(river) = zone {
                if let Some(lake) = &river.lake {
                    self.river_systems.union(river, lake)?;
                }
            }
        }
        Ok(())
    }

    /// Joins the zones of two sides that now touch on the board.
    ///
    /// Facing sides run in opposite directions, so the first meadow of one
    /// river side meets the second meadow of the other.
    pub fn connect_sides(&mut self, side_a: &TileSide, side_b: &TileSide) -> Result<(), RulesError> {
        match (side_a, side_b) {
            (TileSide::Forest { forest: f1 }, TileSide::Forest { forest: f2 }) => {
                self.forests.union(f1, f2)
            }
            (TileSide::Meadow { meadow: m1 }, TileSide::Meadow { meadow: m2 }) => {
                self.meadows.union(m1, m2)
            }
            (
                TileSide::River {
                    meadow1: m1,
                    river: r1,
                    meadow2: m2,
                },
                TileSide::River {
                    meadow1: m3,
                    river: r2,
                    meadow2: m4,
                },
            ) => {
                self.rivers.union(r1, r2)?;
                self.river_systems.union(r1, r2)?;
                self.meadows.union(m1, m4)?;
                self.meadows.union(m2, m3)
            }
            _ => Err(RulesError::IncompatibleSides),
        }
    }

    /// Records a newly placed occupant in the area it belongs to.
    ///
    /// Pawns occupy forests, meadows and rivers. Huts occupy the whole water
    /// network, whether they were placed on a lake or on a river.
    pub fn add_initial_occupant(
        &mut self,
        color: PlayerColor,
        kind: OccupantKind,
        zone: &Zone,
    ) -> Result<(), RulesError> {
        match (zone, kind) {
            (Zone::Forest(forest), OccupantKind::Pawn) => {
                self.forests.add_initial_occupant(forest, color)
            }
            (Zone::Meadow(meadow), OccupantKind::Pawn) => {
                self.meadows.add_initial_occupant(meadow, color)
            }
            (Zone::River(river), OccupantKind::Pawn) => {
                self.rivers.add_initial_occupant(river, color)
            }
            (Zone::River(river), OccupantKind::Hut) => {
                self.river_systems.add_initial_occupant(river, color)
            }
            (Zone::Lake(lake), OccupantKind::Hut) => {
                self.river_systems.add_initial_occupant(lake, color)
            }
            _ => Err(RulesError::InvalidOccupant {
                kind,
                zone_id: zone.id(),
            }),
        }
    }

    pub fn remove_pawn(&mut self, color: PlayerColor, zone: &Zone) -> Result<(), RulesError> {
        match zone {
            Zone::Forest(forest) => self.forests.remove_occupant(forest, color),
            Zone::Meadow(meadow) => self.meadows.remove_occupant(meadow, color),
            Zone::River(river) => self.rivers.remove_occupant(river, color),
            Zone::Lake(lake) => Err(RulesError::InvalidOccupant {
                kind: OccupantKind::Pawn,
                zone_id: lake.id,
            }),
        }
    }

    /// The inverse of [`Self::add_initial_occupant`], for pawns and huts alike.
    pub fn remove_occupant(
        &mut self,
        color: PlayerColor,
        kind: OccupantKind,
        zone: &Zone,
    ) -> Result<(), RulesError> {
        match (zone, kind) {
            (_, OccupantKind::Pawn) => self.remove_pawn(color, zone),
            (Zone::River(river), OccupantKind::Hut) => {
                self.river_systems.remove_occupant(river, color)
            }
            (Zone::Lake(lake), OccupantKind::Hut) => self.river_systems.remove_occupant(lake, color),
            _ => Err(RulesError::InvalidOccupant {
                kind,
                zone_id: zone.id(),
            }),
        }
    }

    pub fn clear_gatherers(&mut self, forest: &Area<Forest>) -> Result<(), RulesError> {
        self.forests.remove_all_occupants_of(forest)
    }

    pub fn clear_fishers(&mut self, river: &Area<River>) -> Result<(), RulesError> {
        self.rivers.remove_all_occupants_of(river)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::{catalog, Direction, Lake};

    #[test]
    fn start_tile_singletons() {
        let tile = catalog::start_tile();
        let mut partitions = ZonePartitions::new();
        partitions.add_tile(&tile).unwrap();

        let forest = partitions.forests().areas().next().unwrap();
        assert_eq!(forest.open_connections(), 2);
        assert_eq!(partitions.meadows().len(), 2);

        let river = catalog::river_of(&tile, 563);
        assert_eq!(partitions.rivers().area_containing(&river).unwrap().open_connections(), 1);

        // The river and its lake form one water network with a single open end.
        let water = partitions.river_systems().area_containing(&river).unwrap();
        assert_eq!(partitions.river_systems().len(), 1);
        assert_eq!(water.zones().len(), 2);
        assert_eq!(water.open_connections(), 1);
    }

    #[test]
    fn lake_fed_by_two_rivers() {
        let tile = catalog::tile(40).unwrap();
        let mut partitions = ZonePartitions::new();
        partitions.add_tile(&tile).unwrap();

        let water = partitions.river_systems().areas().next().unwrap();
        assert_eq!(partitions.river_systems().len(), 1);
        assert_eq!(water.lake_count(), 1);
        assert_eq!(water.open_connections(), 2);
        for area in partitions.rivers().areas() {
            assert_eq!(area.open_connections(), 1);
        }
    }

    #[test]
    fn connecting_river_sides_cross_pairs_meadows() {
        let straight = catalog::tile(30).unwrap();
        let other = catalog::tile(31).unwrap();
        let mut partitions = ZonePartitions::new();
        partitions.add_tile(&straight).unwrap();
        partitions.add_tile(&other).unwrap();
        // Tile 31's west side faces tile 30's east side after a half turn
        // brings its east side to the west.
        partitions
            .connect_sides(straight.side(Direction::E), other.side(Direction::E))
            .unwrap();

        let river = catalog::river_of(&straight, 301);
        let rivers = partitions.rivers().area_containing(&river).unwrap();
        assert_eq!(rivers.zones().len(), 2);
        assert_eq!(rivers.open_connections(), 2);
        assert_eq!(
            partitions
                .river_systems()
                .area_containing(&river)
                .unwrap()
                .zones()
                .len(),
            2
        );

        // 300 (north of the straight river) meets 312, 302 meets 310.
        let ids = |zone_id: u32| -> BTreeSet<u32> {
            partitions
                .meadows()
                .areas()
                .find(|area| area.contains(zone_id))
                .unwrap()
                .zones()
                .iter()
                .map(ZoneLike::id)
                .collect()
        };
        assert_eq!(ids(300), BTreeSet::from([300, 312]));
        assert_eq!(ids(302), BTreeSet::from([302, 310]));
    }

    #[test]
    fn mismatched_sides_are_rejected() {
        let tile = catalog::start_tile();
        let mut partitions = ZonePartitions::new();
        partitions.add_tile(&tile).unwrap();
        assert_eq!(
            partitions.connect_sides(tile.side(Direction::N), tile.side(Direction::E)),
            Err(RulesError::IncompatibleSides)
        );
    }

    #[test]
    fn huts_occupy_river_systems() {
        let tile = catalog::tile(30).unwrap();
        let river = Zone::River(catalog::river_of(&tile, 301));
        let mut partitions = ZonePartitions::new();
        partitions.add_tile(&tile).unwrap();
        partitions
            .add_initial_occupant(PlayerColor::Red, OccupantKind::Hut, &river)
            .unwrap();

        assert!(partitions.river_systems().areas().next().unwrap().is_occupied());
        assert!(!partitions.rivers().areas().next().unwrap().is_occupied());
        assert_eq!(
            partitions.remove_pawn(PlayerColor::Red, &river),
            Err(RulesError::OccupantNotInArea {
                zone_id: 301,
                color: PlayerColor::Red
            })
        );
        partitions
            .remove_occupant(PlayerColor::Red, OccupantKind::Hut, &river)
            .unwrap();
        assert!(!partitions.river_systems().areas().next().unwrap().is_occupied());
    }

    #[test]
    fn invalid_occupants_are_rejected() {
        let lake = Zone::Lake(Lake {
            id: 108,
            fish_count: 2,
            special_power: None,
        });
        let mut partitions = ZonePartitions::new();
        partitions.add_tile(&catalog::tile(10).unwrap()).unwrap();
        assert_eq!(
            partitions.add_initial_occupant(PlayerColor::Blue, OccupantKind::Pawn, &lake),
            Err(RulesError::InvalidOccupant {
                kind: OccupantKind::Pawn,
                zone_id: 108
            })
        );
        assert!(partitions.remove_pawn(PlayerColor::Blue, &lake).is_err());
        partitions
            .add_initial_occupant(PlayerColor::Blue, OccupantKind::Hut, &lake)
            .unwrap();
    }

    #[test]
    fn clearing_closed_areas() {
        let tile = catalog::tile(23).unwrap();
        let forest = tile.side(Direction::N).zones()[0].clone();
        let mut partitions = ZonePartitions::new();
        partitions.add_tile(&tile).unwrap();
        partitions
            .add_initial_occupant(PlayerColor::Green, OccupantKind::Pawn, &forest)
            .unwrap();
        let area = partitions.forests().areas().next().unwrap().clone();
        partitions.clear_gatherers(&area).unwrap();
        assert!(!partitions.forests().areas().next().unwrap().is_occupied());
    }
}
