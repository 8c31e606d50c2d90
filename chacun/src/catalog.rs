//! A built-in set of tiles.
//!
//! It covers every kind of side and zone: forests (straight, corner, end),
//! rivers (straight, corner, ending in a lake), lakes fed by several rivers,
//! and meadows with animals and special powers. Tile 56 is the start tile.

use crate::{
    Animal, AnimalKind, Forest, ForestKind, Lake, Meadow, River, SpecialPower, Tile, TileKind,
    TileSide,
};

pub const START_TILE_ID: u32 = 56;

// Shorthand constructors, only used to build the tiles below.

fn meadow(id: u32) -> Meadow {
    Meadow {
        id,
        animals: Vec::new(),
        special_power: None,
    }
}

fn meadow_with(id: u32, animals: &[AnimalKind], special_power: Option<SpecialPower>) -> Meadow {
    let animals = animals
        .iter()
        .zip(0..)
        .map(|(&kind, n)| Animal {
            id: id * 10 + n,
            kind,
        })
        .collect();
    Meadow {
        id,
        animals,
        special_power,
    }
}

fn forest(id: u32, kind: ForestKind) -> Forest {
    Forest { id, kind }
}

fn river(id: u32, fish_count: u32) -> River {
    River {
        id,
        fish_count,
        lake: None,
    }
}

fn river_into(id: u32, fish_count: u32, lake: &Lake) -> River {
    River {
        id,
        fish_count,
        lake: Some(lake.clone()),
    }
}

fn lake(id: u32, fish_count: u32, special_power: Option<SpecialPower>) -> Lake {
    Lake {
        id,
        fish_count,
        special_power,
    }
}

fn fs(forest: &Forest) -> TileSide {
    TileSide::Forest {
        forest: forest.clone(),
    }
}

fn ms(meadow: &Meadow) -> TileSide {
    TileSide::Meadow {
        meadow: meadow.clone(),
    }
}

fn rs(meadow1: &Meadow, river: &River, meadow2: &Meadow) -> TileSide {
    TileSide::River {
        meadow1: meadow1.clone(),
        river: river.clone(),
        meadow2: meadow2.clone(),
    }
}

use AnimalKind::*;
use ForestKind::*;
use TileKind::*;

/// The tile every game starts with, placed at the origin.
pub fn start_tile() -> Tile {
    let l8 = lake(568, 1, None);
    let m0 = meadow_with(560, &[Aurochs], None);
    let f1 = forest(561, WithMenhir);
    let m2 = meadow(562);
    let r3 = river_into(563, 0, &l8);
    Tile::new(START_TILE_ID, Start, ms(&m0), fs(&f1), fs(&f1), rs(&m2, &r3, &m0))
}

/// Every tile of the set, including the start tile, ordered by id.
pub fn tiles() -> Vec<Tile> {
    let mut tiles = Vec::new();

    // 10: a river ending in a lake, surrounded by one meadow.
    let l = lake(108, 2, None);
    let m = meadow(100);
    let r = river_into(101, 1, &l);
    tiles.push(Tile::new(10, Normal, ms(&m), rs(&m, &r, &m), ms(&m), ms(&m)));

    // 11: the same with a deer.
    let l = lake(118, 1, None);
    let m = meadow_with(110, &[Deer], None);
    let r = river_into(111, 0, &l);
    tiles.push(Tile::new(11, Normal, ms(&m), rs(&m, &r, &m), ms(&m), ms(&m)));

    // 20: a straight forest.
    let f = forest(200, Plain);
    let (m1, m2) = (meadow(201), meadow(202));
    tiles.push(Tile::new(20, Normal, fs(&f), ms(&m1), fs(&f), ms(&m2)));

    // 21: a forest end with mushrooms.
    let f = forest(210, WithMushrooms);
    let m = meadow(211);
    tiles.push(Tile::new(21, Normal, fs(&f), ms(&m), ms(&m), ms(&m)));

    // 22: a forest end next to a tiger.
    let f = forest(220, Plain);
    let m = meadow_with(221, &[Tiger], None);
    tiles.push(Tile::new(22, Normal, fs(&f), ms(&m), ms(&m), ms(&m)));

    // 23: a forest corner.
    let f = forest(230, Plain);
    let m = meadow(231);
    tiles.push(Tile::new(23, Normal, fs(&f), fs(&f), ms(&m), ms(&m)));

    // 24: two separate forest ends.
    let (f1, f2) = (forest(240, Plain), forest(242, WithMushrooms));
    let m = meadow(241);
    tiles.push(Tile::new(24, Normal, fs(&f1), ms(&m), fs(&f2), ms(&m)));

    // 30: a straight river.
    let r = river(301, 2);
    let (m1, m2) = (meadow(300), meadow(302));
    tiles.push(Tile::new(30, Normal, ms(&m1), rs(&m1, &r, &m2), ms(&m2), rs(&m2, &r, &m1)));

    // 31: a river bend with a mammoth on the outer bank.
    let r = river(311, 1);
    let (m1, m2) = (meadow_with(310, &[Mammoth], None), meadow(312));
    tiles.push(Tile::new(31, Normal, ms(&m1), rs(&m1, &r, &m2), rs(&m2, &r, &m1), ms(&m1)));

    // 40: a lake fed by two rivers.
    let l = lake(408, 2, None);
    let (m1, m2) = (meadow(400), meadow(402));
    let (r1, r2) = (river_into(401, 0, &l), river_into(403, 1, &l));
    tiles.push(Tile::new(40, Normal, rs(&m1, &r1, &m2), rs(&m2, &r2, &m1), ms(&m1), ms(&m1)));

    // 41: a menhir tile with a logboat on its lake.
    let l = lake(418, 0, Some(SpecialPower::Logboat));
    let (m1, m2) = (meadow(410), meadow(412));
    let r = river_into(411, 1, &l);
    tiles.push(Tile::new(41, Menhir, rs(&m1, &r, &m2), ms(&m2), ms(&m2), ms(&m1)));

    // 42: a menhir tile with the shaman.
    let m = meadow_with(420, &[Deer, Deer], Some(SpecialPower::Shaman));
    tiles.push(Tile::new(42, Menhir, ms(&m), ms(&m), ms(&m), ms(&m)));

    // 43: a menhir forest opening onto a meadow with a pit trap.
    let f = forest(430, WithMenhir);
    let m = meadow_with(431, &[], Some(SpecialPower::PitTrap));
    tiles.push(Tile::new(43, Menhir, fs(&f), fs(&f), fs(&f), ms(&m)));

    // 50: a hunting trap among a tiger and a mammoth.
    let m = meadow_with(500, &[Tiger, Mammoth], Some(SpecialPower::HuntingTrap));
    tiles.push(Tile::new(50, Normal, ms(&m), ms(&m), ms(&m), ms(&m)));

    // 51: the wild fire.
    let m = meadow_with(510, &[], Some(SpecialPower::WildFire));
    tiles.push(Tile::new(51, Normal, ms(&m), ms(&m), ms(&m), ms(&m)));

    // 52: a lake with a raft, fed from the north.
    let l = lake(528, 2, Some(SpecialPower::Raft));
    let m = meadow(520);
    let r = river_into(521, 1, &l);
    tiles.push(Tile::new(52, Normal, rs(&m, &r, &m), ms(&m), ms(&m), ms(&m)));

    tiles.push(start_tile());

    // 60: a forest end above a straight river.
    let f = forest(600, Plain);
    let (m1, m3) = (meadow(601), meadow_with(603, &[Aurochs], None));
    let r = river(602, 1);
    tiles.push(Tile::new(60, Normal, fs(&f), rs(&m1, &r, &m3), ms(&m3), rs(&m3, &r, &m1)));

    // 61: a forest corner with mushrooms.
    let f = forest(611, WithMushrooms);
    let m = meadow(610);
    tiles.push(Tile::new(61, Normal, ms(&m), ms(&m), fs(&f), fs(&f)));

    // 62: a straight forest from west to east.
    let f = forest(621, Plain);
    let (m1, m2) = (meadow(620), meadow_with(622, &[Deer], None));
    tiles.push(Tile::new(62, Normal, ms(&m1), fs(&f), ms(&m2), fs(&f)));

    tiles
}

pub fn tile(id: u32) -> Option<Tile> {
    tiles().into_iter().find(|tile| tile.id == id)
}

/// The river with the given id on a tile. Panics if there is none.
#[cfg(test)]
pub(crate) fn river_of(tile: &Tile, id: u32) -> River {
    tile.zones()
        .into_iter()
        .find_map(|zone| match zone {
            crate::Zone::River(river) if river.id == id => Some(river),
            _ => None,
        })
        .expect("No such river on this tile")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::{Zone, ZoneLike};

    #[test]
    fn zone_ids_belong_to_their_tile() {
        for tile in tiles() {
            let zones = tile.zones();
            for zone in &zones {
                assert_eq!(zone.tile_id(), tile.id, "zone {} on tile {}", zone.id(), tile.id);
                if let Zone::Meadow(meadow) = zone {
                    for animal in &meadow.animals {
                        assert_eq!(animal.tile_id(), tile.id);
                    }
                }
            }
            // Zone ids are unique on a tile.
            let ids: BTreeSet<u32> = zones.iter().map(Zone::id).collect();
            assert_eq!(ids.len(), zones.len());
        }
    }

    #[test]
    fn at_most_one_lake_per_tile() {
        for tile in tiles() {
            let lakes: Vec<Zone> = tile
                .zones()
                .into_iter()
                .filter(|zone| matches!(zone, Zone::Lake(_)))
                .collect();
            assert!(lakes.len() <= 1);
            for lake in lakes {
                assert_eq!(lake.local_id(), crate::LAKE_LOCAL_ID);
            }
        }
    }

    #[test]
    fn tile_ids_are_unique_and_sorted() {
        let ids: Vec<u32> = tiles().iter().map(|tile| tile.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(ids, sorted);
        assert_eq!(tile(START_TILE_ID).map(|tile| tile.kind), Some(TileKind::Start));
        assert!(tile(99).is_none());
    }

    #[test]
    fn catalog_survives_json() {
        let json = serde_json::to_string(&tiles()).unwrap();
        let tiles_back: Vec<Tile> = serde_json::from_str(&json).unwrap();
        assert_eq!(tiles_back, tiles());
    }
}
