use serde::{Deserialize, Serialize};

/// Common behaviour of every kind of zone.
///
/// A zone id encodes the tile it belongs to and its slot on that tile:
/// `id = tile_id * 10 + local_id`.
pub trait ZoneLike {
    fn id(&self) -> u32;

    fn tile_id(&self) -> u32 {
        self.id() / 10
    }

    fn local_id(&self) -> u32 {
        self.id() % 10
    }

    fn special_power(&self) -> Option<SpecialPower> {
        None
    }
}

/// The local slot conventionally used by the (single) lake of a tile.
pub const LAKE_LOCAL_ID: u32 = 8;

/// A power attached to a meadow or a lake. The engine only carries it around.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialPower {
    Shaman,
    Logboat,
    HuntingTrap,
    PitTrap,
    WildFire,
    Raft,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForestKind {
    Plain,
    WithMenhir,
    WithMushrooms,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Forest {
    pub id: u32,
    pub kind: ForestKind,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalKind {
    Mammoth,
    Aurochs,
    Deer,
    Tiger,
}

/// An animal living in a meadow.
///
/// Its id extends the id of its meadow by one digit, so the owning tile is
/// `id / 100`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Animal {
    pub id: u32,
    pub kind: AnimalKind,
}

impl Animal {
    pub fn zone_id(&self) -> u32 {
        self.id / 10
    }

    pub fn tile_id(&self) -> u32 {
        self.id / 100
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Meadow {
    pub id: u32,
    #[serde(default)]
    pub animals: Vec<Animal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_power: Option<SpecialPower>,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Lake {
    pub id: u32,
    pub fish_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_power: Option<SpecialPower>,
}

/// A river, possibly flowing into the lake of its tile.
///
/// The lake never refers back to its rivers.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct River {
    pub id: u32,
    pub fish_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lake: Option<Lake>,
}

impl River {
    pub fn has_lake(&self) -> bool {
        self.lake.is_some()
    }
}

/// A zone of the water network, i.e. a lake or a river.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Water {
    Lake(Lake),
    River(River),
}

impl Water {
    pub fn fish_count(&self) -> u32 {
        match self {
            Water::Lake(lake) => lake.fish_count,
            Water::River(river) => river.fish_count,
        }
    }
}

/// Any zone of a tile.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Zone {
    Forest(Forest),
    Meadow(Meadow),
    Lake(Lake),
    River(River),
}

impl ZoneLike for Forest {
    fn id(&self) -> u32 {
        self.id
    }
}

impl ZoneLike for Meadow {
    fn id(&self) -> u32 {
        self.id
    }

    fn special_power(&self) -> Option<SpecialPower> {
        self.special_power
    }
}

impl ZoneLike for Lake {
    fn id(&self) -> u32 {
        self.id
    }

    fn special_power(&self) -> Option<SpecialPower> {
        self.special_power
    }
}

impl ZoneLike for River {
    fn id(&self) -> u32 {
        self.id
    }
}

impl ZoneLike for Water {
    fn id(&self) -> u32 {
        match self {
            Water::Lake(lake) => lake.id,
            Water::River(river) => river.id,
        }
    }

    fn special_power(&self) -> Option<SpecialPower> {
        match self {
            Water::Lake(lake) => lake.special_power,
            Water::River(_) => None,
        }
    }
}

impl ZoneLike for Zone {
    fn id(&self) -> u32 {
        match self {
            Zone::Forest(forest) => forest.id,
            Zone::Meadow(meadow) => meadow.id,
            Zone::Lake(lake) => lake.id,
            Zone::River(river) => river.id,
        }
    }

    fn special_power(&self) -> Option<SpecialPower> {
        match self {
            Zone::Meadow(meadow) => meadow.special_power,
            Zone::Lake(lake) => lake.special_power,
            Zone::Forest(_) | Zone::River(_) => None,
        }
    }
}

impl From<Lake> for Water {
    fn from(lake: Lake) -> Self {
        Water::Lake(lake)
    }
}

impl From<River> for Water {
    fn from(river: River) -> Self {
        Water::River(river)
    }
}

impl From<Forest> for Zone {
    fn from(forest: Forest) -> Self {
        Zone::Forest(forest)
    }
}

impl From<Meadow> for Zone {
    fn from(meadow: Meadow) -> Self {
        Zone::Meadow(meadow)
    }
}

impl From<Lake> for Zone {
    fn from(lake: Lake) -> Self {
        Zone::Lake(lake)
    }
}

impl From<River> for Zone {
    fn from(river: River) -> Self {
        Zone::River(river)
    }
}

impl From<Water> for Zone {
    fn from(water: Water) -> Self {
        match water {
            Water::Lake(lake) => Zone::Lake(lake),
            Water::River(river) => Zone::River(river),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_encode_tile_and_slot() {
        let river = River {
            id: 563,
            fish_count: 0,
            lake: None,
        };
        assert_eq!(river.tile_id(), 56);
        assert_eq!(river.local_id(), 3);

        let animal = Animal {
            id: 5600,
            kind: AnimalKind::Aurochs,
        };
        assert_eq!(animal.zone_id(), 560);
        assert_eq!(animal.tile_id(), 56);
    }

    #[test]
    fn water_keeps_the_identity_of_its_zone() {
        let lake = Lake {
            id: 568,
            fish_count: 1,
            special_power: Some(SpecialPower::Raft),
        };
        let water = Water::from(lake.clone());
        assert_eq!(water.id(), 568);
        assert_eq!(water.fish_count(), 1);
        assert_eq!(water.special_power(), Some(SpecialPower::Raft));
        assert_eq!(Zone::from(water), Zone::Lake(lake));
    }

    #[test]
    fn zone_serialization_is_tagged() {
        let zone = Zone::Forest(Forest {
            id: 561,
            kind: ForestKind::WithMenhir,
        });
        let json = serde_json::to_string(&zone).unwrap();
        assert_eq!(json, r#"{"type":"forest","id":561,"kind":"with_menhir"}"#);
        assert_eq!(serde_json::from_str::<Zone>(&json).unwrap(), zone);
    }
}
