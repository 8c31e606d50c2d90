use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::{
    Animal, Forest, ForestKind, Meadow, PlayerColor, River, RulesError, SpecialPower, Water,
    ZoneLike,
};

/// A maximal group of connected zones of the same kind.
///
/// Occupants are kept sorted, so that two areas holding the same pawns
/// compare equal. A color appears once per pawn.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Area<Z> {
    zones: BTreeSet<Z>,
    occupants: Vec<PlayerColor>,
    open_connections: u32,
}

impl<Z: ZoneLike + Ord + Clone> Area<Z> {
    pub fn new(zones: BTreeSet<Z>, mut occupants: Vec<PlayerColor>, open_connections: u32) -> Self {
        occupants.sort();
        Self {
            zones,
            occupants,
            open_connections,
        }
    }

    pub fn zones(&self) -> &BTreeSet<Z> {
        &self.zones
    }

    pub fn occupants(&self) -> &[PlayerColor] {
        &self.occupants
    }

    pub fn open_connections(&self) -> u32 {
        self.open_connections
    }

    pub fn is_closed(&self) -> bool {
        self.open_connections == 0
    }

    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    pub fn contains(&self, zone_id: u32) -> bool {
        self.zones.iter().any(|zone| zone.id() == zone_id)
    }

    /// The players with the most occupants in this area. All of them score.
    pub fn majority_occupants(&self) -> BTreeSet<PlayerColor> {
        let mut counts: BTreeMap<PlayerColor, usize> = BTreeMap::new();
        for &color in &self.occupants {
            *counts.entry(color).or_default() += 1;
        }
        let max = counts.values().copied().max().unwrap_or(0);
        counts
            .into_iter()
            .filter(|&(_, count)| count == max)
            .map(|(color, _)| color)
            .collect()
    }

    pub fn tile_ids(&self) -> BTreeSet<u32> {
        self.zones.iter().map(ZoneLike::tile_id).collect()
    }

    pub fn zone_with_special_power(&self, power: SpecialPower) -> Option<&Z> {
        self.zones
            .iter()
            .find(|zone| zone.special_power() == Some(power))
    }

    /// Merges two areas whose open connections were just joined to each other.
    ///
    /// Each of the two joined connections is closed, hence the `- 2`. This
    /// also holds when an area is connected to itself: the zones and
    /// occupants stay the same, but two connections are gone.
    pub fn connect_to(&self, that: &Area<Z>) -> Result<Area<Z>, RulesError> {
        if self == that {
            let open_connections = self.open_connections.checked_sub(2).ok_or(
                RulesError::NegativeOpenConnections {
                    zone_id: self.representative_id(),
                },
            )?;
            return Ok(Area {
                open_connections,
                ..self.clone()
            });
        }
        let open_connections = (self.open_connections + that.open_connections)
            .checked_sub(2)
            .ok_or(RulesError::NegativeOpenConnections {
                zone_id: self.representative_id(),
            })?;
        let zones = self.zones.union(&that.zones).cloned().collect();
        let occupants = self
            .occupants
            .iter()
            .chain(that.occupants.iter())
            .copied()
            .collect();
        Ok(Area::new(zones, occupants, open_connections))
    }

    pub fn with_initial_occupant(&self, color: PlayerColor) -> Result<Self, RulesError> {
        if self.is_occupied() {
            return Err(RulesError::AreaAlreadyOccupied {
                zone_id: self.representative_id(),
            });
        }
        Ok(Area {
            occupants: vec![color],
            ..self.clone()
        })
    }

    /// Removes one occupant of the given color.
    pub fn without_occupant(&self, color: PlayerColor) -> Result<Self, RulesError> {
        let idx = self
            .occupants
            .iter()
            .position(|&c| c == color)
            .ok_or(RulesError::OccupantNotInArea {
                zone_id: self.representative_id(),
                color,
            })?;
        let mut occupants = self.occupants.clone();
        occupants.remove(idx);
        Ok(Area {
            occupants,
            ..self.clone()
        })
    }

    #[must_use]
    pub fn without_occupants(&self) -> Self {
        Area {
            occupants: Vec::new(),
            ..self.clone()
        }
    }

    // The smallest zone id, used to name the area in errors and logs.
    fn representative_id(&self) -> u32 {
        self.zones.iter().map(ZoneLike::id).min().unwrap_or(0)
    }
}

impl Area<Forest> {
    pub fn has_menhir(&self) -> bool {
        self.zones
            .iter()
            .any(|forest| forest.kind == ForestKind::WithMenhir)
    }

    pub fn mushroom_group_count(&self) -> usize {
        self.zones
            .iter()
            .filter(|forest| forest.kind == ForestKind::WithMushrooms)
            .count()
    }
}

impl Area<Meadow> {
    /// The animals of the meadow that have not been cancelled.
    pub fn animals(&self, cancelled: &BTreeSet<Animal>) -> BTreeSet<Animal> {
        self.zones
            .iter()
            .flat_map(|meadow| meadow.animals.iter())
            .filter(|animal| !cancelled.contains(animal))
            .copied()
            .collect()
    }
}

impl Area<River> {
    /// Fish in the rivers, plus fish in the lakes they end in. A lake
    /// shared by several rivers counts once.
    pub fn fish_count(&self) -> u32 {
        let lakes: BTreeSet<_> = self
            .zones
            .iter()
            .filter_map(|river| river.lake.as_ref())
            .collect();
        self.zones.iter().map(|river| river.fish_count).sum::<u32>()
            + lakes.iter().map(|lake| lake.fish_count).sum::<u32>()
    }
}

impl Area<Water> {
    pub fn fish_count(&self) -> u32 {
        self.zones.iter().map(Water::fish_count).sum()
    }

    pub fn lake_count(&self) -> usize {
        self.zones
            .iter()
            .filter(|water| matches!(water, Water::Lake(_)))
            .count()
    }
}

/// A set of disjoint areas covering every known zone of one kind.
///
/// Areas live in a dense vector of slots. A union keeps the larger area's
/// slot and redirects the zones of the smaller one, then moves the last area
/// into the freed slot so that no slot is ever empty.
#[derive(Clone, Debug)]
pub struct ZonePartition<Z> {
    slots: Vec<Area<Z>>,
    /// Zone id to slot of the area containing it.
    index: BTreeMap<u32, usize>,
}

impl<Z> Default for ZonePartition<Z> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: BTreeMap::new(),
        }
    }
}

impl<Z: Ord> PartialEq for ZonePartition<Z> {
    fn eq(&self, other: &Self) -> bool {
        let ours: BTreeSet<&Area<Z>> = self.slots.iter().collect();
        let theirs: BTreeSet<&Area<Z>> = other.slots.iter().collect();
        ours == theirs
    }
}

impl<Z: Ord> Eq for ZonePartition<Z> {}

impl<Z: ZoneLike + Ord + Clone> ZonePartition<Z> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a partition out of existing areas, which must be disjoint.
    pub fn from_areas(areas: impl IntoIterator<Item = Area<Z>>) -> Result<Self, RulesError> {
        let mut partition = Self::new();
        for area in areas {
            let slot = partition.slots.len();
            for zone in area.zones() {
                if partition.index.insert(zone.id(), slot).is_some() {
                    return Err(RulesError::ZoneAlreadyPartitioned { zone_id: zone.id() });
                }
            }
            partition.slots.push(area);
        }
        Ok(partition)
    }

    /// The areas, in no particular order.
    pub fn areas(&self) -> impl Iterator<Item = &Area<Z>> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn area_containing(&self, zone: &impl ZoneLike) -> Result<&Area<Z>, RulesError> {
        self.locate(zone.id()).map(|(_, area)| area)
    }

    /// Adds an unoccupied area made of a single zone.
    pub fn add_singleton(&mut self, zone: Z, open_connections: u32) -> Result<(), RulesError> {
        let zone_id = zone.id();
        if self.index.contains_key(&zone_id) {
            return Err(RulesError::ZoneAlreadyPartitioned { zone_id });
        }
        self.index.insert(zone_id, self.slots.len());
        self.slots.push(Area::new(
            BTreeSet::from([zone]),
            Vec::new(),
            open_connections,
        ));
        Ok(())
    }

    pub fn add_initial_occupant(
        &mut self,
        zone: &impl ZoneLike,
        color: PlayerColor,
    ) -> Result<(), RulesError> {
        let (slot, area) = self.locate(zone.id())?;
        let occupied = area.with_initial_occupant(color)?;
        self.slots[slot] = occupied;
        Ok(())
    }

    pub fn remove_occupant(
        &mut self,
        zone: &impl ZoneLike,
        color: PlayerColor,
    ) -> Result<(), RulesError> {
        let (slot, area) = self.locate(zone.id())?;
        let area = area.without_occupant(color)?;
        self.slots[slot] = area;
        Ok(())
    }

    pub fn remove_all_occupants_of(&mut self, area: &Area<Z>) -> Result<(), RulesError> {
        let zone_id = area.representative_id();
        let (slot, found) = self
            .locate(zone_id)
            .map_err(|_| RulesError::AreaNotInPartition { zone_id })?;
        if found != area {
            return Err(RulesError::AreaNotInPartition { zone_id });
        }
        self.slots[slot] = area.without_occupants();
        Ok(())
    }

    /// Merges the areas containing the two zones, which may already be the same.
    pub fn union(&mut self, zone_a: &impl ZoneLike, zone_b: &impl ZoneLike) -> Result<(), RulesError> {
        let (slot_a, area_a) = self.locate(zone_a.id())?;
        let (slot_b, area_b) = self.locate(zone_b.id())?;
        let merged = area_a.connect_to(area_b)?;
        trace!(
            zone_a = zone_a.id(),
            zone_b = zone_b.id(),
            open_connections = merged.open_connections(),
            "Union"
        );
        if slot_a == slot_b {
            self.slots[slot_a] = merged;
            return Ok(());
        }

        let (kept, dropped) = if area_b.zones().len() > area_a.zones().len() {
            (slot_b, slot_a)
        } else {
            (slot_a, slot_b)
        };
        let moved: Vec<u32> = self.slots[dropped].zones().iter().map(ZoneLike::id).collect();
        for zone_id in moved {
            self.index.insert(zone_id, kept);
        }
        self.slots[kept] = merged;

        // The last area takes over the freed slot.
        let last = self.slots.len() - 1;
        self.slots.swap_remove(dropped);
        if dropped != last {
            for zone in self.slots[dropped].zones() {
                self.index.insert(zone.id(), dropped);
            }
        }
        Ok(())
    }

    fn locate(&self, zone_id: u32) -> Result<(usize, &Area<Z>), RulesError> {
        self.index
            .get(&zone_id)
            .and_then(|&slot| Some((slot, self.slots.get(slot)?)))
            .ok_or(RulesError::ZoneNotFound { zone_id })
    }
}
