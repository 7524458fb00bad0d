//! Board locations, adjacency and the storm ring

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

use crate::core::types::{Faction, LocationId, Sector, SECTOR_COUNT};

/// Terrain class of a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    /// Strategic location; holding enough of them wins the game
    Stronghold,
    /// Open desert, exposed to the storm
    Sand,
    /// Rock plateau, sheltered from the storm
    Rock,
    /// Neutral hub: no storm, no battles
    PolarSink,
}

/// One board location (a territory slice within a single sector)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub sector: Sector,
    pub kind: LocationKind,
    /// Faction whose home stronghold this is
    #[serde(default)]
    pub home_of: Option<Faction>,
    #[serde(default)]
    pub neighbours: Vec<LocationId>,
}

impl Location {
    pub fn new(id: u16, name: &str, sector: Sector, kind: LocationKind) -> Self {
        Self {
            id: LocationId(id),
            name: name.to_string(),
            sector,
            kind,
            home_of: None,
            neighbours: Vec::new(),
        }
    }

    pub fn home_of(mut self, faction: Faction) -> Self {
        self.home_of = Some(faction);
        self
    }

    pub fn is_stronghold(&self) -> bool {
        self.kind == LocationKind::Stronghold
    }

    pub fn is_polar_sink(&self) -> bool {
        self.kind == LocationKind::PolarSink
    }

    /// Strongholds, rock and the polar sink are sheltered from the storm
    pub fn is_storm_proof(&self) -> bool {
        !matches!(self.kind, LocationKind::Sand)
    }
}

/// The board graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Map {
    locations: Vec<Location>,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location (neighbour lists are filled by `connect`)
    pub fn add(&mut self, location: Location) -> LocationId {
        let id = location.id;
        self.locations.push(location);
        self.locations.sort_by_key(|l| l.id);
        id
    }

    /// Connect two locations in both directions
    pub fn connect(&mut self, a: LocationId, b: LocationId) {
        if let Some(loc) = self.get_mut(a) {
            if !loc.neighbours.contains(&b) {
                loc.neighbours.push(b);
                loc.neighbours.sort();
            }
        }
        if let Some(loc) = self.get_mut(b) {
            if !loc.neighbours.contains(&a) {
                loc.neighbours.push(a);
                loc.neighbours.sort();
            }
        }
    }

    pub fn get(&self, id: LocationId) -> Option<&Location> {
        self.locations
            .binary_search_by_key(&id, |l| l.id)
            .ok()
            .map(|idx| &self.locations[idx])
    }

    fn get_mut(&mut self, id: LocationId) -> Option<&mut Location> {
        match self.locations.binary_search_by_key(&id, |l| l.id) {
            Ok(idx) => Some(&mut self.locations[idx]),
            Err(_) => None,
        }
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    pub fn strongholds(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter().filter(|l| l.is_stronghold())
    }

    pub fn polar_sink(&self) -> Option<LocationId> {
        self.locations.iter().find(|l| l.is_polar_sink()).map(|l| l.id)
    }

    /// Home stronghold of a faction, if it has one on this map
    pub fn home_of(&self, faction: Faction) -> Option<LocationId> {
        self.locations
            .iter()
            .find(|l| l.home_of == Some(faction))
            .map(|l| l.id)
    }

    /// Whether the storm currently covers this location
    pub fn in_storm(&self, id: LocationId, storm_sector: Sector) -> bool {
        self.get(id)
            .map(|l| !l.is_storm_proof() && l.sector == storm_sector)
            .unwrap_or(false)
    }

    /// Whether the location lies in the path of a storm moving `moves` sectors
    pub fn in_storm_path(&self, id: LocationId, storm_sector: Sector, moves: u8) -> bool {
        match self.get(id) {
            Some(l) if !l.is_storm_proof() => {
                storm_path(storm_sector, moves).contains(&l.sector)
            }
            _ => false,
        }
    }

    /// Locations reachable within `range` steps without passing through the
    /// storm or a blocked location. The origin itself is excluded.
    pub fn reachable<F>(
        &self,
        from: LocationId,
        range: u8,
        storm_sector: Sector,
        blocked: F,
    ) -> BTreeSet<LocationId>
    where
        F: Fn(LocationId) -> bool,
    {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::new();
        seen.insert(from);
        queue.push_back((from, 0u8));

        while let Some((current, dist)) = queue.pop_front() {
            if dist >= range {
                continue;
            }
            let Some(loc) = self.get(current) else {
                continue;
            };
            for &next in &loc.neighbours {
                if seen.contains(&next) || self.in_storm(next, storm_sector) || blocked(next) {
                    continue;
                }
                seen.insert(next);
                queue.push_back((next, dist + 1));
            }
        }

        seen.remove(&from);
        seen
    }

    /// Number of steps between two locations ignoring the storm
    pub fn distance(&self, from: LocationId, to: LocationId) -> Option<u32> {
        if from == to {
            return Some(0);
        }
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::new();
        seen.insert(from);
        queue.push_back((from, 0u32));
        while let Some((current, dist)) = queue.pop_front() {
            let Some(loc) = self.get(current) else {
                continue;
            };
            for &next in &loc.neighbours {
                if next == to {
                    return Some(dist + 1);
                }
                if seen.insert(next) {
                    queue.push_back((next, dist + 1));
                }
            }
        }
        None
    }
}

/// Sectors the storm passes over when moving `moves` sectors
pub fn storm_path(storm_sector: Sector, moves: u8) -> BTreeSet<Sector> {
    (1..=moves)
        .map(|step| ((storm_sector as u16 + step as u16) % SECTOR_COUNT as u16) as Sector)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_map() -> Map {
        // 1 - 2 - 3 - 4, with 2 in sector 5 (sand)
        let mut map = Map::new();
        map.add(Location::new(1, "Keep", 1, LocationKind::Stronghold));
        map.add(Location::new(2, "Flats", 5, LocationKind::Sand));
        map.add(Location::new(3, "Ridge", 6, LocationKind::Rock));
        map.add(Location::new(4, "Sink", 9, LocationKind::PolarSink));
        map.connect(LocationId(1), LocationId(2));
        map.connect(LocationId(2), LocationId(3));
        map.connect(LocationId(3), LocationId(4));
        map
    }

    #[test]
    fn test_reachable_respects_range() {
        let map = line_map();
        let reach = map.reachable(LocationId(1), 2, 0, |_| false);
        assert!(reach.contains(&LocationId(2)));
        assert!(reach.contains(&LocationId(3)));
        assert!(!reach.contains(&LocationId(4)));
    }

    #[test]
    fn test_storm_blocks_passage() {
        let map = line_map();
        let reach = map.reachable(LocationId(1), 3, 5, |_| false);
        assert!(reach.is_empty(), "storm over the only sand tile cuts the path");
    }

    #[test]
    fn test_rock_is_storm_proof() {
        let map = line_map();
        assert!(!map.in_storm(LocationId(3), 6));
        assert!(map.in_storm(LocationId(2), 5));
    }

    #[test]
    fn test_storm_path_wraps_around() {
        let path: Vec<Sector> = storm_path(16, 4).into_iter().collect();
        assert_eq!(path, vec![0, 1, 2, 17]);
    }

    #[test]
    fn test_distance() {
        let map = line_map();
        assert_eq!(map.distance(LocationId(1), LocationId(4)), Some(3));
        assert_eq!(map.distance(LocationId(2), LocationId(2)), Some(0));
    }
}
