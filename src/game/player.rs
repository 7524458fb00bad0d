//! Per-seat player snapshot, as reported by the rules engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::{CardId, Faction, ForceCount, LeaderId, LocationId};
use crate::game::cards::{CardKind, TreacheryCard};
use crate::game::leaders::Leader;
use crate::game::permissions::PermissionSet;

/// One seat at the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub faction: Faction,
    /// Spice available to spend
    pub resources: u32,
    pub reserves: ForceCount,
    /// Forces in the tanks
    pub killed: ForceCount,
    #[serde(default)]
    pub on_board: BTreeMap<LocationId, ForceCount>,
    #[serde(default)]
    pub cards: Vec<TreacheryCard>,
    /// Living leaders not in the tanks
    #[serde(default)]
    pub leaders: Vec<Leader>,
    #[serde(default)]
    pub dead_leaders: Vec<Leader>,
    /// Traitor cards held: leaders that will betray their own side to us
    #[serde(default)]
    pub traitors: Vec<LeaderId>,
    /// Traitor cards offered at setup and put back
    #[serde(default)]
    pub discarded_traitors: Vec<LeaderId>,
    /// Tleilaxu face dancers
    #[serde(default)]
    pub face_dancers: Vec<LeaderId>,
    #[serde(default)]
    pub ally: Option<Faction>,
    /// The Atreides messiah is available and protects from traitors
    #[serde(default)]
    pub has_messiah: bool,
    pub max_cards: u8,
    /// Spice the ally allows us to spend on shipments
    #[serde(default)]
    pub ally_spice_for_shipment: u32,
    /// Spice the ally allows us to spend on our battle dial
    #[serde(default)]
    pub ally_spice_for_battle: u32,
    /// Permissions granted to us by our ally
    #[serde(default)]
    pub permissions_from_ally: PermissionSet,
    /// Free force revivals per turn
    #[serde(default = "default_free_revivals")]
    pub free_revivals: u32,
}

fn default_free_revivals() -> u32 {
    1
}

impl Player {
    pub fn new(faction: Faction, resources: u32, reserves: ForceCount) -> Self {
        Self {
            faction,
            resources,
            reserves,
            killed: ForceCount::default(),
            on_board: BTreeMap::new(),
            cards: Vec::new(),
            leaders: Vec::new(),
            dead_leaders: Vec::new(),
            traitors: Vec::new(),
            discarded_traitors: Vec::new(),
            face_dancers: Vec::new(),
            ally: None,
            has_messiah: false,
            max_cards: if faction == Faction::Harkonnen { 8 } else { 4 },
            ally_spice_for_shipment: 0,
            ally_spice_for_battle: 0,
            permissions_from_ally: PermissionSet::empty(),
            free_revivals: default_free_revivals(),
        }
    }

    /// Forces in one location (zero if none)
    pub fn forces_in(&self, location: LocationId) -> ForceCount {
        self.on_board.get(&location).copied().unwrap_or_default()
    }

    pub fn occupies(&self, location: LocationId) -> bool {
        !self.forces_in(location).is_empty()
    }

    pub fn forces_on_board(&self) -> ForceCount {
        self.on_board
            .values()
            .fold(ForceCount::default(), |acc, f| acc + *f)
    }

    pub fn has_card(&self, kind: CardKind) -> bool {
        self.cards.iter().any(|c| c.kind == kind)
    }

    pub fn card(&self, kind: CardKind) -> Option<&TreacheryCard> {
        self.cards.iter().find(|c| c.kind == kind)
    }

    pub fn card_by_id(&self, id: CardId) -> Option<&TreacheryCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn leader(&self, id: LeaderId) -> Option<&Leader> {
        self.leaders.iter().find(|l| l.id == id)
    }

    pub fn hand_is_full(&self) -> bool {
        self.cards.len() >= self.max_cards as usize
    }

    pub fn holds_traitor(&self, leader: LeaderId) -> bool {
        self.traitors.contains(&leader)
    }

    /// Spice available for shipping, including the ally's contribution
    pub fn shipment_budget(&self) -> u32 {
        self.resources + self.ally_spice_for_shipment
    }

    /// Spice available for the battle dial, including the ally's contribution
    pub fn battle_budget(&self) -> u32 {
        self.resources + self.ally_spice_for_battle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forces_on_board_sums_locations() {
        let mut player = Player::new(Faction::Atreides, 10, ForceCount::new(10, 0));
        player.on_board.insert(LocationId(1), ForceCount::new(3, 0));
        player.on_board.insert(LocationId(2), ForceCount::new(2, 1));
        assert_eq!(player.forces_on_board(), ForceCount::new(5, 1));
    }

    #[test]
    fn test_harkonnen_hand_limit() {
        let player = Player::new(Faction::Harkonnen, 10, ForceCount::new(10, 0));
        assert_eq!(player.max_cards, 8);
    }

    #[test]
    fn test_budget_includes_ally_support() {
        let mut player = Player::new(Faction::Fremen, 3, ForceCount::new(10, 3));
        player.ally_spice_for_shipment = 4;
        player.ally_spice_for_battle = 2;
        assert_eq!(player.shipment_budget(), 7);
        assert_eq!(player.battle_budget(), 5);
    }
}
