//! Value objects describing forces in place, on the move, or on the attack

use serde::{Deserialize, Serialize};

use crate::core::types::{Faction, ForceCount, LocationId};
use crate::game::state::GameState;

/// N regular and M elite forces at one location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattalionInLocation {
    pub location: LocationId,
    pub forces: ForceCount,
}

impl BattalionInLocation {
    /// Every battalion `faction` has on the board, in location order
    pub fn all_of(game: &GameState, faction: Faction) -> Vec<BattalionInLocation> {
        game.player(faction)
            .map(|p| {
                p.on_board
                    .iter()
                    .filter(|(_, f)| !f.is_empty())
                    .map(|(location, forces)| BattalionInLocation {
                        location: *location,
                        forces: *forces,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A proposed relocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedBattalion {
    pub from: LocationId,
    pub to: LocationId,
    pub forces: ForceCount,
}

/// A proposed shipment into a contested location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    pub location: LocationId,
    /// Occupant to fight, `None` when the location is vacant
    pub opponent: Option<Faction>,
    pub dial_needed: f32,
    pub forces: ForceCount,
    /// Spice to pay for the shipment itself
    pub spice: u32,
    pub shortfall: f32,
}

impl Attack {
    pub fn is_viable(&self, max_shortfall: f32) -> bool {
        !self.forces.is_empty() && self.shortfall <= max_shortfall
    }
}
