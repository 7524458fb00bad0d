//! Shipment and movement planning
//!
//! Both planners run a fixed cascade of rules; the first rule that
//! produces a viable proposal wins. Force counts are sized with the shared
//! shortfall allocator in [`allocation`].

pub mod allocation;
pub mod battalion;
pub mod movement;
pub mod shipment;

pub use allocation::{allocate_forces, Allocation};
pub use battalion::{Attack, BattalionInLocation, MovedBattalion};
pub use movement::{MovementDecision, MovementPlanner};
pub use shipment::{ShipmentDecision, ShipmentPlan, ShipmentPlanner};

use crate::core::config::BotParameters;
use crate::core::types::{Faction, LocationId};
use crate::game::state::GameState;
use crate::valuation::dial::max_dial_at;

/// Storm movement to plan around: the forecast if known, else the
/// configured fallback
pub fn expected_storm_moves(game: &GameState, faction: Faction, params: &BotParameters) -> u8 {
    game.known_storm_moves(faction)
        .unwrap_or(params.movement_storm_uncertainty_fallback)
}

/// Whether forces at `location` survive the next storm
pub fn is_storm_safe(game: &GameState, location: LocationId, moves: u8) -> bool {
    !game.map.in_storm(location, game.storm_sector) && !game.map.in_storm_path(location, game.storm_sector, moves)
}

/// The strongest hostile occupant of `location` and the dial it can reach
pub fn strongest_hostile(game: &GameState, faction: Faction, location: LocationId) -> Option<(Faction, f32)> {
    let mut strongest: Option<(Faction, f32)> = None;
    for (occupant, forces) in game.hostile_occupants(faction, location) {
        let dial = max_dial_at(game, occupant, faction, forces);
        if strongest.map(|(_, best)| dial > best).unwrap_or(true) {
            strongest = Some((occupant, dial));
        }
    }
    strongest
}

/// Strongest dial any hostile battalion could bring to `location` by
/// moving there this turn
pub fn hostile_threat(game: &GameState, faction: Faction, location: LocationId) -> f32 {
    let mut threat = strongest_hostile(game, faction, location)
        .map(|(_, dial)| dial)
        .unwrap_or(0.0);
    for opponent in game.opponents_of(faction) {
        for (from, forces) in &opponent.on_board {
            if *from == location || forces.is_empty() {
                continue;
            }
            if game.reachable_locations(opponent.faction, *from).contains(&location) {
                threat = threat.max(max_dial_at(game, opponent.faction, faction, *forces));
            }
        }
    }
    threat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ForceCount;
    use crate::game::map::{Location, LocationKind, Map};
    use crate::game::player::Player;

    #[test]
    fn test_strongest_hostile_skips_ally() {
        let mut map = Map::new();
        map.add(Location::new(1, "Keep", 3, LocationKind::Stronghold));
        let mut atreides = Player::new(Faction::Atreides, 0, ForceCount::default());
        atreides.ally = Some(Faction::Guild);
        let mut guild = Player::new(Faction::Guild, 0, ForceCount::default());
        guild.on_board.insert(LocationId(1), ForceCount::new(9, 0));
        let mut fremen = Player::new(Faction::Fremen, 0, ForceCount::default());
        fremen.on_board.insert(LocationId(1), ForceCount::new(2, 1));
        let game = GameState::new(map, vec![atreides, guild, fremen]);

        let (occupant, dial) = strongest_hostile(&game, Faction::Atreides, LocationId(1)).unwrap();
        assert_eq!(occupant, Faction::Fremen);
        assert_eq!(dial, 4.0);
    }
}
