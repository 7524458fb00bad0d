//! Storm dial

use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use tracing::debug;

use crate::agent::context::DecisionContext;
use crate::agent::generators::Proposal;
use crate::core::types::Faction;
use crate::game::actions::Action;
use crate::game::map::storm_path;
use crate::game::state::GameState;

/// Largest value a player may dial for the storm
const MAX_STORM_DIAL: u8 = 3;

/// Net battle strength the storm would catch moving `moves` sectors:
/// hostile forces count for us, our own and our ally's against
fn storm_damage(game: &GameState, faction: Faction, moves: u8) -> f32 {
    let path = storm_path(game.storm_sector, moves);
    let ally = game.ally_of(faction);
    let mut damage = 0.0;
    for player in &game.players {
        let sign = if player.faction == faction || Some(player.faction) == ally {
            -1.0
        } else {
            1.0
        };
        for (location, forces) in &player.on_board {
            let Some(loc) = game.map.get(*location) else {
                continue;
            };
            if loc.is_storm_proof() || !path.contains(&loc.sector) {
                continue;
            }
            let elite = game.elite_strength(player.faction, faction);
            damage += sign * (forces.regular as f32 + forces.elite as f32 * elite);
        }
    }
    damage
}

/// Dial the value that hurts opponents most; lower dials win ties
pub fn storm_dial(ctx: &mut DecisionContext<'_>) -> Proposal {
    let game = ctx.game;
    let faction = ctx.faction;
    let value = (0..=MAX_STORM_DIAL)
        .max_by_key(|moves| (OrderedFloat(storm_damage(game, faction, *moves)), Reverse(*moves)))
        .unwrap_or(0);
    debug!(faction = %faction, value, "Storm dial");
    Ok(Some(Action::StormDial { value }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::memory::AgentMemory;
    use crate::agent::testing::{context, legal, player_mut, two_player_game, BASIN, CARTHAG};
    use crate::core::config::BotParameters;
    use crate::core::types::ForceCount;
    use crate::game::actions::ActionKind;

    fn run(game: &GameState) -> Option<Action> {
        let params = BotParameters::default();
        let memory = AgentMemory::default();
        let legal = legal(&[ActionKind::StormDial]);
        let mut ctx = context(game, Faction::Atreides, &params, &memory, &legal);
        storm_dial(&mut ctx).unwrap()
    }

    #[test]
    fn test_drives_storm_over_opponent() {
        let mut game = two_player_game(Faction::Atreides, Faction::Harkonnen);
        game.storm_sector = 6;
        player_mut(&mut game, Faction::Harkonnen).on_board.insert(BASIN, ForceCount::new(4, 0));
        // Basin lies in sector 8, two sectors ahead
        assert_eq!(run(&game), Some(Action::StormDial { value: 2 }));
    }

    #[test]
    fn test_keeps_storm_off_own_forces() {
        let mut game = two_player_game(Faction::Atreides, Faction::Harkonnen);
        game.storm_sector = 7;
        player_mut(&mut game, Faction::Atreides).on_board.insert(BASIN, ForceCount::new(4, 0));
        player_mut(&mut game, Faction::Harkonnen).on_board.insert(CARTHAG, ForceCount::new(4, 0));
        assert_eq!(run(&game), Some(Action::StormDial { value: 0 }));
    }
}
