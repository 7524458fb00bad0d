//! Relative standing of the factions at the table

use crate::core::config::BotParameters;
use crate::core::types::Faction;
use crate::game::state::GameState;

/// Weighted score of a faction's position: cards, spice, strongholds,
/// forces on the board and in reserve, and living leaders
pub fn standing(game: &GameState, faction: Faction, params: &BotParameters) -> f32 {
    let Some(player) = game.player(faction) else {
        return 0.0;
    };
    let strongholds = game.strongholds_held_by(faction).len() as f32;

    params.standing_weight_cards * player.cards.len() as f32
        + params.standing_weight_spice * player.resources as f32
        + params.standing_weight_strongholds * strongholds
        + params.standing_weight_forces_on_board * player.forces_on_board().total() as f32
        + params.standing_weight_forces_in_reserve * player.reserves.total() as f32
        + params.standing_weight_leaders * player.leaders.len() as f32
}

/// Opponent with the best standing; seating order breaks ties
pub fn leading_opponent(game: &GameState, faction: Faction, params: &BotParameters) -> Option<Faction> {
    let mut leader: Option<(Faction, f32)> = None;
    for opponent in game.opponents_of(faction) {
        let score = standing(game, opponent.faction, params);
        if leader.map(|(_, best)| score > best).unwrap_or(true) {
            leader = Some((opponent.faction, score));
        }
    }
    leader.map(|(f, _)| f)
}
