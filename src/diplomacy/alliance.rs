//! Alliance offers, acceptance and breaking
//!
//! All three decisions compare standings with ratio thresholds from
//! `BotParameters`. The unallied bot is generous (accept ratio below 1);
//! the allied bot is sticky (switch ratio above 1).

use tracing::debug;

use crate::core::config::BotParameters;
use crate::core::types::Faction;
use crate::diplomacy::standing::standing;
use crate::game::actions::Action;
use crate::game::state::GameState;

/// Best pending offer addressed to us that clears the acceptance bar
pub fn accept_offer(game: &GameState, faction: Faction, params: &BotParameters) -> Option<Action> {
    let own = standing(game, faction, params);
    let bar = match game.ally_of(faction) {
        None => params.alliance_accept_ratio * own,
        Some(ally) => params.alliance_switch_ratio * standing(game, ally, params),
    };

    let mut best: Option<(Faction, f32)> = None;
    for offer in game.alliance_offers.iter().filter(|o| o.to == faction) {
        if game.player(offer.from).map(|p| p.ally.is_some()).unwrap_or(true) {
            continue;
        }
        let score = standing(game, offer.from, params);
        if score >= bar && best.map(|(_, b)| score > b).unwrap_or(true) {
            best = Some((offer.from, score));
        }
    }

    let (from, score) = best?;
    debug!(faction = %faction, from = %from, score, bar, "Accepting alliance offer");
    Some(Action::AcceptAlliance { from })
}

/// Whether the current alliance should end
///
/// We leave when a rival offer clearly beats the ally, or when the ally
/// has fallen far behind us.
pub fn should_break(game: &GameState, faction: Faction, params: &BotParameters) -> bool {
    let Some(ally) = game.ally_of(faction) else {
        return false;
    };
    let own = standing(game, faction, params);
    let ally_standing = standing(game, ally, params);

    let rival_bar = params.alliance_switch_ratio * ally_standing;
    let better_rival = game
        .alliance_offers
        .iter()
        .filter(|o| o.to == faction && o.from != ally)
        .any(|o| standing(game, o.from, params) >= rival_bar);

    better_rival || ally_standing < params.alliance_break_ratio * own
}

/// Offer an alliance to the strongest acceptable partner
///
/// Only when we are unallied and nothing is on the table in either
/// direction for us.
pub fn propose(game: &GameState, faction: Faction, params: &BotParameters) -> Option<Action> {
    if game.ally_of(faction).is_some() {
        return None;
    }
    if game
        .alliance_offers
        .iter()
        .any(|o| o.from == faction || o.to == faction)
    {
        return None;
    }

    let bar = params.alliance_accept_ratio * standing(game, faction, params);
    let mut best: Option<(Faction, f32)> = None;
    for opponent in game.opponents_of(faction).filter(|p| p.ally.is_none()) {
        let score = standing(game, opponent.faction, params);
        if score >= bar && best.map(|(_, b)| score > b).unwrap_or(true) {
            best = Some((opponent.faction, score));
        }
    }
    best.map(|(to, _)| Action::OfferAlliance { to })
}
