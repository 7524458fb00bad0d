//! Side deals: accepting, cancelling and offering
//!
//! Prices are judged against the spice surplus (resources above
//! `deal_min_spice_kept`) scaled by a per-phase ceiling.

use tracing::debug;

use crate::core::config::BotParameters;
use crate::core::types::{Faction, Phase};
use crate::diplomacy::standing::leading_opponent;
use crate::game::actions::Action;
use crate::game::state::{Deal, DealKind, GameState};
use crate::knowledge::card_quality::card_quality;

/// Card quality at which keeping rivals out of the auction is worth paying for
const NO_BIDDING_MIN_QUALITY: u8 = 4;

/// Largest price we are willing to pay for a deal in the current phase
pub fn price_ceiling(game: &GameState, faction: Faction, params: &BotParameters) -> u32 {
    let Some(player) = game.player(faction) else {
        return 0;
    };
    let surplus = player.resources.saturating_sub(params.deal_min_spice_kept) as f32;
    let fraction = match game.phase {
        Phase::Bidding => params.deal_ceiling_bidding,
        Phase::ShipmentAndMove => params.deal_ceiling_shipment,
        Phase::Battle => params.deal_ceiling_battle,
        _ => 0.0,
    };
    (surplus * fraction).floor() as u32
}

/// Whether a deal addressed to us is worth taking
pub fn is_acceptable(game: &GameState, faction: Faction, deal: &Deal, params: &BotParameters) -> bool {
    if deal.recipient_pays {
        deal.price <= price_ceiling(game, faction, params)
    } else {
        // Being paid is fine unless it helps the faction most likely to win
        leading_opponent(game, faction, params) != Some(deal.from)
    }
}

/// First acceptable deal on the table, lowest id first
pub fn accept_deal(game: &GameState, faction: Faction, params: &BotParameters) -> Option<Action> {
    let mut candidates: Vec<&Deal> = game
        .deals
        .iter()
        .filter(|d| d.from != faction && d.to.map(|to| to == faction).unwrap_or(true))
        .filter(|d| d.phase == game.phase)
        .collect();
    candidates.sort_by_key(|d| d.id);

    let deal = candidates
        .into_iter()
        .find(|d| is_acceptable(game, faction, d, params))?;
    debug!(faction = %faction, id = deal.id, kind = ?deal.kind, price = deal.price, "Accepting deal");
    Some(Action::AcceptDeal { id: deal.id })
}

/// Withdraw one of our own deals left over from an earlier phase
pub fn cancel_stale_deal(game: &GameState, faction: Faction) -> Option<Action> {
    game.deals
        .iter()
        .filter(|d| d.from == faction && d.phase != game.phase)
        .map(|d| d.id)
        .min()
        .map(|id| Action::CancelDeal { id })
}

/// Offer to pay the table to stay out of the auction for a strong card
pub fn offer_deal(game: &GameState, faction: Faction, params: &BotParameters) -> Option<Action> {
    if game.phase != Phase::Bidding {
        return None;
    }
    if game.deals.iter().any(|d| d.from == faction) {
        return None;
    }
    let player = game.player(faction)?;
    let card = game.auction.as_ref()?.visible_card?;
    if card_quality(&card, &player.cards, faction) < NO_BIDDING_MIN_QUALITY {
        return None;
    }
    let price = price_ceiling(game, faction, params);
    if price == 0 {
        return None;
    }
    Some(Action::OfferDeal {
        to: None,
        kind: DealKind::NoBidding,
        price,
    })
}
