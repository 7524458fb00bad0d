//! Bidding on the card up for auction

use rand::Rng;
use tracing::trace;

use crate::agent::context::DecisionContext;
use crate::agent::generators::Proposal;
use crate::game::actions::Action;
use crate::knowledge::card_quality::{card_quality, MAX_QUALITY};

/// Quality from which a bluff above the ceiling is considered
const BLUFF_MIN_QUALITY: u8 = 4;

/// Raise by one while the price stays under a quality-scaled ceiling
///
/// Unseen cards are valued at the minimum worth bidding on. We never bid
/// against our ally or with a full hand.
pub fn bid(ctx: &mut DecisionContext<'_>) -> Proposal {
    let Some(auction) = ctx.game.auction.as_ref() else {
        return Ok(None);
    };
    let player = ctx.player()?;
    if player.hand_is_full() {
        return Ok(Some(Action::PassBid));
    }
    if auction.highest_bidder.is_some() && auction.highest_bidder == player.ally {
        return Ok(Some(Action::PassBid));
    }

    let quality = match &auction.visible_card {
        Some(card) => card_quality(card, &player.cards, ctx.faction),
        None => ctx.params.bid_min_quality,
    };
    if quality < ctx.params.bid_min_quality {
        return Ok(Some(Action::PassBid));
    }

    let ceiling = (player.resources as f32 * ctx.params.bid_spice_fraction * quality as f32 / MAX_QUALITY as f32)
        .floor() as u32;
    let next = auction.highest_bid + 1;
    trace!(quality, ceiling, next, "Bid ceiling");

    if next <= ceiling {
        return Ok(Some(Action::Bid { amount: next }));
    }
    let bluff = next == ceiling + 1
        && quality >= BLUFF_MIN_QUALITY
        && next <= player.resources
        && ctx.rng.gen::<f32>() < ctx.params.bid_bluff_chance;
    if bluff {
        return Ok(Some(Action::Bid { amount: next }));
    }
    Ok(Some(Action::PassBid))
}
