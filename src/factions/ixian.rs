//! Ixian: picking which card goes up for auction

use crate::agent::context::DecisionContext;
use crate::core::error::GeneratorFault;
use crate::core::types::{Faction, Tier};
use crate::factions::{unhandled, FactionStrategy};
use crate::game::actions::{Action, ActionKind};
use crate::game::cards::TreacheryCard;
use crate::knowledge::card_quality::QualityCache;

const TRIGGERS: &[(Tier, ActionKind)] = &[(Tier::Middle, ActionKind::IxianCardChoice)];

pub struct IxianStrategy;

impl FactionStrategy for IxianStrategy {
    fn faction(&self) -> Faction {
        Faction::Ixian
    }

    fn triggers(&self) -> &'static [(Tier, ActionKind)] {
        TRIGGERS
    }

    fn try_act(&self, trigger: ActionKind, ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
        match trigger {
            ActionKind::IxianCardChoice => choose_card(ctx),
            other => Err(unhandled(self.faction(), other)),
        }
    }
}

/// Put up the card most useful to us; we know what we are bidding on
fn choose_card(ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
    let hand = &ctx.player()?.cards;
    let mut cache = QualityCache::new(ctx.faction, hand);
    let mut best: Option<(TreacheryCard, u8)> = None;
    for card in &ctx.game.pending.ixian_candidates {
        let quality = cache.quality(card);
        if best.map(|(_, q)| quality > q).unwrap_or(true) {
            best = Some((*card, quality));
        }
    }
    Ok(best.map(|(card, _)| Action::ChooseAuctionCard { card: card.id }))
}
