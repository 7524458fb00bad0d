//! CHOAM: discarding weak cards for spice

use crate::agent::context::DecisionContext;
use crate::core::error::GeneratorFault;
use crate::core::types::{CardId, Faction, Tier};
use crate::factions::{unhandled, FactionStrategy};
use crate::game::actions::{Action, ActionKind};
use crate::knowledge::card_quality::QualityCache;

const TRIGGERS: &[(Tier, ActionKind)] = &[(Tier::Low, ActionKind::ChoamDiscard)];

pub struct ChoamStrategy;

impl FactionStrategy for ChoamStrategy {
    fn faction(&self) -> Faction {
        Faction::Choam
    }

    fn triggers(&self) -> &'static [(Tier, ActionKind)] {
        TRIGGERS
    }

    fn try_act(&self, trigger: ActionKind, ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
        match trigger {
            ActionKind::ChoamDiscard => discard(ctx),
            other => Err(unhandled(self.faction(), other)),
        }
    }
}

fn discard(ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
    let hand = &ctx.player()?.cards;
    let mut cache = QualityCache::new(ctx.faction, hand);
    let cards: Vec<CardId> = hand
        .iter()
        .filter(|c| cache.quality(c) <= ctx.params.choam_discard_max_quality)
        .map(|c| c.id)
        .collect();
    if cards.is_empty() {
        return Ok(None);
    }
    Ok(Some(Action::ChoamDiscard { cards }))
}
