//! Atreides: prescience

use tracing::debug;

use crate::agent::context::DecisionContext;
use crate::core::error::GeneratorFault;
use crate::core::types::{Faction, Tier};
use crate::factions::{unhandled, FactionStrategy};
use crate::game::actions::{Action, ActionKind};
use crate::game::battle::PrescienceAspect;
use crate::knowledge::hidden_cards::HiddenCardView;

const TRIGGERS: &[(Tier, ActionKind)] = &[(Tier::High, ActionKind::Prescience)];

pub struct AtreidesStrategy;

impl FactionStrategy for AtreidesStrategy {
    fn faction(&self) -> Faction {
        Faction::Atreides
    }

    fn triggers(&self) -> &'static [(Tier, ActionKind)] {
        TRIGGERS
    }

    fn try_act(&self, trigger: ActionKind, ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
        match trigger {
            ActionKind::Prescience => prescience(ctx),
            other => Err(unhandled(self.faction(), other)),
        }
    }
}

/// Ask about whatever our hand can still react to
///
/// With a defense in hand, knowing the weapon lets us pick the right one.
/// With only weapons, knowing the defense does the same. Once the hand is
/// fully known, or we hold nothing to react with, the dial is the useful
/// unknown.
fn prescience(ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
    let Some(battle) = ctx.game.battle.as_ref() else {
        return Ok(None);
    };
    if battle.prescience.is_some() {
        return Ok(None);
    }
    // Prescience may also be asked for in the ally's battle
    let fighter = if battle.involves(ctx.faction) {
        ctx.faction
    } else {
        match ctx.game.ally_of(ctx.faction) {
            Some(ally) if battle.involves(ally) => ally,
            _ => return Ok(None),
        }
    };
    let opponent = battle.opponent_of(fighter).ok_or(GeneratorFault::NoBattle)?;
    let hand = &ctx
        .game
        .player(fighter)
        .ok_or(GeneratorFault::MissingPlayer(fighter))?
        .cards;

    let view = HiddenCardView::observe(ctx.game, fighter, opponent)
        .ok_or(GeneratorFault::MissingPlayer(opponent))?;
    let opponent_may_arm = view.known_any(|k| k.is_weapon()) || view.unknown_matching(|k| k.is_weapon()) > 0;

    let aspect = if view.unknown_count == 0 {
        PrescienceAspect::Dial
    } else if hand.iter().any(|c| c.is_defense()) && opponent_may_arm {
        PrescienceAspect::Weapon
    } else if hand.iter().any(|c| c.is_weapon()) {
        PrescienceAspect::Defense
    } else {
        PrescienceAspect::Dial
    };

    debug!(faction = %ctx.faction, ?aspect, opponent = %opponent, "Prescience");
    Ok(Some(Action::Prescience { aspect }))
}
