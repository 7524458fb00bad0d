//! Tleilaxu: face dancers and the revival tanks

use tracing::info;

use crate::agent::context::DecisionContext;
use crate::agent::memory::MemoryNote;
use crate::core::error::GeneratorFault;
use crate::core::types::{Faction, Tier};
use crate::factions::{unhandled, FactionStrategy};
use crate::game::actions::{Action, ActionKind};

const TRIGGERS: &[(Tier, ActionKind)] = &[
    (Tier::Highest, ActionKind::FaceDancerReveal),
    (Tier::Low, ActionKind::RevivalPrice),
];

pub struct TleilaxuStrategy;

impl FactionStrategy for TleilaxuStrategy {
    fn faction(&self) -> Faction {
        Faction::Tleilaxu
    }

    fn triggers(&self) -> &'static [(Tier, ActionKind)] {
        TRIGGERS
    }

    fn try_act(&self, trigger: ActionKind, ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
        match trigger {
            ActionKind::FaceDancerReveal => reveal_face_dancer(ctx),
            ActionKind::RevivalPrice => Ok(set_revival_price(ctx)),
            other => Err(unhandled(self.faction(), other)),
        }
    }
}

/// Reveal when the opponent's fielded leader is one of our face dancers
fn reveal_face_dancer(ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
    let Some(battle) = ctx.game.battle.as_ref() else {
        return Ok(None);
    };
    let Some(opponent) = battle.opponent_of(ctx.faction) else {
        return Ok(None);
    };
    let Some(leader) = battle.revealed_leader(opponent) else {
        return Ok(None);
    };
    if !ctx.player()?.face_dancers.contains(&leader) {
        return Ok(None);
    }
    info!(opponent = %opponent, leader = leader.0, "Face dancer revealed");
    Ok(Some(Action::RevealFaceDancer))
}

/// Quote the revival price once per turn
fn set_revival_price(ctx: &mut DecisionContext<'_>) -> Option<Action> {
    if ctx.memory.price_set_earlier {
        return None;
    }
    ctx.note(MemoryNote::PriceSet);
    Some(Action::SetRevivalPrice {
        price: ctx.params.tleilaxu_revival_price,
    })
}
