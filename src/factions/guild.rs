//! Guild: choosing when in the shipment order to act

use tracing::debug;

use crate::agent::context::DecisionContext;
use crate::core::error::GeneratorFault;
use crate::core::types::{Faction, Tier};
use crate::factions::{unhandled, FactionStrategy};
use crate::game::actions::{Action, ActionKind};

const TRIGGERS: &[(Tier, ActionKind)] = &[(Tier::Middle, ActionKind::GuildTiming)];

pub struct GuildStrategy;

impl FactionStrategy for GuildStrategy {
    fn faction(&self) -> Faction {
        Faction::Guild
    }

    fn triggers(&self) -> &'static [(Tier, ActionKind)] {
        TRIGGERS
    }

    fn try_act(&self, trigger: ActionKind, ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
        match trigger {
            ActionKind::GuildTiming => Ok(timing(ctx)),
            other => Err(unhandled(self.faction(), other)),
        }
    }
}

/// Wait until enough others have moved, unless someone is about to win
fn timing(ctx: &DecisionContext<'_>) -> Option<Action> {
    let game = ctx.game;
    let moved = game.pending.moved_this_turn.len() as u32;
    if moved >= ctx.params.guild_defer_until_moved {
        return None;
    }
    let threat = game
        .opponents_of(ctx.faction)
        .find(|p| game.strongholds_held_with_ally(p.faction) + 1 >= game.win_threshold(p.faction));
    if let Some(opponent) = threat {
        debug!(opponent = %opponent.faction, "Opponent near a win, shipping now");
        return None;
    }
    Some(Action::DeferShipment)
}
