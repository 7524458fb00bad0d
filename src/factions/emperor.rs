//! Emperor: bankrolling the ally

use tracing::debug;

use crate::agent::context::DecisionContext;
use crate::core::error::GeneratorFault;
use crate::core::types::{Faction, Tier};
use crate::factions::{unhandled, FactionStrategy};
use crate::game::actions::{Action, ActionKind};

const TRIGGERS: &[(Tier, ActionKind)] = &[(Tier::Low, ActionKind::AllySupport)];

pub struct EmperorStrategy;

impl FactionStrategy for EmperorStrategy {
    fn faction(&self) -> Faction {
        Faction::Emperor
    }

    fn triggers(&self) -> &'static [(Tier, ActionKind)] {
        TRIGGERS
    }

    fn try_act(&self, trigger: ActionKind, ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
        match trigger {
            ActionKind::AllySupport => support_ally(ctx),
            other => Err(unhandled(self.faction(), other)),
        }
    }
}

/// Offer a fixed share of our spice, split between shipping and battles
///
/// Battles get the odd spice. Nothing is proposed when the ally already
/// has exactly this offer.
fn support_ally(ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
    let Some(ally) = ctx.game.ally_of(ctx.faction) else {
        return Ok(None);
    };
    let resources = ctx.player()?.resources;
    let ally_player = ctx.game.player(ally).ok_or(GeneratorFault::MissingPlayer(ally))?;

    let total = (resources as f32 * ctx.params.emperor_ally_support_fraction).floor() as u32;
    let shipment = total / 2;
    let battle = total - shipment;
    if ally_player.ally_spice_for_shipment == shipment && ally_player.ally_spice_for_battle == battle {
        return Ok(None);
    }
    debug!(ally = %ally, shipment, battle, "Supporting ally");
    Ok(Some(Action::SupportAlly { shipment, battle }))
}
