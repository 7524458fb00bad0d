//! Alliance, deal and permission generators

use crate::agent::context::DecisionContext;
use crate::agent::generators::Proposal;
use crate::diplomacy::{alliance, deals};
use crate::game::actions::Action;
use crate::game::permissions::permissions_for_ally;

pub fn accept_alliance(ctx: &mut DecisionContext<'_>) -> Proposal {
    Ok(alliance::accept_offer(ctx.game, ctx.faction, ctx.params))
}

pub fn break_alliance(ctx: &mut DecisionContext<'_>) -> Proposal {
    Ok(alliance::should_break(ctx.game, ctx.faction, ctx.params).then_some(Action::BreakAlliance))
}

pub fn offer_alliance(ctx: &mut DecisionContext<'_>) -> Proposal {
    Ok(alliance::propose(ctx.game, ctx.faction, ctx.params))
}

/// Grant the ally everything our faction can share, once
pub fn ally_permissions(ctx: &mut DecisionContext<'_>) -> Proposal {
    let Some(ally) = ctx.game.ally_of(ctx.faction) else {
        return Ok(None);
    };
    let Some(ally_player) = ctx.game.player(ally) else {
        return Ok(None);
    };
    let permissions = permissions_for_ally(ctx.faction);
    if ally_player.permissions_from_ally == permissions {
        return Ok(None);
    }
    Ok(Some(Action::SetAllyPermissions { permissions }))
}

pub fn cancel_deal(ctx: &mut DecisionContext<'_>) -> Proposal {
    Ok(deals::cancel_stale_deal(ctx.game, ctx.faction))
}

pub fn accept_deal(ctx: &mut DecisionContext<'_>) -> Proposal {
    Ok(deals::accept_deal(ctx.game, ctx.faction, ctx.params))
}

pub fn offer_deal(ctx: &mut DecisionContext<'_>) -> Proposal {
    Ok(deals::offer_deal(ctx.game, ctx.faction, ctx.params))
}
