//! Battle generators: disengage first, then the sealed plan

use tracing::{debug, trace};

use crate::agent::context::DecisionContext;
use crate::agent::generators::Proposal;
use crate::agent::memory::MemoryNote;
use crate::battle::{BattlePlanPhase, BattlePlanner};
use crate::game::actions::{Action, ActionKind};

/// Retreat when the planner would minimize losses and a disengage is legal
pub fn retreat(ctx: &mut DecisionContext<'_>) -> Proposal {
    let Some(planner) = BattlePlanner::new(ctx.game, ctx.faction, ctx.params) else {
        return Ok(None);
    };
    if planner.phase() != BattlePlanPhase::Planning {
        return Ok(None);
    }
    let decision = planner.plan(true)?;
    Ok(decision.retreat.then_some(Action::Retreat))
}

/// Submit the battle plan
///
/// A plan accepted earlier is resubmitted only while nothing it relies on
/// has changed; otherwise the battle is planned afresh.
pub fn battle_plan(ctx: &mut DecisionContext<'_>) -> Proposal {
    let Some(planner) = BattlePlanner::new(ctx.game, ctx.faction, ctx.params) else {
        return Ok(None);
    };
    let battle_id = planner.battle_id();
    let intel = planner.intel();
    if let Some(draft) = ctx.memory.plan_for(battle_id, &intel) {
        if planner.still_fits(&draft) {
            return Ok(Some(Action::BattlePlan(draft)));
        }
        debug!(faction = %ctx.faction, battle = battle_id, "Cached battle plan no longer fits");
    }
    match planner.phase() {
        BattlePlanPhase::AwaitingInformation => {
            trace!(battle = battle_id, "Waiting for battle information");
            Ok(None)
        }
        BattlePlanPhase::Planning | BattlePlanPhase::Finalized => {
            let decision = planner.plan(ctx.is_legal(ActionKind::Retreat))?;
            ctx.note(MemoryNote::BattlePlanned {
                battle_id,
                draft: decision.draft,
                intel,
            });
            Ok(Some(Action::BattlePlan(decision.draft)))
        }
    }
}
