//! Shipment and movement generators

use crate::agent::context::DecisionContext;
use crate::agent::generators::Proposal;
use crate::agent::memory::MemoryNote;
use crate::logistics::{MovementPlanner, ShipmentPlanner};

/// Run the shipment cascade and remember which rule fired
pub fn shipment(ctx: &mut DecisionContext<'_>) -> Proposal {
    let planner = ShipmentPlanner::new(ctx.game, ctx.faction, ctx.params)?;
    let Some(plan) = planner.decide(&mut ctx.rng) else {
        return Ok(None);
    };
    ctx.note(MemoryNote::Shipment(plan.decision, plan.attack.location));
    Ok(Some(plan.to_action()))
}

/// Run the movement cascade, keeping this turn's landing in place
pub fn movement(ctx: &mut DecisionContext<'_>) -> Proposal {
    let planner = MovementPlanner::new(ctx.game, ctx.faction, ctx.params, ctx.memory.last_shipment)?;
    Ok(planner
        .decide()
        .map(|(_, moved)| MovementPlanner::to_action(&moved)))
}
