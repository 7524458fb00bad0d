//! Harkonnen: capturing leaders after a won battle

use tracing::debug;

use crate::agent::context::DecisionContext;
use crate::core::error::GeneratorFault;
use crate::core::types::{Faction, Tier};
use crate::factions::{unhandled, FactionStrategy};
use crate::game::actions::{Action, ActionKind};
use crate::game::leaders::Leader;

const TRIGGERS: &[(Tier, ActionKind)] = &[(Tier::Middle, ActionKind::CaptureLeader)];

pub struct HarkonnenStrategy;

impl FactionStrategy for HarkonnenStrategy {
    fn faction(&self) -> Faction {
        Faction::Harkonnen
    }

    fn triggers(&self) -> &'static [(Tier, ActionKind)] {
        TRIGGERS
    }

    fn try_act(&self, trigger: ActionKind, ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
        match trigger {
            ActionKind::CaptureLeader => Ok(capture(ctx)),
            other => Err(unhandled(self.faction(), other)),
        }
    }
}

/// Take the most valuable leader on offer; cheap ones are killed for spice
fn capture(ctx: &DecisionContext<'_>) -> Option<Action> {
    let mut best: Option<&Leader> = None;
    for leader in &ctx.game.pending.capturable_leaders {
        if best.map(|b| leader.value > b.value).unwrap_or(true) {
            best = Some(leader);
        }
    }
    let leader = best?;
    let kill = leader.value <= ctx.params.harkonnen_kill_leader_max_value;
    debug!(leader = leader.id.0, value = leader.value, kill, "Captured leader");
    Some(Action::CaptureDecision { leader: leader.id, kill })
}
