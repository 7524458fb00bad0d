//! Reviving forces and leaders from the tanks

use tracing::debug;

use crate::agent::context::DecisionContext;
use crate::agent::generators::Proposal;
use crate::agent::memory::MemoryNote;
use crate::core::types::ForceCount;
use crate::game::actions::Action;
use crate::game::leaders::Leader;

/// Revive once per turn: the free quota always, paid forces while reserves
/// are low and within a share of our spice, and a leader when none is alive
pub fn revive(ctx: &mut DecisionContext<'_>) -> Proposal {
    if ctx.memory.revival_requested_this_turn() {
        return Ok(None);
    }
    let game = ctx.game;
    let player = ctx.player()?;
    let rules = &game.rules;

    let killed = player.killed.total();
    let free = player.free_revivals.min(killed).min(rules.max_revivals_per_turn);
    let mut count = free;
    if player.reserves.total() < ctx.params.revival_reserve_threshold && rules.revival_cost_per_force > 0 {
        let budget = (player.resources as f32 * ctx.params.revival_max_spice_fraction).floor() as u32;
        let affordable = budget / rules.revival_cost_per_force;
        let room = rules.max_revivals_per_turn.saturating_sub(free);
        count += affordable.min(room).min(killed - free);
    }

    let elite = player.killed.elite.min(count);
    let forces = ForceCount::new(count - elite, elite);
    let force_cost = game.revival_cost(ctx.faction, count);

    let mut leader: Option<&Leader> = None;
    if player.leaders.is_empty() {
        let left = player.resources.saturating_sub(force_cost);
        for dead in &player.dead_leaders {
            let cost = dead.value as u32 * rules.leader_revival_cost_per_value;
            if cost <= left && leader.map(|l| dead.value > l.value).unwrap_or(true) {
                leader = Some(dead);
            }
        }
    }

    if forces.is_empty() && leader.is_none() {
        return Ok(None);
    }
    let leader_cost = leader
        .map(|l| l.value as u32 * rules.leader_revival_cost_per_value)
        .unwrap_or(0);

    debug!(
        faction = %ctx.faction,
        forces = forces.total(),
        leader = ?leader.map(|l| l.id),
        "Revival"
    );
    ctx.note(MemoryNote::RevivalRequested(game.turn));
    Ok(Some(Action::Revive {
        forces,
        leader: leader.map(|l| l.id),
        spice: force_cost + leader_cost,
    }))
}
