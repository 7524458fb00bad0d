//! Battle dial strength and the cost of supporting forces

use crate::core::types::{Faction, ForceCount};
use crate::game::state::GameState;

/// Forces available for a commitment, with their per-unit numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForcePool {
    pub regular: u32,
    pub elite: u32,
    /// Full-strength value of one elite force
    pub elite_strength: f32,
    /// Spice needed to fight one force at full strength
    pub cost_per_force: u32,
}

impl ForcePool {
    pub fn new(forces: ForceCount, elite_strength: f32, cost_per_force: u32) -> Self {
        Self {
            regular: forces.regular,
            elite: forces.elite,
            elite_strength,
            cost_per_force,
        }
    }

    /// Build the pool `faction` fields against `opponent`
    pub fn for_battle(game: &GameState, faction: Faction, opponent: Faction, forces: ForceCount) -> Self {
        Self::new(
            forces,
            game.elite_strength(faction, opponent),
            cost_per_force(game, faction),
        )
    }

    pub fn total(&self) -> u32 {
        self.regular + self.elite
    }

    /// Strength of every force at full value
    pub fn full_strength(&self) -> f32 {
        self.regular as f32 + self.elite as f32 * self.elite_strength
    }
}

/// Spice needed to dial one force at full strength
pub fn cost_per_force(game: &GameState, faction: Faction) -> u32 {
    if game.must_pay_for_forces(faction) {
        1
    } else {
        0
    }
}

/// Largest dial the pool can reach with `budget` spice
///
/// Units are taken elite-first (or regular-first) and each one consumes
/// budget while it lasts; units beyond the budget count at half strength.
pub fn max_dial(pool: &ForcePool, budget: u32, elite_first: bool) -> f32 {
    if pool.cost_per_force == 0 {
        return pool.full_strength();
    }

    let mut budget_left = budget;
    let mut dial = 0.0;
    let order: [(u32, f32); 2] = if elite_first {
        [(pool.elite, pool.elite_strength), (pool.regular, 1.0)]
    } else {
        [(pool.regular, 1.0), (pool.elite, pool.elite_strength)]
    };

    for (count, strength) in order {
        for _ in 0..count {
            if budget_left >= pool.cost_per_force {
                budget_left -= pool.cost_per_force;
                dial += strength;
            } else {
                dial += strength * 0.5;
            }
        }
    }
    dial
}

/// Largest dial `faction` can bring against `opponent` at its location
pub fn max_dial_at(game: &GameState, faction: Faction, opponent: Faction, forces: ForceCount) -> f32 {
    let Some(player) = game.player(faction) else {
        return 0.0;
    };
    let pool = ForcePool::for_battle(game, faction, opponent, forces);
    max_dial(&pool, player.battle_budget(), true)
}
