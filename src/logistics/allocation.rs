//! The shortfall allocator shared by shipment, movement and battle
//!
//! Given a strength target, spend forces one at a time until the target is
//! met. Forces are paid for while the budget lasts; after that up to
//! `max_unsupported_forces` more are committed unpaid at half strength.

use serde::{Deserialize, Serialize};

use crate::core::types::ForceCount;
use crate::valuation::dial::ForcePool;

/// Result of one allocation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Regular forces paid for
    pub forces: u32,
    /// Elite forces paid for
    pub elite_forces: u32,
    /// Regular forces committed unpaid, at half strength
    pub unsupported_forces: u32,
    /// Elite forces committed unpaid, at half strength
    pub unsupported_elite_forces: u32,
    /// Spice spent on paid forces
    pub spice: u32,
    /// Strength still missing; zero or less means the target is met
    pub shortfall: f32,
}

impl Allocation {
    /// Every force committed, paid or not
    pub fn committed(&self) -> ForceCount {
        ForceCount::new(
            self.forces + self.unsupported_forces,
            self.elite_forces + self.unsupported_elite_forces,
        )
    }

    pub fn total_forces(&self) -> u32 {
        self.committed().total()
    }

    pub fn is_funded(&self) -> bool {
        self.shortfall <= 0.0
    }
}

#[derive(Clone, Copy)]
enum Unit {
    Regular,
    Elite,
}

/// Commit the fewest forces that reach `strength_needed`
pub fn allocate_forces(
    strength_needed: f32,
    pool: &ForcePool,
    budget: u32,
    max_unsupported_forces: u32,
    prefer_elite: bool,
) -> Allocation {
    let mut result = Allocation {
        shortfall: strength_needed,
        ..Default::default()
    };
    let order = if prefer_elite {
        [Unit::Elite, Unit::Regular]
    } else {
        [Unit::Regular, Unit::Elite]
    };
    let strength = |unit: Unit| match unit {
        Unit::Regular => 1.0,
        Unit::Elite => pool.elite_strength,
    };
    let mut left = ForceCount::new(pool.regular, pool.elite);
    let mut budget_left = budget;

    // Paid units at full strength
    for unit in order {
        while result.shortfall > 0.0 && budget_left >= pool.cost_per_force {
            let taken = match unit {
                Unit::Regular if left.regular > 0 => {
                    left.regular -= 1;
                    result.forces += 1;
                    true
                }
                Unit::Elite if left.elite > 0 => {
                    left.elite -= 1;
                    result.elite_forces += 1;
                    true
                }
                _ => false,
            };
            if !taken {
                break;
            }
            budget_left -= pool.cost_per_force;
            result.spice += pool.cost_per_force;
            result.shortfall -= strength(unit);
        }
    }

    // Unpaid units at half strength, up to the cap
    let mut unsupported = 0;
    for unit in order {
        while result.shortfall > 0.0 && unsupported < max_unsupported_forces {
            let taken = match unit {
                Unit::Regular if left.regular > 0 => {
                    left.regular -= 1;
                    result.unsupported_forces += 1;
                    true
                }
                Unit::Elite if left.elite > 0 => {
                    left.elite -= 1;
                    result.unsupported_elite_forces += 1;
                    true
                }
                _ => false,
            };
            if !taken {
                break;
            }
            unsupported += 1;
            result.shortfall -= strength(unit) * 0.5;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_runs_out_then_unsupported_closes_gap() {
        // Needs 10; budget funds 8 regulars; two elites fill in at half strength
        let pool = ForcePool::new(ForceCount::new(8, 2), 2.0, 1);
        let alloc = allocate_forces(10.0, &pool, 8, 2, false);
        assert_eq!(alloc.forces, 8);
        assert_eq!(alloc.spice, 8);
        assert_eq!(alloc.unsupported_elite_forces, 2);
        assert_eq!(alloc.unsupported_forces, 0);
        assert!(alloc.shortfall <= 0.0);
    }

    #[test]
    fn test_stops_when_target_met() {
        let pool = ForcePool::new(ForceCount::new(10, 0), 1.0, 1);
        let alloc = allocate_forces(3.0, &pool, 10, 2, true);
        assert_eq!(alloc.forces, 3);
        assert_eq!(alloc.spice, 3);
        assert_eq!(alloc.shortfall, 0.0);
    }

    #[test]
    fn test_reports_shortfall_when_out_of_forces() {
        let pool = ForcePool::new(ForceCount::new(2, 0), 1.0, 1);
        let alloc = allocate_forces(5.0, &pool, 10, 2, true);
        assert_eq!(alloc.total_forces(), 2);
        assert_eq!(alloc.shortfall, 3.0);
    }

    #[test]
    fn test_free_forces_never_go_unsupported() {
        let pool = ForcePool::new(ForceCount::new(3, 2), 2.0, 0);
        let alloc = allocate_forces(6.0, &pool, 0, 2, true);
        assert_eq!(alloc.elite_forces, 2);
        assert_eq!(alloc.forces, 2);
        assert_eq!(alloc.spice, 0);
        assert_eq!(alloc.unsupported_forces, 0);
    }

    #[test]
    fn test_zero_need_commits_nothing() {
        let pool = ForcePool::new(ForceCount::new(3, 2), 2.0, 1);
        let alloc = allocate_forces(0.0, &pool, 5, 2, true);
        assert_eq!(alloc.total_forces(), 0);
    }
}
