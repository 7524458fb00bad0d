//! Valuation primitives: pure functions over dials, budgets and hidden
//! card risk

pub mod dial;
pub mod probability;
pub mod survival;

pub use dial::{cost_per_force, max_dial, max_dial_at, ForcePool};
pub use probability::{probability_none_match, probability_some_match};
pub use survival::{chance_hero_survives, chance_opponent_hero_dies, BattleIntel};
