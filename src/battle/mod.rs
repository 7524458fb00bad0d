//! Battle planning: hero, cards and dial for the battle at hand

pub mod planner;
pub mod weapons;

pub use planner::{BattleDecision, BattlePlanPhase, BattlePlanner};
pub use weapons::{choose_cards, CardChoice};
