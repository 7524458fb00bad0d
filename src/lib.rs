//! Arrakis Bot - decision engine for computer-controlled factions
//!
//! Given a read-only game snapshot, a priority tier and the set of legal
//! action kinds, a [`Bot`](agent::Bot) proposes at most one action that
//! the host's rules engine has already validated.

pub mod agent;
pub mod battle;
pub mod core;
pub mod diplomacy;
pub mod factions;
pub mod game;
pub mod knowledge;
pub mod logistics;
pub mod valuation;

pub use agent::Bot;
