//! The agent: memory, decision context, dispatch and generators

pub mod bot;
pub mod context;
pub mod dispatcher;
pub mod generators;
pub mod memory;

#[cfg(test)]
pub(crate) mod testing;

pub use bot::Bot;
pub use context::DecisionContext;
pub use dispatcher::{Dispatcher, Selection};
pub use memory::{AgentMemory, BattleMemory, MemoryNote};
