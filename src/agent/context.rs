//! Everything a generator may look at while proposing one action

use rand_chacha::ChaCha8Rng;

use crate::agent::memory::{AgentMemory, MemoryNote};
use crate::core::config::BotParameters;
use crate::core::error::GeneratorFault;
use crate::core::types::{Faction, Tier};
use crate::game::actions::{ActionKind, ActionSet};
use crate::game::player::Player;
use crate::game::state::GameState;

/// A generator's view of one decision point
///
/// The snapshot, parameters and memory are read-only. The RNG is owned by
/// the decision and seeded from the agent seed and the decision point.
pub struct DecisionContext<'a> {
    pub game: &'a GameState,
    pub faction: Faction,
    pub tier: Tier,
    pub params: &'a BotParameters,
    pub memory: &'a AgentMemory,
    pub legal: &'a ActionSet,
    pub rng: ChaCha8Rng,
    notes: Vec<MemoryNote>,
}

impl<'a> DecisionContext<'a> {
    pub fn new(
        game: &'a GameState,
        faction: Faction,
        tier: Tier,
        params: &'a BotParameters,
        memory: &'a AgentMemory,
        legal: &'a ActionSet,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            game,
            faction,
            tier,
            params,
            memory,
            legal,
            rng,
            notes: Vec::new(),
        }
    }

    /// Our own player record
    pub fn player(&self) -> Result<&'a Player, GeneratorFault> {
        self.game
            .player(self.faction)
            .ok_or(GeneratorFault::MissingPlayer(self.faction))
    }

    pub fn is_legal(&self, kind: ActionKind) -> bool {
        self.legal.contains(&kind)
    }

    /// Ask for a memory change, applied only if the action is accepted
    pub fn note(&mut self, note: MemoryNote) {
        self.notes.push(note);
    }

    /// Notes left by the generator that produced the accepted action
    pub fn take_notes(&mut self) -> Vec<MemoryNote> {
        std::mem::take(&mut self.notes)
    }

    /// Drop notes left by a candidate that did not make it
    pub fn discard_notes(&mut self) {
        self.notes.clear();
    }
}
