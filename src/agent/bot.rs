//! The bot: one agent per bot-controlled seat

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, trace};

use crate::agent::context::DecisionContext;
use crate::agent::dispatcher::Dispatcher;
use crate::agent::generators::COMMON;
use crate::agent::memory::AgentMemory;
use crate::battle::BattlePlanner;
use crate::core::config::{load_parameters, BotParameters};
use crate::core::error::Result;
use crate::core::types::{Faction, Tier};
use crate::factions::{strategy_for, FactionStrategy};
use crate::game::actions::{Action, ActionSet, ActionValidator};
use crate::game::state::GameState;

/// Decision engine for one faction
///
/// Owns its parameters, its memory and the generator registry. Every
/// decision draws from an RNG seeded by the bot seed and the decision
/// point, so a given seed replays the same choices.
pub struct Bot {
    faction: Faction,
    seed: u64,
    params: BotParameters,
    memory: AgentMemory,
    dispatcher: Dispatcher,
}

impl Bot {
    /// Create a bot with the faction's default parameters
    pub fn new(faction: Faction, seed: u64) -> Self {
        Self::build(faction, seed, BotParameters::for_faction(faction))
    }

    /// Create a bot with custom parameters
    pub fn with_parameters(faction: Faction, seed: u64, params: BotParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self::build(faction, seed, params))
    }

    /// Create a bot with parameters loaded from a TOML file
    pub fn from_parameter_file(faction: Faction, seed: u64, path: &Path) -> Result<Self> {
        let params = load_parameters(path)?;
        Ok(Self::build(faction, seed, params))
    }

    fn build(faction: Faction, seed: u64, params: BotParameters) -> Self {
        let strategy: Arc<dyn FactionStrategy> = Arc::from(strategy_for(faction));
        let mut dispatcher = Dispatcher::new();

        // Faction triggers go ahead of the common generators of their tier
        for &(tier, kind) in strategy.triggers() {
            let strategy = Arc::clone(&strategy);
            dispatcher.register(tier, kind, faction.key(), move |ctx| strategy.try_act(kind, ctx));
        }
        for &(tier, kind, name, generate) in COMMON {
            dispatcher.register(tier, kind, name, generate);
        }

        Self {
            faction,
            seed,
            params,
            memory: AgentMemory::default(),
            dispatcher,
        }
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn params(&self) -> &BotParameters {
        &self.params
    }

    pub fn memory(&self) -> &AgentMemory {
        &self.memory
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Propose one action for `tier`, or `None` to pass
    ///
    /// The proposal has already been checked with the validator. Memory is
    /// updated only for the proposal that is returned.
    pub fn determine_action(
        &mut self,
        game: &GameState,
        tier: Tier,
        legal: &ActionSet,
        validator: &mut dyn ActionValidator,
    ) -> Option<Action> {
        self.memory.begin_turn(game.turn);
        self.track_battle(game);

        let rng = self.decision_rng(game, tier);
        let selection = {
            let mut ctx = DecisionContext::new(game, self.faction, tier, &self.params, &self.memory, legal, rng);
            self.dispatcher.select_action(tier, &mut ctx, validator)
        }?;

        for note in selection.notes {
            self.memory.apply(note);
        }
        info!(
            faction = %self.faction,
            turn = game.turn,
            phase = ?game.phase,
            ?tier,
            kind = ?selection.action.kind(),
            "Decided"
        );
        Some(selection.action)
    }

    /// Walk the tiers from highest to lowest and return the first action
    pub fn next_action(
        &mut self,
        game: &GameState,
        legal: &ActionSet,
        validator: &mut dyn ActionValidator,
    ) -> Option<(Tier, Action)> {
        for tier in Tier::ALL {
            if let Some(action) = self.determine_action(game, tier, legal, validator) {
                return Some((tier, action));
            }
        }
        trace!(faction = %self.faction, "Nothing to do");
        None
    }

    fn track_battle(&mut self, game: &GameState) {
        match BattlePlanner::new(game, self.faction, &self.params) {
            Some(planner) => self.memory.begin_battle(planner.battle_id()),
            None => self.memory.end_battle(),
        }
    }

    /// RNG for one decision point (turn, phase, tier)
    fn decision_rng(&self, game: &GameState, tier: Tier) -> ChaCha8Rng {
        let point = ((game.turn as u64) << 16) | ((game.phase as u64) << 8) | tier as u64;
        ChaCha8Rng::seed_from_u64(self.seed ^ point.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::{legal, player_mut, two_player_game};
    use crate::game::actions::{AcceptAll, ActionKind};

    #[test]
    fn test_faction_triggers_come_first() {
        let bot = Bot::new(Faction::Guild, 1);
        let names = bot.dispatcher().names(Tier::Middle);
        let guild = names.iter().position(|n| *n == "guild");
        let shipment = names.iter().position(|n| *n == "shipment");
        assert!(guild.is_some() && shipment.is_some());
        assert!(guild < shipment);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let mut params = BotParameters::default();
        params.bid_spice_fraction = 1.5;
        assert!(Bot::with_parameters(Faction::Atreides, 1, params).is_err());
    }

    #[test]
    fn test_next_action_walks_tiers() {
        let mut game = two_player_game(Faction::Atreides, Faction::Harkonnen);
        player_mut(&mut game, Faction::Atreides).resources = 0;
        let mut bot = Bot::new(Faction::Atreides, 3);
        let legal = legal(&[ActionKind::Charity, ActionKind::Discard]);
        let next = bot.next_action(&game, &legal, &mut AcceptAll);
        assert_eq!(next, Some((Tier::Middle, Action::ClaimCharity)));
    }

    #[test]
    fn test_bot_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Bot>();
    }
}
