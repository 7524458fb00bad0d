//! Shared fixtures for generator and faction tests

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::agent::context::DecisionContext;
use crate::agent::memory::AgentMemory;
use crate::core::config::BotParameters;
use crate::core::types::{Faction, ForceCount, LocationId, Phase, Tier};
use crate::game::actions::{ActionKind, ActionSet};
use crate::game::leaders::Leader;
use crate::game::map::{Location, LocationKind, Map};
use crate::game::player::Player;
use crate::game::state::GameState;

pub const ARRAKEEN: LocationId = LocationId(1);
pub const CARTHAG: LocationId = LocationId(2);
pub const SIETCH_TABR: LocationId = LocationId(3);
pub const HABBANYA: LocationId = LocationId(4);
pub const BASIN: LocationId = LocationId(5);
pub const POLAR_SINK: LocationId = LocationId(6);
pub const FUNERAL_PLAIN: LocationId = LocationId(7);

/// A small board
///
/// ```text
/// Arrakeen(9) - Basin(8) - Carthag(10)
///                 |
///             Polar Sink - Funeral Plain(14) - Sietch Tabr(13)
///                 |
///             Habbanya(16)
/// ```
pub fn small_map() -> Map {
    let mut map = Map::new();
    map.add(Location::new(1, "Arrakeen", 9, LocationKind::Stronghold).home_of(Faction::Atreides));
    map.add(Location::new(2, "Carthag", 10, LocationKind::Stronghold).home_of(Faction::Harkonnen));
    map.add(Location::new(3, "Sietch Tabr", 13, LocationKind::Stronghold).home_of(Faction::Fremen));
    map.add(Location::new(4, "Habbanya Sietch", 16, LocationKind::Stronghold));
    map.add(Location::new(5, "Imperial Basin", 8, LocationKind::Sand));
    map.add(Location::new(6, "Polar Sink", 0, LocationKind::PolarSink));
    map.add(Location::new(7, "Funeral Plain", 14, LocationKind::Sand));
    map.connect(ARRAKEEN, BASIN);
    map.connect(CARTHAG, BASIN);
    map.connect(BASIN, POLAR_SINK);
    map.connect(POLAR_SINK, FUNERAL_PLAIN);
    map.connect(FUNERAL_PLAIN, SIETCH_TABR);
    map.connect(POLAR_SINK, HABBANYA);
    map
}

/// Two-player game with leaders, storm parked away from everything
pub fn two_player_game(us: Faction, them: Faction) -> GameState {
    let mut ours = Player::new(us, 10, ForceCount::new(10, 0));
    ours.leaders = vec![Leader::new(1, us, "Ours A", 5), Leader::new(2, us, "Ours B", 2)];
    let mut theirs = Player::new(them, 10, ForceCount::new(10, 0));
    theirs.leaders = vec![Leader::new(11, them, "Theirs A", 4), Leader::new(12, them, "Theirs B", 1)];
    let mut game = GameState::new(small_map(), vec![ours, theirs]);
    game.storm_sector = 2;
    game.phase = Phase::ShipmentAndMove;
    game
}

pub fn player_mut(game: &mut GameState, faction: Faction) -> &mut Player {
    game.players
        .iter_mut()
        .find(|p| p.faction == faction)
        .expect("faction seated")
}

pub fn legal(kinds: &[ActionKind]) -> ActionSet {
    kinds.iter().copied().collect()
}

/// Build a context with fixed parameters, empty memory and a fixed seed
pub fn context<'a>(
    game: &'a GameState,
    faction: Faction,
    params: &'a BotParameters,
    memory: &'a AgentMemory,
    legal: &'a ActionSet,
) -> DecisionContext<'a> {
    DecisionContext::new(game, faction, Tier::Middle, params, memory, legal, ChaCha8Rng::seed_from_u64(7))
}
