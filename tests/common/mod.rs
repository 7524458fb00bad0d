//! Shared fixtures for integration tests

#![allow(dead_code)]

use arrakis_bot::core::{Faction, ForceCount, LocationId, Phase, ValidationError, ValidationErrorKind};
use arrakis_bot::game::{
    Action, ActionKind, ActionSet, ActionValidator, GameState, Leader, Location, LocationKind, Map, Player,
};

pub const ARRAKEEN: LocationId = LocationId(1);
pub const CARTHAG: LocationId = LocationId(2);
pub const SIETCH_TABR: LocationId = LocationId(3);
pub const HABBANYA: LocationId = LocationId(4);
pub const TUEKS: LocationId = LocationId(5);
pub const BASIN: LocationId = LocationId(6);
pub const POLAR_SINK: LocationId = LocationId(7);
pub const FUNERAL_PLAIN: LocationId = LocationId(8);
pub const CIELAGO: LocationId = LocationId(9);

/// Five strongholds around a polar sink
pub fn arrakis() -> Map {
    let mut map = Map::new();
    map.add(Location::new(1, "Arrakeen", 9, LocationKind::Stronghold).home_of(Faction::Atreides));
    map.add(Location::new(2, "Carthag", 10, LocationKind::Stronghold).home_of(Faction::Harkonnen));
    map.add(Location::new(3, "Sietch Tabr", 13, LocationKind::Stronghold).home_of(Faction::Fremen));
    map.add(Location::new(4, "Habbanya Sietch", 16, LocationKind::Stronghold));
    map.add(Location::new(5, "Tuek's Sietch", 4, LocationKind::Stronghold));
    map.add(Location::new(6, "Imperial Basin", 8, LocationKind::Sand));
    map.add(Location::new(7, "Polar Sink", 0, LocationKind::PolarSink));
    map.add(Location::new(8, "Funeral Plain", 14, LocationKind::Sand));
    map.add(Location::new(9, "Cielago North", 1, LocationKind::Sand));
    map.connect(ARRAKEEN, BASIN);
    map.connect(CARTHAG, BASIN);
    map.connect(BASIN, POLAR_SINK);
    map.connect(POLAR_SINK, FUNERAL_PLAIN);
    map.connect(FUNERAL_PLAIN, SIETCH_TABR);
    map.connect(POLAR_SINK, HABBANYA);
    map.connect(POLAR_SINK, CIELAGO);
    map.connect(CIELAGO, TUEKS);
    map
}

pub fn player(faction: Faction, spice: u32, reserves: u32, leader_base: u16) -> Player {
    let mut player = Player::new(faction, spice, ForceCount::new(reserves, 0));
    player.leaders = vec![
        Leader::new(leader_base, faction, "First", 5),
        Leader::new(leader_base + 1, faction, "Second", 3),
        Leader::new(leader_base + 2, faction, "Third", 1),
    ];
    player
}

/// Atreides, Harkonnen and Emperor with leaders, mid-game
pub fn three_player_game() -> GameState {
    let mut game = GameState::new(
        arrakis(),
        vec![
            player(Faction::Atreides, 12, 10, 1),
            player(Faction::Harkonnen, 12, 10, 11),
            player(Faction::Emperor, 12, 10, 21),
        ],
    );
    game.turn = 3;
    game.phase = Phase::ShipmentAndMove;
    game.storm_sector = 2;
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

/// Records every action it is asked about and accepts them all
#[derive(Default)]
pub struct Recorder {
    pub seen: Vec<Action>,
}

impl ActionValidator for Recorder {
    fn execute(&mut self, action: &Action, _: bool, _: bool) -> Result<(), ValidationError> {
        self.seen.push(action.clone());
        Ok(())
    }
}

/// Rejects every action of one kind
pub struct RejectKind(pub ActionKind);

impl ActionValidator for RejectKind {
    fn execute(&mut self, action: &Action, _: bool, _: bool) -> Result<(), ValidationError> {
        if action.kind() == self.0 {
            Err(ValidationError::new(ValidationErrorKind::IllegalTarget, "rejected by test"))
        } else {
            Ok(())
        }
    }
}

/// Install a test subscriber once; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
