//! Movement planner: which battalion moves where this turn
//!
//! A single ranked cascade; the first rule with a match wins.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::BotParameters;
use crate::core::error::GeneratorFault;
use crate::core::types::{Faction, ForceCount, LocationId};
use crate::game::actions::Action;
use crate::game::map::LocationKind;
use crate::game::state::GameState;
use crate::logistics::battalion::{BattalionInLocation, MovedBattalion};
use crate::logistics::shipment::ShipmentDecision;
use crate::logistics::{expected_storm_moves, hostile_threat, is_storm_safe, strongest_hostile};
use crate::valuation::dial::{max_dial, ForcePool};

/// Which rule produced a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementDecision {
    HoldableStronghold,
    VacantSafeStronghold,
    OpponentNearWin,
    ReinforceWeakHeld,
    StormEscape,
    SpiceWithoutCombat,
    WinnableFight,
    LastResort,
}

pub struct MovementPlanner<'a> {
    game: &'a GameState,
    faction: Faction,
    params: &'a BotParameters,
    budget: u32,
    movers: Vec<BattalionInLocation>,
    storm_moves: u8,
}

impl<'a> MovementPlanner<'a> {
    /// `shipped` is this turn's shipment, whose forces stay where they landed
    /// unless they were only parked
    pub fn new(
        game: &'a GameState,
        faction: Faction,
        params: &'a BotParameters,
        shipped: Option<(ShipmentDecision, LocationId)>,
    ) -> Result<Self, GeneratorFault> {
        let player = game
            .player(faction)
            .ok_or(GeneratorFault::MissingPlayer(faction))?;

        let keep = shipped
            .filter(|(decision, _)| *decision != ShipmentDecision::ParkAtHub)
            .map(|(_, location)| location);
        let budget = player.battle_budget();
        let movers = BattalionInLocation::all_of(game, faction)
            .into_iter()
            .filter(|b| Some(b.location) != keep)
            .filter_map(|b| match game.map.get(b.location) {
                Some(l) if l.is_stronghold() => garrison_surplus(game, faction, params, budget, b),
                Some(_) => Some(b),
                None => None,
            })
            .collect();

        Ok(Self {
            game,
            faction,
            params,
            budget,
            movers,
            storm_moves: expected_storm_moves(game, faction, params),
        })
    }

    pub fn decide(&self) -> Option<(MovementDecision, MovedBattalion)> {
        let result = self
            .holdable_stronghold()
            .map(|m| (MovementDecision::HoldableStronghold, m))
            .or_else(|| self.vacant_safe_stronghold().map(|m| (MovementDecision::VacantSafeStronghold, m)))
            .or_else(|| self.opponent_near_win().map(|m| (MovementDecision::OpponentNearWin, m)))
            .or_else(|| self.reinforce_weak_held().map(|m| (MovementDecision::ReinforceWeakHeld, m)))
            .or_else(|| self.storm_escape().map(|m| (MovementDecision::StormEscape, m)))
            .or_else(|| self.spice_without_combat().map(|m| (MovementDecision::SpiceWithoutCombat, m)))
            .or_else(|| self.winnable_fight().map(|m| (MovementDecision::WinnableFight, m)))
            .or_else(|| self.last_resort().map(|m| (MovementDecision::LastResort, m)));

        if let Some((decision, moved)) = &result {
            debug!(
                faction = %self.faction,
                ?decision,
                from = moved.from.0,
                to = moved.to.0,
                forces = moved.forces.total(),
                "Movement planned"
            );
        }
        result
    }

    pub fn to_action(moved: &MovedBattalion) -> Action {
        Action::Move {
            from: moved.from,
            to: moved.to,
            forces: moved.forces,
        }
    }

    fn dial_of(&self, battalion: &BattalionInLocation, opponent: Faction) -> f32 {
        let pool = ForcePool::for_battle(self.game, self.faction, opponent, battalion.forces);
        max_dial(&pool, self.budget, true)
    }

    /// First (battalion, destination) pair satisfying `pred`
    fn first_move<F>(&self, pred: F) -> Option<MovedBattalion>
    where
        F: Fn(&BattalionInLocation, LocationId) -> bool,
    {
        for battalion in &self.movers {
            for to in self.game.reachable_locations(self.faction, battalion.location) {
                if pred(battalion, to) {
                    return Some(MovedBattalion {
                        from: battalion.location,
                        to,
                        forces: battalion.forces,
                    });
                }
            }
        }
        None
    }

    /// Best-scored (battalion, destination) pair; the first one wins ties
    fn best_move<F>(&self, score: F) -> Option<MovedBattalion>
    where
        F: Fn(&BattalionInLocation, LocationId) -> Option<f32>,
    {
        let mut best: Option<(MovedBattalion, f32)> = None;
        for battalion in &self.movers {
            for to in self.game.reachable_locations(self.faction, battalion.location) {
                let Some(value) = score(battalion, to) else {
                    continue;
                };
                if best.map(|(_, b)| value > b).unwrap_or(true) {
                    best = Some((
                        MovedBattalion {
                            from: battalion.location,
                            to,
                            forces: battalion.forces,
                        },
                        value,
                    ));
                }
            }
        }
        best.map(|(m, _)| m)
    }

    fn is_stronghold(&self, location: LocationId) -> bool {
        self.game.map.get(location).map(|l| l.is_stronghold()).unwrap_or(false)
    }

    fn safe(&self, location: LocationId) -> bool {
        is_storm_safe(self.game, location, self.storm_moves)
    }

    fn has_ally(&self, location: LocationId) -> bool {
        self.game
            .ally_of(self.faction)
            .and_then(|ally| self.game.player(ally))
            .map(|ally| ally.occupies(location))
            .unwrap_or(false)
    }

    // === CASCADE ===

    fn holdable_stronghold(&self) -> Option<MovedBattalion> {
        let game = self.game;
        self.first_move(|b, to| {
            if !self.is_stronghold(to) || !game.is_vacant(to) || !self.safe(to) {
                return false;
            }
            let threat = hostile_threat(game, self.faction, to);
            self.dial_of(b, self.faction) >= threat * self.params.movement_hold_confidence && threat > 0.0
        })
    }

    fn vacant_safe_stronghold(&self) -> Option<MovedBattalion> {
        let game = self.game;
        self.first_move(|_, to| self.is_stronghold(to) && game.is_vacant(to) && self.safe(to))
    }

    fn opponent_near_win(&self) -> Option<MovedBattalion> {
        let game = self.game;
        self.first_move(|b, to| {
            if !self.is_stronghold(to) {
                return false;
            }
            let Some(holder) = game.controller(to) else {
                return false;
            };
            if holder == self.faction || game.is_ally(self.faction, holder) {
                return false;
            }
            let held = game.strongholds_held_with_ally(holder);
            if held + 1 < game.win_threshold(holder) {
                return false;
            }
            let defence = strongest_hostile(game, self.faction, to)
                .map(|(_, d)| d)
                .unwrap_or(0.0);
            self.dial_of(b, holder) >= defence + self.params.movement_win_margin
        })
    }

    fn reinforce_weak_held(&self) -> Option<MovedBattalion> {
        let game = self.game;
        let player = game.player(self.faction)?;
        self.first_move(|_, to| {
            if game.controller(to) != Some(self.faction) || !self.is_stronghold(to) {
                return false;
            }
            let present = BattalionInLocation {
                location: to,
                forces: player.forces_in(to),
            };
            let threat = hostile_threat(game, self.faction, to);
            threat > 0.0 && self.dial_of(&present, self.faction) < threat + self.params.shipment_defend_margin
        })
    }

    fn storm_escape(&self) -> Option<MovedBattalion> {
        let game = self.game;
        self.best_move(|b, to| {
            if self.safe(b.location) || !self.safe(to) {
                return None;
            }
            if !game.hostile_occupants(self.faction, to).is_empty() {
                return None;
            }
            let kind = game.map.get(to)?.kind;
            let mut score = match kind {
                LocationKind::Stronghold => 3.0,
                LocationKind::Rock => 2.0,
                LocationKind::PolarSink => 1.0,
                LocationKind::Sand => 0.0,
            };
            if game.controller(to) == Some(self.faction) {
                score += 1.0;
            }
            Some(score + game.spice_at(to) as f32 * 0.1)
        })
    }

    fn spice_without_combat(&self) -> Option<MovedBattalion> {
        let game = self.game;
        self.best_move(|_, to| {
            let spice = game.spice_at(to);
            if spice < self.params.movement_min_spice_to_collect || !self.safe(to) {
                return None;
            }
            game.hostile_occupants(self.faction, to)
                .is_empty()
                .then_some(spice as f32)
        })
    }

    fn winnable_fight(&self) -> Option<MovedBattalion> {
        let game = self.game;
        self.first_move(|b, to| match strongest_hostile(game, self.faction, to) {
            Some((occupant, defence)) => {
                !self.has_ally(to) && self.dial_of(b, occupant) >= defence + self.params.movement_win_margin
            }
            None => false,
        })
    }

    fn last_resort(&self) -> Option<MovedBattalion> {
        self.first_move(|_, to| !self.has_ally(to))
    }
}

/// Forces a stronghold garrison can spare while still meeting the local
/// threat plus the defend margin. Regulars leave first; at least one force
/// always stays behind.
fn garrison_surplus(
    game: &GameState,
    faction: Faction,
    params: &BotParameters,
    budget: u32,
    battalion: BattalionInLocation,
) -> Option<BattalionInLocation> {
    let needed = hostile_threat(game, faction, battalion.location) + params.shipment_defend_margin;
    let holds = |forces: ForceCount| {
        let pool = ForcePool::for_battle(game, faction, faction, forces);
        !forces.is_empty() && max_dial(&pool, budget, true) >= needed
    };
    if !holds(battalion.forces) {
        return None;
    }

    let mut garrison = battalion.forces;
    while garrison.regular > 0 && holds(ForceCount::new(garrison.regular - 1, garrison.elite)) {
        garrison.regular -= 1;
    }
    while garrison.elite > 0 && holds(ForceCount::new(garrison.regular, garrison.elite - 1)) {
        garrison.elite -= 1;
    }

    let spare = battalion.forces.saturating_sub(&garrison);
    (!spare.is_empty()).then_some(BattalionInLocation {
        location: battalion.location,
        forces: spare,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::map::{Location, Map};
    use crate::game::player::Player;
    use crate::game::state::StormForecast;

    fn board() -> Map {
        let mut map = Map::new();
        map.add(Location::new(1, "Arrakeen", 9, LocationKind::Stronghold).home_of(Faction::Atreides));
        map.add(Location::new(2, "Carthag", 10, LocationKind::Stronghold).home_of(Faction::Harkonnen));
        map.add(Location::new(3, "Basin", 11, LocationKind::Sand));
        map.add(Location::new(4, "Sink", 0, LocationKind::PolarSink));
        map.connect(LocationId(1), LocationId(3));
        map.connect(LocationId(2), LocationId(3));
        map.connect(LocationId(3), LocationId(4));
        map
    }

    /// `board` plus Tuek's and Habbanya off the polar sink
    fn wide_board() -> Map {
        let mut map = board();
        map.add(Location::new(5, "Tueks", 4, LocationKind::Stronghold));
        map.add(Location::new(6, "Flats", 6, LocationKind::Sand));
        map.add(Location::new(7, "Habbanya", 16, LocationKind::Stronghold));
        map.connect(LocationId(4), LocationId(5));
        map.connect(LocationId(4), LocationId(6));
        map.connect(LocationId(6), LocationId(7));
        map
    }

    fn seated(faction: Faction, spice: u32, forces: &[(u16, u32)]) -> Player {
        let mut player = Player::new(faction, spice, ForceCount::new(5, 0));
        for (location, count) in forces {
            player.on_board.insert(LocationId(*location), ForceCount::new(*count, 0));
        }
        player
    }

    fn decide(game: &GameState, faction: Faction) -> Option<(MovementDecision, MovedBattalion)> {
        let params = BotParameters::default();
        MovementPlanner::new(game, faction, &params, None).unwrap().decide()
    }

    #[test]
    fn test_moves_into_vacant_stronghold() {
        let mut atreides = Player::new(Faction::Atreides, 10, ForceCount::new(5, 0));
        atreides.on_board.insert(LocationId(3), ForceCount::new(5, 0));
        let mut harkonnen = Player::new(Faction::Harkonnen, 10, ForceCount::new(0, 0));
        harkonnen.on_board.insert(LocationId(2), ForceCount::new(10, 0));
        let game = GameState::new(board(), vec![atreides, harkonnen]);
        let params = BotParameters::default();

        let planner = MovementPlanner::new(&game, Faction::Atreides, &params, None).unwrap();
        let (decision, moved) = planner.decide().unwrap();
        assert_eq!(decision, MovementDecision::VacantSafeStronghold);
        assert_eq!(moved.to, LocationId(1));
        assert_eq!(moved.forces, ForceCount::new(5, 0));
    }

    #[test]
    fn test_escapes_known_storm() {
        let mut atreides = Player::new(Faction::Atreides, 10, ForceCount::new(5, 0));
        atreides.on_board.insert(LocationId(3), ForceCount::new(5, 0));
        let mut harkonnen = Player::new(Faction::Harkonnen, 10, ForceCount::new(0, 0));
        harkonnen.on_board.insert(LocationId(1), ForceCount::new(10, 0));
        harkonnen.on_board.insert(LocationId(2), ForceCount::new(10, 0));
        let mut game = GameState::new(board(), vec![atreides, harkonnen]);
        game.storm_sector = 10;
        game.storm_forecast = Some(StormForecast {
            moves: 2,
            known_by: vec![Faction::Atreides],
        });
        let params = BotParameters::default();

        let planner = MovementPlanner::new(&game, Faction::Atreides, &params, None).unwrap();
        let (decision, moved) = planner.decide().unwrap();
        assert_eq!(decision, MovementDecision::StormEscape);
        assert_eq!(moved.to, LocationId(4));
    }

    #[test]
    fn test_landed_forces_stay_put() {
        let mut atreides = Player::new(Faction::Atreides, 10, ForceCount::new(5, 0));
        atreides.on_board.insert(LocationId(3), ForceCount::new(5, 0));
        let game = GameState::new(board(), vec![atreides]);
        let params = BotParameters::default();

        let shipped = Some((ShipmentDecision::RouteToSpice, LocationId(3)));
        let planner = MovementPlanner::new(&game, Faction::Atreides, &params, shipped).unwrap();
        assert!(planner.decide().is_none());
    }

    #[test]
    fn test_stronghold_surplus_moves_out() {
        let atreides = seated(Faction::Atreides, 10, &[(1, 10)]);
        let game = GameState::new(board(), vec![atreides]);

        let (decision, moved) = decide(&game, Faction::Atreides).unwrap();
        assert_eq!(decision, MovementDecision::VacantSafeStronghold);
        assert_eq!(moved.from, LocationId(1));
        assert_eq!(moved.to, LocationId(2));
        // two stay behind to cover the defend margin
        assert_eq!(moved.forces, ForceCount::new(8, 0));
    }

    #[test]
    fn test_threatened_garrison_keeps_enough() {
        let atreides = seated(Faction::Atreides, 10, &[(1, 10)]);
        let harkonnen = seated(Faction::Harkonnen, 10, &[(3, 4)]);
        let game = GameState::new(board(), vec![atreides, harkonnen]);

        let (_, moved) = decide(&game, Faction::Atreides).unwrap();
        assert_eq!(moved.from, LocationId(1));
        assert_eq!(moved.forces, ForceCount::new(4, 0));

        let atreides = seated(Faction::Atreides, 10, &[(1, 5)]);
        let harkonnen = seated(Faction::Harkonnen, 10, &[(3, 4)]);
        let game = GameState::new(board(), vec![atreides, harkonnen]);
        assert!(decide(&game, Faction::Atreides).is_none());
    }

    #[test]
    fn test_holds_threatened_vacant_stronghold() {
        let emperor = seated(Faction::Emperor, 10, &[(4, 6)]);
        let harkonnen = seated(Faction::Harkonnen, 10, &[(4, 3)]);
        let game = GameState::new(wide_board(), vec![emperor, harkonnen]);

        let (decision, moved) = decide(&game, Faction::Emperor).unwrap();
        assert_eq!(decision, MovementDecision::HoldableStronghold);
        assert_eq!(moved.to, LocationId(5));
        assert_eq!(moved.forces, ForceCount::new(6, 0));
    }

    #[test]
    fn test_contests_opponent_one_short_of_winning() {
        let emperor = seated(Faction::Emperor, 10, &[(6, 8)]);
        let harkonnen = seated(Faction::Harkonnen, 2, &[(2, 10), (7, 2)]);
        let game = GameState::new(wide_board(), vec![emperor, harkonnen]);

        let (decision, moved) = decide(&game, Faction::Emperor).unwrap();
        assert_eq!(decision, MovementDecision::OpponentNearWin);
        assert_eq!(moved.to, LocationId(7));
    }

    #[test]
    fn test_reinforces_weak_stronghold() {
        let emperor = seated(Faction::Emperor, 10, &[(4, 3), (5, 1)]);
        let harkonnen = seated(Faction::Harkonnen, 10, &[(4, 2)]);
        let game = GameState::new(wide_board(), vec![emperor, harkonnen]);

        let (decision, moved) = decide(&game, Faction::Emperor).unwrap();
        assert_eq!(decision, MovementDecision::ReinforceWeakHeld);
        assert_eq!(moved.from, LocationId(4));
        assert_eq!(moved.to, LocationId(5));
        assert_eq!(moved.forces, ForceCount::new(3, 0));
    }

    #[test]
    fn test_collects_uncontested_spice() {
        let emperor = seated(Faction::Emperor, 10, &[(4, 4)]);
        let harkonnen = seated(Faction::Harkonnen, 10, &[(5, 10)]);
        let mut game = GameState::new(wide_board(), vec![emperor, harkonnen]);
        game.spice_on_board.insert(LocationId(3), 2);
        game.spice_on_board.insert(LocationId(6), 6);

        let (decision, moved) = decide(&game, Faction::Emperor).unwrap();
        assert_eq!(decision, MovementDecision::SpiceWithoutCombat);
        assert_eq!(moved.to, LocationId(6));
    }

    #[test]
    fn test_vacant_stronghold_outranks_spice() {
        let emperor = seated(Faction::Emperor, 10, &[(4, 4)]);
        let mut game = GameState::new(wide_board(), vec![emperor]);
        game.spice_on_board.insert(LocationId(6), 6);

        let (decision, moved) = decide(&game, Faction::Emperor).unwrap();
        assert_eq!(decision, MovementDecision::VacantSafeStronghold);
        assert_eq!(moved.to, LocationId(5));
    }

    #[test]
    fn test_attacks_beatable_occupant() {
        let emperor = seated(Faction::Emperor, 10, &[(4, 8)]);
        let atreides = seated(Faction::Atreides, 10, &[(5, 10)]);
        let harkonnen = seated(Faction::Harkonnen, 0, &[(6, 2)]);
        let game = GameState::new(wide_board(), vec![emperor, atreides, harkonnen]);

        let (decision, moved) = decide(&game, Faction::Emperor).unwrap();
        assert_eq!(decision, MovementDecision::WinnableFight);
        assert_eq!(moved.to, LocationId(6));
    }

    #[test]
    fn test_last_resort_leaves_any_origin() {
        // Nothing better to do, and the sink is not exposed to the storm
        let emperor = seated(Faction::Emperor, 0, &[(4, 3)]);
        let atreides = seated(Faction::Atreides, 10, &[(5, 10)]);
        let game = GameState::new(wide_board(), vec![emperor, atreides]);

        let (decision, moved) = decide(&game, Faction::Emperor).unwrap();
        assert_eq!(decision, MovementDecision::LastResort);
        assert_eq!(moved.from, LocationId(4));
        assert_eq!(moved.to, LocationId(3));
    }

    #[test]
    fn test_last_resort_avoids_ally() {
        let mut emperor = seated(Faction::Emperor, 0, &[(4, 3)]);
        emperor.ally = Some(Faction::Atreides);
        let mut atreides = seated(Faction::Atreides, 10, &[(3, 1), (5, 10), (6, 1)]);
        atreides.ally = Some(Faction::Emperor);
        let game = GameState::new(wide_board(), vec![emperor, atreides]);

        assert!(decide(&game, Faction::Emperor).is_none());
    }
}
