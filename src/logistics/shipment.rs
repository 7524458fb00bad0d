//! Shipment planner: where to land forces from reserves this turn
//!
//! Rules are tried in order and the first viable proposal wins:
//! prevent an opponent win, prevent an alternate win, take a vacant
//! stronghold, hit the leader's empty home, reinforce our weakest
//! stronghold, land on spice, attack a weak target, bait a traitor with a
//! dummy attack, park the remainder at the polar sink.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::core::config::BotParameters;
use crate::core::error::GeneratorFault;
use crate::core::types::{Faction, ForceCount, LocationId};
use crate::diplomacy::standing::leading_opponent;
use crate::game::actions::Action;
use crate::game::state::GameState;
use crate::logistics::allocation::allocate_forces;
use crate::logistics::battalion::Attack;
use crate::logistics::{expected_storm_moves, hostile_threat, is_storm_safe, strongest_hostile};
use crate::valuation::dial::{cost_per_force, max_dial, ForcePool};

/// Which rule produced a shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentDecision {
    PreventOpponentWin,
    PreventAlternateWin,
    TakeVacantStronghold,
    AttackEmptyHomeBase,
    ReinforceWeakest,
    RouteToSpice,
    WeakTargetAttack,
    DummyAttack,
    ParkAtHub,
}

/// A chosen shipment and the rule behind it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipmentPlan {
    pub decision: ShipmentDecision,
    pub attack: Attack,
}

impl ShipmentPlan {
    pub fn to_action(&self) -> Action {
        Action::Ship {
            to: self.attack.location,
            forces: self.attack.forces,
            from: None,
            spice: self.attack.spice,
        }
    }
}

pub struct ShipmentPlanner<'a> {
    game: &'a GameState,
    faction: Faction,
    params: &'a BotParameters,
    /// Spice the routine rules may spend
    budget: u32,
    /// Spice the urgent rules may spend
    full_budget: u32,
    reserves: ForceCount,
    targets: BTreeSet<LocationId>,
    storm_moves: u8,
}

impl<'a> ShipmentPlanner<'a> {
    pub fn new(game: &'a GameState, faction: Faction, params: &'a BotParameters) -> Result<Self, GeneratorFault> {
        let player = game
            .player(faction)
            .ok_or(GeneratorFault::MissingPlayer(faction))?;

        let full_budget = player.shipment_budget();
        let capped = (full_budget as f32 * params.shipment_max_spice_fraction).floor() as u32;
        let budget = capped.min(full_budget.saturating_sub(params.shipment_spice_reserve));

        Ok(Self {
            game,
            faction,
            params,
            budget,
            full_budget,
            reserves: player.reserves,
            targets: game.valid_shipment_locations(faction).into_iter().collect(),
            storm_moves: expected_storm_moves(game, faction, params),
        })
    }

    /// Run the cascade; `None` means no shipment this turn
    pub fn decide<R: Rng>(&self, rng: &mut R) -> Option<ShipmentPlan> {
        if self.reserves.is_empty() {
            return None;
        }

        let plan = self
            .prevent_opponent_win()
            .map(|a| (ShipmentDecision::PreventOpponentWin, a))
            .or_else(|| self.prevent_alternate_win().map(|a| (ShipmentDecision::PreventAlternateWin, a)))
            .or_else(|| self.take_vacant_stronghold().map(|a| (ShipmentDecision::TakeVacantStronghold, a)))
            .or_else(|| self.attack_empty_home_base().map(|a| (ShipmentDecision::AttackEmptyHomeBase, a)))
            .or_else(|| self.reinforce_weakest().map(|a| (ShipmentDecision::ReinforceWeakest, a)))
            .or_else(|| self.route_to_spice().map(|a| (ShipmentDecision::RouteToSpice, a)))
            .or_else(|| self.weak_target_attack().map(|a| (ShipmentDecision::WeakTargetAttack, a)))
            .or_else(|| self.dummy_attack(rng).map(|a| (ShipmentDecision::DummyAttack, a)))
            .or_else(|| self.park_at_hub().map(|a| (ShipmentDecision::ParkAtHub, a)));

        let (decision, attack) = plan?;
        debug!(
            faction = %self.faction,
            ?decision,
            location = attack.location.0,
            forces = attack.forces.total(),
            spice = attack.spice,
            "Shipment planned"
        );
        Some(ShipmentPlan { decision, attack })
    }

    /// Reserves the routine rules may use
    fn usable_reserves(&self) -> ForceCount {
        let keep = self.params.shipment_keep_in_reserve;
        let kept_from_elite = keep.saturating_sub(self.reserves.regular);
        ForceCount::new(
            self.reserves.regular.saturating_sub(keep),
            self.reserves.elite.saturating_sub(kept_from_elite),
        )
    }

    /// Size a shipment into `location` that reaches the strongest local
    /// dial plus `margin`, paying shipping and battle spice from `budget`
    pub fn plan_attack(&self, location: LocationId, margin: f32, reserves: ForceCount, budget: u32) -> Attack {
        let game = self.game;
        let hostile = strongest_hostile(game, self.faction, location);
        let opponent = hostile.map(|(f, _)| f);
        let target = hostile.map(|(_, dial)| dial).unwrap_or(0.0) + margin;

        let present = game
            .player(self.faction)
            .map(|p| p.forces_in(location))
            .unwrap_or_default();
        let elite_strength = game.elite_strength(self.faction, opponent.unwrap_or(self.faction));
        let battle_cost = if opponent.is_some() {
            cost_per_force(game, self.faction)
        } else {
            0
        };
        let present_dial = max_dial(&ForcePool::new(present, elite_strength, battle_cost), 0, true);

        let ship_unit = game.shipment_cost(self.faction, location, 1);
        let pool = ForcePool::new(reserves, elite_strength, ship_unit + battle_cost);
        let needed = (target - present_dial).max(if present.is_empty() { 1.0 } else { 0.0 });
        let alloc = allocate_forces(
            needed,
            &pool,
            budget,
            self.params.shipment_max_unsupported_forces,
            false,
        );

        let mut forces = alloc.committed();
        let mut spice = game.shipment_cost(self.faction, location, forces.total());
        while spice > budget && !forces.is_empty() {
            if forces.regular > 0 {
                forces.regular -= 1;
            } else {
                forces.elite -= 1;
            }
            spice = game.shipment_cost(self.faction, location, forces.total());
        }

        let fielded = ForcePool::new(forces + present, elite_strength, battle_cost);
        let shortfall = target - max_dial(&fielded, budget - spice, true);

        Attack {
            location,
            opponent,
            dial_needed: target,
            forces,
            spice,
            shortfall,
        }
    }

    fn is_target(&self, location: LocationId) -> bool {
        self.targets.contains(&location)
    }

    /// Lowest shortfall wins; the first one on ties
    fn best_of(&self, attacks: impl Iterator<Item = Attack>, max_shortfall: f32) -> Option<Attack> {
        let mut best: Option<Attack> = None;
        for attack in attacks.filter(|a| a.is_viable(max_shortfall)) {
            if best.map(|b| attack.shortfall < b.shortfall).unwrap_or(true) {
                best = Some(attack);
            }
        }
        best
    }

    // === CASCADE ===

    fn prevent_opponent_win(&self) -> Option<Attack> {
        let game = self.game;
        let mut attacks = Vec::new();
        for opponent in game.opponents_of(self.faction) {
            let held = game.strongholds_held_with_ally(opponent.faction);
            if held < game.win_threshold(opponent.faction) {
                continue;
            }
            for location in game.strongholds_held_by(opponent.faction) {
                if self.is_target(location) {
                    attacks.push(self.plan_attack(
                        location,
                        self.params.battle_reinforcement_margin,
                        self.reserves,
                        self.full_budget,
                    ));
                }
            }
        }
        self.best_of(attacks.into_iter(), self.params.battle_max_dial_shortage)
    }

    fn prevent_alternate_win(&self) -> Option<Attack> {
        let game = self.game;
        if !game.is_last_turn() || self.faction == Faction::Fremen {
            return None;
        }
        if game.player(Faction::Fremen).is_none() || game.is_ally(self.faction, Faction::Fremen) {
            return None;
        }
        let home = game.map.home_of(Faction::Fremen)?;
        if !self.is_target(home) || game.controller(home) == Some(self.faction) {
            return None;
        }
        let attack = self.plan_attack(home, self.params.battle_reinforcement_margin, self.reserves, self.full_budget);
        attack.is_viable(self.params.battle_max_dial_shortage).then_some(attack)
    }

    fn take_vacant_stronghold(&self) -> Option<Attack> {
        let game = self.game;
        let reserves = self.usable_reserves();
        let mut best: Option<Attack> = None;
        for location in game.map.strongholds().map(|s| s.id) {
            if !self.is_target(location) || !game.is_vacant(location) {
                continue;
            }
            if !is_storm_safe(game, location, self.storm_moves) {
                continue;
            }
            let attack = self.plan_attack(location, self.params.shipment_defend_margin, reserves, self.budget);
            if !attack.is_viable(0.0) {
                continue;
            }
            if best.map(|b| attack.spice < b.spice).unwrap_or(true) {
                best = Some(attack);
            }
        }
        best
    }

    fn attack_empty_home_base(&self) -> Option<Attack> {
        let game = self.game;
        let leader = leading_opponent(game, self.faction, self.params)?;
        let home = game.map.home_of(leader)?;
        if !self.is_target(home) {
            return None;
        }
        let defended = strongest_hostile(game, self.faction, home)
            .map(|(_, dial)| dial)
            .unwrap_or(0.0);
        if defended >= self.params.shipment_home_base_weak_dial {
            return None;
        }
        let attack = self.plan_attack(
            home,
            self.params.battle_reinforcement_margin,
            self.usable_reserves(),
            self.budget,
        );
        attack.is_viable(0.0).then_some(attack)
    }

    fn reinforce_weakest(&self) -> Option<Attack> {
        let game = self.game;
        let mut weakest: Option<(LocationId, f32)> = None;
        for location in game.strongholds_held_by(self.faction) {
            if !self.is_target(location) {
                continue;
            }
            let threat = hostile_threat(game, self.faction, location);
            let present = game
                .player(self.faction)
                .map(|p| p.forces_in(location))
                .unwrap_or_default();
            let own = max_dial(
                &ForcePool::for_battle(game, self.faction, self.faction, present),
                0,
                true,
            );
            let deficit = threat + self.params.shipment_defend_margin - own;
            if deficit > 0.0 && weakest.map(|(_, d)| deficit > d).unwrap_or(true) {
                weakest = Some((location, deficit));
            }
        }
        let (location, _) = weakest?;
        let threat = hostile_threat(game, self.faction, location);
        let attack = self.plan_attack(
            location,
            threat + self.params.shipment_defend_margin,
            self.usable_reserves(),
            self.budget,
        );
        attack
            .is_viable(self.params.battle_max_dial_shortage)
            .then_some(attack)
    }

    fn route_to_spice(&self) -> Option<Attack> {
        let game = self.game;
        let mut richest: Option<(LocationId, u32)> = None;
        for (location, amount) in &game.spice_on_board {
            if *amount < self.params.shipment_min_spice_to_route || !self.is_target(*location) {
                continue;
            }
            if !game.hostile_occupants(self.faction, *location).is_empty() {
                continue;
            }
            if !is_storm_safe(game, *location, self.storm_moves) {
                continue;
            }
            if richest.map(|(_, best)| *amount > best).unwrap_or(true) {
                richest = Some((*location, *amount));
            }
        }
        let (location, _) = richest?;
        let attack = self.plan_attack(
            location,
            self.params.shipment_defend_margin,
            self.usable_reserves(),
            self.budget,
        );
        attack.is_viable(0.0).then_some(attack)
    }

    fn weak_target_attack(&self) -> Option<Attack> {
        let game = self.game;
        let reserves = self.usable_reserves();
        let mut attacks = Vec::new();
        for location in game.map.strongholds().map(|s| s.id) {
            if !self.is_target(location) {
                continue;
            }
            let Some((_, dial)) = strongest_hostile(game, self.faction, location) else {
                continue;
            };
            if dial > self.params.shipment_weak_target_max_dial {
                continue;
            }
            attacks.push(self.plan_attack(location, self.params.battle_reinforcement_margin, reserves, self.budget));
        }
        self.best_of(attacks.into_iter(), 0.0)
    }

    /// Ship a token force next to a leader we hold as a traitor, hoping to
    /// draw it into battle
    fn dummy_attack<R: Rng>(&self, rng: &mut R) -> Option<Attack> {
        let game = self.game;
        let player = game.player(self.faction)?;
        if player.traitors.is_empty() {
            return None;
        }
        let mut candidate: Option<(LocationId, Faction)> = None;
        for location in game.map.strongholds().map(|s| s.id) {
            if !self.is_target(location) || player.occupies(location) {
                continue;
            }
            let baited = game.hostile_occupants(self.faction, location).into_iter().find(|(occupant, _)| {
                game.player(*occupant)
                    .map(|o| o.leaders.iter().any(|l| player.holds_traitor(l.id)))
                    .unwrap_or(false)
            });
            if let Some((occupant, _)) = baited {
                candidate = Some((location, occupant));
                break;
            }
        }
        let (location, opponent) = candidate?;
        if rng.gen::<f32>() >= self.params.shipment_dummy_attack_chance {
            return None;
        }

        let forces = if self.reserves.regular > 0 {
            ForceCount::new(1, 0)
        } else {
            ForceCount::new(0, 1)
        };
        let spice = game.shipment_cost(self.faction, location, 1);
        if spice > self.budget {
            return None;
        }
        Some(Attack {
            location,
            opponent: Some(opponent),
            dial_needed: 0.0,
            forces,
            spice,
            shortfall: 0.0,
        })
    }

    fn park_at_hub(&self) -> Option<Attack> {
        let game = self.game;
        let hub = game.map.polar_sink()?;
        let player = game.player(self.faction)?;
        if !self.is_target(hub) || player.occupies(hub) {
            return None;
        }
        let mut forces = self.usable_reserves();
        let mut spice = game.shipment_cost(self.faction, hub, forces.total());
        while spice > self.budget && !forces.is_empty() {
            if forces.regular > 0 {
                forces.regular -= 1;
            } else {
                forces.elite -= 1;
            }
            spice = game.shipment_cost(self.faction, hub, forces.total());
        }
        if forces.is_empty() {
            return None;
        }
        Some(Attack {
            location: hub,
            opponent: None,
            dial_needed: 0.0,
            forces,
            spice,
            shortfall: 0.0,
        })
    }
}
