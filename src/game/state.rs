//! Read-only game snapshot handed to the agent by the rules engine
//!
//! The snapshot carries the true state; the agent filters it through the
//! knowledge layer before reasoning about anything it should not see.
//! The helper methods here mirror the rules engine's query surface
//! (valid targets, costs, occupation) so heuristics never guess at rules.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::error::{BotError, Result};
use crate::core::types::{CardId, Faction, ForceCount, LeaderId, LocationId, Phase, Sector, Turn};
use crate::game::battle::BattleSituation;
use crate::game::cards::{CardKind, TreacheryCard};
use crate::game::leaders::{Hero, Leader};
use crate::game::map::Map;
use crate::game::permissions::Permission;
use crate::game::player::Player;

/// Rule variants that change the numbers the heuristics work with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Forces dialed in battle count half unless supported with spice
    pub advanced_combat: bool,
    pub strongholds_to_win: u8,
    pub strongholds_to_win_allied: u8,
    pub max_turns: Turn,
    pub ship_cost_stronghold: u32,
    pub ship_cost_elsewhere: u32,
    pub revival_cost_per_force: u32,
    pub leader_revival_cost_per_value: u32,
    pub max_revivals_per_turn: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            advanced_combat: true,
            strongholds_to_win: 3,
            strongholds_to_win_allied: 4,
            max_turns: 10,
            ship_cost_stronghold: 1,
            ship_cost_elsewhere: 2,
            revival_cost_per_force: 2,
            leader_revival_cost_per_value: 1,
            max_revivals_per_turn: 3,
        }
    }
}

/// The card currently up for auction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auction {
    pub card_number: u32,
    pub cards_in_round: u32,
    #[serde(default)]
    pub highest_bid: u32,
    #[serde(default)]
    pub highest_bidder: Option<Faction>,
    /// The card itself, present only when the asking faction may see it
    #[serde(default)]
    pub visible_card: Option<TreacheryCard>,
}

/// Upcoming storm movement and who has seen it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StormForecast {
    pub moves: u8,
    pub known_by: Vec<Faction>,
}

/// An open alliance proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllianceOffer {
    pub from: Faction,
    pub to: Faction,
}

/// What a side deal trades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealKind {
    /// Buyer will not bid against the seller this round
    NoBidding,
    /// Buyer will not ship into the seller's strongholds this turn
    NoShipment,
    /// Buyer will not attack the seller this turn
    NoAttack,
    /// Seller shares knowledge of one card
    TellCard,
}

/// A side deal on the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub id: u32,
    pub from: Faction,
    /// `None` means the deal is open to anyone
    #[serde(default)]
    pub to: Option<Faction>,
    pub kind: DealKind,
    /// Spice the proposer pays (positive) for the commitment
    pub price: u32,
    /// The deal asks the recipient to pay instead of being paid
    #[serde(default)]
    pub recipient_pays: bool,
    /// Phase in which the deal was offered
    pub phase: Phase,
}

/// Faction-specific decisions the engine is waiting on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingDecisions {
    /// Harkonnen won a battle and may capture or kill one of these leaders
    pub capturable_leaders: Vec<Leader>,
    /// Traitor cards offered at setup
    pub offered_traitors: Vec<LeaderId>,
    /// Ixian choice of which card goes up for auction
    pub ixian_candidates: Vec<TreacheryCard>,
    /// A worm surfaced at this location
    pub worm_at: Option<LocationId>,
    /// Black-market card Richese may sell
    pub black_market_candidates: Vec<TreacheryCard>,
    /// Factions that have already shipped or moved this turn
    pub moved_this_turn: Vec<Faction>,
    /// Bene Gesserit advisors that may flip to fighters here
    pub advisors_at: Vec<LocationId>,
}

/// Full game snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub turn: Turn,
    pub phase: Phase,
    pub storm_sector: Sector,
    #[serde(default)]
    pub storm_forecast: Option<StormForecast>,
    pub map: Map,
    pub players: Vec<Player>,
    #[serde(default)]
    pub spice_on_board: BTreeMap<LocationId, u32>,
    #[serde(default)]
    pub rules: RuleSet,
    #[serde(default)]
    pub battle: Option<BattleSituation>,
    #[serde(default)]
    pub auction: Option<Auction>,
    /// Every treachery card in the game
    #[serde(default)]
    pub card_catalogue: Vec<TreacheryCard>,
    #[serde(default)]
    pub discard_pile: Vec<CardId>,
    /// Cards each faction has seen in another faction's hand
    #[serde(default)]
    pub card_knowledge: BTreeMap<Faction, BTreeSet<CardId>>,
    /// Traitors publicly known to be held by a faction
    #[serde(default)]
    pub revealed_traitors: BTreeMap<Faction, BTreeSet<LeaderId>>,
    /// Leaders publicly known not to be anyone's traitor
    #[serde(default)]
    pub public_non_traitors: BTreeSet<LeaderId>,
    /// Traitor holdings told privately: observer -> (holder, leader)
    #[serde(default)]
    pub told_traitors: BTreeMap<Faction, Vec<(Faction, LeaderId)>>,
    #[serde(default)]
    pub alliance_offers: Vec<AllianceOffer>,
    #[serde(default)]
    pub deals: Vec<Deal>,
    #[serde(default)]
    pub pending: PendingDecisions,
}

impl GameState {
    pub fn new(map: Map, players: Vec<Player>) -> Self {
        Self {
            turn: 1,
            phase: Phase::Setup,
            storm_sector: 0,
            storm_forecast: None,
            map,
            players,
            spice_on_board: BTreeMap::new(),
            rules: RuleSet::default(),
            battle: None,
            auction: None,
            card_catalogue: Vec::new(),
            discard_pile: Vec::new(),
            card_knowledge: BTreeMap::new(),
            revealed_traitors: BTreeMap::new(),
            public_non_traitors: BTreeSet::new(),
            told_traitors: BTreeMap::new(),
            alliance_offers: Vec::new(),
            deals: Vec::new(),
            pending: PendingDecisions::default(),
        }
    }

    /// Parse a snapshot sent by the host as JSON
    ///
    /// Fails when the battle in progress names a faction that is not seated.
    pub fn from_json(json: &str) -> Result<Self> {
        let game: GameState = serde_json::from_str(json)?;
        if let Some(battle) = &game.battle {
            for faction in [battle.aggressor, battle.defender] {
                if game.player(faction).is_none() {
                    return Err(BotError::UnknownFaction(faction));
                }
            }
        }
        Ok(game)
    }

    // === PLAYERS ===

    pub fn player(&self, faction: Faction) -> Option<&Player> {
        self.players.iter().find(|p| p.faction == faction)
    }

    pub fn ally_of(&self, faction: Faction) -> Option<Faction> {
        self.player(faction).and_then(|p| p.ally)
    }

    /// Every seated faction other than `faction` and its ally
    pub fn opponents_of(&self, faction: Faction) -> impl Iterator<Item = &Player> {
        let ally = self.ally_of(faction);
        self.players
            .iter()
            .filter(move |p| p.faction != faction && Some(p.faction) != ally)
    }

    pub fn is_ally(&self, a: Faction, b: Faction) -> bool {
        self.ally_of(a) == Some(b)
    }

    /// Find the living leader with this id, whoever owns it
    pub fn leader(&self, id: LeaderId) -> Option<&Leader> {
        self.players.iter().find_map(|p| p.leader(id))
    }

    pub fn is_last_turn(&self) -> bool {
        self.turn >= self.rules.max_turns
    }

    // === OCCUPATION ===

    /// Factions with forces in a location, in seating order
    pub fn occupants(&self, location: LocationId) -> Vec<(Faction, ForceCount)> {
        self.players
            .iter()
            .filter_map(|p| {
                let forces = p.forces_in(location);
                (!forces.is_empty()).then_some((p.faction, forces))
            })
            .collect()
    }

    /// Occupants other than `faction` and its ally
    pub fn hostile_occupants(&self, faction: Faction, location: LocationId) -> Vec<(Faction, ForceCount)> {
        let ally = self.ally_of(faction);
        self.occupants(location)
            .into_iter()
            .filter(|(f, _)| *f != faction && Some(*f) != ally)
            .collect()
    }

    /// Sole occupant of a stronghold, if exactly one faction is present
    pub fn controller(&self, location: LocationId) -> Option<Faction> {
        let occupants = self.occupants(location);
        match occupants.as_slice() {
            [(faction, _)] => Some(*faction),
            _ => None,
        }
    }

    pub fn strongholds_held_by(&self, faction: Faction) -> Vec<LocationId> {
        self.map
            .strongholds()
            .filter(|s| self.controller(s.id) == Some(faction))
            .map(|s| s.id)
            .collect()
    }

    /// Strongholds held by a faction and its ally together
    pub fn strongholds_held_with_ally(&self, faction: Faction) -> usize {
        let mut count = self.strongholds_held_by(faction).len();
        if let Some(ally) = self.ally_of(faction) {
            count += self.strongholds_held_by(ally).len();
        }
        count
    }

    pub fn win_threshold(&self, faction: Faction) -> usize {
        if self.ally_of(faction).is_some() {
            self.rules.strongholds_to_win_allied as usize
        } else {
            self.rules.strongholds_to_win as usize
        }
    }

    pub fn is_vacant(&self, location: LocationId) -> bool {
        self.occupants(location).is_empty()
    }

    // === BATTLE RULES ===

    /// Battle strength of one elite force
    pub fn elite_strength(&self, faction: Faction, opponent: Faction) -> f32 {
        match faction {
            Faction::Emperor if opponent == Faction::Fremen => 1.0,
            Faction::Emperor | Faction::Fremen | Faction::Ixian => 2.0,
            _ => 1.0,
        }
    }

    pub fn must_pay_for_forces(&self, faction: Faction) -> bool {
        self.rules.advanced_combat && faction != Faction::Fremen
    }

    /// Leaders and cheap heroes that may be fielded in a battle plan
    pub fn valid_battle_heroes(&self, faction: Faction) -> Vec<Hero> {
        let Some(player) = self.player(faction) else {
            return Vec::new();
        };
        let mut heroes: Vec<Hero> = player.leaders.iter().map(|l| Hero::Leader(l.id)).collect();
        heroes.extend(
            player
                .cards
                .iter()
                .filter(|c| c.kind == CardKind::CheapHero)
                .map(|c| Hero::CheapHero(c.id)),
        );
        heroes
    }

    pub fn hero_value(&self, hero: Hero) -> f32 {
        match hero {
            Hero::Leader(id) => self.leader(id).map(|l| l.battle_value()).unwrap_or(0.0),
            Hero::CheapHero(_) => 0.0,
        }
    }

    // === SHIPMENT RULES ===

    /// Spice cost to ship `amount` forces from reserves to `location`
    pub fn shipment_cost(&self, faction: Faction, location: LocationId, amount: u32) -> u32 {
        if faction == Faction::Fremen {
            return 0;
        }
        let per_force = match self.map.get(location) {
            Some(l) if l.is_stronghold() => self.rules.ship_cost_stronghold,
            _ => self.rules.ship_cost_elsewhere,
        };
        let full = per_force * amount;
        let half_rate = faction == Faction::Guild
            || self
                .player(faction)
                .map(|p| p.permissions_from_ally.contains(Permission::ShipAtGuildRate))
                .unwrap_or(false);
        if half_rate {
            full.div_ceil(2)
        } else {
            full
        }
    }

    /// Locations a faction may ship into right now
    pub fn valid_shipment_locations(&self, faction: Faction) -> Vec<LocationId> {
        let fremen_home = (faction == Faction::Fremen)
            .then(|| self.map.home_of(Faction::Fremen))
            .flatten();
        self.map
            .locations()
            .filter(|l| !self.map.in_storm(l.id, self.storm_sector))
            .filter(|l| !self.stronghold_is_full(faction, l.id))
            .filter(|l| match fremen_home {
                Some(home) => self.map.distance(home, l.id).map(|d| d <= 2).unwrap_or(false),
                None => true,
            })
            .map(|l| l.id)
            .collect()
    }

    /// Strongholds admit at most two factions at a time
    pub fn stronghold_is_full(&self, faction: Faction, location: LocationId) -> bool {
        let Some(loc) = self.map.get(location) else {
            return true;
        };
        if !loc.is_stronghold() {
            return false;
        }
        let others = self
            .occupants(location)
            .iter()
            .filter(|(f, _)| *f != faction)
            .count();
        others >= 2
    }

    // === MOVEMENT RULES ===

    /// Movement range: ornithopters at the Atreides or Harkonnen home
    /// stronghold grant three; Fremen move two; everyone else one.
    pub fn movement_range(&self, faction: Faction) -> u8 {
        let Some(player) = self.player(faction) else {
            return 0;
        };
        let has_ornithopters = player.on_board.keys().any(|loc| {
            self.map
                .get(*loc)
                .map(|l| matches!(l.home_of, Some(Faction::Atreides) | Some(Faction::Harkonnen)) && l.is_stronghold())
                .unwrap_or(false)
        });
        if has_ornithopters {
            3
        } else if faction == Faction::Fremen {
            2
        } else {
            1
        }
    }

    /// Destinations reachable from `from` this movement
    pub fn reachable_locations(&self, faction: Faction, from: LocationId) -> BTreeSet<LocationId> {
        let range = self.movement_range(faction);
        self.map.reachable(from, range, self.storm_sector, |loc| {
            self.stronghold_is_full(faction, loc)
        })
    }

    // === REVIVAL ===

    pub fn revival_cost(&self, faction: Faction, forces: u32) -> u32 {
        let Some(player) = self.player(faction) else {
            return 0;
        };
        let paid = forces.saturating_sub(player.free_revivals);
        paid * self.rules.revival_cost_per_force
    }

    // === STORM ===

    /// Storm movement known to `faction`, if any
    pub fn known_storm_moves(&self, faction: Faction) -> Option<u8> {
        self.storm_forecast
            .as_ref()
            .filter(|f| f.known_by.contains(&faction))
            .map(|f| f.moves)
    }

    pub fn spice_at(&self, location: LocationId) -> u32 {
        self.spice_on_board.get(&location).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::map::{Location, LocationKind};

    fn small_game() -> GameState {
        let mut map = Map::new();
        map.add(Location::new(1, "Arrakeen", 9, LocationKind::Stronghold).home_of(Faction::Atreides));
        map.add(Location::new(2, "Basin", 8, LocationKind::Sand));
        map.add(Location::new(3, "Carthag", 10, LocationKind::Stronghold).home_of(Faction::Harkonnen));
        map.connect(LocationId(1), LocationId(2));
        map.connect(LocationId(2), LocationId(3));

        let mut atreides = Player::new(Faction::Atreides, 10, ForceCount::new(10, 0));
        atreides.on_board.insert(LocationId(1), ForceCount::new(5, 0));
        let mut harkonnen = Player::new(Faction::Harkonnen, 10, ForceCount::new(10, 0));
        harkonnen.on_board.insert(LocationId(3), ForceCount::new(5, 0));
        let guild = Player::new(Faction::Guild, 5, ForceCount::new(15, 0));

        GameState::new(map, vec![atreides, harkonnen, guild])
    }

    #[test]
    fn test_from_json_checks_battle_factions() {
        let mut game = small_game();
        let json = serde_json::to_string(&game).unwrap();
        assert_eq!(GameState::from_json(&json).unwrap(), game);

        game.battle = Some(BattleSituation {
            id: 1,
            aggressor: Faction::Atreides,
            defender: Faction::Emperor,
            location: LocationId(1),
            aggressor_committed: false,
            defender_committed: false,
            pending_reveals: vec![],
            voice: None,
            prescience: None,
            clairvoyance: None,
            revealed_leaders: vec![],
        });
        let json = serde_json::to_string(&game).unwrap();
        assert!(matches!(
            GameState::from_json(&json),
            Err(BotError::UnknownFaction(Faction::Emperor))
        ));
        assert!(matches!(GameState::from_json("{"), Err(BotError::SerdeError(_))));
    }

    #[test]
    fn test_controller_and_strongholds_held() {
        let game = small_game();
        assert_eq!(game.controller(LocationId(1)), Some(Faction::Atreides));
        assert_eq!(game.strongholds_held_by(Faction::Harkonnen), vec![LocationId(3)]);
    }

    #[test]
    fn test_guild_ships_at_half_rate() {
        let game = small_game();
        assert_eq!(game.shipment_cost(Faction::Guild, LocationId(2), 3), 3);
        assert_eq!(game.shipment_cost(Faction::Atreides, LocationId(2), 3), 6);
        assert_eq!(game.shipment_cost(Faction::Atreides, LocationId(1), 3), 3);
    }

    #[test]
    fn test_ornithopters_extend_range() {
        let game = small_game();
        assert_eq!(game.movement_range(Faction::Atreides), 3);
        assert_eq!(game.movement_range(Faction::Guild), 1);
    }

    #[test]
    fn test_stronghold_full_with_two_others() {
        let mut game = small_game();
        game.players[2].on_board.insert(LocationId(1), ForceCount::new(2, 0));
        assert!(!game.stronghold_is_full(Faction::Guild, LocationId(1)));
        assert!(game.stronghold_is_full(Faction::Harkonnen, LocationId(1)));
        assert!(!game.stronghold_is_full(Faction::Harkonnen, LocationId(2)));
    }

    #[test]
    fn test_revival_cost_counts_free_revivals() {
        let game = small_game();
        assert_eq!(game.revival_cost(Faction::Atreides, 3), 4);
    }

    #[test]
    fn test_emperor_elite_weak_against_fremen() {
        let game = small_game();
        assert_eq!(game.elite_strength(Faction::Emperor, Faction::Fremen), 1.0);
        assert_eq!(game.elite_strength(Faction::Emperor, Faction::Atreides), 2.0);
    }
}
