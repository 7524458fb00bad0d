//! Bot parameters with documented thresholds
//!
//! Every heuristic threshold used by the decision engine is collected here.
//! One `BotParameters` instance is created per agent at construction and is
//! never mutated during a decision. Values can be overridden from TOML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{BotError, Result};
use crate::core::types::Faction;

/// Named numeric thresholds that steer one faction's heuristics
///
/// The defaults were tuned by play and have no closed-form derivation.
/// Tests treat them as tunables, not invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotParameters {
    // === BATTLE ===
    /// Minimum survival probability at which the planner assumes its own
    /// hero lives and counts the hero's value toward the dial
    pub battle_assume_hero_survives_above: f32,

    /// Minimum death probability at which the planner assumes the opponent
    /// hero dies and stops counting its value
    pub battle_assume_opponent_hero_dies_above: f32,

    /// Largest dial shortage tolerated before the fight is abandoned and the
    /// planner switches to minimizing losses
    pub battle_max_dial_shortage: f32,

    /// Extra strength added to the opponent's maximum dial to cover
    /// reinforcement and bonus risk
    pub battle_reinforcement_margin: f32,

    /// Maximum forces dialed without spice support in a battle
    pub battle_max_unsupported_forces: u32,

    /// Minimum own forces present before a disengage effect is used
    pub battle_min_forces_for_retreat: u32,

    /// Spice below which the budget is considered too small for a fight,
    /// relative to the number of forces in the territory (spice per force)
    pub battle_min_spice_per_force: f32,

    // === SHIPMENT ===
    /// Largest share of current spice spent on a routine shipment
    pub shipment_max_spice_fraction: f32,

    /// Spice always kept back after a routine shipment
    pub shipment_spice_reserve: u32,

    /// Strength margin kept above an expected contester when occupying
    pub shipment_defend_margin: f32,

    /// Maximum forces shipped without spice support in an attack
    pub shipment_max_unsupported_forces: u32,

    /// An opponent home base counts as "empty" at or below this dial
    pub shipment_home_base_weak_dial: f32,

    /// Largest opponent dial considered an opportunistic weak target
    pub shipment_weak_target_max_dial: f32,

    /// Minimum spice on a tile for it to be worth routing toward
    pub shipment_min_spice_to_route: u32,

    /// Chance of making a bait shipment when a traitor target exists
    pub shipment_dummy_attack_chance: f32,

    /// Reserves kept back rather than parked at the safe hub
    pub shipment_keep_in_reserve: u32,

    // === MOVEMENT ===
    /// Sectors the storm is assumed to move when its next move is unknown
    pub movement_storm_uncertainty_fallback: u8,

    /// Confidence (own dial / threat) needed to hold a location
    pub movement_hold_confidence: f32,

    /// Minimum spice on a tile for a movement to chase it
    pub movement_min_spice_to_collect: u32,

    /// Strength advantage required to start a fight by moving in
    pub movement_win_margin: f32,

    // === NEGOTIATION ===
    /// Unallied: accept an alliance with a faction whose standing is at
    /// least this fraction of our own
    pub alliance_accept_ratio: f32,

    /// Allied: a rival must exceed the current ally's standing by this
    /// ratio before we consider switching
    pub alliance_switch_ratio: f32,

    /// Allied: break when the current ally falls below this fraction of
    /// our own standing
    pub alliance_break_ratio: f32,

    /// Weight of each treachery card in standing
    pub standing_weight_cards: f32,
    /// Weight of each spice in standing
    pub standing_weight_spice: f32,
    /// Weight of each controlled stronghold in standing
    pub standing_weight_strongholds: f32,
    /// Weight of each force on the board in standing
    pub standing_weight_forces_on_board: f32,
    /// Weight of each force in reserve in standing
    pub standing_weight_forces_in_reserve: f32,
    /// Weight of each living leader in standing
    pub standing_weight_leaders: f32,

    /// Deal price ceilings as fractions of the spice surplus, per phase
    pub deal_ceiling_bidding: f32,
    pub deal_ceiling_shipment: f32,
    pub deal_ceiling_battle: f32,

    /// Spice that is never counted as surplus
    pub deal_min_spice_kept: u32,

    // === BIDDING & REVIVAL ===
    /// Largest share of spice bid on a single card
    pub bid_spice_fraction: f32,

    /// Minimum card quality worth bidding on
    pub bid_min_quality: u8,

    /// Chance of bidding one more than the ceiling on a good card
    pub bid_bluff_chance: f32,

    /// Largest share of spice spent on paid revival
    pub revival_max_spice_fraction: f32,

    /// Reserves below which paid revival is considered
    pub revival_reserve_threshold: u32,

    // === FACTION SPECIFIC ===
    /// Harkonnen: captured leaders at or below this value are killed for spice
    pub harkonnen_kill_leader_max_value: u8,

    /// Emperor: share of spice offered to the ally for battles
    pub emperor_ally_support_fraction: f32,

    /// Tleilaxu: revival price quoted per force
    pub tleilaxu_revival_price: u32,

    /// Richese: dial shown on the no-field token when shipping
    pub richese_no_field_value: u8,

    /// CHOAM: cards at or below this quality are discarded for spice
    pub choam_discard_max_quality: u8,

    /// Guild: keep deferring the shipment until this many others moved
    pub guild_defer_until_moved: u32,

    /// Fremen: minimum forces on the tile before riding a worm
    pub fremen_min_forces_to_ride: u32,
}

impl Default for BotParameters {
    fn default() -> Self {
        Self {
            // Battle
            battle_assume_hero_survives_above: 0.7,
            battle_assume_opponent_hero_dies_above: 0.8,
            battle_max_dial_shortage: 1.0,
            battle_reinforcement_margin: 0.5,
            battle_max_unsupported_forces: 2,
            battle_min_forces_for_retreat: 4,
            battle_min_spice_per_force: 0.25,

            // Shipment
            shipment_max_spice_fraction: 0.7,
            shipment_spice_reserve: 2,
            shipment_defend_margin: 2.0,
            shipment_max_unsupported_forces: 1,
            shipment_home_base_weak_dial: 2.0,
            shipment_weak_target_max_dial: 3.0,
            shipment_min_spice_to_route: 6,
            shipment_dummy_attack_chance: 0.35,
            shipment_keep_in_reserve: 3,

            // Movement
            movement_storm_uncertainty_fallback: 3,
            movement_hold_confidence: 1.2,
            movement_min_spice_to_collect: 4,
            movement_win_margin: 1.0,

            // Negotiation (standing weights roughly normalize each term)
            alliance_accept_ratio: 0.6,
            alliance_switch_ratio: 1.5,
            alliance_break_ratio: 0.4,
            standing_weight_cards: 2.0,
            standing_weight_spice: 0.5,
            standing_weight_strongholds: 8.0,
            standing_weight_forces_on_board: 0.6,
            standing_weight_forces_in_reserve: 0.3,
            standing_weight_leaders: 1.0,
            deal_ceiling_bidding: 0.3,
            deal_ceiling_shipment: 0.2,
            deal_ceiling_battle: 0.5,
            deal_min_spice_kept: 4,

            // Bidding & revival
            bid_spice_fraction: 0.5,
            bid_min_quality: 3,
            bid_bluff_chance: 0.1,
            revival_max_spice_fraction: 0.3,
            revival_reserve_threshold: 6,

            // Faction specific
            harkonnen_kill_leader_max_value: 2,
            emperor_ally_support_fraction: 0.3,
            tleilaxu_revival_price: 2,
            richese_no_field_value: 3,
            choam_discard_max_quality: 1,
            guild_defer_until_moved: 2,
            fremen_min_forces_to_ride: 3,
        }
    }
}

impl BotParameters {
    /// Defaults adjusted for the play style of one faction
    pub fn for_faction(faction: Faction) -> Self {
        let mut params = Self::default();
        match faction {
            Faction::Fremen => {
                // Fremen pay nothing for their dial and fight on home turf
                params.battle_max_dial_shortage = 2.0;
                params.movement_win_margin = 0.5;
            }
            Faction::Emperor | Faction::Choam => {
                // Rich factions spend more freely
                params.shipment_max_spice_fraction = 0.8;
                params.bid_spice_fraction = 0.6;
            }
            Faction::Guild => {
                // Guild profits from a long game and fights reluctantly
                params.battle_max_dial_shortage = 0.5;
                params.alliance_accept_ratio = 0.8;
            }
            Faction::Harkonnen => {
                params.battle_reinforcement_margin = 0.0;
                params.bid_min_quality = 2;
            }
            Faction::BeneGesserit => {
                params.shipment_keep_in_reserve = 6;
            }
            Faction::Atreides
            | Faction::Ixian
            | Faction::Tleilaxu
            | Faction::Richese => {}
        }
        params
    }

    /// Parse parameters from TOML; missing fields fall back to defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let params: BotParameters = toml::from_str(contents)?;
        params.validate()?;
        Ok(params)
    }

    /// Validate parameters for internal consistency
    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("battle_assume_hero_survives_above", self.battle_assume_hero_survives_above),
            (
                "battle_assume_opponent_hero_dies_above",
                self.battle_assume_opponent_hero_dies_above,
            ),
            ("shipment_max_spice_fraction", self.shipment_max_spice_fraction),
            ("shipment_dummy_attack_chance", self.shipment_dummy_attack_chance),
            ("bid_spice_fraction", self.bid_spice_fraction),
            ("bid_bluff_chance", self.bid_bluff_chance),
            ("revival_max_spice_fraction", self.revival_max_spice_fraction),
            ("emperor_ally_support_fraction", self.emperor_ally_support_fraction),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(BotError::InvalidParameters(format!(
                    "{} ({}) must lie within 0..=1",
                    name, value
                )));
            }
        }

        if self.alliance_switch_ratio <= 1.0 {
            return Err(BotError::InvalidParameters(format!(
                "alliance_switch_ratio ({}) must exceed 1",
                self.alliance_switch_ratio
            )));
        }

        if self.alliance_break_ratio >= self.alliance_accept_ratio {
            return Err(BotError::InvalidParameters(format!(
                "alliance_break_ratio ({}) should be < alliance_accept_ratio ({})",
                self.alliance_break_ratio, self.alliance_accept_ratio
            )));
        }

        if self.battle_max_dial_shortage < 0.0 || self.battle_reinforcement_margin < 0.0 {
            return Err(BotError::InvalidParameters(
                "battle margins must not be negative".into(),
            ));
        }

        if self.bid_min_quality > 5 || self.choam_discard_max_quality > 5 {
            return Err(BotError::InvalidParameters(
                "card quality thresholds lie within 0..=5".into(),
            ));
        }

        Ok(())
    }
}

/// Load parameters from a TOML file
pub fn load_parameters(path: &Path) -> Result<BotParameters> {
    let contents = fs::read_to_string(path)?;
    BotParameters::from_toml_str(&contents)
}
