//! Actions the agent may propose, and the rules-engine command surface

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::error::ValidationError;
use crate::core::types::{CardId, Faction, ForceCount, LeaderId, LocationId, Turn};
use crate::game::battle::{CardClass, PrescienceAspect};
use crate::game::cards::TreacheryCard;
use crate::game::leaders::Hero;
use crate::game::permissions::PermissionSet;
use crate::game::state::DealKind;

/// Type of an action, as listed in the host's legal set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    // Common
    Bid,
    Revival,
    Shipment,
    Movement,
    BattlePlan,
    Retreat,
    TraitorCall,
    StormDial,
    Charity,
    TraitorPick,
    Discard,
    // Negotiation
    AllianceOffer,
    AllianceResponse,
    AllianceBreak,
    DealOffer,
    DealResponse,
    DealCancel,
    AllyPermissions,
    // Faction mechanics
    Prescience,
    CaptureLeader,
    WormRide,
    FremenPlacement,
    AllySupport,
    GuildTiming,
    Voice,
    Prediction,
    AdvisorFlip,
    IxianCardChoice,
    FaceDancerReveal,
    RevivalPrice,
    ChoamDiscard,
    NoFieldShipment,
    BlackMarketSale,
}

/// Action types currently permitted by the host
pub type ActionSet = BTreeSet<ActionKind>;

/// One sealed battle plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattlePlanDraft {
    pub hero: Option<Hero>,
    pub weapon: Option<TreacheryCard>,
    pub defense: Option<TreacheryCard>,
    /// Field the messiah alongside the hero
    pub messiah: bool,
    /// The fielded hero is known to be the opponent's traitor
    pub is_traitor: bool,
    /// A lasgun/shield pairing was detected and the defense dropped
    pub lasgun_shield: bool,
    /// The weapon is a stone burner
    pub stone_burner: bool,
    /// Extra spice a banker hero adds to its value
    pub banker_boost: u32,
    /// Regular forces dialed and paid for
    pub forces: u32,
    /// Elite forces dialed and paid for
    pub elite_forces: u32,
    pub forces_at_half_strength: u32,
    pub elite_forces_at_half_strength: u32,
}

impl BattlePlanDraft {
    pub fn empty() -> Self {
        Self {
            hero: None,
            weapon: None,
            defense: None,
            messiah: false,
            is_traitor: false,
            lasgun_shield: false,
            stone_burner: false,
            banker_boost: 0,
            forces: 0,
            elite_forces: 0,
            forces_at_half_strength: 0,
            elite_forces_at_half_strength: 0,
        }
    }

    /// Every force dialed, supported or not
    pub fn dialed_forces(&self) -> ForceCount {
        ForceCount::new(
            self.forces + self.forces_at_half_strength,
            self.elite_forces + self.elite_forces_at_half_strength,
        )
    }

    /// Spice paid for supported forces plus the banker boost
    pub fn spice(&self, cost_per_force: u32) -> u32 {
        (self.forces + self.elite_forces) * cost_per_force + self.banker_boost
    }

    /// Dial strength the plan adds up to
    pub fn dial(&self, elite_strength: f32) -> f32 {
        self.forces as f32
            + self.elite_forces as f32 * elite_strength
            + 0.5 * (self.forces_at_half_strength as f32 + self.elite_forces_at_half_strength as f32 * elite_strength)
    }
}

/// A proposed action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Bid { amount: u32 },
    PassBid,
    Revive { forces: ForceCount, leader: Option<LeaderId>, spice: u32 },
    Ship {
        to: LocationId,
        forces: ForceCount,
        /// Source location for cross-board shipments, `None` from reserves
        from: Option<LocationId>,
        spice: u32,
    },
    Move { from: LocationId, to: LocationId, forces: ForceCount },
    BattlePlan(BattlePlanDraft),
    Retreat,
    CallTraitor,
    StormDial { value: u8 },
    ClaimCharity,
    PickTraitor { leader: LeaderId },
    Discard { card: CardId },

    OfferAlliance { to: Faction },
    AcceptAlliance { from: Faction },
    BreakAlliance,
    OfferDeal { to: Option<Faction>, kind: DealKind, price: u32 },
    AcceptDeal { id: u32 },
    CancelDeal { id: u32 },
    SetAllyPermissions { permissions: PermissionSet },

    Prescience { aspect: PrescienceAspect },
    CaptureDecision { leader: LeaderId, kill: bool },
    RideWorm { from: LocationId, to: LocationId },
    PlaceFremen { placements: Vec<(LocationId, ForceCount)> },
    SupportAlly { shipment: u32, battle: u32 },
    DeferShipment,
    Voice { class: CardClass, must: bool },
    Predict { winner: Faction, turn: Turn },
    FlipAdvisors { location: LocationId, to_fighters: bool },
    ChooseAuctionCard { card: CardId },
    RevealFaceDancer,
    SetRevivalPrice { price: u32 },
    ChoamDiscard { cards: Vec<CardId> },
    /// Richese shipment of a face-down force token with a hidden value
    NoFieldShip { to: LocationId, value: u8, spice: u32 },
    SellBlackMarket { card: CardId },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Bid { .. } | Action::PassBid => ActionKind::Bid,
            Action::Revive { .. } => ActionKind::Revival,
            Action::Ship { .. } => ActionKind::Shipment,
            Action::Move { .. } => ActionKind::Movement,
            Action::BattlePlan(_) => ActionKind::BattlePlan,
            Action::Retreat => ActionKind::Retreat,
            Action::CallTraitor => ActionKind::TraitorCall,
            Action::StormDial { .. } => ActionKind::StormDial,
            Action::ClaimCharity => ActionKind::Charity,
            Action::PickTraitor { .. } => ActionKind::TraitorPick,
            Action::Discard { .. } => ActionKind::Discard,
            Action::OfferAlliance { .. } => ActionKind::AllianceOffer,
            Action::AcceptAlliance { .. } => ActionKind::AllianceResponse,
            Action::BreakAlliance => ActionKind::AllianceBreak,
            Action::OfferDeal { .. } => ActionKind::DealOffer,
            Action::AcceptDeal { .. } => ActionKind::DealResponse,
            Action::CancelDeal { .. } => ActionKind::DealCancel,
            Action::SetAllyPermissions { .. } => ActionKind::AllyPermissions,
            Action::Prescience { .. } => ActionKind::Prescience,
            Action::CaptureDecision { .. } => ActionKind::CaptureLeader,
            Action::RideWorm { .. } => ActionKind::WormRide,
            Action::PlaceFremen { .. } => ActionKind::FremenPlacement,
            Action::SupportAlly { .. } => ActionKind::AllySupport,
            Action::DeferShipment => ActionKind::GuildTiming,
            Action::Voice { .. } => ActionKind::Voice,
            Action::Predict { .. } => ActionKind::Prediction,
            Action::FlipAdvisors { .. } => ActionKind::AdvisorFlip,
            Action::ChooseAuctionCard { .. } => ActionKind::IxianCardChoice,
            Action::RevealFaceDancer => ActionKind::FaceDancerReveal,
            Action::SetRevivalPrice { .. } => ActionKind::RevivalPrice,
            Action::ChoamDiscard { .. } => ActionKind::ChoamDiscard,
            Action::NoFieldShip { .. } => ActionKind::NoFieldShipment,
            Action::SellBlackMarket { .. } => ActionKind::BlackMarketSale,
        }
    }

    /// Spice the action commits up front, where the action itself names it
    pub fn spice(&self) -> u32 {
        match self {
            Action::Bid { amount } => *amount,
            Action::Revive { spice, .. } | Action::Ship { spice, .. } | Action::NoFieldShip { spice, .. } => *spice,
            Action::OfferDeal { price, .. } => *price,
            Action::SupportAlly { shipment, battle } => shipment + battle,
            _ => 0,
        }
    }
}

/// Command surface of the rules engine
///
/// The agent calls `execute` with `allow_side_effects = false` to check a
/// candidate before returning it; the host applies accepted actions itself.
pub trait ActionValidator {
    fn execute(
        &mut self,
        action: &Action,
        allow_side_effects: bool,
        is_privileged: bool,
    ) -> Result<(), ValidationError>;
}

/// Accepts everything; handy for hosts that validate later
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl ActionValidator for AcceptAll {
    fn execute(
        &mut self,
        _action: &Action,
        _allow_side_effects: bool,
        _is_privileged: bool,
    ) -> Result<(), ValidationError> {
        Ok(())
    }
}
