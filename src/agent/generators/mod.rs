//! Common generators shared by every faction
//!
//! A generator looks at one decision point and proposes at most one action
//! of its kind. Returning `Ok(None)` abstains; returning an error abstains
//! with a cause the dispatcher logs.

mod bidding;
mod battle;
mod diplomacy;
mod housekeeping;
mod logistics;
mod revival;
mod storm;
mod traitors;

use crate::agent::context::DecisionContext;
use crate::core::error::GeneratorFault;
use crate::core::types::Tier;
use crate::game::actions::{Action, ActionKind};

pub use bidding::bid;
pub use battle::{battle_plan, retreat};
pub use diplomacy::{
    accept_alliance, accept_deal, ally_permissions, break_alliance, cancel_deal, offer_alliance, offer_deal,
};
pub use housekeeping::{charity, discard};
pub use logistics::{movement, shipment};
pub use revival::revive;
pub use storm::storm_dial;
pub use traitors::{call_traitor, pick_traitor};

/// Result of one generator call
pub type Proposal = Result<Option<Action>, GeneratorFault>;

/// A common generator
pub type Generator = fn(&mut DecisionContext<'_>) -> Proposal;

/// Common generators by tier, in the order they are tried
pub const COMMON: &[(Tier, ActionKind, &str, Generator)] = &[
    (Tier::Highest, ActionKind::TraitorCall, "call_traitor", call_traitor),
    (Tier::High, ActionKind::Retreat, "retreat", retreat),
    (Tier::High, ActionKind::BattlePlan, "battle_plan", battle_plan),
    (Tier::Middle, ActionKind::TraitorPick, "pick_traitor", pick_traitor),
    (Tier::Middle, ActionKind::StormDial, "storm_dial", storm_dial),
    (Tier::Middle, ActionKind::Charity, "charity", charity),
    (Tier::Middle, ActionKind::Bid, "bid", bid),
    (Tier::Middle, ActionKind::Revival, "revive", revive),
    (Tier::Middle, ActionKind::Shipment, "shipment", shipment),
    (Tier::Middle, ActionKind::Movement, "movement", movement),
    (Tier::Low, ActionKind::AllianceResponse, "accept_alliance", accept_alliance),
    (Tier::Low, ActionKind::AllianceBreak, "break_alliance", break_alliance),
    (Tier::Low, ActionKind::AllianceOffer, "offer_alliance", offer_alliance),
    (Tier::Low, ActionKind::AllyPermissions, "ally_permissions", ally_permissions),
    (Tier::Low, ActionKind::DealCancel, "cancel_deal", cancel_deal),
    (Tier::Low, ActionKind::DealResponse, "accept_deal", accept_deal),
    (Tier::Low, ActionKind::DealOffer, "offer_deal", offer_deal),
    (Tier::EndOfPhase, ActionKind::Discard, "discard", discard),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_common_names_unique() {
        let names: BTreeSet<_> = COMMON.iter().map(|(_, _, name, _)| *name).collect();
        assert_eq!(names.len(), COMMON.len());
    }

    #[test]
    fn test_traitor_call_is_highest() {
        assert!(COMMON
            .iter()
            .any(|(tier, kind, _, _)| *tier == Tier::Highest && *kind == ActionKind::TraitorCall));
    }
}
