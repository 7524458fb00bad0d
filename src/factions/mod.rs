//! Faction-specific behavior
//!
//! Each faction contributes a small table of triggers, the extra action
//! kinds only it can take, and the generators behind them. The bot
//! registers these ahead of the common generators of the same tier.

mod atreides;
mod bene_gesserit;
mod choam;
mod emperor;
mod fremen;
mod guild;
mod harkonnen;
mod ixian;
mod richese;
mod tleilaxu;

use crate::agent::context::DecisionContext;
use crate::core::error::GeneratorFault;
use crate::core::types::{Faction, Tier};
use crate::game::actions::{Action, ActionKind};

pub use atreides::AtreidesStrategy;
pub use bene_gesserit::BeneGesseritStrategy;
pub use choam::ChoamStrategy;
pub use emperor::EmperorStrategy;
pub use fremen::FremenStrategy;
pub use guild::GuildStrategy;
pub use harkonnen::HarkonnenStrategy;
pub use ixian::IxianStrategy;
pub use richese::RicheseStrategy;
pub use tleilaxu::TleilaxuStrategy;

/// Trait for faction-specific decision making
pub trait FactionStrategy: Send + Sync {
    fn faction(&self) -> Faction;

    /// Action kinds this faction handles, with the tier they fire at
    fn triggers(&self) -> &'static [(Tier, ActionKind)];

    /// Propose an action for one of our triggers
    fn try_act(&self, trigger: ActionKind, ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault>;
}

/// Get the strategy for a faction
pub fn strategy_for(faction: Faction) -> Box<dyn FactionStrategy> {
    match faction {
        Faction::Atreides => Box::new(AtreidesStrategy),
        Faction::Harkonnen => Box::new(HarkonnenStrategy),
        Faction::Fremen => Box::new(FremenStrategy),
        Faction::Emperor => Box::new(EmperorStrategy),
        Faction::Guild => Box::new(GuildStrategy),
        Faction::BeneGesserit => Box::new(BeneGesseritStrategy),
        Faction::Ixian => Box::new(IxianStrategy),
        Faction::Tleilaxu => Box::new(TleilaxuStrategy),
        Faction::Choam => Box::new(ChoamStrategy),
        Faction::Richese => Box::new(RicheseStrategy),
    }
}

/// Fault for a trigger routed to the wrong strategy
pub(crate) fn unhandled(faction: Faction, trigger: ActionKind) -> GeneratorFault {
    GeneratorFault::Inconsistent(format!("{} has no generator for {:?}", faction, trigger))
}
