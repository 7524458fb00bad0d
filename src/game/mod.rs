//! Boundary model: the read-only snapshot the rules engine hands the agent
//! and the actions the agent hands back.

pub mod actions;
pub mod battle;
pub mod cards;
pub mod leaders;
pub mod map;
pub mod permissions;
pub mod player;
pub mod state;

pub use actions::{AcceptAll, Action, ActionKind, ActionSet, ActionValidator, BattlePlanDraft};
pub use battle::{
    BattleSituation, CardClass, Clairvoyance, ClairvoyanceAnswer, PrescienceAspect, PrescienceReveal, VoiceCommand,
};
pub use cards::{CardCategory, CardKind, TreacheryCard};
pub use leaders::{Hero, Leader, LeaderSkill};
pub use map::{Location, LocationKind, Map};
pub use permissions::{permissions_for_ally, Permission, PermissionSet};
pub use player::Player;
pub use state::{AllianceOffer, Auction, Deal, DealKind, GameState, PendingDecisions, RuleSet, StormForecast};
