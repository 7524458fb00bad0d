//! Negotiation heuristics: standing, alliances and side deals

pub mod alliance;
pub mod deals;
pub mod standing;

pub use alliance::{accept_offer, propose, should_break};
pub use deals::{accept_deal, cancel_stale_deal, offer_deal, price_ceiling};
pub use standing::{leading_opponent, standing};
