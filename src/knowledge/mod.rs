//! Knowledge layer: what the agent knows and can infer about hidden
//! cards and traitors

pub mod card_quality;
pub mod hidden_cards;
pub mod traitors;

pub use card_quality::{card_quality, QualityCache, MAX_QUALITY};
pub use hidden_cards::HiddenCardView;
pub use traitors::{known_non_traitors, safe_or_traitor_leaders, TraitorKnowledge};
