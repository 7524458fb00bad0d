pub mod config;
pub mod error;
pub mod types;

pub use config::{load_parameters, BotParameters};
pub use error::{BotError, GeneratorFault, Result, ValidationError, ValidationErrorKind};
pub use types::{CardId, Faction, ForceCount, LeaderId, LocationId, Phase, Sector, Tier, Turn};
