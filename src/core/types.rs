//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// The ten playable factions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Atreides,
    Harkonnen,
    Fremen,
    Emperor,
    Guild,
    BeneGesserit,
    Ixian,
    Tleilaxu,
    Choam,
    Richese,
}

impl Faction {
    pub const ALL: [Faction; 10] = [
        Faction::Atreides,
        Faction::Harkonnen,
        Faction::Fremen,
        Faction::Emperor,
        Faction::Guild,
        Faction::BeneGesserit,
        Faction::Ixian,
        Faction::Tleilaxu,
        Faction::Choam,
        Faction::Richese,
    ];

    /// Short lowercase key, used for parameter files and log fields
    pub fn key(&self) -> &'static str {
        match self {
            Faction::Atreides => "atreides",
            Faction::Harkonnen => "harkonnen",
            Faction::Fremen => "fremen",
            Faction::Emperor => "emperor",
            Faction::Guild => "guild",
            Faction::BeneGesserit => "bene_gesserit",
            Faction::Ixian => "ixian",
            Faction::Tleilaxu => "tleilaxu",
            Faction::Choam => "choam",
            Faction::Richese => "richese",
        }
    }

    /// Whether this faction fields elite forces that count double in battle
    pub fn has_elite_forces(&self) -> bool {
        matches!(self, Faction::Fremen | Faction::Emperor | Faction::Ixian)
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Identifier of a leader ("hero") card
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LeaderId(pub u16);

/// Identifier of a treachery card instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

/// Identifier of a board location
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocationId(pub u16);

/// Game turn counter (1-based)
pub type Turn = u32;

/// Storm sector index (0..SECTOR_COUNT)
pub type Sector = u8;

/// Number of sectors on the board ring
pub const SECTOR_COUNT: u8 = 18;

/// Game phases, in turn order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    Storm,
    SpiceBlow,
    Charity,
    Bidding,
    Revival,
    ShipmentAndMove,
    Battle,
    Collection,
    Contemplate,
}

/// Priority tier at which the host asks an agent for a candidate action
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Highest,
    High,
    Middle,
    Low,
    EndOfPhase,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Highest,
        Tier::High,
        Tier::Middle,
        Tier::Low,
        Tier::EndOfPhase,
    ];
}

/// A count of regular and elite forces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForceCount {
    pub regular: u32,
    pub elite: u32,
}

impl ForceCount {
    pub fn new(regular: u32, elite: u32) -> Self {
        Self { regular, elite }
    }

    pub fn total(&self) -> u32 {
        self.regular + self.elite
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Subtract without going below zero
    pub fn saturating_sub(&self, other: &ForceCount) -> ForceCount {
        ForceCount {
            regular: self.regular.saturating_sub(other.regular),
            elite: self.elite.saturating_sub(other.elite),
        }
    }

    /// Whether every component fits inside `other`
    pub fn fits_in(&self, other: &ForceCount) -> bool {
        self.regular <= other.regular && self.elite <= other.elite
    }
}

impl std::ops::Add for ForceCount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            regular: self.regular + rhs.regular,
            elite: self.elite + rhs.elite,
        }
    }
}
