//! Leaders (battle heroes) and their skills

use serde::{Deserialize, Serialize};

use crate::core::types::{Faction, LeaderId};

/// Optional skill attached to a leader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaderSkill {
    /// May spend up to three extra spice to raise the leader's value
    Banker,
    /// Unlocks a disengage (retreat) before battle
    Diplomat,
    /// Adds two to the leader's value when it survives
    Swordmaster,
    /// Adds one to the leader's value when it survives
    Mentat,
    /// No battle effect; improves spice collection
    Planetologist,
}

impl LeaderSkill {
    /// Flat battle bonus granted when the leader survives
    pub fn battle_bonus(&self) -> f32 {
        match self {
            LeaderSkill::Swordmaster => 2.0,
            LeaderSkill::Mentat => 1.0,
            LeaderSkill::Banker | LeaderSkill::Diplomat | LeaderSkill::Planetologist => 0.0,
        }
    }
}

/// A leader card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub id: LeaderId,
    pub faction: Faction,
    pub name: String,
    pub value: u8,
    #[serde(default)]
    pub skill: Option<LeaderSkill>,
}

impl Leader {
    pub fn new(id: u16, faction: Faction, name: &str, value: u8) -> Self {
        Self {
            id: LeaderId(id),
            faction,
            name: name.to_string(),
            value,
            skill: None,
        }
    }

    pub fn with_skill(mut self, skill: LeaderSkill) -> Self {
        self.skill = Some(skill);
        self
    }

    /// Leader value plus skill bonus, as counted in battle
    pub fn battle_value(&self) -> f32 {
        self.value as f32 + self.skill.map(|s| s.battle_bonus()).unwrap_or(0.0)
    }
}

/// What a battle plan fields as its hero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hero {
    Leader(LeaderId),
    /// The cheap hero treachery card: value zero, never a traitor
    CheapHero(crate::core::types::CardId),
}
