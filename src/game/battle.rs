//! Battle situation as exposed by the rules engine
//!
//! Includes the pre-battle information effects (prescience, voice,
//! clairvoyance) that can force a card category or reveal part of a plan.

use serde::{Deserialize, Serialize};

use crate::core::types::{Faction, LeaderId, LocationId};
use crate::game::cards::CardKind;

/// A class of cards that an information effect can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardClass {
    PoisonWeapon,
    ProjectileWeapon,
    PoisonDefense,
    ProjectileDefense,
    Lasgun,
    Useless,
    CheapHero,
    AnyWeapon,
    AnyDefense,
}

impl CardClass {
    pub fn matches(&self, kind: CardKind) -> bool {
        match self {
            CardClass::PoisonWeapon => kind.is_poison_weapon(),
            CardClass::ProjectileWeapon => kind.is_projectile_weapon(),
            CardClass::PoisonDefense => kind.is_poison_defense(),
            CardClass::ProjectileDefense => kind.is_projectile_defense(),
            CardClass::Lasgun => kind == CardKind::Lasgun,
            CardClass::Useless => kind == CardKind::Useless,
            CardClass::CheapHero => kind == CardKind::CheapHero,
            CardClass::AnyWeapon => kind.is_weapon(),
            CardClass::AnyDefense => kind.is_defense(),
        }
    }

    /// Whether the class describes the weapon slot
    pub fn is_weapon_class(&self) -> bool {
        matches!(
            self,
            CardClass::PoisonWeapon | CardClass::ProjectileWeapon | CardClass::Lasgun | CardClass::AnyWeapon
        )
    }
}

/// A voice command in effect for this battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCommand {
    pub by: Faction,
    pub target: Faction,
    /// `true`: must play the class if able; `false`: must not play it
    pub must: bool,
    pub class: CardClass,
}

/// Which part of the opponent's plan prescience reveals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrescienceAspect {
    Leader,
    Weapon,
    Defense,
    Dial,
}

/// The answer to a prescience question
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrescienceReveal {
    pub by: Faction,
    pub target: Faction,
    pub aspect: PrescienceAspect,
    /// Revealed card for weapon/defense questions; `None` means "no card"
    #[serde(default)]
    pub card: Option<CardKind>,
    #[serde(default)]
    pub leader: Option<LeaderId>,
    #[serde(default)]
    pub dial: Option<f32>,
}

/// Classification of a truthful yes/no answer about the coming plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClairvoyanceAnswer {
    Yes,
    No,
    Unknown,
}

/// A clairvoyance question asked this battle and its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clairvoyance {
    pub by: Faction,
    pub target: Faction,
    /// "Will you play a card of this class?"
    pub class: CardClass,
    pub answer: ClairvoyanceAnswer,
}

/// The battle currently being resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSituation {
    /// Increments for every battle in the game
    pub id: u32,
    pub aggressor: Faction,
    pub defender: Faction,
    pub location: LocationId,
    #[serde(default)]
    pub aggressor_committed: bool,
    #[serde(default)]
    pub defender_committed: bool,
    /// Factions that can still reveal pre-battle information
    #[serde(default)]
    pub pending_reveals: Vec<Faction>,
    #[serde(default)]
    pub voice: Option<VoiceCommand>,
    #[serde(default)]
    pub prescience: Option<PrescienceReveal>,
    #[serde(default)]
    pub clairvoyance: Option<Clairvoyance>,
    /// Leaders shown once both plans are revealed
    #[serde(default)]
    pub revealed_leaders: Vec<(Faction, LeaderId)>,
}

impl BattleSituation {
    pub fn involves(&self, faction: Faction) -> bool {
        self.aggressor == faction || self.defender == faction
    }

    pub fn opponent_of(&self, faction: Faction) -> Option<Faction> {
        if self.aggressor == faction {
            Some(self.defender)
        } else if self.defender == faction {
            Some(self.aggressor)
        } else {
            None
        }
    }

    pub fn is_aggressor(&self, faction: Faction) -> bool {
        self.aggressor == faction
    }

    /// Leader the given side revealed in its plan, if plans are face up
    pub fn revealed_leader(&self, faction: Faction) -> Option<LeaderId> {
        self.revealed_leaders
            .iter()
            .find(|(f, _)| *f == faction)
            .map(|(_, l)| *l)
    }

    pub fn has_committed(&self, faction: Faction) -> bool {
        if self.aggressor == faction {
            self.aggressor_committed
        } else if self.defender == faction {
            self.defender_committed
        } else {
            false
        }
    }
}
