//! Treachery cards and their counter relationships

use serde::{Deserialize, Serialize};

use crate::core::types::CardId;

/// The fixed kind of a treachery card
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardKind {
    // Weapons
    ProjectileWeapon,
    PoisonWeapon,
    PoisonTooth,
    Lasgun,
    ArtilleryStrike,
    StoneBurner,
    MirrorWeapon,
    // Defenses
    Shield,
    Snooper,
    ShieldSnooper,
    // Dual use
    Chemistry,
    WeirdingWay,
    // Specials
    CheapHero,
    Karama,
    Truthtrance,
    WeatherControl,
    FamilyAtomics,
    Hajr,
    TleilaxuGhola,
    // Worthless
    Useless,
}

/// Broad category used when reasoning about counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    Weapon,
    Defense,
    Dual,
    Special,
    Useless,
}

impl CardKind {
    pub fn category(&self) -> CardCategory {
        match self {
            CardKind::ProjectileWeapon
            | CardKind::PoisonWeapon
            | CardKind::PoisonTooth
            | CardKind::Lasgun
            | CardKind::ArtilleryStrike
            | CardKind::StoneBurner
            | CardKind::MirrorWeapon => CardCategory::Weapon,
            CardKind::Shield | CardKind::Snooper | CardKind::ShieldSnooper => CardCategory::Defense,
            CardKind::Chemistry | CardKind::WeirdingWay => CardCategory::Dual,
            CardKind::CheapHero
            | CardKind::Karama
            | CardKind::Truthtrance
            | CardKind::WeatherControl
            | CardKind::FamilyAtomics
            | CardKind::Hajr
            | CardKind::TleilaxuGhola => CardCategory::Special,
            CardKind::Useless => CardCategory::Useless,
        }
    }

    /// Can be played in the weapon slot of a battle plan
    pub fn is_weapon(&self) -> bool {
        matches!(self.category(), CardCategory::Weapon | CardCategory::Dual)
    }

    /// Can be played in the defense slot of a battle plan
    pub fn is_defense(&self) -> bool {
        matches!(self.category(), CardCategory::Defense | CardCategory::Dual)
    }

    pub fn is_projectile_weapon(&self) -> bool {
        matches!(self, CardKind::ProjectileWeapon | CardKind::WeirdingWay)
    }

    pub fn is_poison_weapon(&self) -> bool {
        matches!(self, CardKind::PoisonWeapon | CardKind::PoisonTooth)
    }

    pub fn is_projectile_defense(&self) -> bool {
        matches!(self, CardKind::Shield | CardKind::ShieldSnooper | CardKind::WeirdingWay)
    }

    pub fn is_poison_defense(&self) -> bool {
        matches!(self, CardKind::Snooper | CardKind::ShieldSnooper | CardKind::Chemistry)
    }

    /// Shields explode when a lasgun is played on either side
    pub fn is_shield(&self) -> bool {
        matches!(self, CardKind::Shield | CardKind::ShieldSnooper)
    }

    /// Whether `defense` stops this weapon
    ///
    /// Lasgun and stone burner are stopped by nothing; the poison tooth
    /// slips past snoopers and is only neutralized by chemistry.
    pub fn is_countered_by(&self, defense: CardKind) -> bool {
        match self {
            CardKind::ProjectileWeapon | CardKind::WeirdingWay | CardKind::ArtilleryStrike => {
                defense.is_projectile_defense()
            }
            CardKind::PoisonWeapon => defense.is_poison_defense(),
            CardKind::PoisonTooth => defense == CardKind::Chemistry,
            CardKind::Chemistry => matches!(defense, CardKind::Snooper | CardKind::ShieldSnooper),
            CardKind::Lasgun | CardKind::StoneBurner => false,
            // A mirror copies the other side's weapon; any defense may stop it
            CardKind::MirrorWeapon => defense.is_defense(),
            _ => true,
        }
    }

    /// Weapon kinds this defense can stop
    pub fn stops_any_of(&self, weapons: &[CardKind]) -> bool {
        weapons.iter().any(|w| w.is_countered_by(*self))
    }
}

/// One physical treachery card
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TreacheryCard {
    pub id: CardId,
    pub kind: CardKind,
}

impl TreacheryCard {
    pub fn new(id: u16, kind: CardKind) -> Self {
        Self {
            id: CardId(id),
            kind,
        }
    }

    pub fn is_weapon(&self) -> bool {
        self.kind.is_weapon()
    }

    pub fn is_defense(&self) -> bool {
        self.kind.is_defense()
    }

    pub fn is_useless(&self) -> bool {
        self.kind == CardKind::Useless
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shield_counters_projectile_not_poison() {
        assert!(CardKind::ProjectileWeapon.is_countered_by(CardKind::Shield));
        assert!(!CardKind::PoisonWeapon.is_countered_by(CardKind::Shield));
    }

    #[test]
    fn test_shield_snooper_counters_both_basic_weapons() {
        assert!(CardKind::ProjectileWeapon.is_countered_by(CardKind::ShieldSnooper));
        assert!(CardKind::PoisonWeapon.is_countered_by(CardKind::ShieldSnooper));
    }

    #[test]
    fn test_lasgun_has_no_counter() {
        for defense in [CardKind::Shield, CardKind::Snooper, CardKind::ShieldSnooper, CardKind::Chemistry] {
            assert!(!CardKind::Lasgun.is_countered_by(defense));
        }
    }

    #[test]
    fn test_poison_tooth_ignores_snooper() {
        assert!(!CardKind::PoisonTooth.is_countered_by(CardKind::Snooper));
        assert!(CardKind::PoisonTooth.is_countered_by(CardKind::Chemistry));
    }

    #[test]
    fn test_dual_cards_fill_both_slots() {
        assert!(CardKind::Chemistry.is_weapon());
        assert!(CardKind::Chemistry.is_defense());
        assert!(CardKind::WeirdingWay.is_weapon());
        assert!(!CardKind::Karama.is_weapon());
    }
}
