//! Card quality: how much a card is worth to the faction holding it
//!
//! Quality is an integer 0..=5. The rating only looks at the cards the
//! rating faction can see, so the same card can rate differently in
//! different hands.

use ahash::AHashMap;

use crate::core::types::{CardId, Faction};
use crate::game::cards::{CardCategory, CardKind, TreacheryCard};

pub const MAX_QUALITY: u8 = 5;

/// Factions whose plans lean on winning battles outright
fn is_combat_faction(faction: Faction) -> bool {
    matches!(
        faction,
        Faction::Harkonnen | Faction::Fremen | Faction::Emperor | Faction::Ixian
    )
}

/// Cards that combine with a faction's own ability into something strong
fn is_faction_combo(kind: CardKind, faction: Faction) -> bool {
    matches!(
        (faction, kind),
        (Faction::Fremen, CardKind::WeatherControl)
            | (Faction::Guild, CardKind::Hajr)
            | (Faction::Tleilaxu, CardKind::TleilaxuGhola)
            | (Faction::BeneGesserit, CardKind::Karama)
            | (Faction::Atreides, CardKind::Truthtrance)
            | (Faction::Harkonnen, CardKind::CheapHero)
    )
}

/// Two cards fill the same role when one could stand in for the other
fn same_role(a: CardKind, b: CardKind) -> bool {
    if a == b {
        return true;
    }
    (a.is_projectile_weapon() && b.is_projectile_weapon())
        || (a.is_poison_weapon() && b.is_poison_weapon())
        || (a.category() == CardCategory::Defense
            && b.category() == CardCategory::Defense
            && a.is_projectile_defense() == b.is_projectile_defense()
            && a.is_poison_defense() == b.is_poison_defense())
}

/// Rate `card` for `faction` given the cards in `hand`
///
/// `hand` may or may not contain `card` itself; duplicates are counted
/// against the other cards only. Rules apply in order, first match wins:
/// universal card (5), faction combo (5), sole card of its role
/// (4, or 5 for combat factions), strong special (4), other special (3),
/// redundant weapon or defense (2), weak special (1), useless (0).
pub fn card_quality(card: &TreacheryCard, hand: &[TreacheryCard], faction: Faction) -> u8 {
    let kind = card.kind;

    if matches!(kind, CardKind::ShieldSnooper | CardKind::Lasgun) {
        return MAX_QUALITY;
    }
    if is_faction_combo(kind, faction) {
        return MAX_QUALITY;
    }

    match kind.category() {
        CardCategory::Weapon | CardCategory::Defense | CardCategory::Dual => {
            let duplicates = hand
                .iter()
                .filter(|other| other.id != card.id && same_role(other.kind, kind))
                .count();
            if duplicates == 0 {
                if is_combat_faction(faction) {
                    MAX_QUALITY
                } else {
                    4
                }
            } else {
                2
            }
        }
        CardCategory::Special => match kind {
            CardKind::Karama | CardKind::TleilaxuGhola => 4,
            CardKind::CheapHero | CardKind::Truthtrance | CardKind::WeatherControl => 3,
            _ => 1,
        },
        CardCategory::Useless => 0,
    }
}

/// Memoized quality ratings for one evaluation over a fixed hand
pub struct QualityCache<'a> {
    faction: Faction,
    hand: &'a [TreacheryCard],
    ratings: AHashMap<CardId, u8>,
}

impl<'a> QualityCache<'a> {
    pub fn new(faction: Faction, hand: &'a [TreacheryCard]) -> Self {
        Self {
            faction,
            hand,
            ratings: AHashMap::new(),
        }
    }

    pub fn quality(&mut self, card: &TreacheryCard) -> u8 {
        let (faction, hand) = (self.faction, self.hand);
        *self
            .ratings
            .entry(card.id)
            .or_insert_with(|| card_quality(card, hand, faction))
    }

    /// Lowest-rated card in the hand; the first one wins ties
    pub fn worst(&mut self) -> Option<TreacheryCard> {
        let hand = self.hand;
        let mut worst: Option<(TreacheryCard, u8)> = None;
        for card in hand {
            let q = self.quality(card);
            if worst.map(|(_, best_q)| q < best_q).unwrap_or(true) {
                worst = Some((*card, q));
            }
        }
        worst.map(|(card, _)| card)
    }
}
