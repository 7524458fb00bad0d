//! Weapon and defense selection for a battle plan

use tracing::trace;

use crate::game::battle::VoiceCommand;
use crate::game::cards::{CardKind, TreacheryCard};
use crate::knowledge::hidden_cards::HiddenCardView;
use crate::valuation::survival::{chance_hero_survives, chance_opponent_hero_dies, BattleIntel};

/// The weapon/defense pair chosen for a plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardChoice {
    pub weapon: Option<TreacheryCard>,
    pub defense: Option<TreacheryCard>,
    /// A lasgun/shield pairing came up and one side was dropped
    pub lasgun_shield: bool,
    pub kill_chance: f32,
    pub survive_chance: f32,
}

/// Pick the weapon most likely to kill the opponent's hero and the
/// defense most likely to keep ours alive
///
/// `voice` is a command the opponent laid on us, if any: a "must not"
/// removes a class from play; a "must" forces a matching card into its
/// slot when we hold one.
pub fn choose_cards(
    hand: &[TreacheryCard],
    view: &HiddenCardView,
    intel: &BattleIntel,
    voice: Option<&VoiceCommand>,
) -> CardChoice {
    let allowed = |card: &TreacheryCard| match voice {
        Some(v) if !v.must => !v.class.matches(card.kind),
        _ => true,
    };

    let mut weapon: Option<(TreacheryCard, f32)> = None;
    for card in hand.iter().filter(|c| c.is_weapon() && allowed(c)) {
        let chance = chance_opponent_hero_dies(Some(card.kind), view, intel);
        if chance > 0.0 && weapon.map(|(_, best)| chance > best).unwrap_or(true) {
            weapon = Some((*card, chance));
        }
    }

    let weapon_card = weapon.map(|(c, _)| c);
    let survive_bare = chance_hero_survives(None, view, intel);
    let mut defense: Option<(TreacheryCard, f32)> = None;
    for card in hand
        .iter()
        .filter(|c| c.is_defense() && allowed(c) && Some(c.id) != weapon_card.map(|w| w.id))
    {
        let chance = chance_hero_survives(Some(card.kind), view, intel);
        if chance > survive_bare && defense.map(|(_, best)| chance > best).unwrap_or(true) {
            defense = Some((*card, chance));
        }
    }

    let mut choice = CardChoice {
        weapon: weapon_card,
        defense: defense.map(|(c, _)| c),
        lasgun_shield: false,
        kill_chance: weapon.map(|(_, k)| k).unwrap_or(0.0),
        survive_chance: defense.map(|(_, s)| s).unwrap_or(survive_bare),
    };

    let mut compelled_defense = false;
    if let Some(v) = voice.filter(|v| v.must) {
        if let Some(card) = hand.iter().find(|c| v.class.matches(c.kind)) {
            if v.class.is_weapon_class() {
                if choice.weapon.map(|w| !v.class.matches(w.kind)).unwrap_or(true) {
                    choice.weapon = Some(*card);
                    choice.kill_chance = chance_opponent_hero_dies(Some(card.kind), view, intel);
                }
            } else if choice.defense.map(|d| !v.class.matches(d.kind)).unwrap_or(true) {
                choice.defense = Some(*card);
                choice.survive_chance = chance_hero_survives(Some(card.kind), view, intel);
                compelled_defense = true;
            }
        }
    }

    let lasgun = choice.weapon.map(|w| w.kind == CardKind::Lasgun).unwrap_or(false);
    let shield = choice.defense.map(|d| d.kind.is_shield()).unwrap_or(false);
    if lasgun && shield {
        trace!("Dropping one side of a lasgun/shield pairing");
        choice.lasgun_shield = true;
        if compelled_defense {
            choice.weapon = None;
            choice.kill_chance = 0.0;
        } else {
            choice.defense = None;
            choice.survive_chance = survive_bare;
        }
    }

    choice
}
