//! Hero survival estimates
//!
//! Both estimates resolve in the same order: information forced out of the
//! opponent this battle gives a certain answer; a known card in the
//! opponent's hand gives a certain answer; otherwise the unknown cards are
//! counted with [`probability_none_match`](super::probability::probability_none_match).

use crate::core::types::{Faction, LeaderId};
use crate::game::battle::{CardClass, ClairvoyanceAnswer, PrescienceAspect};
use crate::game::cards::CardKind;
use crate::game::state::GameState;
use crate::knowledge::hidden_cards::HiddenCardView;

/// What `observer` has learned about `opponent`'s coming battle plan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BattleIntel {
    /// Revealed weapon slot; `Some(None)` means "no weapon"
    pub opponent_weapon: Option<Option<CardKind>>,
    /// Revealed defense slot; `Some(None)` means "no defense"
    pub opponent_defense: Option<Option<CardKind>>,
    pub opponent_leader: Option<LeaderId>,
    pub opponent_dial: Option<f32>,
    /// Classes the opponent may not play
    pub forbidden: Vec<CardClass>,
    /// Class the opponent must play if able
    pub compelled: Option<CardClass>,
}

impl BattleIntel {
    /// Collect prescience, voice and clairvoyance results from the current
    /// battle that were obtained by `observer` or its ally
    pub fn gather(game: &GameState, observer: Faction, opponent: Faction) -> Self {
        let mut intel = BattleIntel::default();
        let Some(battle) = &game.battle else {
            return intel;
        };
        let ally = game.ally_of(observer);
        let ours = |by: Faction| by == observer || Some(by) == ally;

        if let Some(reveal) = &battle.prescience {
            if ours(reveal.by) && reveal.target == opponent {
                match reveal.aspect {
                    PrescienceAspect::Weapon => intel.opponent_weapon = Some(reveal.card),
                    PrescienceAspect::Defense => intel.opponent_defense = Some(reveal.card),
                    PrescienceAspect::Leader => intel.opponent_leader = reveal.leader,
                    PrescienceAspect::Dial => intel.opponent_dial = reveal.dial,
                }
            }
        }

        if let Some(voice) = &battle.voice {
            if ours(voice.by) && voice.target == opponent {
                if voice.must {
                    intel.compelled = Some(voice.class);
                } else {
                    intel.forbidden.push(voice.class);
                }
            }
        }

        if let Some(question) = &battle.clairvoyance {
            if ours(question.by) && question.target == opponent {
                match question.answer {
                    ClairvoyanceAnswer::No => intel.forbidden.push(question.class),
                    ClairvoyanceAnswer::Yes if intel.compelled.is_none() => {
                        intel.compelled = Some(question.class)
                    }
                    _ => {}
                }
            }
        }

        intel
    }

    pub fn forbids(&self, kind: CardKind) -> bool {
        self.forbidden.iter().any(|class| class.matches(kind))
    }
}

/// Chance our hero survives if we play `defense`
pub fn chance_hero_survives(defense: Option<CardKind>, view: &HiddenCardView, intel: &BattleIntel) -> f32 {
    let threatens = |w: CardKind| {
        w.is_weapon() && !intel.forbids(w) && !defense.map(|d| w.is_countered_by(d)).unwrap_or(false)
    };

    if let Some(revealed) = intel.opponent_weapon {
        return certain(!revealed.map(threatens).unwrap_or(false));
    }
    if let Some(class) = intel.compelled.filter(|c| c.is_weapon_class()) {
        if view.known_any(|k| class.matches(k)) {
            return certain(!view.known_any(|k| class.matches(k) && threatens(k)));
        }
    }
    if view.known_any(threatens) {
        return 0.0;
    }
    if view.unknown_count == 0 {
        return 1.0;
    }
    view.chance_none_unknown(threatens)
}

/// Chance the opponent's hero dies if we play `weapon`
pub fn chance_opponent_hero_dies(weapon: Option<CardKind>, view: &HiddenCardView, intel: &BattleIntel) -> f32 {
    let Some(weapon) = weapon.filter(|w| w.is_weapon()) else {
        return 0.0;
    };
    let stops = |d: CardKind| d.is_defense() && !intel.forbids(d) && weapon.is_countered_by(d);

    if let Some(revealed) = intel.opponent_defense {
        return certain(!revealed.map(stops).unwrap_or(false));
    }
    if let Some(class) = intel.compelled.filter(|c| !c.is_weapon_class()) {
        if view.known_any(|k| class.matches(k)) {
            return certain(!view.known_any(|k| class.matches(k) && stops(k)));
        }
    }
    if view.known_any(stops) {
        return 0.0;
    }
    if view.unknown_count == 0 {
        return 1.0;
    }
    view.chance_none_unknown(stops)
}

fn certain(yes: bool) -> f32 {
    if yes {
        1.0
    } else {
        0.0
    }
}
