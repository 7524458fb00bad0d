//! Bene Gesserit: the voice, the prediction and advisors

use rand::Rng;
use std::collections::BTreeSet;
use tracing::debug;

use crate::agent::context::DecisionContext;
use crate::core::error::GeneratorFault;
use crate::core::types::{Faction, LocationId, Tier};
use crate::diplomacy::standing::leading_opponent;
use crate::factions::{unhandled, FactionStrategy};
use crate::game::actions::{Action, ActionKind};
use crate::game::battle::CardClass;
use crate::knowledge::hidden_cards::HiddenCardView;
use crate::logistics::hostile_threat;
use crate::valuation::dial::max_dial_at;

const TRIGGERS: &[(Tier, ActionKind)] = &[
    (Tier::High, ActionKind::Voice),
    (Tier::Middle, ActionKind::Prediction),
    (Tier::Middle, ActionKind::AdvisorFlip),
];

/// Weapon classes the voice may forbid, deadliest first
const VOICE_CLASSES: [CardClass; 3] = [CardClass::Lasgun, CardClass::PoisonWeapon, CardClass::ProjectileWeapon];

pub struct BeneGesseritStrategy;

impl FactionStrategy for BeneGesseritStrategy {
    fn faction(&self) -> Faction {
        Faction::BeneGesserit
    }

    fn triggers(&self) -> &'static [(Tier, ActionKind)] {
        TRIGGERS
    }

    fn try_act(&self, trigger: ActionKind, ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
        match trigger {
            ActionKind::Voice => voice(ctx),
            ActionKind::Prediction => Ok(predict(ctx)),
            ActionKind::AdvisorFlip => Ok(flip_advisors(ctx)),
            other => Err(unhandled(self.faction(), other)),
        }
    }
}

/// Forbid the weapon class the opponent most likely holds and our
/// defenses cannot stop
fn voice(ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
    let Some(battle) = ctx.game.battle.as_ref() else {
        return Ok(None);
    };
    if battle.voice.is_some() || !battle.involves(ctx.faction) {
        return Ok(None);
    }
    let opponent = battle.opponent_of(ctx.faction).ok_or(GeneratorFault::NoBattle)?;
    let hand = &ctx.player()?.cards;
    let view = HiddenCardView::observe(ctx.game, ctx.faction, opponent)
        .ok_or(GeneratorFault::MissingPlayer(opponent))?;

    let mut best: Option<(CardClass, f32)> = None;
    for class in VOICE_CLASSES {
        let threats: BTreeSet<_> = view
            .known
            .iter()
            .chain(view.unknown_pool.iter())
            .copied()
            .filter(|k| class.matches(*k))
            .collect();
        if threats.is_empty() {
            continue;
        }
        let covered = hand
            .iter()
            .filter(|c| c.is_defense())
            .any(|d| threats.iter().all(|w| w.is_countered_by(d.kind)));
        if covered {
            continue;
        }
        let held = if view.known_any(|k| class.matches(k)) {
            1.0
        } else {
            1.0 - view.chance_none_unknown(|k| class.matches(k))
        };
        if held > 0.0 && best.map(|(_, b)| held > b).unwrap_or(true) {
            best = Some((class, held));
        }
    }

    let Some((class, held)) = best else {
        return Ok(None);
    };
    debug!(opponent = %opponent, ?class, held, "Voice");
    Ok(Some(Action::Voice { class, must: false }))
}

/// Predict the current leader winning on a random turn
fn predict(ctx: &mut DecisionContext<'_>) -> Option<Action> {
    let winner = leading_opponent(ctx.game, ctx.faction, ctx.params)?;
    let first = ctx.game.turn.max(1);
    let last = ctx.game.rules.max_turns.max(first);
    let turn = ctx.rng.gen_range(first..=last);
    Some(Action::Predict { winner, turn })
}

/// Turn advisors into fighters in a stronghold we can hold
fn flip_advisors(ctx: &DecisionContext<'_>) -> Option<Action> {
    let game = ctx.game;
    let mut locations: Vec<LocationId> = game.pending.advisors_at.clone();
    locations.sort();
    locations.dedup();

    for location in locations {
        let Some(loc) = game.map.get(location) else {
            continue;
        };
        if !loc.is_stronghold() {
            continue;
        }
        let ours = game.player(ctx.faction)?.forces_in(location);
        let threat = hostile_threat(game, ctx.faction, location);
        let opponent = game
            .hostile_occupants(ctx.faction, location)
            .first()
            .map(|(f, _)| *f)
            .unwrap_or(ctx.faction);
        let dial = max_dial_at(game, ctx.faction, opponent, ours);
        if threat == 0.0 || dial >= threat * ctx.params.movement_hold_confidence {
            return Some(Action::FlipAdvisors {
                location,
                to_fighters: true,
            });
        }
    }
    None
}
