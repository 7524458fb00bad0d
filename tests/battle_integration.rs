//! Battle planning integration tests

mod common;

use std::collections::BTreeSet;

use arrakis_bot::agent::Bot;
use arrakis_bot::battle::{BattlePlanPhase, BattlePlanner};
use arrakis_bot::core::{
    BotParameters, CardId, Faction, ForceCount, LeaderId, Phase, Tier, ValidationError, ValidationErrorKind,
};
use arrakis_bot::game::{
    AcceptAll, Action, ActionKind, ActionValidator, BattleSituation, CardKind, GameState, TreacheryCard,
};
use arrakis_bot::knowledge::HiddenCardView;
use arrakis_bot::valuation::{chance_hero_survives, chance_opponent_hero_dies, BattleIntel};

use common::*;

fn battle_at_carthag(own_forces: u32, their_forces: u32) -> GameState {
    let mut game = three_player_game();
    game.phase = Phase::Battle;
    player_mut(&mut game, Faction::Atreides)
        .on_board
        .insert(CARTHAG, ForceCount::new(own_forces, 0));
    player_mut(&mut game, Faction::Harkonnen)
        .on_board
        .insert(CARTHAG, ForceCount::new(their_forces, 0));
    game.battle = Some(BattleSituation {
        id: 4,
        aggressor: Faction::Atreides,
        defender: Faction::Harkonnen,
        location: CARTHAG,
        aggressor_committed: false,
        defender_committed: false,
        pending_reveals: Vec::new(),
        voice: None,
        prescience: None,
        clairvoyance: None,
        revealed_leaders: Vec::new(),
    });
    game
}

#[test]
fn test_every_leader_a_known_traitor_minimizes() {
    init_tracing();
    // Overwhelming forces and spice, yet every leader would betray us
    let mut game = battle_at_carthag(10, 1);
    player_mut(&mut game, Faction::Atreides).resources = 40;
    game.revealed_traitors
        .insert(Faction::Harkonnen, BTreeSet::from([LeaderId(1), LeaderId(2), LeaderId(3)]));

    let params = BotParameters::default();
    let planner = BattlePlanner::new(&game, Faction::Atreides, &params).unwrap();
    let decision = planner.plan(false).unwrap();
    assert!(decision.minimize_losses);
    assert!(!decision.draft.messiah);
}

#[test]
fn test_traitor_held_by_third_faction_is_harmless() {
    let mut game = battle_at_carthag(10, 1);
    player_mut(&mut game, Faction::Atreides).resources = 40;
    game.revealed_traitors
        .insert(Faction::Emperor, BTreeSet::from([LeaderId(1), LeaderId(2), LeaderId(3)]));

    let params = BotParameters::default();
    let planner = BattlePlanner::new(&game, Faction::Atreides, &params).unwrap();
    let decision = planner.plan(false).unwrap();
    assert!(!decision.minimize_losses);
}

#[test]
fn test_phase_follows_commitments() {
    let mut game = battle_at_carthag(5, 5);
    let params = BotParameters::default();
    if let Some(battle) = game.battle.as_mut() {
        battle.pending_reveals = vec![Faction::Harkonnen];
    }
    let phase = BattlePlanner::new(&game, Faction::Atreides, &params).unwrap().phase();
    assert_eq!(phase, BattlePlanPhase::AwaitingInformation);

    if let Some(battle) = game.battle.as_mut() {
        battle.aggressor_committed = true;
    }
    let phase = BattlePlanner::new(&game, Faction::Atreides, &params).unwrap().phase();
    assert_eq!(phase, BattlePlanPhase::Finalized);
}

#[test]
fn test_outsider_has_no_planner() {
    let game = battle_at_carthag(5, 5);
    let params = BotParameters::default();
    assert!(BattlePlanner::new(&game, Faction::Emperor, &params).is_none());
}

#[test]
fn test_known_hand_without_counter_is_certain_kill() {
    let view = HiddenCardView::fully_known(Faction::Harkonnen, vec![CardKind::Snooper, CardKind::Useless]);
    let intel = BattleIntel::default();
    let chance = chance_opponent_hero_dies(Some(CardKind::ProjectileWeapon), &view, &intel);
    assert_eq!(chance, 1.0);
}

#[test]
fn test_known_hand_with_counter_is_certain_miss() {
    let view = HiddenCardView::fully_known(Faction::Harkonnen, vec![CardKind::Shield]);
    let intel = BattleIntel::default();
    assert_eq!(chance_opponent_hero_dies(Some(CardKind::ProjectileWeapon), &view, &intel), 0.0);
    // Lasguns are never stopped
    assert_eq!(chance_opponent_hero_dies(Some(CardKind::Lasgun), &view, &intel), 1.0);
}

#[test]
fn test_empty_known_hand_cannot_hurt_us() {
    let view = HiddenCardView::fully_known(Faction::Harkonnen, Vec::new());
    let intel = BattleIntel::default();
    assert_eq!(chance_hero_survives(None, &view, &intel), 1.0);
}

#[test]
fn test_winnable_plan_stays_within_means() {
    let mut game = battle_at_carthag(8, 3);
    player_mut(&mut game, Faction::Atreides)
        .cards
        .push(TreacheryCard::new(60, CardKind::Shield));
    let params = BotParameters::default();
    let planner = BattlePlanner::new(&game, Faction::Atreides, &params).unwrap();
    let decision = planner.plan(false).unwrap();
    assert!(!decision.retreat);
    assert!(decision.draft.dialed_forces().fits_in(&ForceCount::new(8, 0)));
    assert!(decision.draft.spice(1) <= 12);
}

/// Rejects any battle plan that plays the given card
struct RejectCard(CardId);

impl ActionValidator for RejectCard {
    fn execute(&mut self, action: &Action, _: bool, _: bool) -> Result<(), ValidationError> {
        match action {
            Action::BattlePlan(draft) if draft.weapon.map(|w| w.id) == Some(self.0) => {
                Err(ValidationError::new(ValidationErrorKind::IllegalTarget, "card not held"))
            }
            _ => Ok(()),
        }
    }
}

fn weapon_of(action: &Option<Action>) -> Option<CardId> {
    match action {
        Some(Action::BattlePlan(draft)) => draft.weapon.map(|w| w.id),
        _ => None,
    }
}

#[test]
fn test_plan_redrafted_after_weapon_leaves_hand() {
    init_tracing();
    let mut game = battle_at_carthag(8, 3);
    player_mut(&mut game, Faction::Atreides)
        .cards
        .push(TreacheryCard::new(50, CardKind::ProjectileWeapon));
    let legal = legal(&[ActionKind::BattlePlan]);
    let mut bot = Bot::new(Faction::Atreides, 3);

    let first = bot.determine_action(&game, Tier::High, &legal, &mut AcceptAll);
    assert_eq!(weapon_of(&first), Some(CardId(50)));

    player_mut(&mut game, Faction::Atreides).cards.clear();
    let mut validator = RejectCard(CardId(50));
    for _ in 0..3 {
        let next = bot.determine_action(&game, Tier::High, &legal, &mut validator);
        assert!(matches!(next, Some(Action::BattlePlan(_))));
        assert_eq!(weapon_of(&next), None);
    }
}

#[test]
fn test_cached_plan_replayed_while_it_still_fits() {
    let mut game = battle_at_carthag(8, 3);
    player_mut(&mut game, Faction::Atreides)
        .cards
        .push(TreacheryCard::new(50, CardKind::ProjectileWeapon));
    let legal = legal(&[ActionKind::BattlePlan]);
    let mut bot = Bot::new(Faction::Atreides, 3);
    let first = bot.determine_action(&game, Tier::High, &legal, &mut AcceptAll);
    let second = bot.determine_action(&game, Tier::High, &legal, &mut AcceptAll);
    assert!(first.is_some());
    assert_eq!(first, second);
}
