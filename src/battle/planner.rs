//! Battle planner
//!
//! One planner per battle. It waits while pre-battle information can still
//! arrive, then either fights (commit the dial needed, best hero, best
//! cards) or minimizes losses (cheapest hero, no forces, retreat when
//! allowed).

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::battle::weapons::{choose_cards, CardChoice};
use crate::core::config::BotParameters;
use crate::core::error::GeneratorFault;
use crate::core::types::{Faction, ForceCount};
use crate::game::actions::BattlePlanDraft;
use crate::game::battle::BattleSituation;
use crate::game::cards::{CardKind, TreacheryCard};
use crate::game::leaders::{Hero, LeaderSkill};
use crate::game::player::Player;
use crate::game::state::GameState;
use crate::knowledge::hidden_cards::HiddenCardView;
use crate::knowledge::traitors::{safe_or_traitor_leaders, TraitorKnowledge};
use crate::logistics::allocation::allocate_forces;
use crate::valuation::dial::{cost_per_force, max_dial, max_dial_at, ForcePool};
use crate::valuation::survival::BattleIntel;

/// Banker leaders may add at most this much spice to their value
const MAX_BANKER_BOOST: u32 = 3;

/// Where the agent stands in planning the current battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePlanPhase {
    /// Pre-battle information may still arrive
    AwaitingInformation,
    Planning,
    /// Our plan is in
    Finalized,
}

/// Outcome of planning one battle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattleDecision {
    pub draft: BattlePlanDraft,
    /// Disengage instead of fighting
    pub retreat: bool,
    pub minimize_losses: bool,
    pub dial_needed: f32,
}

pub struct BattlePlanner<'a> {
    game: &'a GameState,
    faction: Faction,
    params: &'a BotParameters,
    battle: &'a BattleSituation,
    opponent: Faction,
}

impl<'a> BattlePlanner<'a> {
    /// `None` when no battle involving `faction` is in progress
    pub fn new(game: &'a GameState, faction: Faction, params: &'a BotParameters) -> Option<Self> {
        let battle = game.battle.as_ref()?;
        let opponent = battle.opponent_of(faction)?;
        Some(Self {
            game,
            faction,
            params,
            battle,
            opponent,
        })
    }

    pub fn battle_id(&self) -> u32 {
        self.battle.id
    }

    pub fn opponent(&self) -> Faction {
        self.opponent
    }

    pub fn phase(&self) -> BattlePlanPhase {
        if self.battle.has_committed(self.faction) {
            BattlePlanPhase::Finalized
        } else if !self.battle.pending_reveals.is_empty() && !self.battle.has_committed(self.opponent) {
            BattlePlanPhase::AwaitingInformation
        } else {
            BattlePlanPhase::Planning
        }
    }

    /// What we know of the opponent's plan right now
    pub fn intel(&self) -> BattleIntel {
        BattleIntel::gather(self.game, self.faction, self.opponent)
    }

    /// Whether a plan drafted earlier can still be played as it stands:
    /// cards in hand, hero available, forces present, spice to pay, and
    /// any voice command on us obeyed
    pub fn still_fits(&self, draft: &BattlePlanDraft) -> bool {
        let Ok(own) = self.player(self.faction) else {
            return false;
        };
        let held = |card: Option<TreacheryCard>| {
            card.map(|c| own.cards.iter().any(|h| h.id == c.id))
                .unwrap_or(true)
        };
        let hero_ok = draft
            .hero
            .map(|h| self.game.valid_battle_heroes(self.faction).contains(&h))
            .unwrap_or(true);
        let played: Vec<CardKind> = [draft.weapon, draft.defense].iter().flatten().map(|c| c.kind).collect();
        let voice_ok = match self.battle.voice.as_ref().filter(|v| v.target == self.faction) {
            Some(voice) if voice.must => {
                played.iter().any(|k| voice.class.matches(*k))
                    || !own.cards.iter().any(|c| voice.class.matches(c.kind))
            }
            Some(voice) => !played.iter().any(|k| voice.class.matches(*k)),
            None => true,
        };

        held(draft.weapon)
            && held(draft.defense)
            && hero_ok
            && voice_ok
            && draft
                .dialed_forces()
                .fits_in(&own.forces_in(self.battle.location))
            && draft.spice(cost_per_force(self.game, self.faction)) <= own.battle_budget()
    }

    fn player(&self, faction: Faction) -> Result<&'a Player, GeneratorFault> {
        self.game
            .player(faction)
            .ok_or(GeneratorFault::MissingPlayer(faction))
    }

    /// Strength we need to dial to win
    ///
    /// Opponent's best dial plus a reinforcement margin, plus their hero if
    /// it is expected to live, minus ours if it is expected to live. The
    /// aggressor wins ties, so a defender needs half a point more.
    pub fn dial_needed(
        &self,
        hero: Option<Hero>,
        cards: &CardChoice,
        intel: &BattleIntel,
    ) -> Result<f32, GeneratorFault> {
        let game = self.game;
        let opponent = self.player(self.opponent)?;
        let own = self.player(self.faction)?;

        let opponent_dial = match intel.opponent_dial {
            Some(dial) => dial,
            None => max_dial_at(game, self.opponent, self.faction, opponent.forces_in(self.battle.location)),
        };

        let opponent_hero = match intel.opponent_leader {
            Some(id) => game.leader(id).map(|l| l.battle_value()).unwrap_or(0.0),
            None => opponent
                .leaders
                .iter()
                .filter(|l| !own.holds_traitor(l.id))
                .map(|l| l.battle_value())
                .fold(0.0, f32::max),
        };
        let opponent_hero_lives = cards.kill_chance < self.params.battle_assume_opponent_hero_dies_above;
        let own_hero_lives = cards.survive_chance >= self.params.battle_assume_hero_survives_above;
        let own_hero = hero.map(|h| game.hero_value(h)).unwrap_or(0.0);

        let mut needed = opponent_dial + self.params.battle_reinforcement_margin;
        if opponent_hero_lives {
            needed += opponent_hero;
        }
        if own_hero_lives {
            needed -= own_hero;
        }
        if !self.battle.is_aggressor(self.faction) {
            needed += 0.5;
        }
        Ok(needed.max(0.0))
    }

    /// Plan the battle; `retreat_legal` says whether a disengage is on offer
    pub fn plan(&self, retreat_legal: bool) -> Result<BattleDecision, GeneratorFault> {
        let game = self.game;
        let own = self.player(self.faction)?;
        let forces = own.forces_in(self.battle.location);

        let view = HiddenCardView::observe(game, self.faction, self.opponent)
            .ok_or(GeneratorFault::MissingPlayer(self.opponent))?;
        let intel = BattleIntel::gather(game, self.faction, self.opponent);
        let voice_on_us = self.battle.voice.as_ref().filter(|v| v.target == self.faction);
        let cards = choose_cards(&own.cards, &view, &intel, voice_on_us);
        let traitors = safe_or_traitor_leaders(game, self.faction, self.opponent);

        let hero = self.best_hero(own, &traitors);
        let traitor_exposed = hero.is_none() && !own.has_messiah && self.has_only_traitor_leaders(own, &traitors);

        let dial_needed = self.dial_needed(hero, &cards, &intel)?;
        let pool = ForcePool::for_battle(game, self.faction, self.opponent, forces);
        let budget = own.battle_budget();
        let reachable = max_dial(&pool, budget, true);
        let predicted_loss = reachable + self.params.battle_max_dial_shortage < dial_needed;
        let budget_short = game.must_pay_for_forces(self.faction)
            && (budget as f32) < self.params.battle_min_spice_per_force * forces.total() as f32;

        if traitor_exposed || predicted_loss || budget_short {
            info!(
                faction = %self.faction,
                opponent = %self.opponent,
                traitor_exposed,
                predicted_loss,
                budget_short,
                "Minimizing battle losses"
            );
            return Ok(self.minimize_losses(&traitors, &cards, forces, retreat_legal, dial_needed));
        }

        let alloc = allocate_forces(
            dial_needed,
            &pool,
            budget,
            self.params.battle_max_unsupported_forces,
            true,
        );

        let banker_boost = match hero {
            Some(Hero::Leader(id)) if alloc.shortfall > 0.0 => {
                let banker = game
                    .leader(id)
                    .map(|l| l.skill == Some(LeaderSkill::Banker))
                    .unwrap_or(false);
                if banker {
                    MAX_BANKER_BOOST
                        .min(budget - alloc.spice)
                        .min(alloc.shortfall.ceil() as u32)
                } else {
                    0
                }
            }
            _ => 0,
        };

        let is_leader = matches!(hero, Some(Hero::Leader(_)));
        let draft = BattlePlanDraft {
            hero,
            weapon: cards.weapon,
            defense: cards.defense,
            messiah: own.has_messiah && is_leader,
            is_traitor: match hero {
                Some(Hero::Leader(id)) => traitors.is_traitor(id),
                _ => false,
            },
            lasgun_shield: cards.lasgun_shield,
            stone_burner: cards.weapon.map(|w| w.kind == CardKind::StoneBurner).unwrap_or(false),
            banker_boost,
            forces: alloc.forces,
            elite_forces: alloc.elite_forces,
            forces_at_half_strength: alloc.unsupported_forces,
            elite_forces_at_half_strength: alloc.unsupported_elite_forces,
        };

        debug!(
            faction = %self.faction,
            opponent = %self.opponent,
            dial_needed,
            shortfall = alloc.shortfall,
            "Battle plan drafted"
        );

        Ok(BattleDecision {
            draft,
            retreat: false,
            minimize_losses: false,
            dial_needed,
        })
    }

    /// Highest-value leader that is not a known traitor, preferring known
    /// safe leaders; the cheap hero when no leader qualifies
    fn best_hero(&self, own: &Player, traitors: &TraitorKnowledge) -> Option<Hero> {
        let heroes = self.game.valid_battle_heroes(self.faction);
        let value = |hero: &Hero| self.game.hero_value(*hero);
        let pick = |pred: &dyn Fn(&Hero) -> bool| {
            let mut best: Option<Hero> = None;
            for hero in heroes.iter().filter(|h| pred(h)) {
                if best.map(|b| value(hero) > value(&b)).unwrap_or(true) {
                    best = Some(*hero);
                }
            }
            best
        };

        if own.has_messiah {
            if let Some(hero) = pick(&|h| matches!(h, Hero::Leader(_))) {
                return Some(hero);
            }
        }
        pick(&|h| matches!(h, Hero::Leader(id) if traitors.is_safe(*id)))
            .or_else(|| pick(&|h| matches!(h, Hero::Leader(id) if traitors.is_unknown(*id))))
            .or_else(|| pick(&|h| matches!(h, Hero::CheapHero(_))))
    }

    fn has_only_traitor_leaders(&self, own: &Player, traitors: &TraitorKnowledge) -> bool {
        !own.leaders.is_empty() && own.leaders.iter().all(|l| traitors.is_traitor(l.id))
    }

    fn minimize_losses(
        &self,
        traitors: &TraitorKnowledge,
        cards: &CardChoice,
        forces: ForceCount,
        retreat_legal: bool,
        dial_needed: f32,
    ) -> BattleDecision {
        let heroes = self.game.valid_battle_heroes(self.faction);
        let cheapest = heroes
            .iter()
            .find(|h| matches!(h, Hero::CheapHero(_)))
            .copied()
            .or_else(|| {
                let mut cheapest: Option<Hero> = None;
                for hero in &heroes {
                    let v = self.game.hero_value(*hero);
                    if cheapest.map(|c| v < self.game.hero_value(c)).unwrap_or(true) {
                        cheapest = Some(*hero);
                    }
                }
                cheapest
            });

        let defense = match cheapest {
            Some(Hero::Leader(_)) => cards.defense,
            _ => None,
        };
        let draft = BattlePlanDraft {
            hero: cheapest,
            weapon: None,
            defense,
            messiah: false,
            is_traitor: match cheapest {
                Some(Hero::Leader(id)) => traitors.is_traitor(id),
                _ => false,
            },
            ..BattlePlanDraft::empty()
        };

        let retreat = retreat_legal && forces.total() >= self.params.battle_min_forces_for_retreat;
        BattleDecision {
            draft,
            retreat,
            minimize_losses: true,
            dial_needed,
        }
    }
}
