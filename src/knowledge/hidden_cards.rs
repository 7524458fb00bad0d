//! An observer's view of another faction's hand
//!
//! Cards the observer has seen in the opponent's hand are known; the rest
//! are unknown and are reasoned about by counting against the pool of
//! cards the observer has not accounted for anywhere.

use ahash::AHashSet;

use crate::core::types::{CardId, Faction};
use crate::game::cards::CardKind;
use crate::game::state::GameState;
use crate::valuation::probability::probability_none_match;

/// Estimate used when the observer cannot say what the unseen cards might be
const UNINFORMED_CHANCE: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct HiddenCardView {
    pub opponent: Faction,
    /// Cards in the opponent's hand the observer has seen
    pub known: Vec<CardKind>,
    /// Cards in the opponent's hand the observer has not seen
    pub unknown_count: u32,
    /// Cards the unknown ones could be
    pub unknown_pool: Vec<CardKind>,
}

impl HiddenCardView {
    /// Build `observer`'s view of `opponent`'s hand
    pub fn observe(game: &GameState, observer: Faction, opponent: Faction) -> Option<Self> {
        let target = game.player(opponent)?;

        let mut seen: AHashSet<CardId> = AHashSet::new();
        if let Some(own) = game.player(observer) {
            seen.extend(own.cards.iter().map(|c| c.id));
        }
        let mut knowers = vec![observer];
        if let Some(ally) = game.ally_of(observer) {
            knowers.push(ally);
            if let Some(ally_player) = game.player(ally) {
                seen.extend(ally_player.cards.iter().map(|c| c.id));
            }
        }
        for knower in knowers {
            if let Some(ids) = game.card_knowledge.get(&knower) {
                seen.extend(ids.iter().copied());
            }
        }
        seen.extend(game.discard_pile.iter().copied());

        let known: Vec<CardKind> = target
            .cards
            .iter()
            .filter(|c| seen.contains(&c.id))
            .map(|c| c.kind)
            .collect();
        let unknown_count = (target.cards.len() - known.len()) as u32;
        let unknown_pool = game
            .card_catalogue
            .iter()
            .filter(|c| !seen.contains(&c.id))
            .map(|c| c.kind)
            .collect();

        Some(Self {
            opponent,
            known,
            unknown_count,
            unknown_pool,
        })
    }

    /// A view where every card in hand is known
    pub fn fully_known(opponent: Faction, known: Vec<CardKind>) -> Self {
        Self {
            opponent,
            known,
            unknown_count: 0,
            unknown_pool: Vec::new(),
        }
    }

    pub fn known_any<F>(&self, pred: F) -> bool
    where
        F: Fn(CardKind) -> bool,
    {
        self.known.iter().any(|k| pred(*k))
    }

    /// How many cards in the unknown pool satisfy `pred`
    pub fn unknown_matching<F>(&self, pred: F) -> u32
    where
        F: Fn(CardKind) -> bool,
    {
        self.unknown_pool.iter().filter(|k| pred(**k)).count() as u32
    }

    /// Chance that no unknown card in the opponent's hand satisfies `pred`
    pub fn chance_none_unknown<F>(&self, pred: F) -> f32
    where
        F: Fn(CardKind) -> bool,
    {
        if self.unknown_count == 0 {
            return 1.0;
        }
        if self.unknown_pool.is_empty() {
            return UNINFORMED_CHANCE;
        }
        let total = self.unknown_pool.len() as u32;
        let matching = self.unknown_matching(pred);
        probability_none_match(total, total - matching, self.unknown_count)
    }
}
