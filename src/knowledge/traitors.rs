//! What a faction knows about traitor cards
//!
//! Traitor cards are hidden. A faction learns about them from its own
//! hand, its ally, public reveals, and private tells. The sets built here
//! let the battle planner avoid fielding a leader that will betray it.

use ahash::AHashSet;
use std::collections::BTreeSet;

use crate::core::types::{Faction, LeaderId};
use crate::game::state::GameState;

/// Leaders `observer` knows are nobody's traitor
pub fn known_non_traitors(game: &GameState, observer: Faction) -> BTreeSet<LeaderId> {
    let mut known: BTreeSet<LeaderId> = game.public_non_traitors.iter().copied().collect();

    let mut absorb = |faction: Faction| {
        if let Some(player) = game.player(faction) {
            known.extend(player.discarded_traitors.iter().copied());
            known.extend(player.traitors.iter().copied());
        }
    };
    absorb(observer);
    if let Some(ally) = game.ally_of(observer) {
        absorb(ally);
    }

    known
}

/// Traitor status of the leaders relevant to one battle
#[derive(Debug, Clone, Default)]
pub struct TraitorKnowledge {
    /// Leaders that cannot betray us to this opponent
    pub safe: AHashSet<LeaderId>,
    /// Leaders the opponent is known to hold as traitors
    pub traitors: AHashSet<LeaderId>,
}

impl TraitorKnowledge {
    pub fn is_safe(&self, leader: LeaderId) -> bool {
        self.safe.contains(&leader)
    }

    pub fn is_traitor(&self, leader: LeaderId) -> bool {
        self.traitors.contains(&leader)
    }

    /// Neither known safe nor known traitor
    pub fn is_unknown(&self, leader: LeaderId) -> bool {
        !self.is_safe(leader) && !self.is_traitor(leader)
    }
}

/// Split leaders into known-safe and known-traitor against `opponent`
///
/// A traitor held by a third faction is harmless in this battle, so it
/// counts as safe here.
pub fn safe_or_traitor_leaders(game: &GameState, observer: Faction, opponent: Faction) -> TraitorKnowledge {
    let mut knowledge = TraitorKnowledge {
        safe: known_non_traitors(game, observer).into_iter().collect(),
        traitors: AHashSet::new(),
    };

    for (holder, leaders) in &game.revealed_traitors {
        if *holder == opponent {
            knowledge.traitors.extend(leaders.iter().copied());
        } else {
            knowledge.safe.extend(leaders.iter().copied());
        }
    }

    if let Some(told) = game.told_traitors.get(&observer) {
        for (holder, leader) in told {
            if *holder == opponent {
                knowledge.traitors.insert(*leader);
            } else {
                knowledge.safe.insert(*leader);
            }
        }
    }

    // A known traitor is never also safe
    let traitors = knowledge.traitors.clone();
    knowledge.safe.retain(|l| !traitors.contains(l));
    knowledge
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ForceCount;
    use crate::game::map::Map;
    use crate::game::player::Player;

    fn game() -> GameState {
        let mut atreides = Player::new(Faction::Atreides, 10, ForceCount::new(10, 0));
        atreides.traitors = vec![LeaderId(21)];
        atreides.discarded_traitors = vec![LeaderId(22), LeaderId(3)];
        atreides.ally = Some(Faction::Guild);
        let mut guild = Player::new(Faction::Guild, 5, ForceCount::new(15, 0));
        guild.discarded_traitors = vec![LeaderId(4)];
        guild.ally = Some(Faction::Atreides);
        let harkonnen = Player::new(Faction::Harkonnen, 10, ForceCount::new(10, 0));
        GameState::new(Map::new(), vec![atreides, guild, harkonnen])
    }

    #[test]
    fn test_known_non_traitors_include_ally_knowledge() {
        let game = game();
        let known = known_non_traitors(&game, Faction::Atreides);
        assert!(known.contains(&LeaderId(3)));
        assert!(known.contains(&LeaderId(4)));
        assert!(known.contains(&LeaderId(21)));
        assert!(!known.contains(&LeaderId(5)));
    }

    #[test]
    fn test_told_traitor_marks_leader() {
        let mut game = game();
        game.told_traitors
            .insert(Faction::Atreides, vec![(Faction::Harkonnen, LeaderId(1)), (Faction::Emperor, LeaderId(2))]);
        let knowledge = safe_or_traitor_leaders(&game, Faction::Atreides, Faction::Harkonnen);
        assert!(knowledge.is_traitor(LeaderId(1)));
        assert!(knowledge.is_safe(LeaderId(2)));
        assert!(knowledge.is_unknown(LeaderId(5)));
    }

    #[test]
    fn test_revealed_traitor_overrides_safe() {
        let mut game = game();
        game.public_non_traitors.insert(LeaderId(1));
        game.revealed_traitors
            .entry(Faction::Harkonnen)
            .or_default()
            .insert(LeaderId(1));
        let knowledge = safe_or_traitor_leaders(&game, Faction::Atreides, Faction::Harkonnen);
        assert!(knowledge.is_traitor(LeaderId(1)));
        assert!(!knowledge.is_safe(LeaderId(1)));
    }
}
