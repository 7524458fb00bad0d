//! Charity and hand-size discards

use crate::agent::context::DecisionContext;
use crate::agent::generators::Proposal;
use crate::game::actions::Action;
use crate::knowledge::card_quality::QualityCache;

/// Spice at or below which charity is claimed
const CHARITY_MAX_SPICE: u32 = 1;

pub fn charity(ctx: &mut DecisionContext<'_>) -> Proposal {
    let player = ctx.player()?;
    Ok((player.resources <= CHARITY_MAX_SPICE).then_some(Action::ClaimCharity))
}

/// Drop the weakest card while over the hand limit
pub fn discard(ctx: &mut DecisionContext<'_>) -> Proposal {
    let player = ctx.player()?;
    if player.cards.len() <= player.max_cards as usize {
        return Ok(None);
    }
    let mut cache = QualityCache::new(ctx.faction, &player.cards);
    Ok(cache.worst().map(|card| Action::Discard { card: card.id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::memory::AgentMemory;
    use crate::agent::testing::{context, legal, player_mut, two_player_game};
    use crate::core::config::BotParameters;
    use crate::core::types::{CardId, Faction};
    use crate::game::actions::ActionKind;
    use crate::game::cards::{CardKind, TreacheryCard};

    #[test]
    fn test_charity_when_broke() {
        let mut game = two_player_game(Faction::Atreides, Faction::Harkonnen);
        let params = BotParameters::default();
        let memory = AgentMemory::default();
        let legal = legal(&[ActionKind::Charity]);
        {
            let mut ctx = context(&game, Faction::Atreides, &params, &memory, &legal);
            assert_eq!(charity(&mut ctx).unwrap(), None);
        }
        player_mut(&mut game, Faction::Atreides).resources = 1;
        let mut ctx = context(&game, Faction::Atreides, &params, &memory, &legal);
        assert_eq!(charity(&mut ctx).unwrap(), Some(Action::ClaimCharity));
    }

    #[test]
    fn test_discards_worst_when_over_limit() {
        let mut game = two_player_game(Faction::Atreides, Faction::Harkonnen);
        player_mut(&mut game, Faction::Atreides).cards = vec![
            TreacheryCard::new(1, CardKind::Lasgun),
            TreacheryCard::new(2, CardKind::Shield),
            TreacheryCard::new(3, CardKind::Useless),
            TreacheryCard::new(4, CardKind::Karama),
            TreacheryCard::new(5, CardKind::PoisonWeapon),
        ];
        let params = BotParameters::default();
        let memory = AgentMemory::default();
        let legal = legal(&[ActionKind::Discard]);
        let mut ctx = context(&game, Faction::Atreides, &params, &memory, &legal);
        assert_eq!(discard(&mut ctx).unwrap(), Some(Action::Discard { card: CardId(3) }));
    }
}
