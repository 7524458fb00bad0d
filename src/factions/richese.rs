//! Richese: no-field shipments and the black market

use tracing::debug;

use crate::agent::context::DecisionContext;
use crate::core::error::GeneratorFault;
use crate::core::types::{Faction, Tier};
use crate::factions::{unhandled, FactionStrategy};
use crate::game::actions::{Action, ActionKind};
use crate::game::cards::TreacheryCard;
use crate::knowledge::card_quality::QualityCache;
use crate::logistics::{expected_storm_moves, is_storm_safe};

/// Cards above this quality are kept rather than sold
const BLACK_MARKET_MAX_QUALITY: u8 = 2;

const TRIGGERS: &[(Tier, ActionKind)] = &[
    (Tier::Middle, ActionKind::NoFieldShipment),
    (Tier::Low, ActionKind::BlackMarketSale),
];

pub struct RicheseStrategy;

impl FactionStrategy for RicheseStrategy {
    fn faction(&self) -> Faction {
        Faction::Richese
    }

    fn triggers(&self) -> &'static [(Tier, ActionKind)] {
        TRIGGERS
    }

    fn try_act(&self, trigger: ActionKind, ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
        match trigger {
            ActionKind::NoFieldShipment => no_field_shipment(ctx),
            ActionKind::BlackMarketSale => black_market_sale(ctx),
            other => Err(unhandled(self.faction(), other)),
        }
    }
}

/// Drop a face-down token into a vacant, storm-safe stronghold
fn no_field_shipment(ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
    let player = ctx.player()?;
    let game = ctx.game;
    let value = ctx.params.richese_no_field_value;
    if player.reserves.total() < value as u32 {
        return Ok(None);
    }
    let moves = expected_storm_moves(game, ctx.faction, ctx.params);

    for to in game.valid_shipment_locations(ctx.faction) {
        let Some(location) = game.map.get(to) else {
            continue;
        };
        if !location.is_stronghold() || !game.is_vacant(to) || !is_storm_safe(game, to, moves) {
            continue;
        }
        let spice = game.shipment_cost(ctx.faction, to, value as u32);
        if spice > player.shipment_budget() {
            continue;
        }
        debug!(to = to.0, value, spice, "No-field shipment");
        return Ok(Some(Action::NoFieldShip { to, value, spice }));
    }
    Ok(None)
}

/// Sell the weakest black-market card we would not miss
fn black_market_sale(ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
    let hand = &ctx.player()?.cards;
    let mut cache = QualityCache::new(ctx.faction, hand);
    let mut worst: Option<(TreacheryCard, u8)> = None;
    for card in &ctx.game.pending.black_market_candidates {
        let quality = cache.quality(card);
        if quality <= BLACK_MARKET_MAX_QUALITY && worst.map(|(_, q)| quality < q).unwrap_or(true) {
            worst = Some((*card, quality));
        }
    }
    Ok(worst.map(|(card, _)| Action::SellBlackMarket { card: card.id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::memory::AgentMemory;
    use crate::agent::testing::{context, legal, player_mut, two_player_game, ARRAKEEN, CARTHAG};
    use crate::core::config::BotParameters;
    use crate::core::types::{CardId, ForceCount};
    use crate::game::cards::CardKind;
    use crate::game::state::GameState;

    fn run(game: &GameState, trigger: ActionKind) -> Option<Action> {
        let params = BotParameters::for_faction(Faction::Richese);
        let memory = AgentMemory::default();
        let legal = legal(&[trigger]);
        let mut ctx = context(game, Faction::Richese, &params, &memory, &legal);
        RicheseStrategy.try_act(trigger, &mut ctx).unwrap()
    }

    #[test]
    fn test_no_field_into_first_vacant_stronghold() {
        let mut game = two_player_game(Faction::Richese, Faction::Harkonnen);
        player_mut(&mut game, Faction::Harkonnen).on_board.insert(ARRAKEEN, ForceCount::new(3, 0));
        assert_eq!(
            run(&game, ActionKind::NoFieldShipment),
            Some(Action::NoFieldShip {
                to: CARTHAG,
                value: 3,
                spice: 3
            })
        );
    }

    #[test]
    fn test_no_field_needs_spice() {
        let mut game = two_player_game(Faction::Richese, Faction::Harkonnen);
        player_mut(&mut game, Faction::Richese).resources = 2;
        assert_eq!(run(&game, ActionKind::NoFieldShipment), None);
    }

    #[test]
    fn test_sells_weakest_card() {
        let mut game = two_player_game(Faction::Richese, Faction::Harkonnen);
        game.pending.black_market_candidates = vec![
            TreacheryCard::new(4, CardKind::Lasgun),
            TreacheryCard::new(5, CardKind::FamilyAtomics),
            TreacheryCard::new(6, CardKind::Useless),
        ];
        assert_eq!(
            run(&game, ActionKind::BlackMarketSale),
            Some(Action::SellBlackMarket { card: CardId(6) })
        );
    }
}
