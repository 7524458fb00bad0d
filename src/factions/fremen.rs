//! Fremen: worm riding and free placement near the home sietch

use tracing::debug;

use crate::agent::context::DecisionContext;
use crate::core::error::GeneratorFault;
use crate::core::types::{Faction, LocationId, Tier};
use crate::factions::{unhandled, FactionStrategy};
use crate::game::actions::{Action, ActionKind};
use crate::logistics::{expected_storm_moves, is_storm_safe};

/// Fremen may place starting forces this many steps from their home
const PLACEMENT_RANGE: u32 = 2;

const TRIGGERS: &[(Tier, ActionKind)] = &[
    (Tier::Middle, ActionKind::WormRide),
    (Tier::Middle, ActionKind::FremenPlacement),
];

pub struct FremenStrategy;

impl FactionStrategy for FremenStrategy {
    fn faction(&self) -> Faction {
        Faction::Fremen
    }

    fn triggers(&self) -> &'static [(Tier, ActionKind)] {
        TRIGGERS
    }

    fn try_act(&self, trigger: ActionKind, ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
        match trigger {
            ActionKind::WormRide => ride_worm(ctx),
            ActionKind::FremenPlacement => place(ctx),
            other => Err(unhandled(self.faction(), other)),
        }
    }
}

/// First vacant stronghold the storm will not reach, in board order
fn safe_vacant_stronghold(ctx: &DecisionContext<'_>, within: Option<(LocationId, u32)>) -> Option<LocationId> {
    let game = ctx.game;
    let moves = expected_storm_moves(game, ctx.faction, ctx.params);
    game.map
        .strongholds()
        .filter(|l| game.is_vacant(l.id))
        .filter(|l| is_storm_safe(game, l.id, moves))
        .filter(|l| match within {
            Some((origin, range)) => game.map.distance(origin, l.id).map(|d| d <= range).unwrap_or(false),
            None => true,
        })
        .map(|l| l.id)
        .next()
}

/// Ride the worm into a vacant stronghold when enough of us are aboard
fn ride_worm(ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
    let Some(from) = ctx.game.pending.worm_at else {
        return Ok(None);
    };
    let aboard = ctx.player()?.forces_in(from).total();
    if aboard < ctx.params.fremen_min_forces_to_ride {
        return Ok(None);
    }
    let Some(to) = safe_vacant_stronghold(ctx, None) else {
        return Ok(None);
    };
    debug!(from = from.0, to = to.0, aboard, "Riding the worm");
    Ok(Some(Action::RideWorm { from, to }))
}

/// Put every reserve force on one spot near home
///
/// A vacant storm-safe stronghold if one is in range, else the richest
/// spice field in range, else home itself.
fn place(ctx: &mut DecisionContext<'_>) -> Result<Option<Action>, GeneratorFault> {
    let reserves = ctx.player()?.reserves;
    if reserves.is_empty() {
        return Ok(None);
    }
    let game = ctx.game;
    let home = game
        .map
        .home_of(Faction::Fremen)
        .ok_or_else(|| GeneratorFault::Inconsistent("no Fremen home on the map".into()))?;

    let target = safe_vacant_stronghold(ctx, Some((home, PLACEMENT_RANGE))).or_else(|| {
        let mut richest: Option<(LocationId, u32)> = None;
        for location in game.map.locations() {
            let in_range = game
                .map
                .distance(home, location.id)
                .map(|d| d <= PLACEMENT_RANGE)
                .unwrap_or(false);
            let spice = game.spice_at(location.id);
            if in_range
                && spice > 0
                && !game.map.in_storm(location.id, game.storm_sector)
                && richest.map(|(_, best)| spice > best).unwrap_or(true)
            {
                richest = Some((location.id, spice));
            }
        }
        richest.map(|(id, _)| id)
    });

    let location = target.unwrap_or(home);
    Ok(Some(Action::PlaceFremen {
        placements: vec![(location, reserves)],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::memory::AgentMemory;
    use crate::agent::testing::{
        context, legal, player_mut, two_player_game, FUNERAL_PLAIN, HABBANYA, SIETCH_TABR,
    };
    use crate::core::config::BotParameters;
    use crate::core::types::ForceCount;
    use crate::game::state::GameState;

    fn run(game: &GameState, trigger: ActionKind) -> Option<Action> {
        let params = BotParameters::for_faction(Faction::Fremen);
        let memory = AgentMemory::default();
        let legal = legal(&[trigger]);
        let mut ctx = context(game, Faction::Fremen, &params, &memory, &legal);
        FremenStrategy.try_act(trigger, &mut ctx).unwrap()
    }

    fn game() -> GameState {
        let mut game = two_player_game(Faction::Fremen, Faction::Harkonnen);
        for loc in [crate::agent::testing::ARRAKEEN, crate::agent::testing::CARTHAG] {
            player_mut(&mut game, Faction::Harkonnen).on_board.insert(loc, ForceCount::new(2, 0));
        }
        game
    }

    #[test]
    fn test_rides_worm_to_vacant_stronghold() {
        let mut game = game();
        game.pending.worm_at = Some(FUNERAL_PLAIN);
        player_mut(&mut game, Faction::Fremen).on_board.insert(FUNERAL_PLAIN, ForceCount::new(3, 1));
        assert_eq!(
            run(&game, ActionKind::WormRide),
            Some(Action::RideWorm { from: FUNERAL_PLAIN, to: SIETCH_TABR })
        );
    }

    #[test]
    fn test_too_few_riders_stay() {
        let mut game = game();
        game.pending.worm_at = Some(FUNERAL_PLAIN);
        player_mut(&mut game, Faction::Fremen).on_board.insert(FUNERAL_PLAIN, ForceCount::new(1, 0));
        assert_eq!(run(&game, ActionKind::WormRide), None);
    }

    #[test]
    fn test_places_in_vacant_sietch() {
        let game = game();
        assert_eq!(
            run(&game, ActionKind::FremenPlacement),
            Some(Action::PlaceFremen {
                placements: vec![(SIETCH_TABR, ForceCount::new(10, 0))]
            })
        );
    }

    #[test]
    fn test_places_on_spice_when_strongholds_taken() {
        let mut game = game();
        for loc in [SIETCH_TABR, HABBANYA] {
            player_mut(&mut game, Faction::Harkonnen).on_board.insert(loc, ForceCount::new(1, 0));
        }
        game.spice_on_board.insert(FUNERAL_PLAIN, 6);
        assert_eq!(
            run(&game, ActionKind::FremenPlacement),
            Some(Action::PlaceFremen {
                placements: vec![(FUNERAL_PLAIN, ForceCount::new(10, 0))]
            })
        );
    }
}
