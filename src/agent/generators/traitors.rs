//! Traitor selection at setup and traitor calls in battle

use tracing::info;

use crate::agent::context::DecisionContext;
use crate::agent::generators::Proposal;
use crate::core::types::LeaderId;
use crate::game::actions::Action;
use crate::game::permissions::Permission;

/// Keep the most valuable offered leader that is not one of ours
pub fn pick_traitor(ctx: &mut DecisionContext<'_>) -> Proposal {
    let player = ctx.player()?;
    let mut best: Option<(LeaderId, u8)> = None;
    for id in &ctx.game.pending.offered_traitors {
        if player.leader(*id).is_some() {
            continue;
        }
        let value = ctx.game.leader(*id).map(|l| l.value).unwrap_or(0);
        if best.map(|(_, b)| value > b).unwrap_or(true) {
            best = Some((*id, value));
        }
    }
    Ok(best.map(|(leader, _)| Action::PickTraitor { leader }))
}

/// Call the traitor when the opponent's revealed leader is ours to call
///
/// Traitors held by the ally count when the ally granted us their use.
pub fn call_traitor(ctx: &mut DecisionContext<'_>) -> Proposal {
    let Some(battle) = ctx.game.battle.as_ref() else {
        return Ok(None);
    };
    let Some(opponent) = battle.opponent_of(ctx.faction) else {
        return Ok(None);
    };
    let Some(leader) = battle.revealed_leader(opponent) else {
        return Ok(None);
    };
    let player = ctx.player()?;

    let own = player.holds_traitor(leader);
    let via_ally = player.permissions_from_ally.contains(Permission::UseAllyTraitors)
        && player
            .ally
            .and_then(|ally| ctx.game.player(ally))
            .map(|ally| ally.holds_traitor(leader))
            .unwrap_or(false);
    if !own && !via_ally {
        return Ok(None);
    }
    info!(faction = %ctx.faction, opponent = %opponent, leader = leader.0, via_ally, "Calling traitor");
    Ok(Some(Action::CallTraitor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::memory::AgentMemory;
    use crate::agent::testing::{context, legal, player_mut, two_player_game, CARTHAG};
    use crate::core::config::BotParameters;
    use crate::core::types::{Faction, ForceCount};
    use crate::game::actions::ActionKind;
    use crate::game::battle::BattleSituation;
    use crate::game::permissions::PermissionSet;
    use crate::game::player::Player;
    use crate::game::state::GameState;

    fn battle_game() -> GameState {
        let mut game = two_player_game(Faction::Atreides, Faction::Emperor);
        game.battle = Some(BattleSituation {
            id: 5,
            aggressor: Faction::Atreides,
            defender: Faction::Emperor,
            location: CARTHAG,
            aggressor_committed: true,
            defender_committed: true,
            pending_reveals: Vec::new(),
            voice: None,
            prescience: None,
            clairvoyance: None,
            revealed_leaders: vec![(Faction::Emperor, LeaderId(11))],
        });
        game
    }

    fn call(game: &GameState) -> Option<Action> {
        let params = BotParameters::default();
        let memory = AgentMemory::default();
        let legal = legal(&[ActionKind::TraitorCall]);
        let mut ctx = context(game, Faction::Atreides, &params, &memory, &legal);
        call_traitor(&mut ctx).unwrap()
    }

    #[test]
    fn test_calls_own_traitor() {
        let mut game = battle_game();
        assert_eq!(call(&game), None);
        player_mut(&mut game, Faction::Atreides).traitors = vec![LeaderId(11)];
        assert_eq!(call(&game), Some(Action::CallTraitor));
    }

    #[test]
    fn test_calls_ally_traitor_with_permission() {
        let mut game = battle_game();
        let mut harkonnen = Player::new(Faction::Harkonnen, 5, ForceCount::new(10, 0));
        harkonnen.traitors = vec![LeaderId(11)];
        harkonnen.ally = Some(Faction::Atreides);
        game.players.push(harkonnen);
        player_mut(&mut game, Faction::Atreides).ally = Some(Faction::Harkonnen);
        assert_eq!(call(&game), None);

        player_mut(&mut game, Faction::Atreides).permissions_from_ally =
            PermissionSet::of(&[Permission::UseAllyTraitors]);
        assert_eq!(call(&game), Some(Action::CallTraitor));
    }

    #[test]
    fn test_picks_most_valuable_foreign_leader() {
        let mut game = two_player_game(Faction::Atreides, Faction::Emperor);
        game.pending.offered_traitors = vec![LeaderId(1), LeaderId(12), LeaderId(11)];
        let params = BotParameters::default();
        let memory = AgentMemory::default();
        let legal = legal(&[ActionKind::TraitorPick]);
        let mut ctx = context(&game, Faction::Atreides, &params, &memory, &legal);
        assert_eq!(pick_traitor(&mut ctx).unwrap(), Some(Action::PickTraitor { leader: LeaderId(11) }));
    }
}
