//! Per-agent memory carried between decisions
//!
//! Generators never write here directly. They leave `MemoryNote`s on the
//! decision context; the bot applies them only once the action they belong
//! to has been accepted by the host.

use crate::core::types::{LocationId, Turn};
use crate::game::actions::BattlePlanDraft;
use crate::logistics::shipment::ShipmentDecision;
use crate::valuation::survival::BattleIntel;

/// What the agent remembers about the battle it is planning
#[derive(Debug, Clone, PartialEq)]
pub struct BattleMemory {
    pub battle_id: u32,
    pub plan: Option<BattlePlanDraft>,
    /// What we knew about the opponent when the plan was drafted
    pub intel: BattleIntel,
}

/// Turn-scoped counters and the current battle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentMemory {
    pub turn: Turn,
    /// Tleilaxu quoted a revival price this turn
    pub price_set_earlier: bool,
    pub turn_when_revival_requested: Option<Turn>,
    /// Rule and destination of this turn's shipment
    pub last_shipment: Option<(ShipmentDecision, LocationId)>,
    pub battle: Option<BattleMemory>,
}

/// A change to memory requested by a generator
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryNote {
    PriceSet,
    RevivalRequested(Turn),
    Shipment(ShipmentDecision, LocationId),
    BattlePlanned {
        battle_id: u32,
        draft: BattlePlanDraft,
        intel: BattleIntel,
    },
}

impl AgentMemory {
    /// Clear turn-scoped state when a new turn starts
    pub fn begin_turn(&mut self, turn: Turn) {
        if turn != self.turn {
            self.turn = turn;
            self.price_set_earlier = false;
            self.last_shipment = None;
        }
    }

    /// Track the battle with this id, forgetting any earlier one
    pub fn begin_battle(&mut self, battle_id: u32) {
        if self.battle.as_ref().map(|b| b.battle_id) != Some(battle_id) {
            self.battle = Some(BattleMemory {
                battle_id,
                plan: None,
                intel: BattleIntel::default(),
            });
        }
    }

    pub fn end_battle(&mut self) {
        self.battle = None;
    }

    /// Cached plan for this battle, if it was drafted with the same intel
    pub fn plan_for(&self, battle_id: u32, intel: &BattleIntel) -> Option<BattlePlanDraft> {
        self.battle
            .as_ref()
            .filter(|b| b.battle_id == battle_id && b.intel == *intel)
            .and_then(|b| b.plan)
    }

    pub fn revival_requested_this_turn(&self) -> bool {
        self.turn_when_revival_requested == Some(self.turn)
    }

    pub fn apply(&mut self, note: MemoryNote) {
        match note {
            MemoryNote::PriceSet => self.price_set_earlier = true,
            MemoryNote::RevivalRequested(turn) => self.turn_when_revival_requested = Some(turn),
            MemoryNote::Shipment(decision, location) => self.last_shipment = Some((decision, location)),
            MemoryNote::BattlePlanned { battle_id, draft, intel } => {
                self.battle = Some(BattleMemory {
                    battle_id,
                    plan: Some(draft),
                    intel,
                });
            }
        }
    }
}
