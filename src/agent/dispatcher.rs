//! Priority dispatch over registered generators
//!
//! Generators are grouped by tier and tried in registration order. The
//! first proposal the host validator accepts is returned; faults and
//! rejections are logged and the next generator gets its turn.

use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

use crate::agent::context::DecisionContext;
use crate::agent::generators::Proposal;
use crate::agent::memory::MemoryNote;
use crate::core::error::GeneratorFault;
use crate::core::types::Tier;
use crate::game::actions::{Action, ActionKind, ActionValidator};

type BoxedGenerator = Box<dyn Fn(&mut DecisionContext<'_>) -> Proposal + Send + Sync>;

struct Candidate {
    kind: ActionKind,
    name: &'static str,
    generate: BoxedGenerator,
}

/// The accepted action and the memory changes that come with it
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub action: Action,
    pub notes: Vec<MemoryNote>,
}

#[derive(Default)]
pub struct Dispatcher {
    tiers: BTreeMap<Tier, Vec<Candidate>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a generator to `tier`
    pub fn register<F>(&mut self, tier: Tier, kind: ActionKind, name: &'static str, generate: F)
    where
        F: Fn(&mut DecisionContext<'_>) -> Proposal + Send + Sync + 'static,
    {
        self.tiers.entry(tier).or_default().push(Candidate {
            kind,
            name,
            generate: Box::new(generate),
        });
    }

    /// Registered generator names for a tier, in try order
    pub fn names(&self, tier: Tier) -> Vec<&'static str> {
        self.tiers
            .get(&tier)
            .map(|c| c.iter().map(|c| c.name).collect())
            .unwrap_or_default()
    }

    /// Try every legal generator of `tier` in order; first valid wins
    pub fn select_action(
        &self,
        tier: Tier,
        ctx: &mut DecisionContext<'_>,
        validator: &mut dyn ActionValidator,
    ) -> Option<Selection> {
        let candidates = self.tiers.get(&tier)?;

        for candidate in candidates {
            if !ctx.is_legal(candidate.kind) {
                continue;
            }
            ctx.discard_notes();

            let action = match (candidate.generate)(ctx) {
                Ok(Some(action)) => action,
                Ok(None) => continue,
                Err(fault) => {
                    warn!(faction = %ctx.faction, ?tier, generator = candidate.name, %fault, "Generator fault");
                    continue;
                }
            };

            if action.kind() != candidate.kind {
                let fault = GeneratorFault::Inconsistent(format!(
                    "{} proposed {:?} for {:?}",
                    candidate.name,
                    action.kind(),
                    candidate.kind
                ));
                warn!(faction = %ctx.faction, ?tier, generator = candidate.name, %fault, "Generator fault");
                continue;
            }

            match validator.execute(&action, false, false) {
                Ok(()) => {
                    debug!(faction = %ctx.faction, ?tier, generator = candidate.name, ?action, "Action selected");
                    return Some(Selection {
                        action,
                        notes: ctx.take_notes(),
                    });
                }
                Err(err) => {
                    debug!(faction = %ctx.faction, ?tier, generator = candidate.name, %err, "Action rejected");
                }
            }
        }

        ctx.discard_notes();
        trace!(faction = %ctx.faction, ?tier, "No action at this tier");
        None
    }
}
