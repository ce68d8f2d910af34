use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;
use waybill_types::{Location, Plan, Trip};

use crate::config::ValidatorConfig;
use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::validation::TripGuard;

/// Ledger state after one applied trip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReplayStep {
    pub index: usize,
    pub trip: Trip,
    pub state: BTreeMap<Location, u64>,
}

/// Result of replaying a plan trip by trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub applied_trips: usize,
    pub steps: Vec<ReplayStep>,
    /// The trip that stopped the replay, if one did.
    pub halted: Option<LedgerError>,
    /// Ledger after the last applied trip.
    pub state: BTreeMap<Location, u64>,
}

impl ReplayResult {
    /// Returns `true` if every trip in the plan was applied.
    pub fn is_complete(&self) -> bool {
        self.halted.is_none()
    }

    /// Returns `true` if every recorded state holds exactly `items` items.
    pub fn conserves(&self, items: u64) -> bool {
        self.steps
            .iter()
            .all(|step| step.state.values().sum::<u64>() == items)
            && self.state.values().sum::<u64>() == items
    }
}

/// Trip-by-trip ledger replay.
///
/// Unlike validation, replay does not judge the final state. It applies the
/// trips in order, records the ledger after each one, and stops at the
/// first trip that cannot be applied. Configured limits halt the replay the
/// same way they fail validation.
#[derive(Clone, Debug, Default)]
pub struct TripReplay {
    config: ValidatorConfig,
}

impl TripReplay {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn replay(&self, plan: &Plan) -> ReplayResult {
        let guard = TripGuard::new(
            &self.config,
            &plan.initial_pickups,
            &plan.final_destinations,
        );
        let mut ledger = Ledger::seed(&plan.initial_pickups);
        let mut steps = Vec::with_capacity(plan.trips.len());
        let mut halted = guard.admit(plan.trips.len()).err();

        if halted.is_none() {
            for (index, trip) in plan.trips.iter().enumerate() {
                let applied = guard
                    .check(index, trip)
                    .and_then(|()| ledger.apply(index, trip));
                if let Err(e) = applied {
                    halted = Some(e);
                    break;
                }
                steps.push(ReplayStep {
                    index,
                    trip: trip.clone(),
                    state: ledger.snapshot(),
                });
            }
        }
        if let Some(e) = &halted {
            debug!(applied = steps.len(), error = %e, "replay halted");
        }

        ReplayResult {
            applied_trips: steps.len(),
            steps,
            halted,
            state: ledger.snapshot(),
        }
    }
}
