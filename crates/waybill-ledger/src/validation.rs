use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;
use tracing::debug;
use waybill_types::{Location, Plan, Trip};

use crate::config::ValidatorConfig;
use crate::error::LedgerError;
use crate::ledger::Ledger;

/// Classification of a plan violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// A trip picked up from a location holding no items.
    InfeasiblePickup,
    /// A declared final destination ended with no items.
    IncompleteDelivery,
    /// Items remained somewhere other than a final destination.
    UnbalancedLeftover,
    /// A trip had no pick-up locations.
    MalformedTrip,
    /// A staging point reused a declared pick-up location (strict mode only).
    StagingOverlap,
    /// The plan exceeded the configured trip limit.
    TooManyTrips,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InfeasiblePickup => write!(f, "infeasible-pickup"),
            Self::IncompleteDelivery => write!(f, "incomplete-delivery"),
            Self::UnbalancedLeftover => write!(f, "unbalanced-leftover"),
            Self::MalformedTrip => write!(f, "malformed-trip"),
            Self::StagingOverlap => write!(f, "staging-overlap"),
            Self::TooManyTrips => write!(f, "too-many-trips"),
        }
    }
}

/// Outcome of a balanced plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    pub trips_applied: usize,
    /// Items the plan started with.
    pub items: u64,
    /// Items held by each final destination after the last trip.
    pub delivered: BTreeMap<Location, u64>,
}

impl DeliveryReport {
    /// Sum of all delivered items. Equals `items` for every report.
    pub fn delivered_total(&self) -> u64 {
        self.delivered.values().sum()
    }
}

/// Conservation check over a sequence of trips.
///
/// Runs the trips against a fresh [`Ledger`] and stops at the first
/// violation. A plan passes only if every pick-up was feasible, every final
/// destination holds at least one item, and nothing is left anywhere else.
#[derive(Clone, Debug, Default)]
pub struct ConservationValidator {
    config: ValidatorConfig,
}

impl ConservationValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Returns `true` if the plan moves every item into a final destination.
    pub fn validate(
        &self,
        initial_pickups: &[Location],
        final_destinations: &[Location],
        trips: &[Trip],
    ) -> bool {
        self.check(initial_pickups, final_destinations, trips).is_ok()
    }

    pub fn check_plan(&self, plan: &Plan) -> Result<DeliveryReport, LedgerError> {
        self.check(&plan.initial_pickups, &plan.final_destinations, &plan.trips)
    }

    /// Run the plan and report the first violation, if any.
    pub fn check(
        &self,
        initial_pickups: &[Location],
        final_destinations: &[Location],
        trips: &[Trip],
    ) -> Result<DeliveryReport, LedgerError> {
        let result = self.run(initial_pickups, final_destinations, trips);
        match &result {
            Ok(report) => debug!(
                trips = report.trips_applied,
                items = report.items,
                destinations = report.delivered.len(),
                "plan balanced"
            ),
            Err(e) => debug!(error = %e, "plan rejected"),
        }
        result
    }

    fn run(
        &self,
        initial_pickups: &[Location],
        final_destinations: &[Location],
        trips: &[Trip],
    ) -> Result<DeliveryReport, LedgerError> {
        let guard = TripGuard::new(&self.config, initial_pickups, final_destinations);
        guard.admit(trips.len())?;
        let mut ledger = Ledger::seed(initial_pickups);

        for (index, trip) in trips.iter().enumerate() {
            guard.check(index, trip)?;
            ledger.apply(index, trip)?;
            debug!(trip = index, route = %trip, "trip applied");
        }

        let mut delivered: BTreeMap<Location, u64> = BTreeMap::new();
        for location in final_destinations {
            if delivered.contains_key(location) {
                continue;
            }
            match ledger.deliver(location) {
                Some(quantity) if quantity > 0 => {
                    delivered.insert(location.clone(), quantity);
                }
                _ => {
                    return Err(LedgerError::IncompleteDelivery {
                        location: location.clone(),
                    })
                }
            }
        }

        if let Some((location, quantity)) = ledger.leftovers().first() {
            return Err(LedgerError::UnbalancedLeftover {
                location: (*location).clone(),
                quantity: *quantity,
            });
        }

        Ok(DeliveryReport {
            trips_applied: trips.len(),
            items: initial_pickups.len() as u64,
            delivered,
        })
    }
}

/// Configured plan-level limits, checked before the ledger sees a trip.
pub(crate) struct TripGuard<'a> {
    config: &'a ValidatorConfig,
    finals: HashSet<&'a Location>,
    pickups: HashSet<&'a Location>,
}

impl<'a> TripGuard<'a> {
    pub(crate) fn new(
        config: &'a ValidatorConfig,
        initial_pickups: &'a [Location],
        final_destinations: &'a [Location],
    ) -> Self {
        Self {
            config,
            finals: final_destinations.iter().collect(),
            pickups: initial_pickups.iter().collect(),
        }
    }

    /// Enforce the trip limit for a plan of `trips` trips.
    pub(crate) fn admit(&self, trips: usize) -> Result<(), LedgerError> {
        match self.config.max_trips {
            Some(limit) if trips > limit => Err(LedgerError::TooManyTrips {
                limit,
                actual: trips,
            }),
            _ => Ok(()),
        }
    }

    /// In strict mode, a non-final drop point must not be a pick-up point.
    pub(crate) fn check(&self, index: usize, trip: &Trip) -> Result<(), LedgerError> {
        if self.config.strict_staging
            && !self.finals.contains(&trip.drop)
            && self.pickups.contains(&trip.drop)
        {
            return Err(LedgerError::StagingOverlap {
                trip: index,
                location: trip.drop.clone(),
            });
        }
        Ok(())
    }
}

/// Check a plan with the default configuration.
///
/// Returns `true` iff every trip is feasible in order and all items end up
/// at the declared final destinations, each holding at least one.
pub fn validate(
    initial_pickups: &[Location],
    final_destinations: &[Location],
    trips: &[Trip],
) -> bool {
    ConservationValidator::default().validate(initial_pickups, final_destinations, trips)
}
