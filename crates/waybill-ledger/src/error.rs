use waybill_types::Location;

use crate::validation::ViolationKind;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("trip {trip} picks up from {location}, which holds no items")]
    InfeasiblePickup { trip: usize, location: Location },

    #[error("final destination {location} received no items")]
    IncompleteDelivery { location: Location },

    #[error("{quantity} item(s) left behind at {location}")]
    UnbalancedLeftover { location: Location, quantity: u64 },

    #[error("trip {trip} is malformed: {reason}")]
    MalformedTrip { trip: usize, reason: String },

    #[error("trip {trip} stages items at pick-up point {location}")]
    StagingOverlap { trip: usize, location: Location },

    #[error("plan has {actual} trips, limit is {limit}")]
    TooManyTrips { limit: usize, actual: usize },

    #[error("invalid validator config: {0}")]
    Config(String),
}

impl LedgerError {
    /// The plan violation this error reports, if it is one.
    pub fn kind(&self) -> Option<ViolationKind> {
        match self {
            Self::InfeasiblePickup { .. } => Some(ViolationKind::InfeasiblePickup),
            Self::IncompleteDelivery { .. } => Some(ViolationKind::IncompleteDelivery),
            Self::UnbalancedLeftover { .. } => Some(ViolationKind::UnbalancedLeftover),
            Self::MalformedTrip { .. } => Some(ViolationKind::MalformedTrip),
            Self::StagingOverlap { .. } => Some(ViolationKind::StagingOverlap),
            Self::TooManyTrips { .. } => Some(ViolationKind::TooManyTrips),
            Self::Config(_) => None,
        }
    }

    /// Index of the trip that triggered the error, when one did.
    pub fn trip(&self) -> Option<usize> {
        match self {
            Self::InfeasiblePickup { trip, .. }
            | Self::MalformedTrip { trip, .. }
            | Self::StagingOverlap { trip, .. } => Some(*trip),
            _ => None,
        }
    }
}
