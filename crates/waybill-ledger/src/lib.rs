//! Conservation engine for Waybill.
//!
//! This crate checks that a transfer plan neither creates nor loses items.
//! It provides:
//! - `Ledger`, the per-location item count mutated by each trip
//! - `ConservationValidator`, which runs a plan and returns a verdict
//! - `ValidatorConfig` for the optional stricter checks
//! - `TripReplay`, a step-by-step ledger trace for diagnostics

pub mod config;
pub mod error;
pub mod ledger;
pub mod replay;
pub mod validation;

pub use config::ValidatorConfig;
pub use error::LedgerError;
pub use ledger::Ledger;
pub use replay::{ReplayResult, ReplayStep, TripReplay};
pub use validation::{validate, ConservationValidator, DeliveryReport, ViolationKind};
