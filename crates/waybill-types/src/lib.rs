//! Foundation types for Waybill.
//!
//! This crate provides the identity and structural types used to describe a
//! transfer plan. Every other Waybill crate depends on `waybill-types`.
//!
//! # Key Types
//!
//! - [`Location`] — Opaque name of a pick-up, staging, or destination point
//! - [`Trip`] — Atomic move of one or more items into a single drop point
//! - [`Plan`] — Ordered trips plus the declared pick-up and destination sets

pub mod error;
pub mod location;
pub mod plan;
pub mod trip;

pub use error::TypeError;
pub use location::Location;
pub use plan::{Plan, PlanFormat};
pub use trip::Trip;
