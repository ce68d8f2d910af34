use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::location::Location;

/// One atomic transfer: every item at `pick_up` moves to `drop`.
///
/// Each entry in `pick_up` removes exactly one item from that location, so a
/// location listed twice gives up two items. The drop point receives
/// `pick_up.len()` items once all pick-ups have been taken.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// Source locations, in pick-up order.
    #[serde(rename = "pickUp", alias = "pick_up")]
    pub pick_up: Vec<Location>,
    /// The single destination of this trip.
    pub drop: Location,
}

impl Trip {
    /// Create a trip, rejecting an empty pick-up list.
    pub fn new(
        pick_up: impl IntoIterator<Item = impl Into<Location>>,
        drop: impl Into<Location>,
    ) -> Result<Self, TypeError> {
        let pick_up: Vec<Location> = pick_up.into_iter().map(Into::into).collect();
        if pick_up.is_empty() {
            return Err(TypeError::EmptyPickup);
        }
        Ok(Self {
            pick_up,
            drop: drop.into(),
        })
    }

    /// A trip carrying a single item from `from` to `to`.
    pub fn single(from: impl Into<Location>, to: impl Into<Location>) -> Self {
        Self {
            pick_up: vec![from.into()],
            drop: to.into(),
        }
    }

    /// Number of items carried.
    pub fn len(&self) -> usize {
        self.pick_up.len()
    }

    /// Returns `true` if the trip carries nothing.
    ///
    /// Such a trip can only be built through deserialization or by writing
    /// the fields directly; validators treat it as malformed.
    pub fn is_empty(&self) -> bool {
        self.pick_up.is_empty()
    }

    /// Returns `true` if the drop point is also one of the sources.
    pub fn is_self_loop(&self) -> bool {
        self.pick_up.contains(&self.drop)
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sources: Vec<&str> = self.pick_up.iter().map(Location::as_str).collect();
        write!(f, "[{}] -> {}", sources.join(", "), self.drop)
    }
}
