use std::collections::{BTreeMap, HashMap};

use waybill_types::{Location, Trip};

use crate::error::LedgerError;

/// Item counts per location during a single validation run.
///
/// Counts never go negative: [`take`](Ledger::take) refuses to remove an
/// item from a location that holds none. An absent entry reads as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    counts: HashMap<Location, u64>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a ledger with one item per occurrence of each location.
    pub fn seed<'a>(pickups: impl IntoIterator<Item = &'a Location>) -> Self {
        let mut ledger = Self::new();
        for location in pickups {
            ledger.credit(location, 1);
        }
        ledger
    }

    /// Items currently at `location`.
    pub fn quantity(&self, location: &Location) -> u64 {
        self.counts.get(location).copied().unwrap_or(0)
    }

    /// Remove one item from `location` on behalf of trip `trip`.
    pub fn take(&mut self, trip: usize, location: &Location) -> Result<(), LedgerError> {
        match self.counts.get_mut(location) {
            Some(quantity) if *quantity > 0 => {
                *quantity -= 1;
                Ok(())
            }
            _ => Err(LedgerError::InfeasiblePickup {
                trip,
                location: location.clone(),
            }),
        }
    }

    /// Add `quantity` items to `location`.
    pub fn credit(&mut self, location: &Location, quantity: u64) {
        *self.counts.entry(location.clone()).or_insert(0) += quantity;
    }

    /// Apply a whole trip: take every pick-up, then credit the drop point.
    ///
    /// The trip is atomic. If any pick-up fails, the items already taken are
    /// restored and the ledger is left as it was.
    pub fn apply(&mut self, index: usize, trip: &Trip) -> Result<(), LedgerError> {
        if trip.is_empty() {
            return Err(LedgerError::MalformedTrip {
                trip: index,
                reason: "no pick-up locations".into(),
            });
        }

        for (taken, location) in trip.pick_up.iter().enumerate() {
            if let Err(e) = self.take(index, location) {
                for restored in &trip.pick_up[..taken] {
                    self.credit(restored, 1);
                }
                return Err(e);
            }
        }

        self.credit(&trip.drop, trip.len() as u64);
        Ok(())
    }

    /// Remove `location` from the ledger, returning what it held.
    pub fn deliver(&mut self, location: &Location) -> Option<u64> {
        self.counts.remove(location)
    }

    /// Locations still holding items, ordered by name.
    pub fn leftovers(&self) -> Vec<(&Location, u64)> {
        let mut rest: Vec<(&Location, u64)> = self
            .counts
            .iter()
            .filter(|(_, quantity)| **quantity > 0)
            .map(|(location, quantity)| (location, *quantity))
            .collect();
        rest.sort_by(|a, b| a.0.cmp(b.0));
        rest
    }

    /// Ordered view of every location holding items.
    pub fn snapshot(&self) -> BTreeMap<Location, u64> {
        self.counts
            .iter()
            .filter(|(_, quantity)| **quantity > 0)
            .map(|(location, quantity)| (location.clone(), *quantity))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(name: &str) -> Location {
        Location::from(name)
    }

    #[test]
    fn seed_counts_occurrences() {
        let pickups = [loc("A"), loc("B"), loc("A")];
        let ledger = Ledger::seed(&pickups);
        assert_eq!(ledger.quantity(&loc("A")), 2);
        assert_eq!(ledger.quantity(&loc("B")), 1);
        assert_eq!(ledger.quantity(&loc("Z")), 0);
        assert_eq!(ledger.snapshot().values().sum::<u64>(), 3);
    }

    #[test]
    fn take_from_empty_location_fails() {
        let mut ledger = Ledger::seed(&[loc("A")]);
        ledger.take(0, &loc("A")).unwrap();
        let err = ledger.take(1, &loc("A")).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InfeasiblePickup {
                trip: 1,
                location: loc("A"),
            }
        );
        assert_eq!(ledger.quantity(&loc("A")), 0);
    }

    #[test]
    fn apply_moves_every_pickup_to_drop() {
        let mut ledger = Ledger::seed(&[loc("A"), loc("B")]);
        ledger.apply(0, &Trip::new(["A", "B"], "W").unwrap()).unwrap();
        assert_eq!(ledger.quantity(&loc("W")), 2);
        assert_eq!(ledger.quantity(&loc("A")), 0);
        assert_eq!(ledger.snapshot().values().sum::<u64>(), 2);
    }

    #[test]
    fn failed_apply_restores_partial_pickups() {
        let mut ledger = Ledger::seed(&[loc("A"), loc("B")]);
        let before = ledger.clone();
        let err = ledger
            .apply(3, &Trip::new(["A", "B", "B"], "W").unwrap())
            .unwrap_err();
        assert_eq!(err.trip(), Some(3));
        assert_eq!(ledger, before);
    }

    #[test]
    fn apply_rejects_empty_trip() {
        let mut ledger = Ledger::new();
        let trip = Trip {
            pick_up: vec![],
            drop: loc("C"),
        };
        let err = ledger.apply(0, &trip).unwrap_err();
        assert!(matches!(err, LedgerError::MalformedTrip { trip: 0, .. }));
        assert!(ledger.snapshot().is_empty());
    }

    #[test]
    fn self_loop_needs_stock_but_nets_zero() {
        let mut empty = Ledger::new();
        assert!(empty.apply(0, &Trip::single("W", "W")).is_err());

        let mut ledger = Ledger::seed(&[loc("W")]);
        ledger.apply(0, &Trip::single("W", "W")).unwrap();
        assert_eq!(ledger.quantity(&loc("W")), 1);
    }

    #[test]
    fn deliver_removes_entry() {
        let mut ledger = Ledger::seed(&[loc("C"), loc("C")]);
        assert_eq!(ledger.deliver(&loc("C")), Some(2));
        assert_eq!(ledger.deliver(&loc("C")), None);
        assert!(ledger.snapshot().is_empty());
    }

    #[test]
    fn leftovers_skip_drained_locations_and_sort() {
        let mut ledger = Ledger::seed(&[loc("B"), loc("A"), loc("C")]);
        ledger.take(0, &loc("C")).unwrap();
        let rest = ledger.leftovers();
        assert_eq!(rest, vec![(&loc("A"), 1), (&loc("B"), 1)]);
        assert_eq!(ledger.snapshot().len(), 2);
    }
}
