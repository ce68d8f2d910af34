use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a physical point where items may reside.
///
/// A `Location` carries no role of its own. The same name can be a pick-up
/// point in one trip, a staging point in another, and a final destination of
/// the plan; only the plan's declared sets give it meaning.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    /// Create a location from any string-like name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The location name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the location and return its name.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({})", self.0)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Location {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Location {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for Location {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Location {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
