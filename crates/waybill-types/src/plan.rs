use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::location::Location;
use crate::trip::Trip;

/// A complete transfer plan, known up front.
///
/// `initial_pickups` seeds one item per occurrence, so a location listed
/// three times starts with three items. `final_destinations` is treated as
/// a set: order and duplicates carry no meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Locations holding one item per appearance before the first trip.
    #[serde(rename = "pickUps", alias = "initial_pickups", default)]
    pub initial_pickups: Vec<Location>,
    /// Locations that must hold every item once all trips have run.
    #[serde(rename = "drops", alias = "final_destinations", default)]
    pub final_destinations: Vec<Location>,
    /// Trips, applied strictly in order.
    #[serde(default)]
    pub trips: Vec<Trip>,
}

/// On-disk encoding of a plan document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanFormat {
    Json,
    Toml,
}

impl PlanFormat {
    /// Pick a format from a file extension (`json` or `toml`).
    pub fn from_path(path: &Path) -> Result<Self, TypeError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            _ => Err(TypeError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl fmt::Display for PlanFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

impl Plan {
    /// Create a plan from its three parts.
    pub fn new(
        initial_pickups: impl IntoIterator<Item = impl Into<Location>>,
        final_destinations: impl IntoIterator<Item = impl Into<Location>>,
        trips: Vec<Trip>,
    ) -> Self {
        Self {
            initial_pickups: initial_pickups.into_iter().map(Into::into).collect(),
            final_destinations: final_destinations.into_iter().map(Into::into).collect(),
            trips,
        }
    }

    /// Total number of items the plan starts with.
    pub fn item_count(&self) -> u64 {
        self.initial_pickups.len() as u64
    }

    /// Returns `true` if `location` is a declared final destination.
    pub fn is_final(&self, location: &Location) -> bool {
        self.final_destinations.contains(location)
    }

    /// Drop points that are not declared final destinations, in first-use order.
    pub fn staging_points(&self) -> Vec<&Location> {
        let mut points: Vec<&Location> = Vec::new();
        for trip in &self.trips {
            if !self.is_final(&trip.drop) && !points.contains(&&trip.drop) {
                points.push(&trip.drop);
            }
        }
        points
    }

    pub fn from_json_str(input: &str) -> Result<Self, TypeError> {
        serde_json::from_str(input).map_err(|e| TypeError::Parse(e.to_string()))
    }

    pub fn from_toml_str(input: &str) -> Result<Self, TypeError> {
        toml::from_str(input).map_err(|e| TypeError::Parse(e.to_string()))
    }

    /// Parse a plan document in the given format.
    pub fn parse(input: &str, format: PlanFormat) -> Result<Self, TypeError> {
        match format {
            PlanFormat::Json => Self::from_json_str(input),
            PlanFormat::Toml => Self::from_toml_str(input),
        }
    }

    /// Load a plan document from disk, choosing the format by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TypeError> {
        let path = path.as_ref();
        let format = PlanFormat::from_path(path)?;
        let input = std::fs::read_to_string(path)
            .map_err(|e| TypeError::Io(format!("{}: {e}", path.display())))?;
        Self::parse(&input, format)
    }

    pub fn to_json_pretty(&self) -> Result<String, TypeError> {
        serde_json::to_string_pretty(self).map_err(|e| TypeError::Serialize(e.to_string()))
    }
}
