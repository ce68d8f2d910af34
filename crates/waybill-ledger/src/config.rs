use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Configuration for the conservation validator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Require staging points to be disjoint from the declared pick-up and
    /// destination sets. Off by default: a drop point is accounted the same
    /// way whatever role its name plays elsewhere in the plan.
    pub strict_staging: bool,
    /// Upper bound on the number of trips in a plan.
    pub max_trips: Option<usize>,
}

impl ValidatorConfig {
    /// Default configuration with strict staging enabled.
    pub fn strict() -> Self {
        Self {
            strict_staging: true,
            ..Default::default()
        }
    }

    pub fn from_toml_str(input: &str) -> Result<Self, LedgerError> {
        toml::from_str(input).map_err(|e| LedgerError::Config(e.to_string()))
    }
}
