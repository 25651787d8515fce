//! Traffic-light utilization status.

use super::ParseRagStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Load percentage at and above which a resource counts as ideally loaded.
pub const AMBER_THRESHOLD: f64 = 80.0;

/// Load percentage above which a resource counts as overloaded.
pub const RED_THRESHOLD: f64 = 100.0;

/// Three-level traffic-light classification of utilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RagStatus {
    /// Load below the amber threshold; spare capacity available.
    Green,
    /// Load within the ideal band, amber threshold up to and including 100%.
    Amber,
    /// Load above 100%; the resource is overcommitted.
    Red,
}

impl RagStatus {
    /// Classifies an already-computed load percentage.
    ///
    /// This is the single source of the threshold rule: the classifier, the
    /// portfolio summary buckets, and the RAG distribution all call through
    /// here, so their counts agree by construction.
    #[must_use]
    pub fn from_load(load_percentage: f64) -> Self {
        if load_percentage > RED_THRESHOLD {
            Self::Red
        } else if load_percentage >= AMBER_THRESHOLD {
            Self::Amber
        } else {
            Self::Green
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for RagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RagStatus {
    type Error = ParseRagStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "green" => Ok(Self::Green),
            "amber" => Ok(Self::Amber),
            "red" => Ok(Self::Red),
            _ => Err(ParseRagStatusError(value.to_owned())),
        }
    }
}
