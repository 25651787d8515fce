//! Pure utilization classifier.

use super::RagStatus;
use serde::{Deserialize, Serialize};

/// Derived utilization figures for a pair of hour inputs.
///
/// Used identically for a resource's current snapshot and for any single
/// week; both write paths call [`Utilization::classify`] so the derived
/// fields can never drift between the two representations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Utilization {
    /// Workload as a percentage of availability, rounded to two decimals.
    pub load_percentage: f64,
    /// Traffic-light status derived from the load percentage.
    pub rag_status: RagStatus,
}

impl Utilization {
    /// Classifies a pair of non-negative hour figures.
    ///
    /// With no declared availability the load is zero and the status green:
    /// a resource that offers no hours is not flagged as overloaded.
    /// Negative inputs are a caller contract violation; structural input
    /// validation happens before the engine is invoked.
    #[must_use]
    pub fn classify(availability: f64, workload: f64) -> Self {
        if availability <= 0.0 {
            return Self {
                load_percentage: 0.0,
                rag_status: RagStatus::Green,
            };
        }
        let load_percentage = round2(workload / availability * 100.0);
        Self {
            load_percentage,
            rag_status: RagStatus::from_load(load_percentage),
        }
    }
}

/// Rounds to two decimal places, half away from zero (`f64::round`).
#[must_use]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
