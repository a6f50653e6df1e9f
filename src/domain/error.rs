// ==========================================
// Road appraisal - per-section calculation errors
// ==========================================
// Stored on SectionOutcome and persisted with the batch, so
// every payload is a finite number.
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single section could not be appraised
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationError {
    #[error("no investment cost available (estimated {cost})")]
    MissingCost { cost: f64 },

    #[error("traffic intensity not measured, benefits cannot be projected")]
    MissingTraffic,

    #[error(
        "EIRR not bracketed: ENPV({lower})={npv_at_lower:.3}, ENPV({upper})={npv_at_upper:.3} have the same sign"
    )]
    NoSignChange {
        lower: f64,
        upper: f64,
        npv_at_lower: f64,
        npv_at_upper: f64,
    },

    #[error("EIRR did not converge within {iterations} iterations")]
    NotConverged { iterations: u32 },

    /// A discounted total or ENPV overflowed (inputs out of numeric range)
    #[error("{quantity} is not a finite number")]
    NonFinite { quantity: String },
}

impl CalculationError {
    pub(crate) fn non_finite(quantity: &str) -> Self {
        CalculationError::NonFinite {
            quantity: quantity.to_string(),
        }
    }
}
