// ==========================================
// Road appraisal - engine errors
// ==========================================
// ValidationError: batch-wide, raised before any calculation
// CalculationError (domain): local to one section, batch continues
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::domain::error::CalculationError;

/// One rejected input field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationViolation {
    /// Position in the submitted batch (0-based)
    pub index: usize,
    pub section_id: String,
    pub field: String,
    pub reason: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("batch validation failed: {}", format_violations(.violations))]
    Validation { violations: Vec<ValidationViolation> },
}

fn format_violations(violations: &[ValidationViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("#{} {} ({}): {}", v.index, v.section_id, v.field, v.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type EngineResult<T> = Result<T, EngineError>;
