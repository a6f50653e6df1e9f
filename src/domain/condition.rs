// ==========================================
// Road appraisal - detailed technical condition
// ==========================================
// Derived, read-only. Superseded by the next pass, never mutated.
// ==========================================

use serde::{Deserialize, Serialize};

/// One coefficient together with the inputs it was computed from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientDetail {
    pub coefficient: f64,
    /// Regulatory value used (allowed maximum or required minimum)
    pub threshold: f64,
    /// Raw measured value; 0 = not measured
    pub actual: f64,
}

impl CoefficientDetail {
    /// A zero measurement yields the 0 sentinel instead of a ratio
    pub fn is_measured(&self) -> bool {
        self.actual > 0.0
    }
}

// ==========================================
// DetailedTechnicalCondition
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedTechnicalCondition {
    pub intensity: CoefficientDetail,
    pub strength_flexible: CoefficientDetail,
    pub strength_rigid: CoefficientDetail,
    pub evenness: CoefficientDetail,
    pub rut: CoefficientDetail,
    pub friction: CoefficientDetail,
}
