// ==========================================
// Road appraisal - coefficient calculator
// ==========================================
// Input: road section (category + five measurements)
// Output: DetailedTechnicalCondition
// Rule: a measurement of 0 ("not measured") gives coefficient 0
// ==========================================

use crate::config::engine_config::ConditionThresholds;
use crate::domain::condition::{CoefficientDetail, DetailedTechnicalCondition};
use crate::domain::road_section::RoadSection;
use crate::domain::types::RoadCategory;

// ==========================================
// CoefficientCalculator
// ==========================================
pub struct CoefficientCalculator<'a> {
    thresholds: &'a ConditionThresholds,
}

impl<'a> CoefficientCalculator<'a> {
    pub fn new(thresholds: &'a ConditionThresholds) -> Self {
        Self { thresholds }
    }

    /// All coefficients of one section
    pub fn calculate(
        &self,
        section: &RoadSection,
        category: RoadCategory,
    ) -> DetailedTechnicalCondition {
        let t = self.thresholds;

        let strength_flexible = self.strength_flexible(section.actual_elastic_modulus);
        let min_strength = t.min_strength_coefficient(category);

        DetailedTechnicalCondition {
            intensity: self.intensity(section.actual_intensity, category),
            strength_flexible,
            strength_rigid: CoefficientDetail {
                coefficient: strength_flexible.coefficient * t.rigid_strength_factor * min_strength,
                threshold: t.required_elastic_modulus,
                actual: section.actual_elastic_modulus,
            },
            evenness: CoefficientDetail {
                coefficient: allowed_over_actual(
                    t.max_evenness(category),
                    section.actual_surface_evenness,
                ),
                threshold: t.max_evenness(category),
                actual: section.actual_surface_evenness,
            },
            rut: CoefficientDetail {
                coefficient: allowed_over_actual(t.max_rut_depth(category), section.actual_rut_depth),
                threshold: t.max_rut_depth(category),
                actual: section.actual_rut_depth,
            },
            friction: CoefficientDetail {
                coefficient: actual_over_required(
                    section.actual_friction_value,
                    t.required_friction,
                ),
                threshold: t.required_friction,
                actual: section.actual_friction_value,
            },
        }
    }

    /// maxDesignIntensity(category) / actualIntensity
    pub fn intensity(&self, actual_intensity: f64, category: RoadCategory) -> CoefficientDetail {
        let max = self.thresholds.max_design_intensity(category);
        CoefficientDetail {
            coefficient: allowed_over_actual(max, actual_intensity),
            threshold: max,
            actual: actual_intensity,
        }
    }

    /// actualElasticModulus / requiredElasticModulus
    pub fn strength_flexible(&self, actual_elastic_modulus: f64) -> CoefficientDetail {
        let required = self.thresholds.required_elastic_modulus;
        CoefficientDetail {
            coefficient: actual_over_required(actual_elastic_modulus, required),
            threshold: required,
            actual: actual_elastic_modulus,
        }
    }
}

/// Threshold is an allowed maximum: larger measurement = worse
fn allowed_over_actual(allowed: f64, actual: f64) -> f64 {
    if actual > 0.0 {
        allowed / actual
    } else {
        0.0
    }
}

/// Threshold is a required minimum: larger measurement = better
fn actual_over_required(actual: f64, required: f64) -> f64 {
    if actual > 0.0 {
        actual / required
    } else {
        0.0
    }
}
