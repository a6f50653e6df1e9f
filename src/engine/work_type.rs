// ==========================================
// Road appraisal - work type classifier
// ==========================================
// Tiered, not scored: the most severe tier triggered by any
// single measured coefficient wins.
//   1) intensity < 1.0                         -> reconstruction
//   2) strength  < 0.85 (pavement-specific)    -> capital repair
//   3) evenness / rut / friction < 1.0         -> current repair
//   4) otherwise                               -> no work needed
// Unmeasured (0) coefficients never trigger a tier.
// ==========================================

use crate::config::engine_config::ClassifierThresholds;
use crate::domain::appraisal::WorkTypeDecision;
use crate::domain::condition::{CoefficientDetail, DetailedTechnicalCondition};
use crate::domain::types::{PavementType, WorkType};

pub struct WorkTypeClassifier<'a> {
    thresholds: &'a ClassifierThresholds,
}

impl<'a> WorkTypeClassifier<'a> {
    pub fn new(thresholds: &'a ClassifierThresholds) -> Self {
        Self { thresholds }
    }

    /// Work type plus the coefficients that caused it
    pub fn classify(
        &self,
        condition: &DetailedTechnicalCondition,
        pavement_type: PavementType,
    ) -> WorkTypeDecision {
        let limit = self.thresholds.coefficient_threshold;
        let strength_limit = self.thresholds.strength_threshold;

        let mut triggered: Vec<(WorkType, String)> = Vec::new();
        let mut check = |name: &str, detail: &CoefficientDetail, limit: f64, tier: WorkType| {
            if detail.is_measured() && detail.coefficient < limit {
                triggered.push((
                    tier,
                    format!("{}={:.3} < {}", name, detail.coefficient, limit),
                ));
            }
        };

        check("intensity", &condition.intensity, limit, WorkType::Reconstruction);
        match pavement_type {
            PavementType::Flexible => check(
                "strength_flexible",
                &condition.strength_flexible,
                strength_limit,
                WorkType::CapitalRepair,
            ),
            PavementType::Rigid => check(
                "strength_rigid",
                &condition.strength_rigid,
                strength_limit,
                WorkType::CapitalRepair,
            ),
        }
        check("evenness", &condition.evenness, limit, WorkType::CurrentRepair);
        check("rut", &condition.rut, limit, WorkType::CurrentRepair);
        check("friction", &condition.friction, limit, WorkType::CurrentRepair);

        let work_type = triggered
            .iter()
            .map(|(tier, _)| *tier)
            .max()
            .unwrap_or(WorkType::NoWorkNeeded);

        WorkTypeDecision {
            work_type,
            triggered_by: triggered
                .into_iter()
                .filter(|(tier, _)| *tier == work_type)
                .map(|(_, reason)| reason)
                .collect(),
        }
    }

    /// Strength coefficient the classifier inspects for a pavement type
    pub fn strength_for(condition: &DetailedTechnicalCondition, pavement_type: PavementType) -> f64 {
        match pavement_type {
            PavementType::Flexible => condition.strength_flexible.coefficient,
            PavementType::Rigid => condition.strength_rigid.coefficient,
        }
    }
}
