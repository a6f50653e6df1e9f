// ==========================================
// Road appraisal - batch calculator
// ==========================================
// Flow of one calculation pass:
// validation (fail fast) -> coefficients -> work type -> cost
// -> appraisal (per-section failure allowed) -> ranking -> statistics
// ==========================================

use crate::config::EngineConfig;
use crate::domain::appraisal::{BatchResult, SectionOutcome};
use crate::domain::road_section::RoadSection;
use crate::engine::appraisal::EconomicAppraiser;
use crate::engine::coefficients::CoefficientCalculator;
use crate::engine::cost::CostEstimator;
use crate::engine::error::EngineResult;
use crate::engine::ranking::RankingAggregator;
use crate::engine::statistics::StatisticsCalculator;
use crate::engine::validation::{SectionValidator, ValidSection};
use crate::engine::work_type::WorkTypeClassifier;
use tracing::{debug, info, instrument, warn};

// ==========================================
// BatchCalculator
// ==========================================
pub struct BatchCalculator {
    config: EngineConfig,
}

impl BatchCalculator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs a full pass over an ordered batch
    ///
    /// # Errors
    /// `EngineError::Validation` when any section is invalid; nothing is
    /// computed in that case. Appraisal failures do not fail the batch,
    /// they are recorded on the affected outcome.
    #[instrument(skip(self, sections), fields(section_count = sections.len()))]
    pub fn calculate(&self, sections: &[RoadSection]) -> EngineResult<BatchResult> {
        let valid = SectionValidator::validate_batch(sections)?;

        let mut outcomes: Vec<SectionOutcome> =
            valid.iter().map(|v| self.evaluate_section(v)).collect();

        let ranking = RankingAggregator::rank(&mut outcomes);
        let statistics = StatisticsCalculator::compute(&outcomes);

        info!(
            sections = statistics.section_count,
            appraised = statistics.appraised_count,
            failed = statistics.failed_appraisal_count,
            viable = statistics.viable_count,
            total_cost = statistics.total_cost,
            "calculation pass finished"
        );

        Ok(BatchResult {
            calculated_at: chrono::Local::now().naive_local(),
            outcomes,
            ranking,
            statistics,
            config: self.config.clone(),
        })
    }

    /// Coefficients, work type, cost and appraisal of one validated section
    fn evaluate_section(&self, valid: &ValidSection<'_>) -> SectionOutcome {
        let section = valid.section;
        let condition = CoefficientCalculator::new(&self.config.thresholds)
            .calculate(section, valid.category);
        let decision = WorkTypeClassifier::new(&self.config.classifier)
            .classify(&condition, section.pavement_type);
        let work_type = decision.work_type;
        let estimated_cost = CostEstimator::new(&self.config.unit_costs).estimate(
            work_type,
            valid.category,
            section.length_km,
        );

        debug!(
            section_id = %section.id,
            work_type = work_type.code(),
            estimated_cost,
            reasons = ?decision.triggered_by,
            "section classified"
        );

        let (appraisal, appraisal_error) = if work_type.needs_work() {
            match EconomicAppraiser::new(&self.config.appraisal).appraise(
                estimated_cost,
                section.actual_intensity,
                section.length_km,
                work_type,
            ) {
                Ok(result) => (Some(result), None),
                Err(e) => {
                    warn!(section_id = %section.id, error = %e, "appraisal skipped");
                    (None, Some(e))
                }
            }
        } else {
            (None, None)
        };

        SectionOutcome {
            section: section.clone(),
            condition,
            work_type,
            work_type_reasons: decision.triggered_by,
            estimated_cost,
            appraisal,
            appraisal_error,
        }
    }
}
