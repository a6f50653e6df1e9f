// ==========================================
// Road appraisal - appraisal & batch result entities
// ==========================================
// Monetary values are thousand UAH throughout; conversion to
// million UAH happens only in export.
// ==========================================

use crate::config::EngineConfig;
use crate::domain::condition::DetailedTechnicalCondition;
use crate::domain::road_section::RoadSection;
use crate::domain::types::WorkType;
use crate::domain::error::CalculationError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Cash flow
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowYear {
    pub year: u32,
    pub benefit: f64, // thousand UAH
    pub cost: f64,    // thousand UAH
}

impl CashFlowYear {
    pub fn net(&self) -> f64 {
        self.benefit - self.cost
    }
}

// ==========================================
// AppraisalResult
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppraisalResult {
    pub estimated_cost: f64,        // thousand UAH
    pub enpv: f64,                  // thousand UAH
    pub eirr: f64,                  // fraction, 0.12 = 12 %
    pub bcr: f64,
    pub discounted_benefits: f64,   // thousand UAH
    pub discounted_costs: f64,      // thousand UAH
    pub cash_flows: Vec<CashFlowYear>,
    /// 1-based position in the batch ranking; None until ranked
    pub rank: Option<usize>,
}

impl AppraisalResult {
    /// BCR > 1
    pub fn is_viable(&self) -> bool {
        self.bcr > 1.0
    }
}

// ==========================================
// WorkTypeDecision
// ==========================================
/// Classifier output with the coefficients that triggered it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkTypeDecision {
    pub work_type: WorkType,
    pub triggered_by: Vec<String>,
}

// ==========================================
// SectionOutcome
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionOutcome {
    pub section: RoadSection,
    pub condition: DetailedTechnicalCondition,
    pub work_type: WorkType,
    pub work_type_reasons: Vec<String>,
    /// unit cost x length, thousand UAH (0 when no work is needed)
    pub estimated_cost: f64,
    pub appraisal: Option<AppraisalResult>,
    /// Set when the appraisal could not be completed; excluded from ranking
    pub appraisal_error: Option<CalculationError>,
}

impl SectionOutcome {
    pub fn rank(&self) -> Option<usize> {
        self.appraisal.as_ref().and_then(|a| a.rank)
    }
}

// ==========================================
// BatchStatistics
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub section_count: usize,
    pub count_by_work_type: BTreeMap<WorkType, usize>,
    pub appraised_count: usize,
    pub failed_appraisal_count: usize,
    pub total_cost: f64, // thousand UAH
    pub average_bcr: f64,
    pub average_enpv: f64, // thousand UAH
    pub average_eirr: f64, // fraction
    pub viable_count: usize,
}

// ==========================================
// BatchResult
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub calculated_at: NaiveDateTime,
    /// Input order
    pub outcomes: Vec<SectionOutcome>,
    /// Section ids in rank order
    pub ranking: Vec<String>,
    pub statistics: BatchStatistics,
    pub config: EngineConfig,
}

impl BatchResult {
    /// Ranked outcomes in rank order
    pub fn ranked_outcomes(&self) -> Vec<&SectionOutcome> {
        self.ranking
            .iter()
            .filter_map(|id| self.outcomes.iter().find(|o| &o.section.id == id))
            .collect()
    }
}
