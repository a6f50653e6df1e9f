// ==========================================
// Road appraisal - cost estimator
// ==========================================
// cost = unitCost(workType, category) * length_km
// Unit: thousand UAH
// ==========================================

use crate::config::engine_config::UnitCostTable;
use crate::domain::types::{RoadCategory, WorkType};

pub struct CostEstimator<'a> {
    unit_costs: &'a UnitCostTable,
}

impl<'a> CostEstimator<'a> {
    pub fn new(unit_costs: &'a UnitCostTable) -> Self {
        Self { unit_costs }
    }

    pub fn estimate(&self, work_type: WorkType, category: RoadCategory, length_km: f64) -> f64 {
        self.unit_costs.unit_cost(work_type, category) * length_km
    }
}
