// ==========================================
// Road appraisal - cash flow projection
// ==========================================
// Year 0:     investment (cost), no benefit
// Year 1..=H: road-user savings (benefit) vs. maintenance (cost)
// benefit_t = intensity * (1+g)^(t-1) * 365 * length * unitBenefit / 1000
// ==========================================

use crate::config::engine_config::AppraisalParameters;
use crate::domain::appraisal::CashFlowYear;
use crate::domain::types::WorkType;
use crate::engine::error::CalculationError;

const DAYS_PER_YEAR: f64 = 365.0;
/// UAH -> thousand UAH
const UAH_PER_THOUSAND: f64 = 1000.0;

pub struct CashFlowProjector<'a> {
    params: &'a AppraisalParameters,
}

impl<'a> CashFlowProjector<'a> {
    pub fn new(params: &'a AppraisalParameters) -> Self {
        Self { params }
    }

    /// Builds the yearly stream for one section
    ///
    /// # Errors
    /// - `MissingCost` when the investment is not positive
    /// - `MissingTraffic` when the intensity was not measured
    /// - `NonFinite` when the investment is out of numeric range
    pub fn project(
        &self,
        investment: f64,
        intensity: f64,
        length_km: f64,
        work_type: WorkType,
    ) -> Result<Vec<CashFlowYear>, CalculationError> {
        if !investment.is_finite() {
            return Err(CalculationError::non_finite("estimated cost"));
        }
        if investment <= 0.0 {
            return Err(CalculationError::MissingCost { cost: investment });
        }
        if intensity <= 0.0 {
            return Err(CalculationError::MissingTraffic);
        }

        let p = self.params;
        let yearly_savings =
            intensity * DAYS_PER_YEAR * length_km * p.unit_benefit(work_type) / UAH_PER_THOUSAND;
        let maintenance = investment * p.maintenance_cost_rate;

        let mut flows = Vec::with_capacity(p.analysis_horizon_years as usize + 1);
        flows.push(CashFlowYear {
            year: 0,
            benefit: 0.0,
            cost: investment,
        });

        let mut growth = 1.0;
        for year in 1..=p.analysis_horizon_years {
            flows.push(CashFlowYear {
                year,
                benefit: yearly_savings * growth,
                cost: maintenance,
            });
            growth *= 1.0 + p.traffic_growth_rate;
        }

        Ok(flows)
    }
}
