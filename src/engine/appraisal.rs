// ==========================================
// Road appraisal - economic appraisal (ENPV / EIRR / BCR)
// ==========================================
// ENPV = sum (B_t - C_t) / (1+r)^t
// EIRR = r such that ENPV(r) = 0, bisection with a hard cap
// BCR  = sum B_t/(1+r)^t / sum C_t/(1+r)^t
// ==========================================

use crate::config::engine_config::AppraisalParameters;
use crate::domain::appraisal::{AppraisalResult, CashFlowYear};
use crate::domain::types::WorkType;
use crate::engine::cash_flow::CashFlowProjector;
use crate::engine::error::CalculationError;

// ==========================================
// Discounting helpers
// ==========================================

fn discount_factor(rate: f64, year: u32) -> f64 {
    (1.0 + rate).powi(year as i32)
}

/// ENPV of a stream at a discount rate
pub fn enpv(flows: &[CashFlowYear], rate: f64) -> f64 {
    flows
        .iter()
        .map(|f| f.net() / discount_factor(rate, f.year))
        .sum()
}

/// (discounted benefits, discounted costs)
pub fn discounted_totals(flows: &[CashFlowYear], rate: f64) -> (f64, f64) {
    flows.iter().fold((0.0, 0.0), |(b, c), f| {
        let d = discount_factor(rate, f.year);
        (b + f.benefit / d, c + f.cost / d)
    })
}

// ==========================================
// EconomicAppraiser
// ==========================================
pub struct EconomicAppraiser<'a> {
    params: &'a AppraisalParameters,
}

impl<'a> EconomicAppraiser<'a> {
    pub fn new(params: &'a AppraisalParameters) -> Self {
        Self { params }
    }

    /// Projects the cash flows of one section and appraises them
    pub fn appraise(
        &self,
        investment: f64,
        intensity: f64,
        length_km: f64,
        work_type: WorkType,
    ) -> Result<AppraisalResult, CalculationError> {
        let flows =
            CashFlowProjector::new(self.params).project(investment, intensity, length_km, work_type)?;
        self.appraise_flows(investment, flows)
    }

    /// Appraises an already projected stream
    pub fn appraise_flows(
        &self,
        investment: f64,
        flows: Vec<CashFlowYear>,
    ) -> Result<AppraisalResult, CalculationError> {
        if !investment.is_finite() {
            return Err(CalculationError::non_finite("estimated cost"));
        }
        if !flows.iter().all(|f| f.benefit.is_finite() && f.cost.is_finite()) {
            return Err(CalculationError::non_finite("cash flow"));
        }

        let rate = self.params.discount_rate;
        let (discounted_benefits, discounted_costs) = discounted_totals(&flows, rate);
        if !(discounted_benefits.is_finite() && discounted_costs.is_finite()) {
            return Err(CalculationError::non_finite("discounted total"));
        }
        if discounted_costs <= 0.0 {
            return Err(CalculationError::MissingCost { cost: investment });
        }
        let eirr = self.eirr(&flows)?;

        let enpv = discounted_benefits - discounted_costs;
        let bcr = discounted_benefits / discounted_costs;
        if !(enpv.is_finite() && bcr.is_finite()) {
            return Err(CalculationError::non_finite("ENPV"));
        }

        Ok(AppraisalResult {
            estimated_cost: investment,
            enpv,
            eirr,
            bcr,
            discounted_benefits,
            discounted_costs,
            cash_flows: flows,
            rank: None,
        })
    }

    /// Bisection on [eirr_lower_bound, eirr_upper_bound]
    ///
    /// Stops when the half-width of the bracket is within
    /// `eirr_tolerance * max(1, |mid|)`.
    pub fn eirr(&self, flows: &[CashFlowYear]) -> Result<f64, CalculationError> {
        let p = self.params;
        let (mut lower, mut upper) = (p.eirr_lower_bound, p.eirr_upper_bound);
        let mut npv_lower = enpv(flows, lower);
        let npv_upper = enpv(flows, upper);

        if !(npv_lower.is_finite() && npv_upper.is_finite()) {
            return Err(CalculationError::non_finite("ENPV at the EIRR bracket"));
        }
        if npv_lower == 0.0 {
            return Ok(lower);
        }
        if npv_upper == 0.0 {
            return Ok(upper);
        }
        if npv_lower.signum() == npv_upper.signum() {
            return Err(CalculationError::NoSignChange {
                lower,
                upper,
                npv_at_lower: npv_lower,
                npv_at_upper: npv_upper,
            });
        }

        for _ in 0..p.eirr_max_iterations {
            let mid = 0.5 * (lower + upper);
            let npv_mid = enpv(flows, mid);
            if !npv_mid.is_finite() {
                return Err(CalculationError::non_finite("ENPV at the EIRR bracket"));
            }

            if npv_mid == 0.0 || 0.5 * (upper - lower) <= p.eirr_tolerance * mid.abs().max(1.0) {
                return Ok(mid);
            }

            if npv_mid.signum() == npv_lower.signum() {
                lower = mid;
                npv_lower = npv_mid;
            } else {
                upper = mid;
            }
        }

        Err(CalculationError::NotConverged {
            iterations: p.eirr_max_iterations,
        })
    }
}
