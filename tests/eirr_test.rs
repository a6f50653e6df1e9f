// ==========================================
// EIRR root-finding tests
// ==========================================

use road_appraisal::config::AppraisalParameters;
use road_appraisal::domain::CashFlowYear;
use road_appraisal::engine::appraisal::enpv;
use road_appraisal::engine::{CalculationError, EconomicAppraiser};

fn flow(year: u32, benefit: f64, cost: f64) -> CashFlowYear {
    CashFlowYear { year, benefit, cost }
}

#[test]
fn test_two_period_root() {
    // -100 + 121 / (1+r)^2 = 0  ->  r = 0.10
    let params = AppraisalParameters::default();
    let flows = vec![flow(0, 0.0, 100.0), flow(1, 0.0, 0.0), flow(2, 121.0, 0.0)];

    let eirr = EconomicAppraiser::new(&params).eirr(&flows).unwrap();
    assert!((eirr - 0.10).abs() < 1e-5, "eirr = {}", eirr);
}

#[test]
fn test_constant_ratio_stream() {
    // cost 1000, then benefit 100 for 20 years with a 10 % rate yields
    // a known annuity factor; the root must reproduce ENPV = 0
    let params = AppraisalParameters::default();
    let mut flows = vec![flow(0, 0.0, 1000.0)];
    flows.extend((1..=20).map(|t| flow(t, 100.0, 0.0)));

    let eirr = EconomicAppraiser::new(&params).eirr(&flows).unwrap();
    assert!(eirr > 0.07 && eirr < 0.08, "eirr = {}", eirr);
    assert!(enpv(&flows, eirr).abs() < 1e-2);
}

#[test]
fn test_no_sign_change_reported() {
    let params = AppraisalParameters::default();
    let flows = vec![flow(0, 0.0, 100.0), flow(1, 0.0, 10.0), flow(2, 0.0, 10.0)];

    let err = EconomicAppraiser::new(&params).eirr(&flows).unwrap_err();
    assert!(matches!(err, CalculationError::NoSignChange { .. }));
}

#[test]
fn test_iteration_cap_reported() {
    let params = AppraisalParameters {
        eirr_max_iterations: 3,
        eirr_tolerance: 1e-12,
        ..AppraisalParameters::default()
    };
    let flows = vec![flow(0, 0.0, 100.0), flow(1, 110.0, 0.0)];

    let err = EconomicAppraiser::new(&params).eirr(&flows).unwrap_err();
    assert_eq!(err, CalculationError::NotConverged { iterations: 3 });
}

#[test]
fn test_appraisal_at_eirr_rate_is_break_even() {
    let params = AppraisalParameters::default();
    let result = EconomicAppraiser::new(&params)
        .appraise(19000.0, 5000.0, 10.0, road_appraisal::WorkType::CurrentRepair)
        .unwrap();

    assert!(result.eirr > params.discount_rate);
    assert!(result.bcr > 1.0);
    let at_root = enpv(&result.cash_flows, result.eirr);
    assert!(at_root.abs() < 5.0, "ENPV at EIRR = {}", at_root);
}
