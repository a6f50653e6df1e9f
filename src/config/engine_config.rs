// ==========================================
// Road appraisal - engine configuration
// ==========================================
// Regulatory thresholds, unit costs and appraisal parameters.
// Defaults are the tables of the road maintenance standard;
// every value can be overridden through config_kv.
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::{RoadCategory, WorkType};
use serde::{Deserialize, Serialize};

/// Values indexed by road category 1..=5
pub type CategoryTable = [f64; 5];

// ==========================================
// Condition thresholds
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionThresholds {
    /// Max design traffic intensity, vehicles/day
    pub max_design_intensity: CategoryTable,
    /// Min strength coefficient; scales the rigid-pavement coefficient
    pub min_strength_coefficient: CategoryTable,
    /// Max allowed evenness, categories I-II
    pub max_evenness_high_category: f64,
    /// Max allowed evenness, categories III-V
    pub max_evenness_other_category: f64,
    /// Max allowed rut depth (mm), categories I-II
    pub max_rut_depth_high_category: f64,
    /// Max allowed rut depth (mm), categories III-V
    pub max_rut_depth_other_category: f64,
    pub required_friction: f64,
    /// MPa
    pub required_elastic_modulus: f64,
    pub rigid_strength_factor: f64,
}

impl Default for ConditionThresholds {
    fn default() -> Self {
        Self {
            max_design_intensity: [20000.0, 12000.0, 6000.0, 2000.0, 500.0],
            min_strength_coefficient: [1.00, 1.00, 0.95, 0.90, 0.85],
            max_evenness_high_category: 3.1,
            max_evenness_other_category: 4.0,
            max_rut_depth_high_category: 20.0,
            max_rut_depth_other_category: 30.0,
            required_friction: 0.35,
            required_elastic_modulus: 200.0,
            rigid_strength_factor: 1.2,
        }
    }
}

impl ConditionThresholds {
    pub fn max_design_intensity(&self, category: RoadCategory) -> f64 {
        self.max_design_intensity[category.index()]
    }

    pub fn min_strength_coefficient(&self, category: RoadCategory) -> f64 {
        self.min_strength_coefficient[category.index()]
    }

    pub fn max_evenness(&self, category: RoadCategory) -> f64 {
        if category.is_high_standard() {
            self.max_evenness_high_category
        } else {
            self.max_evenness_other_category
        }
    }

    pub fn max_rut_depth(&self, category: RoadCategory) -> f64 {
        if category.is_high_standard() {
            self.max_rut_depth_high_category
        } else {
            self.max_rut_depth_other_category
        }
    }
}

// ==========================================
// Classifier thresholds
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierThresholds {
    /// Intensity / evenness / rut / friction coefficients below this need work
    pub coefficient_threshold: f64,
    /// Strength coefficient below this needs capital repair
    pub strength_threshold: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            coefficient_threshold: 1.0,
            strength_threshold: 0.85,
        }
    }
}

// ==========================================
// Unit costs (thousand UAH per km)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitCostTable {
    pub current_repair: CategoryTable,
    pub capital_repair: CategoryTable,
    pub reconstruction: CategoryTable,
}

impl Default for UnitCostTable {
    fn default() -> Self {
        Self {
            current_repair: [3200.0, 2600.0, 1900.0, 1400.0, 1000.0],
            capital_repair: [16500.0, 13800.0, 11200.0, 8600.0, 6400.0],
            reconstruction: [52000.0, 43000.0, 34000.0, 26000.0, 19500.0],
        }
    }
}

impl UnitCostTable {
    /// Unit cost for a work type; 0 for `NoWorkNeeded`
    pub fn unit_cost(&self, work_type: WorkType, category: RoadCategory) -> f64 {
        match work_type {
            WorkType::NoWorkNeeded => 0.0,
            WorkType::CurrentRepair => self.current_repair[category.index()],
            WorkType::CapitalRepair => self.capital_repair[category.index()],
            WorkType::Reconstruction => self.reconstruction[category.index()],
        }
    }
}

// ==========================================
// Appraisal parameters
// ==========================================

/// Longest analysis horizon accepted by `validate`
pub const MAX_HORIZON_YEARS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppraisalParameters {
    pub discount_rate: f64,
    pub analysis_horizon_years: u32,
    pub traffic_growth_rate: f64,
    /// Road-user savings per vehicle-km (UAH) after current repair
    pub benefit_current_repair: f64,
    /// ... after capital repair
    pub benefit_capital_repair: f64,
    /// ... after reconstruction
    pub benefit_reconstruction: f64,
    /// Annual maintenance cost as a share of the investment
    pub maintenance_cost_rate: f64,
    pub eirr_lower_bound: f64,
    pub eirr_upper_bound: f64,
    pub eirr_tolerance: f64,
    pub eirr_max_iterations: u32,
}

impl Default for AppraisalParameters {
    fn default() -> Self {
        Self {
            discount_rate: 0.05,
            analysis_horizon_years: 20,
            traffic_growth_rate: 0.03,
            benefit_current_repair: 0.45,
            benefit_capital_repair: 1.20,
            benefit_reconstruction: 2.10,
            maintenance_cost_rate: 0.01,
            eirr_lower_bound: -0.9,
            eirr_upper_bound: 5.0,
            eirr_tolerance: 1e-6,
            eirr_max_iterations: 200,
        }
    }
}

impl AppraisalParameters {
    /// UAH per vehicle-km; 0 for `NoWorkNeeded`
    pub fn unit_benefit(&self, work_type: WorkType) -> f64 {
        match work_type {
            WorkType::NoWorkNeeded => 0.0,
            WorkType::CurrentRepair => self.benefit_current_repair,
            WorkType::CapitalRepair => self.benefit_capital_repair,
            WorkType::Reconstruction => self.benefit_reconstruction,
        }
    }
}

// ==========================================
// EngineConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub thresholds: ConditionThresholds,
    pub classifier: ClassifierThresholds,
    pub unit_costs: UnitCostTable,
    pub appraisal: AppraisalParameters,
}

impl EngineConfig {
    /// Checks every value the engine divides by or iterates on
    pub fn validate(&self) -> ConfigResult<()> {
        let t = &self.thresholds;
        check_table("condition.max_design_intensity", &t.max_design_intensity)?;
        check_table("condition.min_strength_coefficient", &t.min_strength_coefficient)?;
        check_positive("condition.max_evenness_high_category", t.max_evenness_high_category)?;
        check_positive("condition.max_evenness_other_category", t.max_evenness_other_category)?;
        check_positive("condition.max_rut_depth_high_category", t.max_rut_depth_high_category)?;
        check_positive("condition.max_rut_depth_other_category", t.max_rut_depth_other_category)?;
        check_positive("condition.required_friction", t.required_friction)?;
        check_positive("condition.required_elastic_modulus", t.required_elastic_modulus)?;
        check_positive("condition.rigid_strength_factor", t.rigid_strength_factor)?;

        check_positive("classifier.coefficient_threshold", self.classifier.coefficient_threshold)?;
        check_positive("classifier.strength_threshold", self.classifier.strength_threshold)?;

        check_table("cost.current_repair", &self.unit_costs.current_repair)?;
        check_table("cost.capital_repair", &self.unit_costs.capital_repair)?;
        check_table("cost.reconstruction", &self.unit_costs.reconstruction)?;

        let a = &self.appraisal;
        if !(a.discount_rate.is_finite() && a.discount_rate > -1.0) {
            return Err(ConfigError::invalid(
                "appraisal.discount_rate",
                a.discount_rate,
                "must be greater than -1",
            ));
        }
        if !(1..=MAX_HORIZON_YEARS).contains(&a.analysis_horizon_years) {
            return Err(ConfigError::invalid(
                "appraisal.horizon_years",
                a.analysis_horizon_years,
                &format!("must be between 1 and {} years", MAX_HORIZON_YEARS),
            ));
        }
        check_non_negative("appraisal.traffic_growth_rate", a.traffic_growth_rate)?;
        check_non_negative("appraisal.benefit_current_repair", a.benefit_current_repair)?;
        check_non_negative("appraisal.benefit_capital_repair", a.benefit_capital_repair)?;
        check_non_negative("appraisal.benefit_reconstruction", a.benefit_reconstruction)?;
        check_non_negative("appraisal.maintenance_cost_rate", a.maintenance_cost_rate)?;
        if !(a.eirr_lower_bound.is_finite() && a.eirr_lower_bound > -1.0) {
            return Err(ConfigError::invalid(
                "appraisal.eirr_lower_bound",
                a.eirr_lower_bound,
                "must be greater than -1",
            ));
        }
        if !(a.eirr_upper_bound.is_finite() && a.eirr_upper_bound > a.eirr_lower_bound) {
            return Err(ConfigError::invalid(
                "appraisal.eirr_upper_bound",
                a.eirr_upper_bound,
                "must be greater than the lower bound",
            ));
        }
        check_positive("appraisal.eirr_tolerance", a.eirr_tolerance)?;
        if a.eirr_max_iterations == 0 {
            return Err(ConfigError::invalid(
                "appraisal.eirr_max_iterations",
                a.eirr_max_iterations,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

fn check_positive(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, value, "must be a positive number"))
    }
}

fn check_non_negative(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, value, "must be a non-negative number"))
    }
}

fn check_table(key: &str, table: &CategoryTable) -> ConfigResult<()> {
    table.iter().try_for_each(|v| check_positive(key, *v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(v: u8) -> RoadCategory {
        RoadCategory::try_from(v).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_max_design_intensity_decreases_with_category() {
        let t = ConditionThresholds::default();
        let values: Vec<f64> = RoadCategory::all().map(|c| t.max_design_intensity(c)).collect();
        assert!(values.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_category_dependent_limits() {
        let t = ConditionThresholds::default();
        assert_eq!(t.max_evenness(cat(1)), 3.1);
        assert_eq!(t.max_evenness(cat(2)), 3.1);
        assert_eq!(t.max_evenness(cat(3)), 4.0);
        assert_eq!(t.max_rut_depth(cat(2)), 20.0);
        assert_eq!(t.max_rut_depth(cat(5)), 30.0);
    }

    #[test]
    fn test_unit_cost_no_work_is_zero() {
        let costs = UnitCostTable::default();
        assert_eq!(costs.unit_cost(WorkType::NoWorkNeeded, cat(1)), 0.0);
        assert_eq!(costs.unit_cost(WorkType::CapitalRepair, cat(3)), 11200.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = EngineConfig::default();
        config.thresholds.required_friction = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "condition.required_friction"
        ));

        let mut config = EngineConfig::default();
        config.appraisal.eirr_upper_bound = -0.95;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.appraisal.analysis_horizon_years = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_horizon_upper_bound() {
        let mut config = EngineConfig::default();
        config.appraisal.analysis_horizon_years = MAX_HORIZON_YEARS;
        assert!(config.validate().is_ok());

        config.appraisal.analysis_horizon_years = 400;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "appraisal.horizon_years"
        ));
    }
}
