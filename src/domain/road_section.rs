// ==========================================
// Road appraisal - road section entity
// ==========================================
// Input record of a calculation pass. Immutable once submitted;
// a measured value of 0 means "not measured".
// ==========================================

use crate::domain::types::PavementType;
use serde::{Deserialize, Serialize};

// ==========================================
// RoadSection
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoadSection {
    pub id: String,
    pub name: String,
    /// Raw design category; validated into `RoadCategory` before calculation
    pub category: u8,
    pub length_km: f64,

    // ===== Descriptive =====
    #[serde(default)]
    pub significance: Option<String>, // state / regional / local
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub pavement_type: PavementType,

    // ===== Measurements =====
    pub actual_intensity: f64,        // vehicles/day
    pub actual_elastic_modulus: f64,  // MPa
    pub actual_surface_evenness: f64, // m/km
    pub actual_rut_depth: f64,        // mm
    pub actual_friction_value: f64,

    // ===== Flags =====
    #[serde(default)]
    pub is_defense_road: bool,
    #[serde(default)]
    pub is_international_road: bool,
}

impl RoadSection {
    /// Measurement fields as (name, value) pairs, in export column order
    pub fn measurements(&self) -> [(&'static str, f64); 5] {
        [
            ("actual_intensity", self.actual_intensity),
            ("actual_elastic_modulus", self.actual_elastic_modulus),
            ("actual_surface_evenness", self.actual_surface_evenness),
            ("actual_rut_depth", self.actual_rut_depth),
            ("actual_friction_value", self.actual_friction_value),
        ]
    }
}
