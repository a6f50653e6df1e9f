// ==========================================
// Road appraisal - domain types
// ==========================================
// Closed enumerations shared by engine, export and persistence
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Road category (design class)
// ==========================================
// 1 = highest standard, 5 = lowest. Drives every regulatory threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RoadCategory(u8);

impl RoadCategory {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Ordinal value, 1..=5
    pub fn value(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-category tables
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Categories I and II share the stricter evenness/rut limits
    pub fn is_high_standard(self) -> bool {
        self.0 <= 2
    }

    pub fn all() -> impl Iterator<Item = RoadCategory> {
        (Self::MIN..=Self::MAX).map(RoadCategory)
    }
}

impl TryFrom<u8> for RoadCategory {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(RoadCategory(value))
        } else {
            Err(format!(
                "road category must be within {}..={}, got {}",
                Self::MIN,
                Self::MAX,
                value
            ))
        }
    }
}

impl From<RoadCategory> for u8 {
    fn from(category: RoadCategory) -> Self {
        category.0
    }
}

impl fmt::Display for RoadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==========================================
// Pavement type
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PavementType {
    #[default]
    Flexible, // asphalt
    Rigid,    // cement concrete
}

impl fmt::Display for PavementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PavementType::Flexible => write!(f, "flexible"),
            PavementType::Rigid => write!(f, "rigid"),
        }
    }
}

// ==========================================
// Work type
// ==========================================
// Ordered by severity: NoWorkNeeded < CurrentRepair < CapitalRepair < Reconstruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    NoWorkNeeded,
    CurrentRepair,
    CapitalRepair,
    Reconstruction,
}

impl WorkType {
    pub const ALL: [WorkType; 4] = [
        WorkType::NoWorkNeeded,
        WorkType::CurrentRepair,
        WorkType::CapitalRepair,
        WorkType::Reconstruction,
    ];

    /// Stable machine code, identical to the serde representation
    pub fn code(self) -> &'static str {
        match self {
            WorkType::NoWorkNeeded => "no_work_needed",
            WorkType::CurrentRepair => "current_repair",
            WorkType::CapitalRepair => "capital_repair",
            WorkType::Reconstruction => "reconstruction",
        }
    }

    pub fn needs_work(self) -> bool {
        self != WorkType::NoWorkNeeded
    }

    /// Localised label (current rust-i18n locale)
    pub fn label(self) -> String {
        crate::i18n::t(&format!("work_type.{}", self.code()))
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
