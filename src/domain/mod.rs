// ==========================================
// Road appraisal - domain layer
// ==========================================
// Entities and closed enumerations.
// No data access, no engine logic.
// ==========================================

pub mod appraisal;
pub mod condition;
pub mod error;
pub mod history;
pub mod road_section;
pub mod types;

pub use appraisal::{
    AppraisalResult, BatchResult, BatchStatistics, CashFlowYear, SectionOutcome, WorkTypeDecision,
};
pub use condition::{CoefficientDetail, DetailedTechnicalCondition};
pub use error::CalculationError;
pub use history::{HistoryEntry, HistoryRecord};
pub use road_section::RoadSection;
pub use types::{PavementType, RoadCategory, WorkType};
