// ==========================================
// Road appraisal - engine layer
// ==========================================
// Pure calculation: no SQL, no I/O, no shared mutable state.
// Every decision carries its reasons (triggered coefficients,
// calculation errors) for traceability.
// ==========================================

pub mod appraisal;
pub mod cash_flow;
pub mod coefficients;
pub mod cost;
pub mod error;
pub mod orchestrator;
pub mod ranking;
pub mod statistics;
pub mod validation;
pub mod work_type;

pub use appraisal::EconomicAppraiser;
pub use cash_flow::CashFlowProjector;
pub use coefficients::CoefficientCalculator;
pub use cost::CostEstimator;
pub use error::{CalculationError, EngineError, EngineResult, ValidationViolation};
pub use orchestrator::BatchCalculator;
pub use ranking::RankingAggregator;
pub use statistics::StatisticsCalculator;
pub use validation::{SectionValidator, ValidSection};
pub use work_type::WorkTypeClassifier;
