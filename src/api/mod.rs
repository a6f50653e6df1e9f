// ==========================================
// Road appraisal - API layer
// ==========================================
// Use-case façade called by the desktop commands
// ==========================================

pub mod calculation_api;
pub mod config_api;
pub mod error;
pub mod history_api;
pub mod import_api;

pub use calculation_api::CalculationApi;
pub use config_api::{ConfigApi, ConfigItem};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use history_api::HistoryApi;
pub use import_api::{ImportApi, ImportApiResponse};
