// ==========================================
// Road appraisal - configuration layer
// ==========================================
// Engine configuration with defaults and overrides
// Storage: config_kv table
// ==========================================

pub mod config_manager;
pub mod engine_config;
pub mod engine_config_reader;
pub mod error;

pub use config_manager::{config_keys, ConfigManager};
pub use engine_config::{
    AppraisalParameters, ClassifierThresholds, ConditionThresholds, EngineConfig, UnitCostTable,
};
pub use engine_config_reader::{EngineConfigReader, StaticConfigReader};
pub use error::{ConfigError, ConfigResult};
