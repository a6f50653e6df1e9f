// ==========================================
// Road appraisal - engine config reader trait
// ==========================================
// Read-only interface used by the API layer to obtain the
// configuration for a calculation pass (no writes, no logic)
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::config::error::ConfigResult;
use async_trait::async_trait;

// ==========================================
// EngineConfigReader
// ==========================================
// Implementors: ConfigManager (config_kv), StaticConfigReader (fixed value)
#[async_trait]
pub trait EngineConfigReader: Send + Sync {
    /// Effective configuration: defaults + stored overrides, validated
    async fn read_engine_config(&self) -> ConfigResult<EngineConfig>;
}

/// Serves a fixed configuration; used when no database is attached
pub struct StaticConfigReader {
    config: EngineConfig,
}

impl StaticConfigReader {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl EngineConfigReader for StaticConfigReader {
    async fn read_engine_config(&self) -> ConfigResult<EngineConfig> {
        self.config.validate()?;
        Ok(self.config.clone())
    }
}
