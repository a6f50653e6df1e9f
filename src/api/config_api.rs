// ==========================================
// Road appraisal - configuration API
// ==========================================
// Query / update / reset of engine overrides and snapshots
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::apply_override;
use crate::config::{ConfigManager, EngineConfig};

/// One stored override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigItem {
    pub key: String,
    pub value: String,
}

pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
}

impl ConfigApi {
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self { config_manager }
    }

    pub fn list_configs(&self) -> ApiResult<Vec<ConfigItem>> {
        Ok(self
            .config_manager
            .list_global_configs()?
            .into_iter()
            .map(|(key, value)| ConfigItem { key, value })
            .collect())
    }

    pub fn get_config(&self, key: &str) -> ApiResult<Option<String>> {
        Ok(self.config_manager.get_global_config_value(key)?)
    }

    /// Effective configuration (defaults + overrides)
    pub fn get_engine_config(&self) -> ApiResult<EngineConfig> {
        Ok(self.config_manager.load_engine_config()?)
    }

    /// Rejects keys the engine does not know and values that would make
    /// the configuration invalid
    pub fn update_config(&self, key: &str, value: &str) -> ApiResult<()> {
        if !apply_override(&mut EngineConfig::default(), key, value)? {
            return Err(ApiError::InvalidInput(format!(
                "unknown configuration key: {}",
                key
            )));
        }
        self.config_manager.set_global_config_value(key, value)?;
        Ok(())
    }

    /// Returns false when no override existed
    pub fn reset_config(&self, key: &str) -> ApiResult<bool> {
        Ok(self.config_manager.remove_global_config_value(key)?)
    }

    pub fn get_config_snapshot(&self) -> ApiResult<String> {
        Ok(self.config_manager.get_config_snapshot()?)
    }

    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> ApiResult<usize> {
        Ok(self
            .config_manager
            .restore_config_from_snapshot(snapshot_json)?)
    }
}
