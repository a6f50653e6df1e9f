// ==========================================
// Road appraisal - application state
// ==========================================
// Shared connection + repositories + API instances,
// managed by the desktop shell as global state.
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{CalculationApi, ConfigApi, HistoryApi, ImportApi};
use crate::config::{ConfigManager, EngineConfigReader};
use crate::db::{init_schema, open_sqlite_connection};
use crate::repository::{HistoryRepository, SessionRepository};

/// UI locale used when the shell does not choose one
pub const DEFAULT_LOCALE: &str = "uk";

pub struct AppState {
    pub db_path: String,
    pub calculation_api: Arc<CalculationApi>,
    pub history_api: Arc<HistoryApi>,
    pub config_api: Arc<ConfigApi>,
    pub import_api: Arc<ImportApi>,
}

impl AppState {
    /// Opens (or creates) the database at `db_path` and wires every layer
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!(db_path = %db_path, "initialising application state");

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("cannot open database: {}", e))?;
        init_schema(&conn).map_err(|e| format!("cannot initialise schema: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        crate::i18n::set_locale(DEFAULT_LOCALE);

        // ==========================================
        // Repositories
        // ==========================================
        let session_repo = Arc::new(SessionRepository::new(conn.clone()));
        let history_repo = Arc::new(HistoryRepository::new(conn.clone()));
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("cannot create ConfigManager: {}", e))?,
        );

        // ==========================================
        // APIs
        // ==========================================
        let config_reader: Arc<dyn EngineConfigReader> = config_manager.clone();
        let calculation_api = Arc::new(CalculationApi::new(config_reader, session_repo));
        let history_api = Arc::new(HistoryApi::new(history_repo, calculation_api.clone()));
        let config_api = Arc::new(ConfigApi::new(config_manager));
        let import_api = Arc::new(ImportApi::new(calculation_api.clone()));

        tracing::info!("application state ready");

        Ok(Self {
            db_path,
            calculation_api,
            history_api,
            config_api,
            import_api,
        })
    }
}

/// Database location: `ROAD_APPRAISAL_DB_PATH`, else the user data directory
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("ROAD_APPRAISAL_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./road_appraisal.db");

    if let Some(data_dir) = dirs::data_dir() {
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("road-appraisal-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("road-appraisal");
        }

        if let Err(e) = std::fs::create_dir_all(&path) {
            tracing::warn!(dir = %path.display(), error = %e, "cannot create data directory");
            return "./road_appraisal.db".to_string();
        }
        path = path.join("road_appraisal.db");
    }

    path.to_string_lossy().to_string()
}
