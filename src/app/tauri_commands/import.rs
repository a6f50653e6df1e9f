use std::path::PathBuf;

use crate::app::state::AppState;

use super::common::{emit_frontend_event, map_api_error, to_json};

// ==========================================
// Import commands
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub async fn import_sections(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    file_path: String,
    replace: bool,
) -> Result<String, String> {
    tracing::info!(file_path = %file_path, replace, "import_sections requested");

    let result = state
        .import_api
        .import_sections(&PathBuf::from(&file_path), replace)
        .map_err(map_api_error)?;

    emit_frontend_event(
        &app,
        "session_changed",
        serde_json::json!({ "imported": result.imported }),
    );
    to_json(&result)
}
