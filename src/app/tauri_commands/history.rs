use crate::app::state::AppState;

use super::common::{emit_frontend_event, map_api_error, to_json};

// ==========================================
// History commands
// ==========================================

/// Saves the latest result and clears the session draft
#[tauri::command(rename_all = "snake_case")]
pub async fn save_to_history(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
) -> Result<String, String> {
    let entry = state.history_api.save_latest().map_err(map_api_error)?;
    emit_frontend_event(
        &app,
        "session_changed",
        serde_json::json!({ "saved_history_id": entry.history_id }),
    );
    to_json(&entry)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn list_history(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state.history_api.list().map_err(map_api_error)?;
    to_json(&result)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_history_record(
    state: tauri::State<'_, AppState>,
    history_id: String,
) -> Result<String, String> {
    let result = state.history_api.get(&history_id).map_err(map_api_error)?;
    to_json(&result)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn delete_history_record(
    state: tauri::State<'_, AppState>,
    history_id: String,
) -> Result<String, String> {
    state.history_api.delete(&history_id).map_err(map_api_error)?;
    to_json(&serde_json::json!({ "deleted": history_id }))
}
