use std::path::PathBuf;

use crate::app::state::AppState;
use crate::domain::road_section::RoadSection;

use super::common::{emit_frontend_event, map_api_error, to_json};

// ==========================================
// Session draft commands
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub async fn list_session_sections(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state
        .calculation_api
        .list_session_sections()
        .map_err(map_api_error)?;
    to_json(&result)
}

/// `section_json`: one RoadSection; unknown fields are rejected
#[tauri::command(rename_all = "snake_case")]
pub async fn upsert_session_section(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    section_json: String,
) -> Result<String, String> {
    let section: RoadSection = serde_json::from_str(&section_json)
        .map_err(|e| map_api_error(crate::api::ApiError::InvalidInput(e.to_string())))?;
    let section_id = section.id.clone();
    state
        .calculation_api
        .upsert_session_section(section)
        .map_err(map_api_error)?;

    emit_frontend_event(
        &app,
        "session_changed",
        serde_json::json!({ "section_id": section_id }),
    );
    to_json(&serde_json::json!({ "section_id": section_id }))
}

#[tauri::command(rename_all = "snake_case")]
pub async fn remove_session_section(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    section_id: String,
) -> Result<String, String> {
    state
        .calculation_api
        .remove_session_section(&section_id)
        .map_err(map_api_error)?;

    emit_frontend_event(
        &app,
        "session_changed",
        serde_json::json!({ "section_id": section_id }),
    );
    to_json(&serde_json::json!({ "removed": section_id }))
}

#[tauri::command(rename_all = "snake_case")]
pub async fn clear_session(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
) -> Result<String, String> {
    let removed = state.calculation_api.clear_session().map_err(map_api_error)?;
    emit_frontend_event(&app, "session_changed", serde_json::json!({ "cleared": removed }));
    to_json(&serde_json::json!({ "removed": removed }))
}

// ==========================================
// Calculation commands
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub async fn calculate_session(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state
        .calculation_api
        .calculate_session()
        .await
        .map_err(map_api_error)?;
    to_json(&result)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_latest_result(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state.calculation_api.latest_result().map_err(map_api_error)?;
    to_json(&result)
}

// ==========================================
// Export commands
// ==========================================

/// `table`: "condition" | "ranking"; without `file_path` the CSV text is returned
#[tauri::command(rename_all = "snake_case")]
pub async fn export_csv(
    state: tauri::State<'_, AppState>,
    table: String,
    file_path: Option<String>,
) -> Result<String, String> {
    let api = &state.calculation_api;
    match (table.as_str(), file_path) {
        ("condition", None) => api.export_condition_csv().map_err(map_api_error),
        ("ranking", None) => api.export_ranking_csv().map_err(map_api_error),
        ("condition", Some(path)) => {
            api.export_condition_file(&PathBuf::from(&path))
                .map_err(map_api_error)?;
            to_json(&serde_json::json!({ "file_path": path }))
        }
        ("ranking", Some(path)) => {
            api.export_ranking_file(&PathBuf::from(&path))
                .map_err(map_api_error)?;
            to_json(&serde_json::json!({ "file_path": path }))
        }
        (other, _) => Err(map_api_error(crate::api::ApiError::InvalidInput(format!(
            "unknown export table: {}",
            other
        )))),
    }
}
