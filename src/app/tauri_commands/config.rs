use crate::app::state::AppState;

use super::common::{map_api_error, to_json};

// ==========================================
// Configuration commands
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub async fn list_configs(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state.config_api.list_configs().map_err(map_api_error)?;
    to_json(&result)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_config(
    state: tauri::State<'_, AppState>,
    key: String,
) -> Result<String, String> {
    let result = state.config_api.get_config(&key).map_err(map_api_error)?;
    to_json(&serde_json::json!({ "key": key, "value": result }))
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_engine_config(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state.config_api.get_engine_config().map_err(map_api_error)?;
    to_json(&result)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn update_config(
    state: tauri::State<'_, AppState>,
    key: String,
    value: String,
) -> Result<String, String> {
    state
        .config_api
        .update_config(&key, &value)
        .map_err(map_api_error)?;
    // cached result was computed with the old configuration
    state.calculation_api.invalidate().map_err(map_api_error)?;
    to_json(&serde_json::json!({ "key": key, "value": value }))
}

#[tauri::command(rename_all = "snake_case")]
pub async fn reset_config(
    state: tauri::State<'_, AppState>,
    key: String,
) -> Result<String, String> {
    let removed = state.config_api.reset_config(&key).map_err(map_api_error)?;
    state.calculation_api.invalidate().map_err(map_api_error)?;
    to_json(&serde_json::json!({ "key": key, "removed": removed }))
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_config_snapshot(state: tauri::State<'_, AppState>) -> Result<String, String> {
    state.config_api.get_config_snapshot().map_err(map_api_error)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn restore_config_from_snapshot(
    state: tauri::State<'_, AppState>,
    snapshot_json: String,
) -> Result<String, String> {
    let restored = state
        .config_api
        .restore_config_from_snapshot(&snapshot_json)
        .map_err(map_api_error)?;
    state.calculation_api.invalidate().map_err(map_api_error)?;
    to_json(&serde_json::json!({ "restored": restored }))
}

/// `locale`: "uk" | "en"; affects export labels and history summaries
#[tauri::command(rename_all = "snake_case")]
pub async fn set_locale(locale: String) -> Result<String, String> {
    if !matches!(locale.as_str(), "uk" | "en") {
        return Err(map_api_error(crate::api::ApiError::InvalidInput(format!(
            "unsupported locale: {}",
            locale
        ))));
    }
    crate::i18n::set_locale(&locale);
    to_json(&serde_json::json!({ "locale": locale }))
}
