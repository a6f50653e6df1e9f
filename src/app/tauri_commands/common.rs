use crate::api::{ApiError, ErrorResponse};
use serde::Serialize;
use tauri::Manager;

// ==========================================
// Shared helpers: error mapping, serialization, events
// ==========================================

/// ApiError -> JSON string (Tauri requires String errors)
pub(super) fn map_api_error(err: ApiError) -> String {
    tracing::warn!(code = err.code(), error = %err, "command failed");
    serde_json::to_string(&ErrorResponse::from(&err)).unwrap_or_else(|_| err.to_string())
}

pub(super) fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("serialization failed: {}", e))
}

/// Emits a frontend event; emission failures do not fail the command
pub(super) fn emit_frontend_event(app: &tauri::AppHandle, event: &str, payload: serde_json::Value) {
    if let Err(e) = app.emit_all(event, payload) {
        tracing::warn!(event, error = %e, "emit_all failed");
    }
}
