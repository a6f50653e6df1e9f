// ==========================================
// Road appraisal - application layer
// ==========================================
// State wiring + optional desktop commands
// ==========================================

pub mod state;
pub mod tauri_commands;

pub use state::{get_default_db_path, AppState, DEFAULT_LOCALE};

#[cfg(feature = "tauri-app")]
pub use tauri_commands::*;
