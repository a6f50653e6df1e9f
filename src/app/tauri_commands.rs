// ==========================================
// Road appraisal - Tauri commands (per domain)
// ==========================================
// Thin layer: deserialize -> API call -> JSON string
// ==========================================

#![cfg(feature = "tauri-app")]

mod calculation;
mod common;
mod config;
mod history;
mod import;

pub use calculation::*;
pub use config::*;
pub use history::*;
pub use import::*;
