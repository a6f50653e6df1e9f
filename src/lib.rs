// ==========================================
// Road appraisal - core library
// ==========================================
// Condition coefficients, work-type classification, cost,
// ENPV / EIRR / BCR appraisal and ranking of road sections.
// Stack: Rust + SQLite (+ optional Tauri shell)
// ==========================================

// i18n bundle (locales/uk.yml, locales/en.yml)
rust_i18n::i18n!("locales", fallback = "uk");

// ==========================================
// Modules
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Repository layer - session draft and history
pub mod repository;

// Engine layer - calculation
pub mod engine;

// Import layer - CSV / Excel
pub mod importer;

// Export layer - CSV tables
pub mod export;

// Configuration layer
pub mod config;

// SQLite connection + schema
pub mod db;

pub mod logging;

pub mod i18n;

// API layer - use cases
pub mod api;

// Application layer - state + Tauri commands
pub mod app;

// ==========================================
// Re-exports
// ==========================================

pub use domain::{
    AppraisalResult, BatchResult, BatchStatistics, DetailedTechnicalCondition, PavementType,
    RoadCategory, RoadSection, SectionOutcome, WorkType,
};

pub use engine::{BatchCalculator, EconomicAppraiser, WorkTypeClassifier};

pub use config::EngineConfig;

pub use api::{CalculationApi, ConfigApi, HistoryApi, ImportApi};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Road Funding Appraisal";
