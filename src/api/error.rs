// ==========================================
// Road appraisal - API errors
// ==========================================
// Aggregates the layer errors into one type with a stable code
// and an optional structured payload for the desktop shell.
// ==========================================

use crate::config::ConfigError;
use crate::engine::error::{EngineError, ValidationViolation};
use crate::export::ExportError;
use crate::importer::ImportError;
use crate::repository::error::RepositoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // Input
    // ==========================================
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("validation failed: {} violation(s)", .violations.len())]
    ValidationFailed { violations: Vec<ValidationViolation> },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    // ==========================================
    // Files
    // ==========================================
    #[error("import failed: {0}")]
    ImportError(String),

    #[error("export failed: {0}")]
    ExportError(String),

    // ==========================================
    // Data access
    // ==========================================
    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // General
    // ==========================================
    #[error("internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    /// Stable code for the frontend
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::ValidationFailed { .. } => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::ConfigError(_) => "CONFIG_ERROR",
            ApiError::ImportError(_) => "IMPORT_ERROR",
            ApiError::ExportError(_) => "EXPORT_ERROR",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::DatabaseConnectionError(_) => "DATABASE_CONNECTION_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::ValidationFailed { violations } => {
                Some(serde_json::json!({ "violations": violations }))
            }
            _ => None,
        }
    }
}

/// Error payload returned to the frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            details: err.details(),
        }
    }
}

// ==========================================
// Layer conversions
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("lock acquisition failed: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::InvalidInput(format!("duplicate record: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => ApiError::DatabaseError(msg),
            RepositoryError::Serialization(msg) => ApiError::InternalError(msg),
            RepositoryError::InvalidPayload(msg) => ApiError::InvalidInput(msg),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation { violations } => ApiError::ValidationFailed { violations },
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Storage(e) => ApiError::DatabaseError(e.to_string()),
            ConfigError::LockError(msg) => ApiError::DatabaseConnectionError(msg),
            other => ApiError::ConfigError(other.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
