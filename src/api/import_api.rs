// ==========================================
// Road appraisal - import API
// ==========================================
// File -> session draft. Replace or append; rows with errors
// are reported back and not imported.
// ==========================================

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::api::calculation_api::CalculationApi;
use crate::api::error::ApiResult;
use crate::importer::{RowError, SectionImporter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportApiResponse {
    pub total_rows: usize,
    pub imported: usize,
    pub row_errors: Vec<RowError>,
    /// Sections in the draft after the import
    pub session_size: usize,
    pub elapsed_ms: u64,
}

pub struct ImportApi {
    calculation_api: Arc<CalculationApi>,
}

impl ImportApi {
    pub fn new(calculation_api: Arc<CalculationApi>) -> Self {
        Self { calculation_api }
    }

    /// `replace = true` discards the current draft first
    pub fn import_sections(&self, file_path: &Path, replace: bool) -> ApiResult<ImportApiResponse> {
        let started = Instant::now();
        let report = SectionImporter::import_file(file_path)?;

        let imported = report.sections.len();
        if replace {
            self.calculation_api.replace_session(report.sections)?;
        } else {
            for section in report.sections {
                self.calculation_api.upsert_session_section(section)?;
            }
        }
        let session_size = self.calculation_api.list_session_sections()?.len();

        Ok(ImportApiResponse {
            total_rows: report.total_rows,
            imported,
            row_errors: report.row_errors,
            session_size,
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    }
}
