// ==========================================
// Road appraisal - import layer
// ==========================================
// CSV / Excel file -> road sections for the session draft
// Stage 0: file parsing (file_parser)
// Stage 1: header matching + type conversion (section_mapper)
// ==========================================

pub mod error;
pub mod file_parser;
pub mod section_mapper;

pub use error::{ImportError, ImportResult, RowError};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, UniversalFileParser};
pub use section_mapper::{ImportReport, SectionMapper};

use std::path::Path;

pub struct SectionImporter;

impl SectionImporter {
    /// Parses and maps a file; rows with errors are reported, not imported
    pub fn import_file<P: AsRef<Path>>(file_path: P) -> ImportResult<ImportReport> {
        let path = file_path.as_ref();
        tracing::info!(path = %path.display(), "importing road sections");
        let records = UniversalFileParser.parse(path)?;
        SectionMapper.map_records(records)
    }
}
