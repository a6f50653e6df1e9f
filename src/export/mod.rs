// ==========================================
// Road appraisal - export layer
// ==========================================
// Presentation boundary: the only place where thousand UAH are
// converted to million UAH and numbers are rounded for display.
// ==========================================

pub mod csv_export;
pub mod error;

pub use csv_export::CsvExporter;
pub use error::{ExportError, ExportResult};
