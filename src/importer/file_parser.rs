// ==========================================
// Road appraisal - file parsers
// ==========================================
// Excel (.xlsx/.xls) / CSV (.csv) -> raw rows keyed by header
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::Path;

/// One data row as read from the file
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 1-based row number in the file (header = 1)
    pub row: usize,
    pub fields: HashMap<String, String>,
}

impl RawRecord {
    fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.is_empty())
    }
}

pub trait FileParser: Send + Sync {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>>;
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ImportError::FileNotFound(path.display().to_string()))
    }
}

// ==========================================
// CSV
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// `;` when the header uses it (spreadsheet exports with decimal commas), else `,`
    fn detect_delimiter(header_line: &str) -> u8 {
        let semicolons = header_line.matches(';').count();
        let commas = header_line.matches(',').count();
        if semicolons > 0 && semicolons >= commas {
            b';'
        } else {
            b','
        }
    }

    pub fn parse_str(&self, content: &str) -> ImportResult<Vec<RawRecord>> {
        let content = content.trim_start_matches('\u{feff}');
        let header_line = content.lines().next().unwrap_or("");

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(Self::detect_delimiter(header_line))
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let row = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2);

            let fields = headers
                .iter()
                .cloned()
                .zip(record.iter().map(|v| v.trim().to_string()))
                .collect();
            let raw = RawRecord { row, fields };
            if !raw.is_blank() {
                records.push(raw);
            }
        }
        Ok(records)
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        ensure_exists(file_path)?;
        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }
        let content = std::fs::read_to_string(file_path)?;
        self.parse_str(&content)
    }
}

// ==========================================
// Excel (first worksheet)
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        ensure_exists(file_path)?;
        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("workbook has no sheets".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .ok_or(ImportError::Empty)?
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, data_row) in rows.enumerate() {
            let fields = headers
                .iter()
                .cloned()
                .zip(data_row.iter().map(|cell| cell.to_string().trim().to_string()))
                .collect();
            let raw = RawRecord { row: idx + 2, fields };
            if !raw.is_blank() {
                records.push(raw);
            }
        }
        Ok(records)
    }
}

// ==========================================
// Dispatch by extension
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawRecord>> {
        let path = file_path.as_ref();
        match extension_of(path).as_str() {
            "csv" => CsvParser.parse_to_raw_records(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_records(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}
