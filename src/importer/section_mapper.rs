// ==========================================
// Road appraisal - section mapper
// ==========================================
// Raw row -> RoadSection
// - headers matched case-insensitively, English names or Ukrainian aliases,
//   unit suffixes like "(км)" ignored
// - numbers accept a decimal comma and space thousand separators
// - blank measurement = not measured (0)
// ==========================================

use crate::domain::road_section::RoadSection;
use crate::domain::types::PavementType;
use crate::importer::error::{ImportError, ImportResult, RowError};
use crate::importer::file_parser::RawRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// Column aliases
// ==========================================
const ID: &[&str] = &["id", "section_id", "код", "ідентифікатор"];
const NAME: &[&str] = &["name", "назва", "найменування", "назва ділянки"];
const CATEGORY: &[&str] = &["category", "категорія"];
const LENGTH: &[&str] = &["length_km", "length", "довжина", "протяжність"];
const SIGNIFICANCE: &[&str] = &["significance", "значення"];
const REGION: &[&str] = &["region", "область", "регіон"];
const PAVEMENT: &[&str] = &["pavement_type", "pavement", "тип покриття", "покриття"];
const INTENSITY: &[&str] = &["actual_intensity", "intensity", "інтенсивність"];
const ELASTIC_MODULUS: &[&str] = &[
    "actual_elastic_modulus",
    "elastic_modulus",
    "модуль пружності",
];
const EVENNESS: &[&str] = &["actual_surface_evenness", "surface_evenness", "evenness", "рівність"];
const RUT_DEPTH: &[&str] = &["actual_rut_depth", "rut_depth", "глибина колії", "колійність"];
const FRICTION: &[&str] = &[
    "actual_friction_value",
    "friction",
    "коефіцієнт зчеплення",
    "зчеплення",
];
const DEFENSE: &[&str] = &["is_defense_road", "defense_road", "оборонна"];
const INTERNATIONAL: &[&str] = &["is_international_road", "international_road", "міжнародна"];

const REQUIRED: [(&str, &[&str]); 3] = [("name", NAME), ("category", CATEGORY), ("length_km", LENGTH)];

/// Outcome of mapping one file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub total_rows: usize,
    pub sections: Vec<RoadSection>,
    pub row_errors: Vec<RowError>,
}

/// Lowercase, drop a unit suffix in parentheses or after a comma, unify separators
fn normalize_header(header: &str) -> String {
    let base = header.split(['(', ',']).next().unwrap_or(header);
    base.to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// ==========================================
// SectionMapper
// ==========================================
pub struct SectionMapper;

impl SectionMapper {
    pub fn map_records(&self, records: Vec<RawRecord>) -> ImportResult<ImportReport> {
        let first = records.first().ok_or(ImportError::Empty)?;
        let headers: Vec<String> = first.fields.keys().map(|h| normalize_header(h)).collect();
        for (column, aliases) in REQUIRED {
            if !aliases
                .iter()
                .any(|a| headers.contains(&normalize_header(a)))
            {
                return Err(ImportError::MissingColumn {
                    column: column.to_string(),
                });
            }
        }

        let mut report = ImportReport {
            total_rows: records.len(),
            ..ImportReport::default()
        };
        for record in &records {
            match self.map_record(record) {
                Ok(section) => report.sections.push(section),
                Err(errors) => report.row_errors.extend(errors),
            }
        }

        tracing::info!(
            total = report.total_rows,
            mapped = report.sections.len(),
            errors = report.row_errors.len(),
            "road sections mapped"
        );
        Ok(report)
    }

    /// All field errors of the row are reported together
    pub fn map_record(&self, record: &RawRecord) -> Result<RoadSection, Vec<RowError>> {
        let row = Row::new(record);
        let mut errors = Vec::new();

        let name = row.get_string(NAME);
        if name.is_none() {
            errors.push(row.error("name", "name is empty".to_string()));
        }

        let category = match row.get_string(CATEGORY) {
            None => {
                errors.push(row.error("category", "category is empty".to_string()));
                0
            }
            Some(raw) => parse_category(&raw).unwrap_or_else(|| {
                errors.push(row.error("category", format!("not a road category: {}", raw)));
                0
            }),
        };

        let mut number = |aliases: &[&str], field: &str, required: bool| -> f64 {
            match row.parse_f64(aliases, field) {
                Ok(Some(v)) => v,
                Ok(None) => {
                    if required {
                        errors.push(row.error(field, format!("{} is empty", field)));
                    }
                    0.0
                }
                Err(e) => {
                    errors.push(e);
                    0.0
                }
            }
        };

        let length_km = number(LENGTH, "length_km", true);
        let actual_intensity = number(INTENSITY, "actual_intensity", false);
        let actual_elastic_modulus = number(ELASTIC_MODULUS, "actual_elastic_modulus", false);
        let actual_surface_evenness = number(EVENNESS, "actual_surface_evenness", false);
        let actual_rut_depth = number(RUT_DEPTH, "actual_rut_depth", false);
        let actual_friction_value = number(FRICTION, "actual_friction_value", false);

        let pavement_type = match row.get_string(PAVEMENT) {
            None => PavementType::default(),
            Some(raw) => parse_pavement(&raw).unwrap_or_else(|| {
                errors.push(row.error("pavement_type", format!("unknown pavement type: {}", raw)));
                PavementType::default()
            }),
        };

        let mut flag = |aliases: &[&str], field: &str| -> bool {
            match row.get_string(aliases) {
                None => false,
                Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                    errors.push(row.error(field, format!("not a yes/no value: {}", raw)));
                    false
                }),
            }
        };
        let is_defense_road = flag(DEFENSE, "is_defense_road");
        let is_international_road = flag(INTERNATIONAL, "is_international_road");

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(RoadSection {
            id: row
                .get_string(ID)
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            name: name.unwrap_or_default(),
            category,
            length_km,
            significance: row.get_string(SIGNIFICANCE),
            region: row.get_string(REGION),
            pavement_type,
            actual_intensity,
            actual_elastic_modulus,
            actual_surface_evenness,
            actual_rut_depth,
            actual_friction_value,
            is_defense_road,
            is_international_road,
        })
    }
}

// ==========================================
// Row access helpers
// ==========================================
struct Row {
    number: usize,
    fields: HashMap<String, String>,
}

impl Row {
    fn new(record: &RawRecord) -> Self {
        Self {
            number: record.row,
            fields: record
                .fields
                .iter()
                .map(|(k, v)| (normalize_header(k), v.trim().to_string()))
                .collect(),
        }
    }

    fn error(&self, field: &str, message: String) -> RowError {
        RowError {
            row: self.number,
            field: field.to_string(),
            message,
        }
    }

    /// First non-empty value among the aliases
    fn get_string(&self, aliases: &[&str]) -> Option<String> {
        aliases
            .iter()
            .filter_map(|a| self.fields.get(&normalize_header(a)))
            .find(|v| !v.is_empty())
            .cloned()
    }

    fn parse_f64(&self, aliases: &[&str], field: &str) -> Result<Option<f64>, RowError> {
        match self.get_string(aliases) {
            None => Ok(None),
            Some(raw) => parse_number(&raw)
                .map(Some)
                .ok_or_else(|| self.error(field, format!("not a number: {}", raw))),
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Arabic 1..5 or Roman I..V
fn parse_category(raw: &str) -> Option<u8> {
    let value = raw.trim().to_uppercase();
    match value.as_str() {
        "I" => Some(1),
        "II" => Some(2),
        "III" => Some(3),
        "IV" => Some(4),
        "V" => Some(5),
        other => parse_number(other)
            .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= u8::MAX as f64)
            .map(|v| v as u8),
    }
}

fn parse_pavement(raw: &str) -> Option<PavementType> {
    match raw.trim().to_lowercase().as_str() {
        "flexible" | "нежорсткий" | "нежорстке" | "асфальтобетон" => Some(PavementType::Flexible),
        "rigid" | "жорсткий" | "жорстке" | "цементобетон" => Some(PavementType::Rigid),
        _ => None,
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "так" | "+" => Some(true),
        "0" | "false" | "no" | "ні" | "-" => Some(false),
        _ => None,
    }
}
