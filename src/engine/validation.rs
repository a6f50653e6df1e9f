// ==========================================
// Road appraisal - batch input validation
// ==========================================
// Fail fast: the whole batch is checked before any coefficient
// is computed; all violations are reported together.
// ==========================================

use crate::domain::road_section::RoadSection;
use crate::domain::types::RoadCategory;
use crate::engine::error::{EngineError, EngineResult, ValidationViolation};
use std::collections::HashSet;

/// A section that passed validation, with its typed category
#[derive(Debug, Clone, Copy)]
pub struct ValidSection<'a> {
    pub section: &'a RoadSection,
    pub category: RoadCategory,
}

pub struct SectionValidator;

impl SectionValidator {
    /// Validates every section; Err carries all violations found
    pub fn validate_batch(sections: &[RoadSection]) -> EngineResult<Vec<ValidSection<'_>>> {
        let mut violations = Vec::new();
        let mut seen_ids = HashSet::new();
        let mut valid = Vec::with_capacity(sections.len());

        for (index, section) in sections.iter().enumerate() {
            let mut push = |field: &str, reason: String| {
                violations.push(ValidationViolation {
                    index,
                    section_id: section.id.clone(),
                    field: field.to_string(),
                    reason,
                })
            };

            if section.id.trim().is_empty() {
                push("id", "identifier is empty".to_string());
            } else if !seen_ids.insert(section.id.as_str()) {
                push("id", "duplicate identifier in batch".to_string());
            }

            if section.name.trim().is_empty() {
                push("name", "name is empty".to_string());
            }

            let category = match RoadCategory::try_from(section.category) {
                Ok(c) => Some(c),
                Err(reason) => {
                    push("category", reason);
                    None
                }
            };

            if !(section.length_km.is_finite() && section.length_km > 0.0) {
                push(
                    "length_km",
                    format!("length must be greater than 0, got {}", section.length_km),
                );
            }

            for (field, value) in section.measurements() {
                if !value.is_finite() || value < 0.0 {
                    push(field, format!("measurement must be >= 0, got {}", value));
                }
            }

            if let Some(category) = category {
                valid.push(ValidSection { section, category });
            }
        }

        if violations.is_empty() {
            Ok(valid)
        } else {
            tracing::warn!(count = violations.len(), "batch rejected by validation");
            Err(EngineError::Validation { violations })
        }
    }
}
