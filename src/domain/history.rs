// ==========================================
// Road appraisal - calculation history
// ==========================================
// One record per saved batch (append-only)
// ==========================================

use crate::domain::appraisal::BatchResult;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub history_id: String,
    pub saved_at: NaiveDateTime,
    pub summary: String,
    pub section_count: usize,
    pub total_cost: f64, // thousand UAH
    pub batch: BatchResult,
}

/// List view without the batch payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub history_id: String,
    pub saved_at: NaiveDateTime,
    pub summary: String,
    pub section_count: usize,
    pub total_cost: f64,
}

impl From<&HistoryRecord> for HistoryEntry {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            history_id: record.history_id.clone(),
            saved_at: record.saved_at,
            summary: record.summary.clone(),
            section_count: record.section_count,
            total_cost: record.total_cost,
        }
    }
}
