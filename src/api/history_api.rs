// ==========================================
// Road appraisal - history API
// ==========================================

use std::sync::Arc;

use crate::api::calculation_api::CalculationApi;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::appraisal::BatchResult;
use crate::domain::history::{HistoryEntry, HistoryRecord};
use crate::i18n::t_with_args;
use crate::repository::HistoryRepository;

pub struct HistoryApi {
    history_repo: Arc<HistoryRepository>,
    calculation_api: Arc<CalculationApi>,
}

impl HistoryApi {
    pub fn new(history_repo: Arc<HistoryRepository>, calculation_api: Arc<CalculationApi>) -> Self {
        Self {
            history_repo,
            calculation_api,
        }
    }

    /// Localised one-line description of a batch
    pub fn summarize(batch: &BatchResult) -> String {
        let stats = &batch.statistics;
        t_with_args(
            "history.summary",
            &[
                ("count", &stats.section_count.to_string()),
                ("viable", &stats.viable_count.to_string()),
                ("total_cost", &format!("{:.2}", stats.total_cost / 1000.0)),
            ],
        )
    }

    fn record_for(batch: BatchResult) -> HistoryRecord {
        HistoryRecord {
            history_id: uuid::Uuid::new_v4().to_string(),
            saved_at: chrono::Local::now().naive_local(),
            summary: Self::summarize(&batch),
            section_count: batch.statistics.section_count,
            total_cost: batch.statistics.total_cost,
            batch,
        }
    }

    /// Appends an arbitrary batch to history.
    /// The session draft and the latest result are left as they are.
    pub fn save(&self, batch: BatchResult) -> ApiResult<HistoryEntry> {
        let record = Self::record_for(batch);
        self.history_repo.insert(&record)?;
        Ok(HistoryEntry::from(&record))
    }

    /// Saves the latest calculation result and drops it.
    /// A result computed from the session draft also clears the draft,
    /// in the same transaction as the append.
    pub fn save_latest(&self) -> ApiResult<HistoryEntry> {
        self.calculation_api.consume_latest(|batch, from_session| {
            let record = Self::record_for(batch.clone());
            if from_session {
                self.history_repo.append_and_clear_session(&record)?;
            } else {
                self.history_repo.insert(&record)?;
            }
            Ok(HistoryEntry::from(&record))
        })
    }

    pub fn list(&self) -> ApiResult<Vec<HistoryEntry>> {
        Ok(self.history_repo.list()?)
    }

    pub fn get(&self, history_id: &str) -> ApiResult<HistoryRecord> {
        self.history_repo
            .find_by_id(history_id)?
            .ok_or_else(|| ApiError::NotFound(format!("HistoryRecord(id={})", history_id)))
    }

    pub fn delete(&self, history_id: &str) -> ApiResult<()> {
        Ok(self.history_repo.delete(history_id)?)
    }
}
