// ==========================================
// Road appraisal - calculation API
// ==========================================
// Session draft editing, calculation passes and CSV export.
// Any change to the draft supersedes the latest result; a pass
// that overlaps a draft edit returns its result without keeping it.
// ==========================================

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::error::{ApiError, ApiResult};
use crate::config::EngineConfigReader;
use crate::domain::appraisal::BatchResult;
use crate::domain::road_section::RoadSection;
use crate::engine::BatchCalculator;
use crate::export::CsvExporter;
use crate::repository::SessionRepository;

/// Latest result and the draft generation it was computed against
#[derive(Debug, Default)]
struct LatestResult {
    /// Bumped on every draft edit and every save
    generation: u64,
    result: Option<BatchResult>,
    /// true when the result was computed from the persisted session draft
    from_session: bool,
}

pub struct CalculationApi {
    config_reader: Arc<dyn EngineConfigReader>,
    session_repo: Arc<SessionRepository>,
    latest: Mutex<LatestResult>,
}

impl CalculationApi {
    pub fn new(
        config_reader: Arc<dyn EngineConfigReader>,
        session_repo: Arc<SessionRepository>,
    ) -> Self {
        Self {
            config_reader,
            session_repo,
            latest: Mutex::new(LatestResult::default()),
        }
    }

    fn latest_slot(&self) -> ApiResult<MutexGuard<'_, LatestResult>> {
        self.latest
            .lock()
            .map_err(|e| ApiError::InternalError(format!("result cache poisoned: {}", e)))
    }

    fn current_generation(&self) -> ApiResult<u64> {
        Ok(self.latest_slot()?.generation)
    }

    fn supersede(slot: &mut LatestResult) {
        slot.generation = slot.generation.wrapping_add(1);
        slot.result = None;
        slot.from_session = false;
    }

    /// Applies a draft write and supersedes the latest result under one lock
    fn edit_draft<T>(&self, edit: impl FnOnce(&SessionRepository) -> ApiResult<T>) -> ApiResult<T> {
        let mut slot = self.latest_slot()?;
        let value = edit(&self.session_repo)?;
        Self::supersede(&mut slot);
        Ok(value)
    }

    // ==========================================
    // Session draft
    // ==========================================

    pub fn list_session_sections(&self) -> ApiResult<Vec<RoadSection>> {
        Ok(self.session_repo.load_sections()?)
    }

    pub fn upsert_session_section(&self, section: RoadSection) -> ApiResult<()> {
        if section.id.trim().is_empty() {
            return Err(ApiError::InvalidInput("section id is empty".to_string()));
        }
        self.edit_draft(|repo| Ok(repo.upsert_section(&section)?))
    }

    pub fn remove_session_section(&self, section_id: &str) -> ApiResult<()> {
        self.edit_draft(|repo| Ok(repo.remove_section(section_id)?))
    }

    pub fn replace_session(&self, sections: Vec<RoadSection>) -> ApiResult<()> {
        self.edit_draft(|repo| Ok(repo.replace_sections(&sections)?))
    }

    pub fn clear_session(&self) -> ApiResult<usize> {
        self.edit_draft(|repo| Ok(repo.clear()?))
    }

    // ==========================================
    // Calculation
    // ==========================================

    /// Runs a pass over the given sections with the current configuration.
    /// The result is kept as the latest one unless the draft changed meanwhile.
    pub async fn calculate(&self, sections: Vec<RoadSection>) -> ApiResult<BatchResult> {
        let generation = self.current_generation()?;
        self.run(sections, generation, false).await
    }

    /// Runs a pass over the persisted session draft
    pub async fn calculate_session(&self) -> ApiResult<BatchResult> {
        let generation = self.current_generation()?;
        let sections = self.session_repo.load_sections()?;
        if sections.is_empty() {
            return Err(ApiError::InvalidInput("session has no road sections".to_string()));
        }
        self.run(sections, generation, true).await
    }

    async fn run(
        &self,
        sections: Vec<RoadSection>,
        generation: u64,
        from_session: bool,
    ) -> ApiResult<BatchResult> {
        let config = self.config_reader.read_engine_config().await?;
        let result = BatchCalculator::new(config).calculate(&sections)?;

        let mut slot = self.latest_slot()?;
        if slot.generation == generation {
            slot.result = Some(result.clone());
            slot.from_session = from_session;
        } else {
            tracing::debug!(
                started = generation,
                current = slot.generation,
                "session draft changed during calculation, result not kept"
            );
        }
        Ok(result)
    }

    pub fn latest_result(&self) -> ApiResult<BatchResult> {
        self.latest_slot()?
            .result
            .clone()
            .ok_or_else(|| ApiError::NotFound("no calculation result for the current session".to_string()))
    }

    /// Drops the latest result
    pub fn invalidate(&self) -> ApiResult<()> {
        let mut slot = self.latest_slot()?;
        Self::supersede(&mut slot);
        Ok(())
    }

    /// Hands the latest result to `save` with the draft locked, then drops it.
    /// `save` receives whether the result came from the session draft.
    pub(crate) fn consume_latest<T>(
        &self,
        save: impl FnOnce(&BatchResult, bool) -> ApiResult<T>,
    ) -> ApiResult<T> {
        let mut slot = self.latest_slot()?;
        let batch = slot
            .result
            .as_ref()
            .ok_or_else(|| ApiError::NotFound("no calculation result for the current session".to_string()))?;
        let value = save(batch, slot.from_session)?;
        Self::supersede(&mut slot);
        Ok(value)
    }

    // ==========================================
    // Export (latest result)
    // ==========================================

    pub fn export_condition_csv(&self) -> ApiResult<String> {
        Ok(CsvExporter::condition_table_string(&self.latest_result()?)?)
    }

    pub fn export_ranking_csv(&self) -> ApiResult<String> {
        Ok(CsvExporter::ranking_table_string(&self.latest_result()?)?)
    }

    pub fn export_condition_file(&self, path: &Path) -> ApiResult<()> {
        Ok(CsvExporter::export_condition_file(&self.latest_result()?, path)?)
    }

    pub fn export_ranking_file(&self, path: &Path) -> ApiResult<()> {
        Ok(CsvExporter::export_ranking_file(&self.latest_result()?, path)?)
    }
}
