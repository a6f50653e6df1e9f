// ==========================================
// API workflow tests
// ==========================================
// Session draft -> calculate -> export -> save to history,
// through AppState the way the desktop shell drives it
// ==========================================

mod test_helpers;

use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use road_appraisal::api::{ApiError, CalculationApi};
use road_appraisal::app::AppState;
use road_appraisal::config::{ConfigError, ConfigResult, EngineConfigReader, StaticConfigReader};
use road_appraisal::engine::CalculationError;
use road_appraisal::repository::SessionRepository;
use road_appraisal::{EngineConfig, RoadSection, WorkType};
use test_helpers::*;

fn app_state() -> (tempfile::NamedTempFile, AppState) {
    let (tmp, db_path) = create_test_db().unwrap();
    let state = AppState::new(db_path).unwrap();
    (tmp, state)
}

#[tokio::test]
async fn test_full_session_workflow() {
    let (_tmp, state) = app_state();
    let calc = &state.calculation_api;

    calc.upsert_session_section(worn_section("worn", 5.0)).unwrap();
    calc.upsert_session_section(overloaded_section("busy", 3, 7000.0, 10.0))
        .unwrap();
    calc.upsert_session_section(reference_section("ref")).unwrap();
    assert_eq!(calc.list_session_sections().unwrap().len(), 3);

    let result = calc.calculate_session().await.unwrap();
    assert_eq!(result.ranking, vec!["busy", "worn"]);
    assert_eq!(calc.latest_result().unwrap().ranking, result.ranking);

    let ranking_csv = calc.export_ranking_csv().unwrap();
    assert_eq!(ranking_csv.lines().count(), 3);
    let condition_csv = calc.export_condition_csv().unwrap();
    assert_eq!(condition_csv.lines().count(), 4);

    let entry = state.history_api.save_latest().unwrap();
    assert_eq!(entry.section_count, 3);
    assert!(calc.list_session_sections().unwrap().is_empty());
    assert!(matches!(calc.latest_result(), Err(ApiError::NotFound(_))));

    let listed = state.history_api.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].history_id, entry.history_id);

    let record = state.history_api.get(&entry.history_id).unwrap();
    assert_eq!(record.batch.ranking, vec!["busy", "worn"]);

    state.history_api.delete(&entry.history_id).unwrap();
    assert!(matches!(
        state.history_api.get(&entry.history_id),
        Err(ApiError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_draft_change_supersedes_result() {
    let (_tmp, state) = app_state();
    let calc = &state.calculation_api;

    calc.upsert_session_section(worn_section("worn", 5.0)).unwrap();
    calc.calculate_session().await.unwrap();
    assert!(calc.latest_result().is_ok());

    calc.upsert_session_section(worn_section("worn", 6.0)).unwrap();
    assert!(matches!(calc.latest_result(), Err(ApiError::NotFound(_))));
    assert!(matches!(
        calc.export_ranking_csv(),
        Err(ApiError::NotFound(_))
    ));

    // updated in place, not appended
    let sections = calc.list_session_sections().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].actual_surface_evenness, 6.0);
}

#[tokio::test]
async fn test_empty_session_and_invalid_batch() {
    let (_tmp, state) = app_state();
    let calc = &state.calculation_api;

    assert!(matches!(
        calc.calculate_session().await,
        Err(ApiError::InvalidInput(_))
    ));

    let mut broken = reference_section("broken");
    broken.length_km = -1.0;
    calc.upsert_session_section(broken).unwrap();
    let err = calc.calculate_session().await.unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert!(matches!(err, ApiError::ValidationFailed { .. }));
}

#[tokio::test]
async fn test_static_config_reader() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let mut config = EngineConfig::default();
    config.classifier.strength_threshold = 0.95;

    let api = CalculationApi::new(
        Arc::new(StaticConfigReader::new(config)),
        Arc::new(SessionRepository::new(open_shared(&db_path).unwrap())),
    );
    let result = api.calculate(vec![reference_section("S1")]).await.unwrap();
    assert_eq!(result.outcomes[0].work_type, WorkType::CapitalRepair);
}

#[test]
fn test_import_into_session() {
    use std::io::Write;

    let (_tmp, state) = app_state();
    state
        .calculation_api
        .upsert_session_section(reference_section("old"))
        .unwrap();

    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(
        file,
        "id,name,category,length_km,actual_intensity\nA,Road A,3,2.5,1000\nB,Road B,4,1,0\n"
    )
    .unwrap();
    file.flush().unwrap();

    let appended = state.import_api.import_sections(file.path(), false).unwrap();
    assert_eq!(appended.imported, 2);
    assert_eq!(appended.session_size, 3);

    let replaced = state.import_api.import_sections(file.path(), true).unwrap();
    assert_eq!(replaced.session_size, 2);
    assert!(replaced.row_errors.is_empty());
}

/// Edits the session draft while the configuration is being read,
/// i.e. in the middle of a calculation pass
struct DraftEditingReader {
    api: OnceLock<Arc<CalculationApi>>,
    pending: Mutex<Option<RoadSection>>,
}

#[async_trait]
impl EngineConfigReader for DraftEditingReader {
    async fn read_engine_config(&self) -> ConfigResult<EngineConfig> {
        let pending = self.pending.lock().unwrap().take();
        if let (Some(api), Some(section)) = (self.api.get(), pending) {
            api.upsert_session_section(section)
                .map_err(|e| ConfigError::LockError(e.to_string()))?;
        }
        Ok(EngineConfig::default())
    }
}

#[tokio::test]
async fn test_draft_edit_during_calculation_drops_result() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let reader = Arc::new(DraftEditingReader {
        api: OnceLock::new(),
        pending: Mutex::new(Some(worn_section("late", 5.0))),
    });
    let api = Arc::new(CalculationApi::new(
        reader.clone(),
        Arc::new(SessionRepository::new(open_shared(&db_path).unwrap())),
    ));
    assert!(reader.api.set(api.clone()).is_ok());

    api.upsert_session_section(reference_section("ref")).unwrap();

    // the pass saw one section, the draft now has two
    let stale = api.calculate_session().await.unwrap();
    assert_eq!(stale.outcomes.len(), 1);
    assert_eq!(api.list_session_sections().unwrap().len(), 2);
    assert!(matches!(api.latest_result(), Err(ApiError::NotFound(_))));

    let fresh = api.calculate_session().await.unwrap();
    assert_eq!(fresh.outcomes.len(), 2);
    assert_eq!(api.latest_result().unwrap().outcomes.len(), 2);
}

#[tokio::test]
async fn test_saving_ad_hoc_batch_keeps_draft() {
    let (_tmp, state) = app_state();
    let calc = &state.calculation_api;
    calc.upsert_session_section(worn_section("draft", 5.0)).unwrap();

    let batch = calc
        .calculate(vec![overloaded_section("adhoc", 3, 7000.0, 10.0)])
        .await
        .unwrap();
    state.history_api.save(batch).unwrap();
    assert_eq!(calc.list_session_sections().unwrap().len(), 1);
    // save() leaves the latest result alone
    assert_eq!(calc.latest_result().unwrap().ranking, vec!["adhoc"]);

    // latest result was not computed from the draft either
    state.history_api.save_latest().unwrap();
    assert_eq!(calc.list_session_sections().unwrap().len(), 1);
    assert!(matches!(calc.latest_result(), Err(ApiError::NotFound(_))));
    assert_eq!(state.history_api.list().unwrap().len(), 2);

    calc.calculate_session().await.unwrap();
    state.history_api.save_latest().unwrap();
    assert!(calc.list_session_sections().unwrap().is_empty());
    assert_eq!(state.history_api.list().unwrap().len(), 3);
}

#[tokio::test]
async fn test_overflowing_section_saved_and_reloaded() {
    let (_tmp, state) = app_state();
    let calc = &state.calculation_api;
    calc.upsert_session_section(overloaded_section("huge", 3, 1e307, 10.0))
        .unwrap();
    calc.upsert_session_section(worn_section("worn", 5.0)).unwrap();

    let result = calc.calculate_session().await.unwrap();
    let huge = result
        .outcomes
        .iter()
        .find(|o| o.section.id == "huge")
        .unwrap();
    assert!(huge.appraisal.is_none());
    assert!(matches!(
        huge.appraisal_error,
        Some(CalculationError::NonFinite { .. })
    ));
    assert!(!result.ranking.contains(&"huge".to_string()));
    assert!(result.statistics.total_cost.is_finite());

    let entry = state.history_api.save_latest().unwrap();
    let record = state.history_api.get(&entry.history_id).unwrap();
    assert_eq!(record.batch.ranking, result.ranking);
    assert_eq!(record.batch.outcomes.len(), 2);
    let reloaded = record
        .batch
        .outcomes
        .iter()
        .find(|o| o.section.id == "huge")
        .unwrap();
    assert_eq!(reloaded.appraisal_error, huge.appraisal_error);
    assert_eq!(reloaded.section.actual_intensity, 1e307);
}
