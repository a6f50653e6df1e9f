// ==========================================
// History / session repository integration tests
// ==========================================
// Scope:
// 1. Save is an atomic append-and-clear
// 2. Round trip of a batch through SQLite
// 3. Listing order, delete
// 4. Batches that cannot be loaded back are never stored
// ==========================================

mod test_helpers;

use chrono::NaiveDate;
use road_appraisal::domain::HistoryRecord;
use road_appraisal::engine::BatchCalculator;
use road_appraisal::repository::{HistoryRepository, RepositoryError, SessionRepository};
use road_appraisal::EngineConfig;
use test_helpers::*;

fn record(history_id: &str, day: u32) -> HistoryRecord {
    let batch = BatchCalculator::new(EngineConfig::default())
        .calculate(&[worn_section("worn", 5.0), reference_section("ref")])
        .unwrap();
    HistoryRecord {
        history_id: history_id.to_string(),
        saved_at: NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
        summary: format!("batch {}", history_id),
        section_count: batch.statistics.section_count,
        total_cost: batch.statistics.total_cost,
        batch,
    }
}

fn repos(db_path: &str) -> (SessionRepository, HistoryRepository) {
    let conn = open_shared(db_path).unwrap();
    (
        SessionRepository::new(conn.clone()),
        HistoryRepository::new(conn),
    )
}

#[test]
fn test_append_and_clear_session() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let (session, history) = repos(&db_path);

    session
        .replace_sections(&[reference_section("a"), worn_section("b", 5.0)])
        .unwrap();

    let cleared = history.append_and_clear_session(&record("h1", 1)).unwrap();
    assert_eq!(cleared, 2);
    assert_eq!(session.count().unwrap(), 0);
    assert_eq!(history.count().unwrap(), 1);
}

#[test]
fn test_failed_save_keeps_session() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let (session, history) = repos(&db_path);

    history.insert(&record("dup", 1)).unwrap();
    session.replace_sections(&[reference_section("a")]).unwrap();

    // same history_id: insert fails, delete must roll back with it
    let err = history.append_and_clear_session(&record("dup", 2)).unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    assert_eq!(session.count().unwrap(), 1);
    assert_eq!(history.count().unwrap(), 1);
}

#[test]
fn test_non_finite_batch_rejected_before_commit() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let (session, history) = repos(&db_path);
    session.replace_sections(&[reference_section("a")]).unwrap();

    // serde_json would write this as null and the row could never be loaded
    let mut broken = record("inf_cost", 1);
    broken.batch.outcomes[0].estimated_cost = f64::INFINITY;
    let err = history.append_and_clear_session(&broken).unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidPayload(_)));

    let mut broken = record("nan_total", 2);
    broken.total_cost = f64::NAN;
    assert!(matches!(
        history.insert(&broken),
        Err(RepositoryError::InvalidPayload(_))
    ));

    assert_eq!(session.count().unwrap(), 1);
    assert_eq!(history.count().unwrap(), 0);
    assert!(history.find_by_id("inf_cost").unwrap().is_none());
}

#[test]
fn test_round_trip() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let (_, history) = repos(&db_path);
    let original = record("h1", 5);

    history.insert(&original).unwrap();
    let loaded = history.find_by_id("h1").unwrap().unwrap();

    assert_eq!(loaded.saved_at, original.saved_at);
    assert_eq!(loaded.summary, original.summary);
    assert_eq!(loaded.batch.ranking, original.batch.ranking);
    assert_eq!(loaded.batch.outcomes.len(), 2);
    assert_eq!(loaded.batch.outcomes[0].work_type, original.batch.outcomes[0].work_type);
    assert_eq!(loaded.batch.outcomes[1].section.id, "ref");
    assert_eq!(
        loaded.batch.config.appraisal.analysis_horizon_years,
        original.batch.config.appraisal.analysis_horizon_years
    );

    assert!(history.find_by_id("missing").unwrap().is_none());
}

#[test]
fn test_list_newest_first_and_delete() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let (_, history) = repos(&db_path);

    history.insert(&record("old", 1)).unwrap();
    history.insert(&record("new", 9)).unwrap();
    history.insert(&record("mid", 4)).unwrap();

    let ids: Vec<String> = history
        .list()
        .unwrap()
        .into_iter()
        .map(|e| e.history_id)
        .collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);

    history.delete("mid").unwrap();
    assert_eq!(history.count().unwrap(), 2);
    assert!(matches!(
        history.delete("mid"),
        Err(RepositoryError::NotFound { .. })
    ));
}

#[test]
fn test_session_survives_reopen() {
    let (_tmp, db_path) = create_test_db().unwrap();
    {
        let (session, _) = repos(&db_path);
        session
            .replace_sections(&[worn_section("b", 5.0), reference_section("a")])
            .unwrap();
    }

    let (session, _) = repos(&db_path);
    let ids: Vec<String> = session
        .load_sections()
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["b", "a"]);
}
