// ==========================================
// Road appraisal - entry point
// ==========================================
// tauri-app: desktop shell over the API layer
// otherwise: command-line pass over an import file
// ==========================================

// No console window on Windows release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(feature = "tauri-app")]
fn main() {
    use road_appraisal::app::tauri_commands::*;
    use road_appraisal::app::{get_default_db_path, AppState};

    road_appraisal::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} {}", road_appraisal::APP_NAME, road_appraisal::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    tracing::info!(db_path = %db_path, "using database");

    let app_state = match AppState::new(db_path) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "cannot initialise AppState");
            std::process::exit(1);
        }
    };

    let result = tauri::Builder::default()
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            // ==========================================
            // Session draft
            // ==========================================
            list_session_sections,
            upsert_session_section,
            remove_session_section,
            clear_session,
            import_sections,

            // ==========================================
            // Calculation + export
            // ==========================================
            calculate_session,
            get_latest_result,
            export_csv,

            // ==========================================
            // History
            // ==========================================
            save_to_history,
            list_history,
            get_history_record,
            delete_history_record,

            // ==========================================
            // Configuration
            // ==========================================
            list_configs,
            get_config,
            get_engine_config,
            update_config,
            reset_config,
            get_config_snapshot,
            restore_config_from_snapshot,
            set_locale,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        tracing::error!(error = %e, "Tauri application failed");
        std::process::exit(1);
    }
    tracing::info!("Tauri application exited");
}

// Usage:
//   road-appraisal <sections.csv|xlsx> [condition_out.csv] [ranking_out.csv]
//
// Without output paths the ranking table is printed to stdout.
#[cfg(not(feature = "tauri-app"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use road_appraisal::engine::BatchCalculator;
    use road_appraisal::export::CsvExporter;
    use road_appraisal::importer::SectionImporter;
    use road_appraisal::EngineConfig;
    use std::path::PathBuf;

    road_appraisal::logging::init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        println!("{} {}", road_appraisal::APP_NAME, road_appraisal::VERSION);
        println!();
        println!("usage: road-appraisal <sections.csv|xlsx> [condition_out.csv] [ranking_out.csv]");
        println!("desktop shell: cargo run --features tauri-app");
        return Ok(());
    };

    let report = SectionImporter::import_file(&input)
        .with_context(|| format!("cannot import road sections from {}", input))?;
    for err in &report.row_errors {
        tracing::warn!(row = err.row, field = %err.field, message = %err.message, "row skipped");
    }

    let batch = BatchCalculator::new(EngineConfig::default())
        .calculate(&report.sections)
        .context("calculation rejected the imported batch")?;

    match (args.next(), args.next()) {
        (Some(condition_path), ranking_path) => {
            CsvExporter::export_condition_file(&batch, &PathBuf::from(&condition_path))
                .with_context(|| format!("cannot write {}", condition_path))?;
            if let Some(ranking_path) = ranking_path {
                CsvExporter::export_ranking_file(&batch, &PathBuf::from(&ranking_path))
                    .with_context(|| format!("cannot write {}", ranking_path))?;
            }
        }
        (None, _) => print!("{}", CsvExporter::ranking_table_string(&batch)?),
    }

    tracing::info!(
        sections = batch.statistics.section_count,
        viable = batch.statistics.viable_count,
        "done"
    );
    Ok(())
}
