// ==========================================
// Test helpers
// ==========================================
// Temporary databases and road-section builders
// ==========================================

#![allow(dead_code)]

use road_appraisal::db::{init_schema, open_sqlite_connection};
use road_appraisal::{PavementType, RoadSection};
use rusqlite::Connection;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// Temporary on-disk database with the schema applied
///
/// # Returns
/// - NamedTempFile: keep alive for the duration of the test
/// - String: database path
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_string_lossy().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// Shared connection the way AppState builds it
pub fn open_shared(db_path: &str) -> Result<Arc<Mutex<Connection>>, Box<dyn Error>> {
    let conn = open_sqlite_connection(db_path)?;
    init_schema(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Category III reference section: 5000 veh/day, 180 MPa, 3.5 m/km, 25 mm, 0.35
pub fn reference_section(id: &str) -> RoadSection {
    RoadSection {
        id: id.to_string(),
        name: format!("Road {}", id),
        category: 3,
        length_km: 10.0,
        significance: Some("state".to_string()),
        region: Some("Kyivska".to_string()),
        pavement_type: PavementType::Flexible,
        actual_intensity: 5000.0,
        actual_elastic_modulus: 180.0,
        actual_surface_evenness: 3.5,
        actual_rut_depth: 25.0,
        actual_friction_value: 0.35,
        is_defense_road: false,
        is_international_road: false,
    }
}

/// Section overloaded beyond the category design intensity (reconstruction)
pub fn overloaded_section(id: &str, category: u8, intensity: f64, length_km: f64) -> RoadSection {
    RoadSection {
        category,
        length_km,
        actual_intensity: intensity,
        ..reference_section(id)
    }
}

/// Section with weak pavement only (capital repair)
pub fn weak_section(id: &str, elastic_modulus: f64, length_km: f64) -> RoadSection {
    RoadSection {
        length_km,
        actual_elastic_modulus: elastic_modulus,
        ..reference_section(id)
    }
}

/// Section with a worn surface only (current repair)
pub fn worn_section(id: &str, evenness: f64) -> RoadSection {
    RoadSection {
        actual_surface_evenness: evenness,
        ..reference_section(id)
    }
}
