// ==========================================
// Road appraisal - CSV export
// ==========================================
// Condition table: one row per section, input order
// Ranking table:   one row per ranked section, rank order
// ==========================================

use crate::domain::appraisal::{BatchResult, SectionOutcome};
use crate::engine::work_type::WorkTypeClassifier;
use crate::export::error::{ExportError, ExportResult};
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const CONDITION_HEADER: [&str; 14] = [
    "name",
    "length_km",
    "category",
    "actual_intensity",
    "actual_elastic_modulus",
    "actual_surface_evenness",
    "actual_rut_depth",
    "actual_friction_value",
    "intensity_coefficient",
    "strength_coefficient",
    "evenness_coefficient",
    "rut_coefficient",
    "friction_coefficient",
    "work_type",
];

pub const RANKING_HEADER: [&str; 9] = [
    "rank",
    "name",
    "length_km",
    "category",
    "work_type",
    "cost_mln_uah",
    "enpv_mln_uah",
    "eirr_pct",
    "bcr",
];

/// thousand UAH -> million UAH
fn to_million(thousand_uah: f64) -> f64 {
    thousand_uah / 1000.0
}

fn condition_row(outcome: &SectionOutcome) -> Vec<String> {
    let s = &outcome.section;
    let c = &outcome.condition;
    let strength = WorkTypeClassifier::strength_for(c, s.pavement_type);
    vec![
        s.name.clone(),
        s.length_km.to_string(),
        s.category.to_string(),
        s.actual_intensity.to_string(),
        s.actual_elastic_modulus.to_string(),
        s.actual_surface_evenness.to_string(),
        s.actual_rut_depth.to_string(),
        s.actual_friction_value.to_string(),
        format!("{:.3}", c.intensity.coefficient),
        format!("{:.3}", strength),
        format!("{:.3}", c.evenness.coefficient),
        format!("{:.3}", c.rut.coefficient),
        format!("{:.3}", c.friction.coefficient),
        outcome.work_type.label(),
    ]
}

fn ranking_row(outcome: &SectionOutcome) -> Option<Vec<String>> {
    let a = outcome.appraisal.as_ref()?;
    let rank = a.rank?;
    let s = &outcome.section;
    Some(vec![
        rank.to_string(),
        s.name.clone(),
        s.length_km.to_string(),
        s.category.to_string(),
        outcome.work_type.label(),
        format!("{:.2}", to_million(a.estimated_cost)),
        format!("{:.2}", to_million(a.enpv)),
        format!("{:.2}", a.eirr * 100.0),
        format!("{:.2}", a.bcr),
    ])
}

pub struct CsvExporter;

impl CsvExporter {
    pub fn write_condition_table<W: Write>(writer: W, batch: &BatchResult) -> ExportResult<()> {
        let mut wtr = Writer::from_writer(writer);
        wtr.write_record(CONDITION_HEADER)?;
        for outcome in &batch.outcomes {
            wtr.write_record(condition_row(outcome))?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_ranking_table<W: Write>(writer: W, batch: &BatchResult) -> ExportResult<()> {
        let mut wtr = Writer::from_writer(writer);
        wtr.write_record(RANKING_HEADER)?;
        for outcome in batch.ranked_outcomes() {
            if let Some(row) = ranking_row(outcome) {
                wtr.write_record(row)?;
            }
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn condition_table_string(batch: &BatchResult) -> ExportResult<String> {
        let mut buf = Vec::new();
        Self::write_condition_table(&mut buf, batch)?;
        String::from_utf8(buf).map_err(|e| ExportError::Encoding(e.to_string()))
    }

    pub fn ranking_table_string(batch: &BatchResult) -> ExportResult<String> {
        let mut buf = Vec::new();
        Self::write_ranking_table(&mut buf, batch)?;
        String::from_utf8(buf).map_err(|e| ExportError::Encoding(e.to_string()))
    }

    pub fn export_condition_file(batch: &BatchResult, path: &Path) -> ExportResult<()> {
        let file = File::create(path)?;
        Self::write_condition_table(file, batch)?;
        tracing::info!(path = %path.display(), rows = batch.outcomes.len(), "condition table exported");
        Ok(())
    }

    pub fn export_ranking_file(batch: &BatchResult, path: &Path) -> ExportResult<()> {
        let file = File::create(path)?;
        Self::write_ranking_table(file, batch)?;
        tracing::info!(path = %path.display(), rows = batch.ranking.len(), "ranking table exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::domain::road_section::RoadSection;
    use crate::domain::types::PavementType;
    use crate::engine::BatchCalculator;

    fn section(id: &str, intensity: f64, modulus: f64) -> RoadSection {
        RoadSection {
            id: id.to_string(),
            name: format!("M-{}", id),
            category: 3,
            length_km: 10.0,
            significance: None,
            region: None,
            pavement_type: PavementType::Flexible,
            actual_intensity: intensity,
            actual_elastic_modulus: modulus,
            actual_surface_evenness: 3.5,
            actual_rut_depth: 25.0,
            actual_friction_value: 0.35,
            is_defense_road: false,
            is_international_road: false,
        }
    }

    fn batch() -> BatchResult {
        BatchCalculator::new(EngineConfig::default())
            .calculate(&[section("1", 5000.0, 180.0), section("2", 9000.0, 180.0)])
            .unwrap()
    }

    #[test]
    fn test_condition_table_layout() {
        let out = CsvExporter::condition_table_string(&batch()).unwrap();
        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, CONDITION_HEADER);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "M-1");
        assert_eq!(&rows[0][8], "1.200");
        assert_eq!(&rows[0][9], "0.900");
        assert_eq!(&rows[0][10], "1.143");
        assert_eq!(&rows[0][11], "1.200");
        assert_eq!(&rows[0][12], "1.000");
    }

    #[test]
    fn test_ranking_table_units() {
        let b = batch();
        let out = CsvExporter::ranking_table_string(&b).unwrap();
        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[0][1], "M-2");
        // reconstruction, category 3: 34000 thousand UAH/km * 10 km = 340 mln
        assert_eq!(&rows[0][5], "340.00");

        let appraisal = b.outcomes[1].appraisal.as_ref().unwrap();
        assert_eq!(rows[0][7].to_string(), format!("{:.2}", appraisal.eirr * 100.0));
        assert_eq!(rows[0][6].to_string(), format!("{:.2}", appraisal.enpv / 1000.0));
    }
}
