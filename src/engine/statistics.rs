// ==========================================
// Road appraisal - batch statistics
// ==========================================

use crate::domain::appraisal::{BatchStatistics, SectionOutcome};
use crate::domain::types::WorkType;

pub struct StatisticsCalculator;

impl StatisticsCalculator {
    /// Aggregates a calculation pass; averages are 0 when nothing was appraised
    pub fn compute(outcomes: &[SectionOutcome]) -> BatchStatistics {
        let mut stats = BatchStatistics {
            section_count: outcomes.len(),
            count_by_work_type: WorkType::ALL.iter().map(|w| (*w, 0)).collect(),
            ..BatchStatistics::default()
        };

        let (mut bcr_sum, mut enpv_sum, mut eirr_sum) = (0.0, 0.0, 0.0);

        for outcome in outcomes {
            *stats.count_by_work_type.entry(outcome.work_type).or_insert(0) += 1;
            stats.total_cost += outcome.estimated_cost;

            if outcome.appraisal_error.is_some() {
                stats.failed_appraisal_count += 1;
            }
            if let Some(a) = &outcome.appraisal {
                stats.appraised_count += 1;
                bcr_sum += a.bcr;
                enpv_sum += a.enpv;
                eirr_sum += a.eirr;
                if a.is_viable() {
                    stats.viable_count += 1;
                }
            }
        }

        if stats.appraised_count > 0 {
            let n = stats.appraised_count as f64;
            stats.average_bcr = bcr_sum / n;
            stats.average_enpv = enpv_sum / n;
            stats.average_eirr = eirr_sum / n;
        }

        stats
    }
}
