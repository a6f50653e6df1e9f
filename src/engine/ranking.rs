// ==========================================
// Road appraisal - ranking aggregator
// ==========================================
// Sort keys:
// 1) BCR > 1 before BCR <= 1
// 2) ENPV descending
// Ties keep input order (stable sort). Ranks are reassigned
// 1..N on every call.
// ==========================================

use crate::domain::appraisal::{AppraisalResult, SectionOutcome};
use std::cmp::Ordering;

pub struct RankingAggregator;

impl RankingAggregator {
    /// Ranks the appraised outcomes in place; returns section ids in rank order.
    /// Outcomes without an appraisal are left unranked.
    pub fn rank(outcomes: &mut [SectionOutcome]) -> Vec<String> {
        let mut order: Vec<usize> = outcomes
            .iter()
            .enumerate()
            .filter(|(_, o)| o.appraisal.is_some())
            .map(|(i, _)| i)
            .collect();

        order.sort_by(|&a, &b| {
            match (&outcomes[a].appraisal, &outcomes[b].appraisal) {
                (Some(x), Some(y)) => Self::compare(x, y),
                _ => Ordering::Equal,
            }
        });

        let mut ranking = Vec::with_capacity(order.len());
        for (position, index) in order.into_iter().enumerate() {
            let outcome = &mut outcomes[index];
            if let Some(appraisal) = outcome.appraisal.as_mut() {
                appraisal.rank = Some(position + 1);
            }
            ranking.push(outcome.section.id.clone());
        }
        ranking
    }

    /// Ordering of two appraisals (Less = ranked higher)
    pub fn compare(a: &AppraisalResult, b: &AppraisalResult) -> Ordering {
        b.is_viable()
            .cmp(&a.is_viable())
            .then_with(|| b.enpv.total_cmp(&a.enpv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::condition::{CoefficientDetail, DetailedTechnicalCondition};
    use crate::domain::road_section::RoadSection;
    use crate::domain::types::{PavementType, WorkType};

    fn outcome(id: &str, appraisal: Option<(f64, f64)>) -> SectionOutcome {
        let detail = CoefficientDetail {
            coefficient: 1.0,
            threshold: 1.0,
            actual: 1.0,
        };
        SectionOutcome {
            section: RoadSection {
                id: id.to_string(),
                name: id.to_string(),
                category: 3,
                length_km: 1.0,
                significance: None,
                region: None,
                pavement_type: PavementType::Flexible,
                actual_intensity: 1.0,
                actual_elastic_modulus: 1.0,
                actual_surface_evenness: 1.0,
                actual_rut_depth: 1.0,
                actual_friction_value: 1.0,
                is_defense_road: false,
                is_international_road: false,
            },
            condition: DetailedTechnicalCondition {
                intensity: detail,
                strength_flexible: detail,
                strength_rigid: detail,
                evenness: detail,
                rut: detail,
                friction: detail,
            },
            work_type: WorkType::CurrentRepair,
            work_type_reasons: vec![],
            estimated_cost: 100.0,
            appraisal: appraisal.map(|(bcr, enpv)| AppraisalResult {
                estimated_cost: 100.0,
                enpv,
                eirr: 0.1,
                bcr,
                discounted_benefits: 0.0,
                discounted_costs: 0.0,
                cash_flows: vec![],
                rank: Some(99),
            }),
            appraisal_error: None,
        }
    }

    #[test]
    fn test_viability_first_then_enpv() {
        let mut outcomes = vec![
            outcome("low-bcr-high-enpv", Some((0.9, 5000.0))),
            outcome("viable-small", Some((1.5, 100.0))),
            outcome("unappraised", None),
            outcome("viable-big", Some((1.1, 900.0))),
        ];
        let ranking = RankingAggregator::rank(&mut outcomes);
        assert_eq!(ranking, vec!["viable-big", "viable-small", "low-bcr-high-enpv"]);
        assert_eq!(outcomes[3].rank(), Some(1));
        assert_eq!(outcomes[1].rank(), Some(2));
        assert_eq!(outcomes[0].rank(), Some(3));
        assert_eq!(outcomes[2].rank(), None);
    }

    #[test]
    fn test_bcr_exactly_one_is_not_viable() {
        let mut outcomes = vec![
            outcome("one", Some((1.0, 10.0))),
            outcome("above", Some((1.0001, 1.0))),
        ];
        let ranking = RankingAggregator::rank(&mut outcomes);
        assert_eq!(ranking, vec!["above", "one"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut outcomes = vec![
            outcome("a", Some((2.0, 50.0))),
            outcome("b", Some((3.0, 50.0))),
            outcome("c", Some((1.5, 50.0))),
        ];
        assert_eq!(RankingAggregator::rank(&mut outcomes), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rerank_is_deterministic() {
        let mut outcomes = vec![
            outcome("a", Some((0.5, -10.0))),
            outcome("b", Some((1.2, 10.0))),
            outcome("c", Some((0.5, -10.0))),
        ];
        let first = RankingAggregator::rank(&mut outcomes);
        let ranks: Vec<_> = outcomes.iter().map(|o| o.rank()).collect();
        let second = RankingAggregator::rank(&mut outcomes);
        assert_eq!(first, second);
        assert_eq!(ranks, outcomes.iter().map(|o| o.rank()).collect::<Vec<_>>());
        assert_eq!(first, vec!["b", "a", "c"]);
    }
}
