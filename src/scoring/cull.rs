//! Cull recommendation
//!
//! Every animal in the input is evaluated, including animals excluded from
//! ranking. An animal is recommended for culling when it carries an
//! explicit input flag, failed any hard filter, or scored below the
//! configured percentile of composite scores within its own contemporary
//! group. All triggering reasons are kept, ordered by fixed severity.

use log::info;
use rustc_hash::FxHashMap;

use crate::config::CullConfig;
use crate::models::animal::Animal;
use crate::models::group::GroupAssignments;
use crate::models::outcome::{CullReason, CullRecommendation, FilterOutcome};
use crate::models::scores::CompositeScore;
use crate::utils::stats;

/// Evaluate the cull policy over the full population
#[must_use]
pub fn recommend_culls(
    animals: &[Animal],
    composites: &FxHashMap<String, CompositeScore>,
    filter_outcomes: &[FilterOutcome],
    assignments: &GroupAssignments,
    config: &CullConfig,
) -> Vec<CullRecommendation> {
    let thresholds = group_thresholds(composites, assignments, config);

    let recommendations: Vec<CullRecommendation> = animals
        .iter()
        .zip(filter_outcomes)
        .map(|(animal, filters)| {
            let mut reasons: Vec<CullReason> = Vec::new();

            if animal.cull_flag {
                reasons.push(CullReason::ExplicitFlag {
                    note: animal.cull_reason.clone(),
                });
            }

            for hit in &filters.hard_hits {
                reasons.push(CullReason::HardFilter {
                    code: hit.code,
                    value: hit.value,
                    threshold: hit.threshold,
                });
            }

            if let Some(composite) = composites.get(&animal.animal_id) {
                let threshold = assignments
                    .group_of(&animal.animal_id)
                    .and_then(|g| thresholds.get(&g.id).copied());
                if let Some(threshold) = threshold {
                    if composite.value < threshold {
                        reasons.push(CullReason::LowScore {
                            score: composite.value,
                            threshold,
                        });
                    }
                }
            }

            reasons.sort_by_key(CullReason::severity);

            CullRecommendation {
                animal_id: animal.animal_id.clone(),
                cull_recommended: !reasons.is_empty(),
                reasons,
            }
        })
        .collect();

    let cull_count = recommendations.iter().filter(|r| r.cull_recommended).count();
    info!(
        "Cull evaluation: {} of {} animals recommended for culling",
        cull_count,
        animals.len()
    );

    recommendations
}

/// Low-score threshold per contemporary group
///
/// The bar is relative: the configured percentile of the composite scores
/// present in each group, so it adapts per cohort.
fn group_thresholds(
    composites: &FxHashMap<String, CompositeScore>,
    assignments: &GroupAssignments,
    config: &CullConfig,
) -> FxHashMap<String, f64> {
    let q = config.low_score_percentile / 100.0;
    assignments
        .groups()
        .iter()
        .filter_map(|group| {
            let scores: Vec<f64> = group
                .member_ids
                .iter()
                .filter_map(|id| composites.get(id).map(|c| c.value))
                .collect();
            let threshold = stats::quantile(&scores, q)?;
            Some((group.id.clone(), threshold))
        })
        .collect()
}
