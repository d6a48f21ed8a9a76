//! Explanation assembly
//!
//! Builds the per-animal breakdown of what drove each outcome. Purely
//! derivative: everything here was computed by an earlier stage; this
//! module only gathers it into one record per animal.

use rustc_hash::FxHashMap;

use crate::config::{CategoryWeights, StandardizeMethod};
use crate::models::animal::Animal;
use crate::models::category::TraitCategory;
use crate::models::group::{ContemporaryGroup, GroupAssignments};
use crate::models::outcome::{CategoryBreakdown, CullRecommendation, Explanation, FilterOutcome};
use crate::models::scores::{CategoryScores, CompositeScore};

/// Category score above this is listed as a strength, below its negation
/// as a weakness (z-score scale)
const ZSCORE_NOTABLE: f64 = 0.5;
/// Percentile-scale equivalents
const PERCENTILE_STRONG: f64 = 70.0;
const PERCENTILE_WEAK: f64 = 30.0;

/// Assemble one explanation per animal, in input order
#[must_use]
pub fn build_explanations(
    animals: &[Animal],
    assignments: &GroupAssignments,
    category_scores: &FxHashMap<String, CategoryScores>,
    composites: &FxHashMap<String, CompositeScore>,
    filter_outcomes: &[FilterOutcome],
    culls: &[CullRecommendation],
    weights: &CategoryWeights,
    method: StandardizeMethod,
) -> Vec<Explanation> {
    animals
        .iter()
        .zip(filter_outcomes)
        .zip(culls)
        .map(|((animal, filters), cull)| {
            let group = assignments.group_of(&animal.animal_id);
            let scores = category_scores.get(&animal.animal_id);

            let mut categories = Vec::with_capacity(TraitCategory::COUNT);
            let mut strengths = Vec::new();
            let mut weaknesses = Vec::new();

            for category in TraitCategory::ALL {
                let score = scores.and_then(|s| s.get(category));
                categories.push(CategoryBreakdown {
                    category,
                    score: score.map(|s| s.value),
                    trait_count: score.map_or(0, |s| s.trait_count),
                });
                if let Some(score) = score {
                    match method {
                        StandardizeMethod::ZScore => {
                            if score.value > ZSCORE_NOTABLE {
                                strengths.push(category);
                            } else if score.value < -ZSCORE_NOTABLE {
                                weaknesses.push(category);
                            }
                        }
                        StandardizeMethod::Percentile => {
                            if score.value > PERCENTILE_STRONG {
                                strengths.push(category);
                            } else if score.value < PERCENTILE_WEAK {
                                weaknesses.push(category);
                            }
                        }
                    }
                }
            }

            Explanation {
                animal_id: animal.animal_id.clone(),
                group_id: group.map_or_else(String::new, |g| g.id.clone()),
                group_size: group.map_or(0, ContemporaryGroup::size),
                group_small: scores.is_some_and(|s| s.small_group),
                categories,
                composite: composites.get(&animal.animal_id).map(|c| c.value),
                weights: *weights,
                hard_hits: filters.hard_hits.to_vec(),
                soft_hits: filters.soft_hits.to_vec(),
                cull_reasons: cull.reasons.clone(),
                strengths,
                weaknesses,
            }
        })
        .collect()
}
