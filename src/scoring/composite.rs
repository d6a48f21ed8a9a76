//! Composite scoring
//!
//! Combines category scores into one ranking scalar via the configured
//! weights. The weighted sum is divided by the weight of the categories
//! that actually have a score, so a missing category costs an animal a
//! contributing term, never a zero substitution.

use crate::config::CategoryWeights;
use crate::models::category::TraitCategory;
use crate::models::scores::{CategoryScores, CompositeScore};

/// Compute an animal's composite score, if any category has data
///
/// Returns `None` when no category has a score, or when every category
/// with a score carries zero weight (the renormalization denominator
/// would be zero).
#[must_use]
pub fn composite_score(
    scores: &CategoryScores,
    weights: &CategoryWeights,
) -> Option<CompositeScore> {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let mut category_count = 0usize;

    for category in TraitCategory::ALL {
        if let Some(score) = scores.get(category) {
            category_count += 1;
            let w = weights.weight(category);
            weighted_sum += w * score.value;
            weight_total += w;
        }
    }

    if category_count == 0 || weight_total <= 0.0 {
        return None;
    }

    Some(CompositeScore {
        value: weighted_sum / weight_total,
        category_count,
    })
}
