//! Category scoring
//!
//! Aggregates standardized traits into the five category scores. Traits
//! where a lower raw value is better are direction-adjusted first, so a
//! higher category score always means a better animal. A category with no
//! available traits gets no score.

use crate::config::StandardizeMethod;
use crate::models::category::TraitCategory;
use crate::models::kpi::Direction;
use crate::models::scores::{CategoryScore, CategoryScores, StandardizedSet};

/// Computes per-animal category scores from standardized traits
#[derive(Debug, Clone, Copy)]
pub struct CategoryScorer {
    method: StandardizeMethod,
}

impl CategoryScorer {
    /// Create a scorer for the given standardization method
    #[must_use]
    pub const fn new(method: StandardizeMethod) -> Self {
        Self { method }
    }

    /// Score every category for one animal
    ///
    /// `small_group` is passed through from the grouper so downstream
    /// consumers can see that the cohort baseline was weak; it does not
    /// change the arithmetic.
    #[must_use]
    pub fn score(
        &self,
        animal_id: &str,
        standardized: &StandardizedSet,
        small_group: bool,
    ) -> CategoryScores {
        let mut scores = CategoryScores::new(small_group);

        for category in TraitCategory::ALL {
            let adjusted: Vec<f64> = category
                .kpis()
                .iter()
                .filter_map(|kpi| {
                    let value = standardized.value(animal_id, *kpi)?;
                    Some(self.adjust(kpi.direction(), value))
                })
                .collect();

            if adjusted.is_empty() {
                continue;
            }
            scores.set(
                category,
                CategoryScore {
                    value: adjusted.iter().sum::<f64>() / adjusted.len() as f64,
                    trait_count: adjusted.len(),
                },
            );
        }

        scores
    }

    /// Flip lower-is-better traits onto the "higher is better" scale
    fn adjust(&self, direction: Direction, value: f64) -> f64 {
        match direction {
            Direction::HigherIsBetter => value,
            Direction::LowerIsBetter => match self.method {
                StandardizeMethod::ZScore => -value,
                StandardizeMethod::Percentile => 100.0 - value,
            },
        }
    }
}
