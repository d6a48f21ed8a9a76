//! Derived score record sets
//!
//! Each scoring stage produces a new record set keyed by animal id. A
//! missing score stays missing at every level; it is never replaced with
//! a zero.

use rustc_hash::FxHashMap;

use crate::models::category::TraitCategory;
use crate::models::kpi::Kpi;

/// Within-cohort standardized trait values for the whole run
///
/// Keyed by animal id, then KPI. A KPI absent for an animal means the raw
/// value was missing; it is never imputed.
#[derive(Debug, Clone, Default)]
pub struct StandardizedSet {
    by_animal: FxHashMap<String, FxHashMap<Kpi, f64>>,
}

impl StandardizedSet {
    pub(crate) fn insert(&mut self, animal_id: &str, kpi: Kpi, value: f64) {
        self.by_animal
            .entry(animal_id.to_string())
            .or_default()
            .insert(kpi, value);
    }

    pub(crate) fn merge(&mut self, other: Self) {
        for (animal_id, values) in other.by_animal {
            self.by_animal.entry(animal_id).or_default().extend(values);
        }
    }

    /// Standardized value for one animal and KPI
    #[must_use]
    pub fn value(&self, animal_id: &str, kpi: Kpi) -> Option<f64> {
        self.by_animal.get(animal_id)?.get(&kpi).copied()
    }

    /// Number of animals with at least one standardized trait
    #[must_use]
    pub fn animal_count(&self) -> usize {
        self.by_animal.len()
    }
}

/// One category score with its data-completeness count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryScore {
    /// Mean of the available direction-adjusted standardized traits
    pub value: f64,
    /// How many of the category's traits were actually available
    pub trait_count: usize,
}

/// Per-animal category scores
///
/// A category with zero available traits has no score and is excluded from
/// composite aggregation.
#[derive(Debug, Clone)]
pub struct CategoryScores {
    scores: [Option<CategoryScore>; TraitCategory::COUNT],
    /// The animal's contemporary group was below the minimum size
    pub small_group: bool,
}

impl CategoryScores {
    #[must_use]
    pub(crate) fn new(small_group: bool) -> Self {
        Self {
            scores: [None; TraitCategory::COUNT],
            small_group,
        }
    }

    pub(crate) fn set(&mut self, category: TraitCategory, score: CategoryScore) {
        self.scores[category.index()] = Some(score);
    }

    /// Score for one category, if any trait was available
    #[must_use]
    pub fn get(&self, category: TraitCategory) -> Option<CategoryScore> {
        self.scores[category.index()]
    }

    /// Number of categories with an available score
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.scores.iter().flatten().count()
    }
}

/// Per-animal composite ranking score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeScore {
    /// Weighted mean of the available category scores
    pub value: f64,
    /// Number of categories that contributed
    pub category_count: usize,
}
