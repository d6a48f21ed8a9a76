//! Configuration for the scoring engine
//!
//! All knobs are explicit immutable structs with enumerated, validated
//! fields. Invalid configuration is rejected up front, before any animal
//! is processed; nothing is read from ambient state.

pub mod presets;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FlockRankError, Result};
use crate::models::category::TraitCategory;

pub use presets::{PresetRegistry, WeightPreset};

/// How raw KPI values are converted into within-cohort relative scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardizeMethod {
    /// `(raw - group mean) / group stddev`
    #[default]
    ZScore,
    /// Midrank percentile within the group, 0..100
    Percentile,
}

/// Category weights for composite scoring
///
/// Weights need not sum to 1: the composite scorer renormalizes over the
/// categories that actually have a score for each animal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    /// Weight of the growth category
    pub growth: f64,
    /// Weight of the wool category
    pub wool: f64,
    /// Weight of the reproduction category
    pub reproduction: f64,
    /// Weight of the health category
    pub health: f64,
    /// Weight of the temperament category
    pub temperament: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        WeightPreset::Balanced.weights()
    }
}

impl CategoryWeights {
    /// Weight for one category
    #[must_use]
    pub const fn weight(&self, category: TraitCategory) -> f64 {
        match category {
            TraitCategory::Growth => self.growth,
            TraitCategory::Wool => self.wool,
            TraitCategory::Reproduction => self.reproduction,
            TraitCategory::Health => self.health,
            TraitCategory::Temperament => self.temperament,
        }
    }

    /// Create a new builder for constructing weights
    #[must_use]
    pub fn builder() -> CategoryWeightsBuilder {
        CategoryWeightsBuilder::new()
    }

    /// Reject negative, non-finite, or all-zero weights
    pub fn validate(&self) -> Result<()> {
        for category in TraitCategory::ALL {
            let w = self.weight(category);
            if !w.is_finite() {
                return Err(FlockRankError::configuration(format!(
                    "weight for {} is not finite",
                    category.name()
                )));
            }
            if w < 0.0 {
                return Err(FlockRankError::configuration(format!(
                    "weight for {} is negative ({w})",
                    category.name()
                )));
            }
        }
        let total: f64 = TraitCategory::ALL.iter().map(|c| self.weight(*c)).sum();
        if total == 0.0 {
            return Err(FlockRankError::configuration(
                "all category weights are zero",
            ));
        }
        Ok(())
    }
}

/// Builder for constructing category weights
#[derive(Debug, Clone)]
pub struct CategoryWeightsBuilder {
    weights: CategoryWeights,
}

impl Default for CategoryWeightsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryWeightsBuilder {
    /// Create a new builder starting from the balanced weights
    #[must_use]
    pub fn new() -> Self {
        Self {
            weights: CategoryWeights::default(),
        }
    }

    /// Set the growth weight
    #[must_use]
    pub const fn growth(mut self, weight: f64) -> Self {
        self.weights.growth = weight;
        self
    }

    /// Set the wool weight
    #[must_use]
    pub const fn wool(mut self, weight: f64) -> Self {
        self.weights.wool = weight;
        self
    }

    /// Set the reproduction weight
    #[must_use]
    pub const fn reproduction(mut self, weight: f64) -> Self {
        self.weights.reproduction = weight;
        self
    }

    /// Set the health weight
    #[must_use]
    pub const fn health(mut self, weight: f64) -> Self {
        self.weights.health = weight;
        self
    }

    /// Set the temperament weight
    #[must_use]
    pub const fn temperament(mut self, weight: f64) -> Self {
        self.weights.temperament = weight;
        self
    }

    /// Build the weights, rejecting invalid values
    pub fn build(self) -> Result<CategoryWeights> {
        self.weights.validate()?;
        Ok(self.weights)
    }
}

/// Contemporary grouping parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Maximum gap in days between consecutive birth dates within a group
    pub window_days: i64,
    /// Groups below this size are marked small
    pub min_group_size: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            min_group_size: 3,
        }
    }
}

impl GroupingConfig {
    /// Reject a negative window or a zero minimum size
    pub fn validate(&self) -> Result<()> {
        if self.window_days < 0 {
            return Err(FlockRankError::configuration(format!(
                "grouping window is negative ({} days)",
                self.window_days
            )));
        }
        if self.min_group_size == 0 {
            return Err(FlockRankError::configuration(
                "minimum group size must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Hard and soft filter thresholds
///
/// Filters are absolute: they compare raw KPI values against these
/// thresholds, never cohort-relative scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Hard: minimum acceptable birth weight (kg)
    pub min_birth_weight: f64,
    /// Hard: maximum acceptable footrot score
    pub max_footrot_score: f64,
    /// Hard: maximum acceptable dag score
    pub max_dag_score: f64,
    /// Hard: minimum acceptable weaning weight (kg)
    pub min_weaning_weight: f64,
    /// Hard: maximum acceptable fibre diameter (micron)
    pub max_micron: f64,
    /// Hard: whether a passed breeding soundness examination is required
    pub bse_required: bool,
    /// Soft: 200-day weight below this raises a flag (kg)
    pub min_weight_200d: f64,
    /// Soft: 300-day weight below this raises a flag (kg)
    pub min_weight_300d: f64,
    /// Soft: weaning rate below this raises a flag
    pub min_weaning_rate: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_birth_weight: 2.0,
            max_footrot_score: 4.0,
            max_dag_score: 4.0,
            min_weaning_weight: 20.0,
            max_micron: 25.0,
            bse_required: true,
            min_weight_200d: 40.0,
            min_weight_300d: 50.0,
            min_weaning_rate: 0.5,
        }
    }
}

impl FilterConfig {
    /// Reject negative or non-finite thresholds
    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("min_birth_weight", self.min_birth_weight),
            ("max_footrot_score", self.max_footrot_score),
            ("max_dag_score", self.max_dag_score),
            ("min_weaning_weight", self.min_weaning_weight),
            ("max_micron", self.max_micron),
            ("min_weight_200d", self.min_weight_200d),
            ("min_weight_300d", self.min_weight_300d),
            ("min_weaning_rate", self.min_weaning_rate),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() {
                return Err(FlockRankError::configuration(format!(
                    "filter threshold {name} is not finite"
                )));
            }
            if value < 0.0 {
                return Err(FlockRankError::configuration(format!(
                    "filter threshold {name} is negative ({value})"
                )));
            }
        }
        Ok(())
    }
}

/// Cull policy parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CullConfig {
    /// Composite scores below this within-group percentile trigger a
    /// low-score cull reason
    pub low_score_percentile: f64,
}

impl Default for CullConfig {
    fn default() -> Self {
        Self {
            low_score_percentile: 10.0,
        }
    }
}

impl CullConfig {
    /// Reject percentiles outside 0..=100
    pub fn validate(&self) -> Result<()> {
        if !self.low_score_percentile.is_finite()
            || !(0.0..=100.0).contains(&self.low_score_percentile)
        {
            return Err(FlockRankError::configuration(format!(
                "low-score percentile must be within 0..=100, got {}",
                self.low_score_percentile
            )));
        }
        Ok(())
    }
}

/// Complete configuration for one scoring run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Category weights for composite scoring
    pub weights: CategoryWeights,
    /// Hard and soft filter thresholds
    pub filters: FilterConfig,
    /// Contemporary grouping parameters
    pub grouping: GroupingConfig,
    /// Cull policy parameters
    pub cull: CullConfig,
    /// Standardization method
    pub method: StandardizeMethod,
    /// Whether to parallelize per-group and per-animal stages
    pub use_parallel: bool,
    /// Whether to display progress bars for large herds
    pub show_progress: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: CategoryWeights::default(),
            filters: FilterConfig::default(),
            grouping: GroupingConfig::default(),
            cull: CullConfig::default(),
            method: StandardizeMethod::default(),
            use_parallel: true,
            show_progress: false,
        }
    }
}

impl EngineConfig {
    /// Configuration using a named preset's weights and default thresholds
    pub fn for_preset(registry: &PresetRegistry, name: &str) -> Result<Self> {
        Ok(Self {
            weights: *registry.get(name)?,
            ..Self::default()
        })
    }

    /// Validate every section; called before any animal is processed
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.filters.validate()?;
        self.grouping.validate()?;
        self.cull.validate()?;
        Ok(())
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Engine Configuration:")?;
        writeln!(
            f,
            "  Weights: growth={} wool={} reproduction={} health={} temperament={}",
            self.weights.growth,
            self.weights.wool,
            self.weights.reproduction,
            self.weights.health,
            self.weights.temperament
        )?;
        writeln!(f, "  Grouping Window: {} days", self.grouping.window_days)?;
        writeln!(f, "  Minimum Group Size: {}", self.grouping.min_group_size)?;
        writeln!(f, "  Standardization: {:?}", self.method)?;
        writeln!(
            f,
            "  Low-Score Percentile: {}",
            self.cull.low_score_percentile
        )?;
        writeln!(f, "  Parallel: {}", self.use_parallel)?;
        Ok(())
    }
}
