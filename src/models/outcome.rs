//! Filter, ranking, cull and explanation records
//!
//! These are the record sets the engine exposes to the reporting layer.
//! Reason and flag lists keep a fixed, severity-ordered presentation order;
//! evaluation order never affects their content.

use serde::Serialize;
use smallvec::SmallVec;

use crate::config::CategoryWeights;
use crate::models::animal::Sex;
use crate::models::category::TraitCategory;

/// Hard filter codes: any hit excludes the animal from ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HardFilterCode {
    /// Birth weight below the configured minimum
    BirthWeightBelowMin,
    /// Footrot score above the configured maximum
    FootrotAboveMax,
    /// Dag score above the configured maximum
    DagAboveMax,
    /// Weaning weight below the configured minimum
    WeaningWeightBelowMin,
    /// Fibre diameter above the configured maximum
    MicronAboveMax,
    /// Breeding soundness examination failed or absent while required
    BseFailed,
}

impl HardFilterCode {
    /// Stable snake_case code for reports
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BirthWeightBelowMin => "min_birth_weight",
            Self::FootrotAboveMax => "max_footrot_score",
            Self::DagAboveMax => "max_dag_score",
            Self::WeaningWeightBelowMin => "min_weaning_weight",
            Self::MicronAboveMax => "max_micron",
            Self::BseFailed => "bse_pass_required",
        }
    }
}

/// Soft filter codes: flags for reviewer attention, never eliminating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoftFlagCode {
    /// 200-day weight below the configured minimum
    Weight200dBelowMin,
    /// 300-day weight below the configured minimum
    Weight300dBelowMin,
    /// Weaning rate below the configured minimum
    WeaningRateBelowMin,
}

impl SoftFlagCode {
    /// Stable snake_case code for reports
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Weight200dBelowMin => "min_200d_weight",
            Self::Weight300dBelowMin => "min_300d_weight",
            Self::WeaningRateBelowMin => "min_weaning_rate",
        }
    }
}

/// One triggered filter with the literal value that triggered it
///
/// `value` is `None` only for presence-style filters (a required BSE with
/// no recorded outcome).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FilterHit<C> {
    /// Which filter was triggered
    pub code: C,
    /// The raw KPI value that triggered the filter
    pub value: Option<f64>,
    /// The configured threshold the value was checked against
    pub threshold: f64,
}

/// Per-animal filter evaluation result
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Identifier of the evaluated animal
    pub animal_id: String,
    /// Every failed hard filter, in declaration order
    pub hard_hits: SmallVec<[FilterHit<HardFilterCode>; 2]>,
    /// Every raised soft flag, in declaration order
    pub soft_hits: SmallVec<[FilterHit<SoftFlagCode>; 2]>,
}

impl FilterOutcome {
    /// Whether any hard filter failed
    #[must_use]
    pub fn hard_failed(&self) -> bool {
        !self.hard_hits.is_empty()
    }
}

/// One row of the ranked output, 1 = best
#[derive(Debug, Clone, Serialize)]
pub struct RankEntry {
    /// Identifier of the ranked animal
    pub animal_id: String,
    /// Sex of the ranked animal
    pub sex: Sex,
    /// Composite score the ordering is based on
    pub composite: f64,
    /// Assigned rank, 1..N with no gaps or repeats
    pub rank: u32,
    /// Count of non-missing category scores, the first tie-break key
    pub category_count: usize,
}

/// A single cull reason with its triggering values
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CullReason {
    /// Pre-existing cull flag supplied with the input data
    ExplicitFlag {
        /// Free-text reason carried over from the input, if any
        note: Option<String>,
    },
    /// A hard filter failed
    HardFilter {
        /// Which hard filter failed
        code: HardFilterCode,
        /// The raw value that failed the filter
        value: Option<f64>,
        /// The configured threshold
        threshold: f64,
    },
    /// Composite score below the group's low-score threshold
    LowScore {
        /// The animal's composite score
        score: f64,
        /// The within-group percentile threshold it fell below
        threshold: f64,
    },
}

impl CullReason {
    /// Fixed severity ranking: explicit flag > hard filter > low score
    #[must_use]
    pub const fn severity(&self) -> u8 {
        match self {
            Self::ExplicitFlag { .. } => 0,
            Self::HardFilter { .. } => 1,
            Self::LowScore { .. } => 2,
        }
    }
}

/// Keep/cull decision for one animal, with auditable reasons
///
/// Every animal in the input receives a recommendation, including animals
/// excluded from ranking.
#[derive(Debug, Clone, Serialize)]
pub struct CullRecommendation {
    /// Identifier of the evaluated animal
    pub animal_id: String,
    /// Whether culling is recommended
    pub cull_recommended: bool,
    /// Triggering reasons, ordered by severity
    pub reasons: Vec<CullReason>,
}

/// Per-category line of an explanation
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    /// The category
    pub category: TraitCategory,
    /// The category score, absent when no trait was available
    pub score: Option<f64>,
    /// How many of the category's traits were available
    pub trait_count: usize,
}

/// Structured breakdown of what drove an animal's outcome
///
/// Purely derivative: assembled from the outputs of the earlier stages,
/// with no new computation.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    /// Identifier of the explained animal
    pub animal_id: String,
    /// Contemporary group the animal was compared within
    pub group_id: String,
    /// Size of that group
    pub group_size: usize,
    /// Whether the group was below the minimum size
    pub group_small: bool,
    /// Per-category scores with trait counts
    pub categories: Vec<CategoryBreakdown>,
    /// Composite score, absent when no category score was available
    pub composite: Option<f64>,
    /// The weight configuration the composite was computed with
    pub weights: CategoryWeights,
    /// Every failed hard filter with its triggering value
    pub hard_hits: Vec<FilterHit<HardFilterCode>>,
    /// Every raised soft flag with its triggering value
    pub soft_hits: Vec<FilterHit<SoftFlagCode>>,
    /// Cull reasons, ordered by severity
    pub cull_reasons: Vec<CullReason>,
    /// Categories scoring clearly above the cohort
    pub strengths: Vec<TraitCategory>,
    /// Categories scoring clearly below the cohort
    pub weaknesses: Vec<TraitCategory>,
}
