//! Domain models for the scoring engine
//!
//! Input identity and KPI records, the contemporary-group structures, and
//! the derived record sets each pipeline stage produces.

pub mod animal;
pub mod category;
pub mod group;
pub mod kpi;
pub mod outcome;
pub mod scores;

pub use animal::{Animal, Sex};
pub use category::TraitCategory;
pub use group::{ContemporaryGroup, GroupAssignments, GroupSummary, GroupingStats};
pub use kpi::{Direction, Kpi, KpiRecord};
pub use outcome::{
    CategoryBreakdown, CullReason, CullRecommendation, Explanation, FilterHit, FilterOutcome,
    HardFilterCode, RankEntry, SoftFlagCode,
};
pub use scores::{CategoryScore, CategoryScores, CompositeScore, StandardizedSet};
