//! The scoring pipeline
//!
//! Stages in data-flow order: contemporary grouping, trait
//! standardization, category scoring, composite scoring, ranking, cull
//! recommendation, and explanation assembly. The engine in
//! [`engine`] wires them together over one input snapshot.

pub mod category;
pub mod composite;
pub mod cull;
pub mod engine;
pub mod explain;
pub mod grouping;
pub mod ranker;
pub mod standardizer;

pub use category::CategoryScorer;
pub use composite::composite_score;
pub use cull::recommend_culls;
pub use engine::{OutcomeStatistics, ScoringEngine, ScoringOutcome};
pub use explain::build_explanations;
pub use grouping::assign_groups;
pub use ranker::{RankCandidate, rank_animals};
pub use standardizer::standardize;
