//! Engine orchestration
//!
//! Runs the full pipeline — grouping, standardization, category and
//! composite scoring, filtering, ranking, cull evaluation, explanation
//! assembly — over one input snapshot. Data flows strictly forward; each
//! stage produces a new derived record set keyed by animal id.

use indicatif::ParallelProgressIterator;
use log::info;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::filter::FilterEngine;
use crate::models::animal::{Animal, Sex};
use crate::models::group::GroupSummary;
use crate::models::kpi::KpiRecord;
use crate::models::outcome::{CullRecommendation, Explanation, FilterOutcome, RankEntry};
use crate::models::scores::{CategoryScores, CompositeScore};
use crate::scoring::category::CategoryScorer;
use crate::scoring::composite::composite_score;
use crate::scoring::cull::recommend_culls;
use crate::scoring::explain::build_explanations;
use crate::scoring::grouping::assign_groups;
use crate::scoring::ranker::{RankCandidate, rank_animals};
use crate::scoring::standardizer::standardize;
use crate::utils::progress;
use crate::utils::stats;

/// Herd size below which parallel scoring is not worth the overhead
const PARALLEL_MIN_ANIMALS: usize = 64;

/// The scoring engine for one validated configuration
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: EngineConfig,
}

impl ScoringEngine {
    /// Create an engine, rejecting an invalid configuration up front
    ///
    /// Configuration is the only error source in this crate: once `new`
    /// succeeds, a run always completes.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration the engine runs with
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score, rank and cull-evaluate one input snapshot
    ///
    /// Animals without a matching [`KpiRecord`] are treated as having every
    /// KPI missing; they still get a contemporary group and a cull
    /// evaluation.
    #[must_use]
    pub fn run(&self, animals: &[Animal], kpis: &[KpiRecord]) -> ScoringOutcome {
        info!("Starting scoring run for {} animals", animals.len());

        let kpi_index: FxHashMap<&str, &KpiRecord> =
            kpis.iter().map(|k| (k.animal_id.as_str(), k)).collect();

        let assignments = assign_groups(animals, &self.config.grouping);

        let parallel = self.config.use_parallel
            && num_cpus::get() > 1
            && animals.len() >= PARALLEL_MIN_ANIMALS;

        let standardized = standardize(&kpi_index, &assignments, self.config.method, parallel);

        let scorer = CategoryScorer::new(self.config.method);
        let filter_engine = FilterEngine::new(self.config.filters);
        let empty_record = KpiRecord::default();

        let score_one = |animal: &Animal| {
            let id = animal.animal_id.as_str();
            let small = assignments.group_of(id).is_some_and(|g| g.small);
            let scores = scorer.score(id, &standardized, small);
            let composite = composite_score(&scores, &self.config.weights);
            let record = kpi_index.get(id).copied().unwrap_or(&empty_record);
            let filters = filter_engine.evaluate(animal, record);
            (scores, composite, filters)
        };

        let pb = self
            .config
            .show_progress
            .then(|| progress::stage_progress_bar(animals.len() as u64, "Scoring animals"));

        let per_animal: Vec<(CategoryScores, Option<CompositeScore>, FilterOutcome)> = if parallel {
            match &pb {
                Some(pb) => animals
                    .par_iter()
                    .progress_with(pb.clone())
                    .map(score_one)
                    .collect(),
                None => animals.par_iter().map(score_one).collect(),
            }
        } else {
            animals
                .iter()
                .map(|animal| {
                    let result = score_one(animal);
                    if let Some(pb) = &pb {
                        pb.inc(1);
                    }
                    result
                })
                .collect()
        };
        if let Some(pb) = &pb {
            progress::finish_progress_bar(pb, "Scoring complete");
        }

        let mut category_scores: FxHashMap<String, CategoryScores> = FxHashMap::default();
        let mut composites: FxHashMap<String, CompositeScore> = FxHashMap::default();
        let mut filter_outcomes: Vec<FilterOutcome> = Vec::with_capacity(animals.len());

        for (animal, (scores, composite, filters)) in animals.iter().zip(per_animal) {
            category_scores.insert(animal.animal_id.clone(), scores);
            if let Some(composite) = composite {
                composites.insert(animal.animal_id.clone(), composite);
            }
            filter_outcomes.push(filters);
        }

        let candidates: Vec<RankCandidate> = animals
            .iter()
            .zip(&filter_outcomes)
            .filter(|(_, filters)| !filters.hard_failed())
            .filter_map(|(animal, _)| {
                let composite = composites.get(&animal.animal_id)?;
                Some(RankCandidate {
                    animal_id: animal.animal_id.clone(),
                    sex: animal.sex,
                    composite: composite.value,
                    category_count: composite.category_count,
                })
            })
            .collect();
        let ranked = rank_animals(candidates);

        let culls = recommend_culls(
            animals,
            &composites,
            &filter_outcomes,
            &assignments,
            &self.config.cull,
        );

        let explanations = build_explanations(
            animals,
            &assignments,
            &category_scores,
            &composites,
            &filter_outcomes,
            &culls,
            &self.config.weights,
            self.config.method,
        );

        info!(
            "Scoring run complete: {} ranked, {} cull recommendations",
            ranked.len(),
            culls.iter().filter(|c| c.cull_recommended).count()
        );

        ScoringOutcome::new(
            assignments.summaries(),
            ranked,
            culls,
            explanations,
            filter_outcomes,
        )
    }
}

/// Everything one scoring run produces
#[derive(Debug, Clone)]
pub struct ScoringOutcome {
    /// Per-group summaries, in formation order
    pub groups: Vec<GroupSummary>,
    /// Ranked surviving animals, best first
    pub ranked: Vec<RankEntry>,
    /// Keep/cull recommendation for every input animal, in input order
    pub culls: Vec<CullRecommendation>,
    /// One explanation per input animal, in input order
    pub explanations: Vec<Explanation>,
    /// Filter evaluation per input animal, in input order
    pub filter_outcomes: Vec<FilterOutcome>,
    explanation_index: FxHashMap<String, usize>,
}

impl ScoringOutcome {
    fn new(
        groups: Vec<GroupSummary>,
        ranked: Vec<RankEntry>,
        culls: Vec<CullRecommendation>,
        explanations: Vec<Explanation>,
        filter_outcomes: Vec<FilterOutcome>,
    ) -> Self {
        let explanation_index = explanations
            .iter()
            .enumerate()
            .map(|(idx, e)| (e.animal_id.clone(), idx))
            .collect();
        Self {
            groups,
            ranked,
            culls,
            explanations,
            filter_outcomes,
            explanation_index,
        }
    }

    /// The best-ranked rams, for selection shortlists
    #[must_use]
    pub fn top_rams(&self, n: usize) -> Vec<&RankEntry> {
        self.ranked
            .iter()
            .filter(|e| e.sex == Sex::Ram)
            .take(n)
            .collect()
    }

    /// The explanation for one animal
    #[must_use]
    pub fn explanation(&self, animal_id: &str) -> Option<&Explanation> {
        self.explanation_index
            .get(animal_id)
            .map(|idx| &self.explanations[*idx])
    }

    /// Summary statistics over the run
    #[must_use]
    pub fn statistics(&self) -> OutcomeStatistics {
        let total_animals = self.filter_outcomes.len();
        let hard_failed_count = self
            .filter_outcomes
            .iter()
            .filter(|f| f.hard_failed())
            .count();
        let scores: Vec<f64> = self.ranked.iter().map(|e| e.composite).collect();
        let retention_rate = if total_animals == 0 {
            0.0
        } else {
            (total_animals - hard_failed_count) as f64 / total_animals as f64 * 100.0
        };
        OutcomeStatistics {
            total_animals,
            ranked_count: self.ranked.len(),
            hard_failed_count,
            cull_count: self.culls.iter().filter(|c| c.cull_recommended).count(),
            retention_rate,
            score_mean: stats::mean(&scores),
            score_stddev: stats::sample_stddev(&scores),
            score_min: scores.iter().copied().reduce(f64::min),
            score_max: scores.iter().copied().reduce(f64::max),
        }
    }

    /// Cross-check the outcome for internal consistency
    ///
    /// Returns a list of human-readable issues; empty means consistent.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for (idx, entry) in self.ranked.iter().enumerate() {
            if entry.rank as usize != idx + 1 {
                issues.push(format!(
                    "rank {} at position {} breaks the 1..N ordering",
                    entry.rank,
                    idx + 1
                ));
                break;
            }
        }

        let hard_failed: Vec<&str> = self
            .filter_outcomes
            .iter()
            .filter(|f| f.hard_failed())
            .map(|f| f.animal_id.as_str())
            .collect();
        for id in hard_failed {
            if self.ranked.iter().any(|e| e.animal_id == id) {
                issues.push(format!("hard-failed animal {id} appears in ranked output"));
            }
        }

        if self.culls.len() != self.filter_outcomes.len() {
            issues.push(format!(
                "cull evaluation covers {} animals but {} were filtered",
                self.culls.len(),
                self.filter_outcomes.len()
            ));
        }

        for window in self.ranked.windows(2) {
            if window[0].composite < window[1].composite {
                issues.push("ranked output is not sorted by descending composite".to_string());
                break;
            }
        }

        issues
    }
}

/// Summary statistics of one scoring run
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeStatistics {
    /// Number of animals in the input snapshot
    pub total_animals: usize,
    /// Number of ranked (surviving, scored) animals
    pub ranked_count: usize,
    /// Number of animals that failed at least one hard filter
    pub hard_failed_count: usize,
    /// Number of animals recommended for culling
    pub cull_count: usize,
    /// Share of animals surviving the hard filters, percent
    pub retention_rate: f64,
    /// Mean composite score of the ranked animals
    pub score_mean: Option<f64>,
    /// Sample standard deviation of the ranked composite scores
    pub score_stddev: Option<f64>,
    /// Lowest ranked composite score
    pub score_min: Option<f64>,
    /// Highest ranked composite score
    pub score_max: Option<f64>,
}
