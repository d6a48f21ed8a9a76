//! Hard and soft filtering of animals
//!
//! Filters compare raw KPI values against absolute thresholds; they never
//! look at cohort-relative scores. Hard filters exclude an animal from
//! ranking, soft filters only flag it. Every filter is evaluated for every
//! animal and all hits are recorded, so evaluation order never affects the
//! result set.

use smallvec::SmallVec;

use crate::config::FilterConfig;
use crate::models::animal::Animal;
use crate::models::kpi::{Kpi, KpiRecord};
use crate::models::outcome::{FilterHit, FilterOutcome, HardFilterCode, SoftFlagCode};

/// Evaluates the configured hard and soft filters per animal
#[derive(Debug, Clone)]
pub struct FilterEngine {
    config: FilterConfig,
}

impl FilterEngine {
    /// Create a filter engine from validated thresholds
    #[must_use]
    pub const fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Evaluate every filter against one animal's raw KPIs
    ///
    /// A missing raw value means a threshold filter cannot trigger. The one
    /// exception is a required breeding soundness examination: an animal
    /// with no recorded outcome has not passed it and fails the filter.
    #[must_use]
    pub fn evaluate(&self, animal: &Animal, kpis: &KpiRecord) -> FilterOutcome {
        let mut hard_hits = SmallVec::new();
        let mut soft_hits = SmallVec::new();

        push_below(
            &mut hard_hits,
            HardFilterCode::BirthWeightBelowMin,
            kpis.get(Kpi::BirthWeight),
            self.config.min_birth_weight,
        );
        push_above(
            &mut hard_hits,
            HardFilterCode::FootrotAboveMax,
            kpis.get(Kpi::FootrotScore),
            self.config.max_footrot_score,
        );
        push_above(
            &mut hard_hits,
            HardFilterCode::DagAboveMax,
            kpis.get(Kpi::DagScore),
            self.config.max_dag_score,
        );
        push_below(
            &mut hard_hits,
            HardFilterCode::WeaningWeightBelowMin,
            kpis.get(Kpi::WeaningWeight),
            self.config.min_weaning_weight,
        );
        push_above(
            &mut hard_hits,
            HardFilterCode::MicronAboveMax,
            kpis.get(Kpi::Micron),
            self.config.max_micron,
        );

        if self.config.bse_required {
            let bse = kpis.get(Kpi::BsePass);
            let passed = bse.is_some_and(|v| v > 0.0);
            if !passed {
                hard_hits.push(FilterHit {
                    code: HardFilterCode::BseFailed,
                    value: bse,
                    threshold: 1.0,
                });
            }
        }

        push_below(
            &mut soft_hits,
            SoftFlagCode::Weight200dBelowMin,
            kpis.get(Kpi::Weight200d),
            self.config.min_weight_200d,
        );
        push_below(
            &mut soft_hits,
            SoftFlagCode::Weight300dBelowMin,
            kpis.get(Kpi::Weight300d),
            self.config.min_weight_300d,
        );
        push_below(
            &mut soft_hits,
            SoftFlagCode::WeaningRateBelowMin,
            kpis.get(Kpi::WeaningRate),
            self.config.min_weaning_rate,
        );

        FilterOutcome {
            animal_id: animal.animal_id.clone(),
            hard_hits,
            soft_hits,
        }
    }
}

fn push_below<C: Copy>(
    hits: &mut SmallVec<[FilterHit<C>; 2]>,
    code: C,
    value: Option<f64>,
    threshold: f64,
) {
    if let Some(v) = value {
        if v < threshold {
            hits.push(FilterHit {
                code,
                value: Some(v),
                threshold,
            });
        }
    }
}

fn push_above<C: Copy>(
    hits: &mut SmallVec<[FilterHit<C>; 2]>,
    code: C,
    value: Option<f64>,
    threshold: f64,
) {
    if let Some(v) = value {
        if v > threshold {
            hits.push(FilterHit {
                code,
                value: Some(v),
                threshold,
            });
        }
    }
}
