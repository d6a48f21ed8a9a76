//! Within-cohort trait standardization
//!
//! Converts each KPI into a relative score against the animal's
//! contemporary group. Degenerate groups (zero variance, singletons) yield
//! the method's neutral value for every member instead of an error, and a
//! missing raw value stays missing rather than being imputed.

use log::info;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::config::StandardizeMethod;
use crate::models::category::TraitCategory;
use crate::models::group::{ContemporaryGroup, GroupAssignments};
use crate::models::kpi::{Kpi, KpiRecord};
use crate::models::scores::StandardizedSet;
use crate::utils::stats;

/// Standardize every category KPI within every contemporary group
#[must_use]
pub fn standardize(
    kpis: &FxHashMap<&str, &KpiRecord>,
    assignments: &GroupAssignments,
    method: StandardizeMethod,
    parallel: bool,
) -> StandardizedSet {
    let groups = assignments.groups();

    let partials: Vec<StandardizedSet> = if parallel {
        groups
            .par_iter()
            .map(|group| standardize_group(group, kpis, method))
            .collect()
    } else {
        groups
            .iter()
            .map(|group| standardize_group(group, kpis, method))
            .collect()
    };

    let mut result = StandardizedSet::default();
    for partial in partials {
        result.merge(partial);
    }

    info!(
        "Standardized traits for {} animals across {} groups",
        result.animal_count(),
        groups.len()
    );

    result
}

fn standardize_group(
    group: &ContemporaryGroup,
    kpis: &FxHashMap<&str, &KpiRecord>,
    method: StandardizeMethod,
) -> StandardizedSet {
    let mut set = StandardizedSet::default();

    for kpi in category_kpis() {
        let present: Vec<(&str, f64)> = group
            .member_ids
            .iter()
            .filter_map(|id| {
                let value = kpis.get(id.as_str())?.get(kpi)?;
                Some((id.as_str(), value))
            })
            .collect();

        if present.is_empty() {
            continue;
        }
        let values: Vec<f64> = present.iter().map(|(_, v)| *v).collect();

        match method {
            StandardizeMethod::ZScore => {
                let stddev = stats::sample_stddev(&values);
                match stddev {
                    Some(sd) if sd > 0.0 => {
                        let mean = stats::mean(&values).unwrap_or(0.0);
                        for (id, value) in &present {
                            set.insert(id, kpi, (value - mean) / sd);
                        }
                    }
                    // No discriminating signal: every member is average.
                    _ => {
                        for (id, _) in &present {
                            set.insert(id, kpi, 0.0);
                        }
                    }
                }
            }
            StandardizeMethod::Percentile => {
                for (id, value) in &present {
                    if let Some(p) = stats::midrank_percentile(*value, &values) {
                        set.insert(id, kpi, p);
                    }
                }
            }
        }
    }

    set
}

/// The KPIs that feed a category and therefore get standardized
fn category_kpis() -> impl Iterator<Item = Kpi> {
    TraitCategory::ALL
        .into_iter()
        .flat_map(|c| c.kpis().iter().copied())
}
