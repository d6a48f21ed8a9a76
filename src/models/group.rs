//! Contemporary group structures
//!
//! A contemporary group is the cohort of directly comparable animals: same
//! management group, birth dates within the configured window of each
//! other. Groups are formed once per run and every animal belongs to
//! exactly one.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// A single contemporary group and its members
#[derive(Debug, Clone)]
pub struct ContemporaryGroup {
    /// Group identifier, `<mgmt_group>_G<n>`
    pub id: String,
    /// Management group the cohort was formed within
    pub mgmt_group: String,
    /// Member animal ids, in birth-date order
    pub member_ids: Vec<String>,
    /// Below the configured minimum size; standardization is degraded
    pub small: bool,
    /// Earliest birth date among members
    pub first_birth: NaiveDate,
    /// Latest birth date among members
    pub last_birth: NaiveDate,
}

impl ContemporaryGroup {
    /// Number of member animals
    #[must_use]
    pub fn size(&self) -> usize {
        self.member_ids.len()
    }
}

/// Per-group summary exposed to the reporting layer
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    /// Group identifier
    pub id: String,
    /// Management group the cohort was formed within
    pub mgmt_group: String,
    /// Number of member animals
    pub size: usize,
    /// Below the configured minimum size
    pub small: bool,
    /// Earliest birth date among members
    pub first_birth: NaiveDate,
    /// Latest birth date among members
    pub last_birth: NaiveDate,
}

/// Aggregate statistics over all groups in a run
#[derive(Debug, Clone, Serialize)]
pub struct GroupingStats {
    /// Total number of contemporary groups formed
    pub total_groups: usize,
    /// Number of groups below the minimum size
    pub small_groups: usize,
    /// Smallest group size
    pub min_size: usize,
    /// Largest group size
    pub max_size: usize,
    /// Mean group size
    pub mean_size: f64,
}

/// The full group assignment produced by the contemporary grouper
#[derive(Debug, Clone, Default)]
pub struct GroupAssignments {
    groups: Vec<ContemporaryGroup>,
    by_animal: FxHashMap<String, usize>,
}

impl GroupAssignments {
    /// Build assignments from finished groups
    #[must_use]
    pub(crate) fn new(groups: Vec<ContemporaryGroup>) -> Self {
        let mut by_animal = FxHashMap::default();
        for (idx, group) in groups.iter().enumerate() {
            for id in &group.member_ids {
                by_animal.insert(id.clone(), idx);
            }
        }
        Self { groups, by_animal }
    }

    /// All groups, in formation order
    #[must_use]
    pub fn groups(&self) -> &[ContemporaryGroup] {
        &self.groups
    }

    /// The group an animal was assigned to
    #[must_use]
    pub fn group_of(&self, animal_id: &str) -> Option<&ContemporaryGroup> {
        self.by_animal.get(animal_id).map(|idx| &self.groups[*idx])
    }

    /// Per-group summaries for downstream display
    #[must_use]
    pub fn summaries(&self) -> Vec<GroupSummary> {
        self.groups
            .iter()
            .map(|g| GroupSummary {
                id: g.id.clone(),
                mgmt_group: g.mgmt_group.clone(),
                size: g.size(),
                small: g.small,
                first_birth: g.first_birth,
                last_birth: g.last_birth,
            })
            .collect()
    }

    /// Aggregate statistics over all groups
    #[must_use]
    pub fn stats(&self) -> GroupingStats {
        let sizes: Vec<usize> = self.groups.iter().map(ContemporaryGroup::size).collect();
        let total_groups = sizes.len();
        let mean_size = if total_groups == 0 {
            0.0
        } else {
            sizes.iter().sum::<usize>() as f64 / total_groups as f64
        };
        GroupingStats {
            total_groups,
            small_groups: self.groups.iter().filter(|g| g.small).count(),
            min_size: sizes.iter().copied().min().unwrap_or(0),
            max_size: sizes.iter().copied().max().unwrap_or(0),
            mean_size,
        }
    }
}
