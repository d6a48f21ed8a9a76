//! Contemporary group formation
//!
//! Animals sharing a management group are sorted by birth date and split
//! into contiguous cohorts: a new group starts whenever the gap to the
//! previous animal's birth date exceeds the configured window. Given the
//! sort, the result is deterministic and independent of input order.

use itertools::Itertools;
use log::info;

use crate::config::GroupingConfig;
use crate::models::animal::Animal;
use crate::models::group::{ContemporaryGroup, GroupAssignments};

/// Partition animals into contemporary groups
#[must_use]
pub fn assign_groups(animals: &[Animal], config: &GroupingConfig) -> GroupAssignments {
    let mut ordered: Vec<&Animal> = animals.iter().collect();
    ordered.sort_by(|a, b| {
        (&a.mgmt_group, a.birth_date, &a.animal_id).cmp(&(&b.mgmt_group, b.birth_date, &b.animal_id))
    });

    let mut groups: Vec<ContemporaryGroup> = Vec::new();

    for (mgmt_group, run) in &ordered.iter().chunk_by(|a| a.mgmt_group.clone()) {
        let mut ordinal = 0usize;
        let mut current: Option<ContemporaryGroup> = None;

        for animal in run {
            let start_new = match &current {
                Some(group) => {
                    (animal.birth_date - group.last_birth).num_days() > config.window_days
                }
                None => true,
            };

            if start_new {
                if let Some(finished) = current.take() {
                    groups.push(finished);
                }
                ordinal += 1;
                current = Some(ContemporaryGroup {
                    id: format!("{mgmt_group}_G{ordinal}"),
                    mgmt_group: mgmt_group.clone(),
                    member_ids: vec![animal.animal_id.clone()],
                    small: false,
                    first_birth: animal.birth_date,
                    last_birth: animal.birth_date,
                });
            } else if let Some(group) = current.as_mut() {
                group.member_ids.push(animal.animal_id.clone());
                group.last_birth = animal.birth_date;
            }
        }

        if let Some(finished) = current.take() {
            groups.push(finished);
        }
    }

    for group in &mut groups {
        group.small = group.size() < config.min_group_size;
    }

    let assignments = GroupAssignments::new(groups);
    let stats = assignments.stats();
    info!(
        "Formed {} contemporary groups ({} small) from {} animals",
        stats.total_groups,
        stats.small_groups,
        animals.len()
    );

    assignments
}
