//! Deterministic ranking
//!
//! Orders surviving animals by composite score with a fixed tie-break
//! chain: equal composites rank the animal with more non-missing category
//! scores first, and the lexicographically smaller animal id last of all.
//! The result is a total order independent of input order.

use log::info;

use crate::models::animal::Sex;
use crate::models::outcome::RankEntry;

/// One animal eligible for ranking
///
/// Eligible means: composite score present and no hard filter failed. The
/// engine builds candidates; the ranker only orders them.
#[derive(Debug, Clone)]
pub struct RankCandidate {
    /// Identifier of the animal
    pub animal_id: String,
    /// Sex of the animal
    pub sex: Sex,
    /// Composite score
    pub composite: f64,
    /// Count of non-missing category scores
    pub category_count: usize,
}

/// Sort candidates and assign ranks 1..N
#[must_use]
pub fn rank_animals(mut candidates: Vec<RankCandidate>) -> Vec<RankEntry> {
    candidates.sort_by(|a, b| {
        b.composite
            .total_cmp(&a.composite)
            .then_with(|| b.category_count.cmp(&a.category_count))
            .then_with(|| a.animal_id.cmp(&b.animal_id))
    });

    let entries: Vec<RankEntry> = candidates
        .into_iter()
        .enumerate()
        .map(|(idx, c)| RankEntry {
            animal_id: c.animal_id,
            sex: c.sex,
            composite: c.composite,
            rank: idx as u32 + 1,
            category_count: c.category_count,
        })
        .collect();

    info!("Ranked {} animals", entries.len());
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, composite: f64, category_count: usize) -> RankCandidate {
        RankCandidate {
            animal_id: id.to_string(),
            sex: Sex::Ram,
            composite,
            category_count,
        }
    }

    #[test]
    fn test_descending_by_composite() {
        let entries = rank_animals(vec![
            candidate("A1", 0.1, 5),
            candidate("A2", 0.9, 5),
            candidate("A3", 0.5, 5),
        ]);
        let ids: Vec<&str> = entries.iter().map(|e| e.animal_id.as_str()).collect();
        assert_eq!(ids, vec!["A2", "A3", "A1"]);
        let ranks: Vec<u32> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_tie_broken_by_completeness_then_id() {
        let entries = rank_animals(vec![
            candidate("B2", 0.5, 3),
            candidate("B1", 0.5, 3),
            candidate("A9", 0.5, 4),
        ]);
        let ids: Vec<&str> = entries.iter().map(|e| e.animal_id.as_str()).collect();
        // More complete data first, then smaller id.
        assert_eq!(ids, vec!["A9", "B1", "B2"]);
    }

    #[test]
    fn test_ranks_are_a_gapless_permutation() {
        let entries = rank_animals(vec![
            candidate("A1", 0.5, 2),
            candidate("A2", 0.5, 2),
            candidate("A3", 0.5, 2),
            candidate("A4", -0.5, 1),
        ]);
        let mut ranks: Vec<u32> = entries.iter().map(|e| e.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_order_independent_of_input_order() {
        let forward = rank_animals(vec![
            candidate("A1", 0.5, 2),
            candidate("A2", 0.5, 2),
            candidate("A3", 0.7, 2),
        ]);
        let shuffled = rank_animals(vec![
            candidate("A3", 0.7, 2),
            candidate("A2", 0.5, 2),
            candidate("A1", 0.5, 2),
        ]);
        let forward_ids: Vec<&str> = forward.iter().map(|e| e.animal_id.as_str()).collect();
        let shuffled_ids: Vec<&str> = shuffled.iter().map(|e| e.animal_id.as_str()).collect();
        assert_eq!(forward_ids, shuffled_ids);
    }
}
