//! Trait categories for scoring
//!
//! Each category has a fixed, predeclared set of contributing KPIs. The
//! category scorer averages whichever of these are available for an animal.

use serde::{Deserialize, Serialize};

use crate::models::kpi::Kpi;

/// The five scoring categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitCategory {
    /// Growth: daily gains and age-adjusted weights
    Growth,
    /// Wool: fleece weight, fibre diameter, staple length
    Wool,
    /// Reproduction: weaning and pregnancy rates
    Reproduction,
    /// Health: worm burden, lesion scores, breeding soundness
    Health,
    /// Temperament: handling score
    Temperament,
}

impl TraitCategory {
    /// Number of categories
    pub const COUNT: usize = 5;

    /// All categories, in declaration order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Growth,
        Self::Wool,
        Self::Reproduction,
        Self::Health,
        Self::Temperament,
    ];

    /// The fixed set of KPIs contributing to this category
    #[must_use]
    pub const fn kpis(self) -> &'static [Kpi] {
        match self {
            Self::Growth => &[
                Kpi::Adg100To200d,
                Kpi::Adg200To300d,
                Kpi::AdjWeight200d,
                Kpi::AdjWeight300d,
            ],
            Self::Wool => &[Kpi::CleanFleeceWeight, Kpi::Micron, Kpi::StapleLength],
            Self::Reproduction => &[Kpi::WeaningRate, Kpi::PregnancyRate],
            Self::Health => &[Kpi::FecCount, Kpi::FootrotScore, Kpi::DagScore, Kpi::BsePass],
            Self::Temperament => &[Kpi::Temperament],
        }
    }

    /// Lowercase category name for reports
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Growth => "growth",
            Self::Wool => "wool",
            Self::Reproduction => "reproduction",
            Self::Health => "health",
            Self::Temperament => "temperament",
        }
    }

    /// Position of this category in [`Self::ALL`]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Growth => 0,
            Self::Wool => 1,
            Self::Reproduction => 2,
            Self::Health => 3,
            Self::Temperament => 4,
        }
    }
}
