//! KPI vocabulary and per-animal KPI records
//!
//! The engine consumes already-computed KPI values from the ingestion layer.
//! A value that is absent from a [`KpiRecord`] is the explicit missing
//! marker; downstream aggregation skips absent values and never coerces
//! them to zero.

use rustc_hash::FxHashMap;

/// Whether a larger raw value means a better animal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Larger raw values are better (weights, fleece weight, rates)
    HigherIsBetter,
    /// Smaller raw values are better (micron, FEC, lesion scores)
    LowerIsBetter,
}

/// Every KPI the engine understands, raw and derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kpi {
    /// Birth weight (kg)
    BirthWeight,
    /// Weaning weight (kg)
    WeaningWeight,
    /// 200-day weight (kg)
    Weight200d,
    /// 300-day weight (kg)
    Weight300d,
    /// Age-adjusted 200-day weight (kg)
    AdjWeight200d,
    /// Age-adjusted 300-day weight (kg)
    AdjWeight300d,
    /// Average daily gain 100-200d (kg/day)
    Adg100To200d,
    /// Average daily gain 200-300d (kg/day)
    Adg200To300d,
    /// Greasy fleece weight (kg)
    GreasyFleeceWeight,
    /// Clean fleece weight (kg), estimated from greasy weight and yield
    CleanFleeceWeight,
    /// Mean fibre diameter (micron)
    Micron,
    /// Staple length (mm)
    StapleLength,
    /// Lambs weaned over lambs born
    WeaningRate,
    /// Pregnancy scan success rate
    PregnancyRate,
    /// Faecal egg count
    FecCount,
    /// Footrot lesion score, 0=clean to 5=severe
    FootrotScore,
    /// Dag score, 0=clean to 5=severe
    DagScore,
    /// Breeding soundness examination outcome, 1=pass 0=fail
    BsePass,
    /// Temperament score, 1=poor to 5=excellent
    Temperament,
}

impl Kpi {
    /// All KPIs, in declaration order
    pub const ALL: [Self; 19] = [
        Self::BirthWeight,
        Self::WeaningWeight,
        Self::Weight200d,
        Self::Weight300d,
        Self::AdjWeight200d,
        Self::AdjWeight300d,
        Self::Adg100To200d,
        Self::Adg200To300d,
        Self::GreasyFleeceWeight,
        Self::CleanFleeceWeight,
        Self::Micron,
        Self::StapleLength,
        Self::WeaningRate,
        Self::PregnancyRate,
        Self::FecCount,
        Self::FootrotScore,
        Self::DagScore,
        Self::BsePass,
        Self::Temperament,
    ];

    /// Stable snake_case code for reports and reason strings
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BirthWeight => "wt_birth",
            Self::WeaningWeight => "wt_wean",
            Self::Weight200d => "wt_200d",
            Self::Weight300d => "wt_300d",
            Self::AdjWeight200d => "wt_200d_adj",
            Self::AdjWeight300d => "wt_300d_adj",
            Self::Adg100To200d => "adg_100_200d",
            Self::Adg200To300d => "adg_200_300d",
            Self::GreasyFleeceWeight => "gfw",
            Self::CleanFleeceWeight => "cfw",
            Self::Micron => "micron",
            Self::StapleLength => "staple_len",
            Self::WeaningRate => "weaning_rate",
            Self::PregnancyRate => "pregnancy_rate",
            Self::FecCount => "fec_count",
            Self::FootrotScore => "footrot_score",
            Self::DagScore => "dag_score",
            Self::BsePass => "bse_pass",
            Self::Temperament => "temperament",
        }
    }

    /// Directionality of the KPI
    ///
    /// Traits where a smaller raw value is the better animal (fibre
    /// diameter, worm burden, lesion scores) are sign-flipped by the
    /// category scorer so that a higher standardized score always means
    /// better.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Micron | Self::FecCount | Self::FootrotScore | Self::DagScore => {
                Direction::LowerIsBetter
            }
            _ => Direction::HigherIsBetter,
        }
    }
}

/// Per-animal mapping from KPI to value
///
/// One record per animal, owned by the engine for the duration of a run.
/// An absent key is the missing marker; values are never NaN.
#[derive(Debug, Clone, Default)]
pub struct KpiRecord {
    /// Identifier of the animal the record belongs to
    pub animal_id: String,
    values: FxHashMap<Kpi, f64>,
}

impl KpiRecord {
    /// Create an empty record for an animal
    #[must_use]
    pub fn new(animal_id: impl Into<String>) -> Self {
        Self {
            animal_id: animal_id.into(),
            values: FxHashMap::default(),
        }
    }

    /// Set a KPI value, builder style
    #[must_use]
    pub fn with_value(mut self, kpi: Kpi, value: f64) -> Self {
        self.values.insert(kpi, value);
        self
    }

    /// Set a KPI value in place
    pub fn set(&mut self, kpi: Kpi, value: f64) {
        self.values.insert(kpi, value);
    }

    /// Look up a KPI value; `None` is the missing marker
    #[must_use]
    pub fn get(&self, kpi: Kpi) -> Option<f64> {
        self.values.get(&kpi).copied()
    }

    /// Number of KPIs with a value
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no values at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
