//! Animal identity model
//!
//! An [`Animal`] carries the identity and husbandry fields the engine needs
//! for grouping and cull evaluation. Measurement-derived values live in
//! [`crate::models::kpi::KpiRecord`], keyed by animal id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sex of an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Female
    Ewe,
    /// Entire male
    Ram,
    /// Castrated male
    Wether,
}

impl From<&str> for Sex {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "ram" | "r" | "m" | "male" => Self::Ram,
            "wether" | "w" => Self::Wether,
            _ => Self::Ewe,
        }
    }
}

/// A single animal in the input snapshot
///
/// Immutable once constructed: the engine never mutates animals, it derives
/// new per-animal record sets keyed by `animal_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    /// Unique animal identifier
    pub animal_id: String,
    /// Sex of the animal
    pub sex: Sex,
    /// Birth date, used for contemporary grouping
    pub birth_date: NaiveDate,
    /// Management group the animal is run with
    pub mgmt_group: String,
    /// Sire identifier, if recorded
    pub sire_id: Option<String>,
    /// Dam identifier, if recorded
    pub dam_id: Option<String>,
    /// Pre-existing cull flag supplied by the ingestion layer
    pub cull_flag: bool,
    /// Free-text reason attached to the pre-existing cull flag
    pub cull_reason: Option<String>,
}

impl Animal {
    /// Create a new animal with the mandatory identity fields
    #[must_use]
    pub fn new(
        animal_id: impl Into<String>,
        sex: Sex,
        birth_date: NaiveDate,
        mgmt_group: impl Into<String>,
    ) -> Self {
        Self {
            animal_id: animal_id.into(),
            sex,
            birth_date,
            mgmt_group: mgmt_group.into(),
            sire_id: None,
            dam_id: None,
            cull_flag: false,
            cull_reason: None,
        }
    }

    /// Set the sire identifier
    #[must_use]
    pub fn with_sire(mut self, sire_id: impl Into<String>) -> Self {
        self.sire_id = Some(sire_id.into());
        self
    }

    /// Set the dam identifier
    #[must_use]
    pub fn with_dam(mut self, dam_id: impl Into<String>) -> Self {
        self.dam_id = Some(dam_id.into());
        self
    }

    /// Mark the animal as pre-flagged for culling by the ingestion layer
    #[must_use]
    pub fn with_cull_flag(mut self, reason: Option<String>) -> Self {
        self.cull_flag = true;
        self.cull_reason = reason;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_parsing_is_lenient() {
        assert_eq!(Sex::from("Ram"), Sex::Ram);
        assert_eq!(Sex::from(" ram "), Sex::Ram);
        assert_eq!(Sex::from("M"), Sex::Ram);
        assert_eq!(Sex::from("Wether"), Sex::Wether);
        assert_eq!(Sex::from("Ewe"), Sex::Ewe);
        assert_eq!(Sex::from("anything-else"), Sex::Ewe);
    }

    #[test]
    fn test_animal_builder_fields() {
        let animal = Animal::new(
            "T001",
            Sex::Ram,
            NaiveDate::from_ymd_opt(2023, 8, 1).unwrap(),
            "MOB-A",
        )
        .with_sire("S9")
        .with_cull_flag(Some("broken mouth".to_string()));

        assert_eq!(animal.sire_id.as_deref(), Some("S9"));
        assert!(animal.dam_id.is_none());
        assert!(animal.cull_flag);
        assert_eq!(animal.cull_reason.as_deref(), Some("broken mouth"));
    }
}
