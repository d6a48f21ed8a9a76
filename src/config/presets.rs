//! Named weight presets for common breeding objectives
//!
//! Presets live in a read-only registry constructed once at process start
//! and passed explicitly into the engine; nothing is read from ambient
//! state.

use rustc_hash::FxHashMap;

use crate::config::CategoryWeights;
use crate::error::{FlockRankError, Result};

/// The built-in breeding objectives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightPreset {
    /// Even emphasis across all categories
    Balanced,
    /// Growth-led selection for meat production
    Meat,
    /// Fleece-led selection for wool production
    Wool,
    /// Health-led selection for parasite resistance
    Worm,
}

impl WeightPreset {
    /// All built-in presets
    pub const ALL: [Self; 4] = [Self::Balanced, Self::Meat, Self::Wool, Self::Worm];

    /// Registry name of the preset
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::Meat => "meat",
            Self::Wool => "wool",
            Self::Worm => "worm",
        }
    }

    /// The preset's category weights
    #[must_use]
    pub const fn weights(self) -> CategoryWeights {
        match self {
            Self::Balanced => CategoryWeights {
                growth: 0.30,
                wool: 0.20,
                reproduction: 0.20,
                health: 0.20,
                temperament: 0.10,
            },
            Self::Meat => CategoryWeights {
                growth: 0.50,
                wool: 0.10,
                reproduction: 0.20,
                health: 0.15,
                temperament: 0.05,
            },
            Self::Wool => CategoryWeights {
                growth: 0.20,
                wool: 0.40,
                reproduction: 0.20,
                health: 0.15,
                temperament: 0.05,
            },
            Self::Worm => CategoryWeights {
                growth: 0.25,
                wool: 0.15,
                reproduction: 0.20,
                health: 0.35,
                temperament: 0.05,
            },
        }
    }
}

/// Read-only registry of named weight configurations
#[derive(Debug, Clone)]
pub struct PresetRegistry {
    entries: FxHashMap<String, CategoryWeights>,
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetRegistry {
    /// Registry holding the four built-in presets
    #[must_use]
    pub fn builtin() -> Self {
        let mut entries = FxHashMap::default();
        for preset in WeightPreset::ALL {
            entries.insert(preset.name().to_string(), preset.weights());
        }
        Self { entries }
    }

    /// Look up a preset by name
    pub fn get(&self, name: &str) -> Result<&CategoryWeights> {
        self.entries
            .get(name)
            .ok_or_else(|| FlockRankError::UnknownPreset {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Register a custom preset; the weights are validated first
    pub fn register(&mut self, name: impl Into<String>, weights: CategoryWeights) -> Result<()> {
        weights.validate()?;
        self.entries.insert(name.into(), weights);
        Ok(())
    }

    /// Registered preset names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
