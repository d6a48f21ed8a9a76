//! Error handling for the scoring engine.
//!
//! The engine only raises for configuration problems: every data-level
//! condition (missing KPI values, zero-variance or singleton contemporary
//! groups) is handled by an explicit policy instead of an error path.

/// Specialized error type for the scoring engine
#[derive(Debug, thiserror::Error)]
pub enum FlockRankError {
    /// Weight or filter configuration is invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A named weight preset does not exist in the registry
    #[error("Unknown preset '{name}'. Available: {available}")]
    UnknownPreset {
        /// The preset name that was requested
        name: String,
        /// Comma-separated list of registered preset names
        available: String,
    },
}

impl FlockRankError {
    /// Create a configuration error from any displayable message
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

/// Result type for scoring engine operations
pub type Result<T> = std::result::Result<T, FlockRankError>;
