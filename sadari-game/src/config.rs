//! Tunable generation parameters.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_ROWS, DEFAULT_RUNG_PROBABILITY, MAX_ROWS};

/// Errors raised when ladder configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum LadderConfigError {
    #[error("rows must be between 1 and {max} (got {value})")]
    RowsOutOfRange { max: usize, value: usize },
    #[error("rung probability must be between 0.00 and 1.00 (got {value:.2})")]
    ProbabilityOutOfRange { value: f64 },
}

/// Shape and density of a generated ladder.
///
/// Neither value affects correctness: any row count and probability still
/// yield a ladder whose start-to-end mapping is a permutation. More rows and
/// a higher probability only mix the players more thoroughly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LadderConfig {
    #[serde(default = "LadderConfig::default_rows")]
    pub rows: usize,
    #[serde(default = "LadderConfig::default_rung_probability")]
    pub rung_probability: f64,
}

impl LadderConfig {
    const fn default_rows() -> usize {
        DEFAULT_ROWS
    }

    const fn default_rung_probability() -> f64 {
        DEFAULT_RUNG_PROBABILITY
    }

    /// Parse a configuration from JSON, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid JSON for this shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate the configuration before it reaches the generator.
    ///
    /// # Errors
    ///
    /// Returns [`LadderConfigError`] when `rows` or `rung_probability` is out
    /// of range.
    pub fn validate(&self) -> Result<(), LadderConfigError> {
        if !(1..=MAX_ROWS).contains(&self.rows) {
            return Err(LadderConfigError::RowsOutOfRange {
                max: MAX_ROWS,
                value: self.rows,
            });
        }
        if !self.rung_probability.is_finite() || !(0.0..=1.0).contains(&self.rung_probability) {
            return Err(LadderConfigError::ProbabilityOutOfRange {
                value: self.rung_probability,
            });
        }
        Ok(())
    }
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            rows: Self::default_rows(),
            rung_probability: Self::default_rung_probability(),
        }
    }
}
