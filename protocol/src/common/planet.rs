//! Planet records
//!
//! Planet measurements come out of a language model on the backend, so the
//! same field may arrive as a JSON number on one call and as text on the next.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

// ============================================================================
// Readings
// ============================================================================

/// A single planet measurement, kept in the JSON kind it arrived in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Number(Number),
    Text(String),
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Number(n) => write!(f, "{}", n),
            Reading::Text(t) => f.write_str(t),
        }
    }
}

impl From<&str> for Reading {
    fn from(value: &str) -> Self {
        Reading::Text(value.to_string())
    }
}

impl From<i64> for Reading {
    fn from(value: i64) -> Self {
        Reading::Number(value.into())
    }
}

impl From<f64> for Reading {
    /// Non-finite values have no JSON form and fall back to text
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(Reading::Number)
            .unwrap_or_else(|| Reading::Text(value.to_string()))
    }
}

// ============================================================================
// Planet
// ============================================================================

/// Planet analysis returned by `/api/create-alien`
///
/// Fields the backend adds beyond the known set are kept in `extra` so that a
/// save request echoes the record exactly as it was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    pub name: String,
    pub description: String,
    pub gravity: Reading,
    pub atmosphere: Reading,
    pub temperature: Reading,
    pub radiation: Reading,
    pub water: Reading,
    pub day_length: Reading,
    pub year_length: Reading,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
