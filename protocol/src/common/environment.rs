//! Extreme environments and survival explorations
//!
//! These records use the backend's snake_case column names as-is.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Environments
// ============================================================================

/// Extreme environment a saved alien can be sent into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub temperature: Option<String>,
    pub atmosphere: Option<String>,
    pub gravity: Option<f64>,
    pub description: Option<String>,
    pub challenges: Option<String>,
}

/// Environment summary embedded in an exploration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
}

// ============================================================================
// Explorations
// ============================================================================

/// Outcome of sending a saved alien into an environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exploration {
    pub id: i64,
    pub environment: EnvironmentSummary,
    /// Free-form analysis object produced by the backend model
    #[serde(default)]
    pub survival_analysis: Value,
    pub narrative_outcome: Option<String>,
    /// 0-100, fractional when the backend model produced one
    pub survival_score: Option<f64>,
    pub explored_at: NaiveDateTime,
}
