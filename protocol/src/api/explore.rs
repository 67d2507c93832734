//! Exploration and health DTOs

use serde::{Deserialize, Serialize};

pub use crate::common::{Environment, Exploration};

/// Explore environment request
///
/// Used for POST /api/explore-environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExploreRequest {
    pub alien_id: i64,
    pub environment_id: i64,
}

/// Explore environment response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExploreResponse {
    #[serde(default)]
    pub success: bool,
    pub exploration: Option<Exploration>,
    pub error: Option<String>,
}

/// GET /api/health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
