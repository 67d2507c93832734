//! Alien API DTOs
//!
//! This module contains data transfer objects for alien creation, saving and
//! listing the saved collection.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub use crate::common::{Alien, Planet};

// ============================================================================
// Creation DTOs
// ============================================================================

/// Create alien request
///
/// Used for POST /api/create-alien
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlienRequest {
    pub planet_name: String,
}

/// Create alien response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAlienResponse {
    pub planet: Planet,
    pub alien: Alien,
    /// URL of the generated creature image
    pub image: String,
}

// ============================================================================
// Save DTOs
// ============================================================================

/// Save alien request
///
/// Used for POST /api/save-alien. Borrows the records so the exact values on
/// display are what goes over the wire.
#[derive(Debug, Clone, Serialize)]
pub struct SaveAlienRequest<'a> {
    pub planet: &'a Planet,
    pub alien: &'a Alien,
    pub image: &'a str,
}

/// Save alien response
///
/// Failures may come back with a 2xx status and no `success` field at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveAlienResponse {
    #[serde(default)]
    pub success: bool,
    pub alien_id: Option<i64>,
    pub message: Option<String>,
    pub error: Option<String>,
}

// ============================================================================
// Saved Collection DTOs
// ============================================================================

/// Entry of GET /api/saved-aliens, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAlien {
    pub id: i64,
    pub planet_name: String,
    pub planet_data: Planet,
    pub alien_data: Alien,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}
