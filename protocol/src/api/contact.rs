//! Contact form DTOs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contact form fields, sent as-is to POST /api/contact
pub type ContactFields = BTreeMap<String, String>;

/// Contact response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}
