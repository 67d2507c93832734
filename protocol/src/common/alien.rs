//! Alien species records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Alien species returned by `/api/create-alien`
///
/// `physical_traits` and `abilities` keep the order the backend sent them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alien {
    pub name: String,
    pub description: String,
    pub scientific_name: String,
    pub physical_traits: Vec<String>,
    pub abilities: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
