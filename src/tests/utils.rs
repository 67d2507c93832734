//! Test utilities and helpers for unit tests
//!
//! This module provides common testing utilities including:
//! - Temporary files for config tests
//! - Canned backend payloads for the alien endpoints

#[cfg(test)]
pub mod test_helpers {
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use tempfile::TempDir;

    use crate::session::CreationResult;

    /// Create a temporary directory for testing
    pub fn create_temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temp dir")
    }

    /// Create a temporary file with content
    pub fn create_temp_file_with_content(dir: &TempDir, filename: &str, content: &[u8]) -> PathBuf {
        let file_path = dir.path().join(filename);
        std::fs::write(&file_path, content).expect("Failed to write temp file");
        file_path
    }

    /// Planet JSON as the backend returns it
    pub fn planet_json(name: &str) -> Value {
        json!({
            "name": name,
            "description": "A rust-coloured world wrapped in thin haze",
            "gravity": 0.38,
            "atmosphere": "Thin CO2",
            "temperature": -63,
            "radiation": "High",
            "water": "Polar Ice Caps",
            "dayLength": 24,
            "yearLength": 687
        })
    }

    /// Alien JSON as the backend returns it
    pub fn alien_json(name: &str) -> Value {
        json!({
            "name": name,
            "description": "A low-slung grazer with mirrored plates",
            "scientificName": "Krellus ferrox",
            "physicalTraits": ["Mirrored dorsal plates", "Six splayed limbs", "Sealed nostrils"],
            "abilities": ["Burrows through regolith", "Stores heat for the night"]
        })
    }

    /// Full `/api/create-alien` success body
    pub fn creation_json(planet: &str, alien: &str) -> Value {
        json!({
            "planet": planet_json(planet),
            "alien": alien_json(alien),
            "image": "/img/1.png"
        })
    }

    pub fn sample_creation(planet: &str, alien: &str) -> CreationResult {
        let response: bioverse_protocol::api::CreateAlienResponse =
            serde_json::from_value(creation_json(planet, alien)).expect("valid fixture");
        response.into()
    }
}
