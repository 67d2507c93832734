//! Saved aliens, extreme environments and survival explorations

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use bioverse_protocol::api::{
    Environment, Exploration, ExploreRequest, ExploreResponse, HealthStatus, SavedAlien,
};

use crate::client::ApiClient;
use crate::error::{BioverseError, Result};

const HEALTH_ENDPOINT: &str = "/api/health";
const SAVED_ENDPOINT: &str = "/api/saved-aliens";
const ENVIRONMENTS_ENDPOINT: &str = "/api/environments";
const EXPLORE_ENDPOINT: &str = "/api/explore-environment";

/// Read-side browsing of what the backend has stored
pub struct ArchiveService<'a, C: ApiClient> {
    client: &'a C,
}

impl<'a, C: ApiClient> ArchiveService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        self.client.get(HEALTH_ENDPOINT).await?.success_json()
    }

    /// The user's saved aliens, newest first
    ///
    /// Rows whose stored records no longer parse are skipped.
    pub async fn saved_aliens(&self) -> Result<Vec<SavedAlien>> {
        let rows: Vec<Value> = self.client.get(SAVED_ENDPOINT).await?.success_json()?;
        let aliens: Vec<SavedAlien> = decode_rows(rows, "saved alien");
        debug!(count = aliens.len(), "saved aliens fetched");
        Ok(aliens)
    }

    pub async fn environments(&self) -> Result<Vec<Environment>> {
        self.client.get(ENVIRONMENTS_ENDPOINT).await?.success_json()
    }

    /// Send a saved alien into an environment and get the survival verdict
    pub async fn explore(&self, alien_id: i64, environment_id: i64) -> Result<Exploration> {
        let request = ExploreRequest {
            alien_id,
            environment_id,
        };
        let reply = self.client.post_json(EXPLORE_ENDPOINT, &request).await?;
        let response: ExploreResponse = reply.json()?;

        match response {
            ExploreResponse {
                success: true,
                exploration: Some(exploration),
                ..
            } => Ok(exploration),
            ExploreResponse { success: true, .. } => Err(BioverseError::malformed(
                reply.status,
                "Exploration missing from successful response",
            )),
            ExploreResponse { error: message, .. } => {
                error!(alien_id, environment_id, "exploration rejected");
                Err(BioverseError::application(reply.status, message))
            }
        }
    }

    /// Past explorations of one saved alien, newest first
    pub async fn explorations(&self, alien_id: i64) -> Result<Vec<Exploration>> {
        let endpoint = format!("/api/alien-explorations/{}", alien_id);
        let rows: Vec<Value> = self.client.get(&endpoint).await?.success_json()?;
        Ok(decode_rows(rows, "exploration"))
    }
}

/// Decode each row on its own so one bad record does not sink the list
fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>, kind: &str) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.get("id").cloned().unwrap_or(Value::Null);
            match serde_json::from_value(row) {
                Ok(decoded) => Some(decoded),
                Err(err) => {
                    warn!(kind, %id, error = %err, "skipping unreadable row");
                    None
                }
            }
        })
        .collect()
}
