//! Alien generation controller
//!
//! Takes a planet name, asks the backend for a planet/alien/image triple,
//! renders it, and lets the user save that exact triple once.

use std::sync::Arc;
use tracing::{error, info, warn};

use bioverse_protocol::api::{CreateAlienRequest, CreateAlienResponse, SaveAlienResponse};

use crate::client::ApiClient;
use crate::error::{BioverseError, Result};
use crate::render;
use crate::session::{CreationResult, CreationSession};
use crate::view::{AlertKind, GeneratorView};

pub const CREATE_ENDPOINT: &str = "/api/create-alien";
pub const SAVE_ENDPOINT: &str = "/api/save-alien";

const EMPTY_PLANET: &str = "Please enter a planet name";
const CREATE_FALLBACK: &str = "Failed to create alien after retries";
const CREATE_GENERIC: &str = "Failed to create alien after all retry attempts. Please try again.";
const SAVE_SUCCESS: &str = "Alien saved successfully!";
const SAVE_FALLBACK: &str = "Failed to save alien";
const SAVE_GENERIC: &str = "Failed to save alien. Please try again.";

/// Drives one generator view against the backend
pub struct AlienController<C, V> {
    client: Arc<C>,
    view: Arc<V>,
    session: CreationSession,
}

impl<C: ApiClient, V: GeneratorView> AlienController<C, V> {
    pub fn new(client: Arc<C>, view: Arc<V>) -> Self {
        Self {
            client,
            view,
            session: CreationSession::default(),
        }
    }

    pub fn session(&self) -> &CreationSession {
        &self.session
    }

    /// Whether the save action is currently offered
    pub fn can_save(&self) -> bool {
        self.session.can_save()
    }

    /// Generate a planet and alien for `planet_input`
    ///
    /// Exactly one request per call. On failure the previous result, if any,
    /// stays on screen and stays held.
    pub async fn generate(&mut self, planet_input: &str) -> Result<()> {
        let planet_name = planet_input.trim();
        if planet_name.is_empty() {
            warn!("generate rejected: empty planet name");
            self.view.alert(AlertKind::Error, EMPTY_PLANET);
            return Err(BioverseError::validation_field(EMPTY_PLANET, "planetName"));
        }

        self.view.set_generate_enabled(false);
        self.view.set_loading(true);

        let outcome = self.request_creation(planet_name).await;

        self.view.set_loading(false);
        self.view.set_generate_enabled(true);

        match outcome {
            Ok(result) => {
                info!(
                    planet = %result.planet.name,
                    alien = %result.alien.name,
                    "alien generated"
                );
                self.session.replace(result);
                self.render();
                Ok(())
            }
            Err(err) => {
                error!(planet = planet_name, error = %err, "alien creation failed");
                self.view
                    .alert(AlertKind::Error, &err.user_message(CREATE_FALLBACK, CREATE_GENERIC));
                Err(err)
            }
        }
    }

    /// Put the held result on screen
    ///
    /// The save action follows the session: visible only while the result is
    /// unsaved. Rendering twice leaves the view unchanged.
    pub fn render(&self) {
        if let Some(result) = self.session.current() {
            let (planet, alien) = render::cards(result);
            self.view.show_results(&planet, &alien);
            self.view.set_save_visible(self.session.can_save());
        }
    }

    /// Save the held result exactly as rendered
    ///
    /// Refuses without sending anything when nothing is held or the held
    /// result was already saved.
    pub async fn save(&mut self) -> Result<()> {
        let result = match self.session.savable() {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "save rejected");
                self.view
                    .alert(AlertKind::Error, &err.user_message(SAVE_FALLBACK, SAVE_GENERIC));
                return Err(err);
            }
        };

        self.view.set_save_busy(true);
        let outcome = request_save(&*self.client, result).await;
        self.view.set_save_busy(false);

        match outcome {
            Ok(response) => {
                info!(alien_id = ?response.alien_id, "alien saved");
                self.session.mark_saved();
                self.view.set_save_visible(false);
                self.view.alert(AlertKind::Success, SAVE_SUCCESS);
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "alien save failed");
                self.view
                    .alert(AlertKind::Error, &err.user_message(SAVE_FALLBACK, SAVE_GENERIC));
                Err(err)
            }
        }
    }

    /// Back to an empty prompt; the held result is kept
    pub fn reset(&self) {
        self.view.hide_results();
        self.view.clear_input();
        self.view.focus_input();
    }

    async fn request_creation(&self, planet_name: &str) -> Result<CreationResult> {
        let request = CreateAlienRequest {
            planet_name: planet_name.to_string(),
        };
        let reply = self.client.post_json(CREATE_ENDPOINT, &request).await?;
        let response: CreateAlienResponse = reply.success_json()?;
        Ok(response.into())
    }
}

async fn request_save<C: ApiClient + ?Sized>(
    client: &C,
    result: &CreationResult,
) -> Result<SaveAlienResponse> {
    let reply = client.post_json(SAVE_ENDPOINT, &result.save_request()).await?;
    let response: SaveAlienResponse = reply.json()?;
    if !response.success {
        return Err(BioverseError::application(reply.status, response.error));
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::ErrorCode;
    use crate::tests::mocks::{MockApiClient, RecordingView};
    use crate::tests::utils::test_helpers::*;
    use reqwest::Method;
    use serde_json::json;

    fn setup() -> (
        Arc<MockApiClient>,
        Arc<RecordingView>,
        AlienController<MockApiClient, RecordingView>,
    ) {
        let client = Arc::new(MockApiClient::new(ClientConfig::default()));
        let view = Arc::new(RecordingView::new());
        let controller = AlienController::new(client.clone(), view.clone());
        (client, view, controller)
    }

    // ─────────────────────────────────────────────────────────────
    // generate
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_generate_blank_input_sends_nothing() {
        let (client, view, mut controller) = setup();

        for input in ["", "   ", "\t\n"] {
            let err = controller.generate(input).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::MissingInput);
        }

        assert!(client.get_requests().is_empty());
        let state = view.generator();
        assert_eq!(
            state.last_alert(),
            Some(&(AlertKind::Error, "Please enter a planet name".to_string()))
        );
        assert!(!state.loading_seen);
        assert!(!state.generate_disabled_seen);
        assert!(!state.save_visible);
    }

    #[tokio::test]
    async fn test_generate_renders_and_offers_save() {
        let (client, view, mut controller) = setup();
        client.add_response(CREATE_ENDPOINT, 200, creation_json("Xyron-7", "Krell"));

        controller.generate("  Mars ").await.unwrap();

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].endpoint, CREATE_ENDPOINT);
        assert_eq!(requests[0].payload, Some(json!({ "planetName": "Mars" })));

        let state = view.generator();
        let (planet, alien) = state.results.expect("results shown");
        assert_eq!(planet.name, "Xyron-7");
        assert_eq!(planet.traits.len(), 7);
        assert_eq!(alien.name, "Krell");
        assert_eq!(alien.physical_traits.len(), 3);
        assert_eq!(alien.abilities, vec![
            "Burrows through regolith".to_string(),
            "Stores heat for the night".to_string()
        ]);
        assert!(state.save_visible);
        assert!(state.loading_seen);
        assert!(!state.loading);
        assert!(state.generate_disabled_seen);
        assert!(state.generate_enabled);
        assert!(controller.can_save());
    }

    #[tokio::test]
    async fn test_generate_shows_backend_error_verbatim() {
        let (client, view, mut controller) = setup();
        client.add_response(CREATE_ENDPOINT, 500, json!({ "error": "rate limited" }));

        let err = controller.generate("Mars").await.unwrap_err();
        assert!(matches!(err, BioverseError::Application { status: 500, .. }));

        let state = view.generator();
        assert_eq!(
            state.last_alert(),
            Some(&(AlertKind::Error, "rate limited".to_string()))
        );
        assert!(!state.loading);
        assert!(state.generate_disabled_seen);
        assert!(state.generate_enabled);
        assert!(state.results.is_none());
    }

    #[tokio::test]
    async fn test_generate_falls_back_without_error_field() {
        let (client, view, mut controller) = setup();
        client.add_response(CREATE_ENDPOINT, 500, json!({}));

        assert!(controller.generate("Mars").await.is_err());
        assert_eq!(
            view.generator().last_alert().map(|(_, m)| m.as_str()),
            Some("Failed to create alien after retries")
        );
    }

    #[tokio::test]
    async fn test_generate_blank_error_field_falls_back() {
        let (client, view, mut controller) = setup();
        client.add_response(CREATE_ENDPOINT, 500, json!({ "error": "" }));
        client.add_response(CREATE_ENDPOINT, 500, json!({ "error": "   " }));

        for _ in 0..2 {
            assert!(controller.generate("Mars").await.is_err());
            assert_eq!(
                view.generator().last_alert(),
                Some(&(
                    AlertKind::Error,
                    "Failed to create alien after retries".to_string()
                ))
            );
        }
        let state = view.generator();
        assert!(state.generate_disabled_seen);
        assert!(state.generate_enabled);
    }

    #[tokio::test]
    async fn test_generate_transport_and_malformed_use_generic_message() {
        let (client, view, mut controller) = setup();
        client.add_unreachable(CREATE_ENDPOINT);
        client.add_reply(
            CREATE_ENDPOINT,
            crate::client::ApiReply::new(200, "{\"planet\": 42}"),
        );

        assert!(controller.generate("Mars").await.unwrap_err().is_transport_like());
        assert!(controller.generate("Mars").await.unwrap_err().is_transport_like());

        let state = view.generator();
        assert_eq!(state.alerts.len(), 2);
        for (kind, message) in &state.alerts {
            assert_eq!(*kind, AlertKind::Error);
            assert_eq!(
                message,
                "Failed to create alien after all retry attempts. Please try again."
            );
        }
        assert!(state.generate_disabled_seen);
        assert!(state.generate_enabled);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_failed_generate_keeps_previous_result() {
        let (client, view, mut controller) = setup();
        client.add_response(CREATE_ENDPOINT, 200, creation_json("Xyron-7", "Krell"));
        client.add_response(CREATE_ENDPOINT, 500, json!({ "error": "rate limited" }));

        controller.generate("Mars").await.unwrap();
        assert!(controller.generate("Venus").await.is_err());

        let state = view.generator();
        assert_eq!(state.results.unwrap().0.name, "Xyron-7");
        assert!(state.save_visible);
        assert_eq!(
            controller.session().current().unwrap().alien.name,
            "Krell"
        );
    }

    #[tokio::test]
    async fn test_render_is_idempotent() {
        let (client, view, mut controller) = setup();
        client.add_response(CREATE_ENDPOINT, 200, creation_json("Xyron-7", "Krell"));
        controller.generate("Mars").await.unwrap();

        let first = view.generator();
        controller.render();
        let second = view.generator();

        assert_eq!(first.results, second.results);
        assert_eq!(first.save_visible, second.save_visible);
    }

    // ─────────────────────────────────────────────────────────────
    // save
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_save_without_result_sends_nothing() {
        let (client, view, mut controller) = setup();

        let err = controller.save().await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NothingToSave);
        assert!(client.get_requests().is_empty());
        assert_eq!(view.generator().last_alert().unwrap().0, AlertKind::Error);
    }

    #[tokio::test]
    async fn test_save_echoes_rendered_result() {
        let (client, view, mut controller) = setup();
        let mut body = creation_json("Xyron-7", "Krell");
        body["planet"]["moons"] = json!(["Ib", "Ob"]);
        body["alien"]["temperament"] = json!("skittish");
        client.add_response(CREATE_ENDPOINT, 200, body.clone());
        client.add_response(SAVE_ENDPOINT, 200, json!({ "success": true, "alien_id": 7 }));

        controller.generate("Mars").await.unwrap();
        controller.reset();
        controller.save().await.unwrap();

        let requests = client.get_requests();
        let save = requests.iter().find(|r| r.endpoint == SAVE_ENDPOINT).unwrap();
        assert_eq!(save.payload.as_ref(), Some(&body));

        let state = view.generator();
        assert!(state.save_busy_seen);
        assert!(!state.save_busy);
        assert!(!state.save_visible);
        assert_eq!(
            state.last_alert(),
            Some(&(AlertKind::Success, "Alien saved successfully!".to_string()))
        );
    }

    #[tokio::test]
    async fn test_save_is_at_most_once_per_generation() {
        let (client, _view, mut controller) = setup();
        client.add_response(CREATE_ENDPOINT, 200, creation_json("Xyron-7", "Krell"));
        client.add_response(SAVE_ENDPOINT, 200, json!({ "success": true }));
        client.add_response(CREATE_ENDPOINT, 200, creation_json("Vortha", "Ssil"));
        client.add_response(SAVE_ENDPOINT, 200, json!({ "success": true }));

        controller.generate("Mars").await.unwrap();
        controller.save().await.unwrap();
        assert!(!controller.can_save());

        let err = controller.save().await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::AlreadySaved);

        controller.generate("Venus").await.unwrap();
        assert!(controller.can_save());
        controller.save().await.unwrap();

        let saves = client
            .get_requests()
            .into_iter()
            .filter(|r| r.endpoint == SAVE_ENDPOINT)
            .count();
        assert_eq!(saves, 2);
    }

    #[tokio::test]
    async fn test_save_blank_error_field_falls_back() {
        let (client, view, mut controller) = setup();
        client.add_response(CREATE_ENDPOINT, 200, creation_json("Xyron-7", "Krell"));
        client.add_response(SAVE_ENDPOINT, 500, json!({ "success": false, "error": "" }));

        controller.generate("Mars").await.unwrap();
        assert!(controller.save().await.is_err());

        assert_eq!(
            view.generator().last_alert(),
            Some(&(AlertKind::Error, "Failed to save alien".to_string()))
        );
        assert!(controller.can_save());
    }

    #[tokio::test]
    async fn test_save_failure_allows_retry() {
        let (client, view, mut controller) = setup();
        client.add_response(CREATE_ENDPOINT, 200, creation_json("Xyron-7", "Krell"));
        client.add_response(SAVE_ENDPOINT, 500, json!({ "error": "database is locked" }));
        client.add_response(SAVE_ENDPOINT, 200, json!({ "success": false }));
        client.add_unreachable(SAVE_ENDPOINT);
        client.add_response(SAVE_ENDPOINT, 200, json!({ "success": true }));

        controller.generate("Mars").await.unwrap();

        assert!(controller.save().await.is_err());
        assert_eq!(
            view.generator().last_alert().unwrap().1,
            "database is locked"
        );
        assert!(controller.save().await.is_err());
        assert_eq!(view.generator().last_alert().unwrap().1, "Failed to save alien");
        assert!(controller.save().await.is_err());
        assert_eq!(
            view.generator().last_alert().unwrap().1,
            "Failed to save alien. Please try again."
        );

        let state = view.generator();
        assert!(state.save_visible);
        assert!(!state.save_busy);
        assert!(controller.can_save());

        controller.save().await.unwrap();
        assert!(!view.generator().save_visible);
    }

    // ─────────────────────────────────────────────────────────────
    // reset
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_reset_clears_screen_but_keeps_result() {
        let (client, view, mut controller) = setup();
        client.add_response(CREATE_ENDPOINT, 200, creation_json("Xyron-7", "Krell"));
        controller.generate("Mars").await.unwrap();

        controller.reset();

        let state = view.generator();
        assert!(state.results.is_none());
        assert_eq!(state.input_cleared, 1);
        assert_eq!(state.focused, 1);
        assert!(controller.session().current().is_some());
    }
}
