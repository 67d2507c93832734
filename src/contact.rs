//! Contact form controller

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use bioverse_protocol::api::{ContactFields, ContactResponse};

use crate::client::ApiClient;
use crate::error::{BioverseError, Result};
use crate::view::{AlertKind, ContactView, Notice, NoticeId};

pub const CONTACT_ENDPOINT: &str = "/api/contact";

const SEND_SUCCESS: &str = "Message sent";
const SEND_FALLBACK: &str = "Failed to send message";
const SEND_GENERIC: &str = "Failed to send message. Please try again.";

/// What a submit put on screen
#[derive(Debug)]
pub struct SubmitOutcome {
    pub notice: Notice,
    /// Why the submission failed, if it did
    pub error: Option<BioverseError>,
    /// Completes once the notice has been dismissed
    pub dismissal: JoinHandle<()>,
}

impl SubmitOutcome {
    pub fn accepted(&self) -> bool {
        self.error.is_none()
    }
}

/// Drives one contact view against the backend
pub struct ContactController<C, V> {
    client: Arc<C>,
    view: Arc<V>,
    notice_delay: Duration,
    next_notice: u64,
}

impl<C, V> ContactController<C, V>
where
    C: ApiClient,
    V: ContactView + 'static,
{
    pub fn new(client: Arc<C>, view: Arc<V>) -> Self {
        let notice_delay = client.config().notice_delay();
        Self {
            client,
            view,
            notice_delay,
            next_notice: 0,
        }
    }

    /// Submit the form fields as captured at submit time
    ///
    /// Never fails outright: every outcome ends as a transient notice. The
    /// form is cleared on success and left intact for correction otherwise.
    pub async fn submit(&mut self, fields: &ContactFields) -> SubmitOutcome {
        self.view.set_submit_busy(true);
        let outcome = self.send(fields).await;
        self.view.set_submit_busy(false);

        let (kind, message, error) = match outcome {
            Ok(message) => {
                info!(fields = fields.len(), "contact message sent");
                self.view.clear_form();
                (AlertKind::Success, message, None)
            }
            Err(err) => {
                error!(error = %err, "contact submission failed");
                let message = err.user_message(SEND_FALLBACK, SEND_GENERIC);
                (AlertKind::Error, message, Some(err))
            }
        };

        let notice = Notice {
            id: self.next_notice_id(),
            kind,
            message,
        };
        self.view.show_notice(&notice);
        let dismissal = self.schedule_dismissal(notice.id);

        SubmitOutcome {
            notice,
            error,
            dismissal,
        }
    }

    async fn send(&self, fields: &ContactFields) -> Result<String> {
        let reply = self.client.post_json(CONTACT_ENDPOINT, fields).await?;
        let response: ContactResponse = reply.json()?;
        if !response.success {
            return Err(BioverseError::application(reply.status, response.error));
        }
        Ok(response.message.unwrap_or_else(|| SEND_SUCCESS.to_string()))
    }

    fn next_notice_id(&mut self) -> NoticeId {
        self.next_notice += 1;
        NoticeId(self.next_notice)
    }

    fn schedule_dismissal(&self, id: NoticeId) -> JoinHandle<()> {
        let view = Arc::clone(&self.view);
        let delay = self.notice_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!(notice = id.0, "notice dismissed");
            view.dismiss_notice(id);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::tests::mocks::{MockApiClient, RecordingView};
    use serde_json::json;
    use tokio::time::Instant;

    fn setup() -> (
        Arc<MockApiClient>,
        Arc<RecordingView>,
        ContactController<MockApiClient, RecordingView>,
    ) {
        let client = Arc::new(MockApiClient::new(ClientConfig::default()));
        let view = Arc::new(RecordingView::new());
        let controller = ContactController::new(client.clone(), view.clone());
        (client, view, controller)
    }

    fn form() -> ContactFields {
        [("name", "A"), ("email", "a@b.com"), ("message", "hi")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_success_clears_form_and_dismisses_notice() {
        let (client, view, mut controller) = setup();
        client.add_response(
            CONTACT_ENDPOINT,
            200,
            json!({ "success": true, "message": "Sent!" }),
        );

        let start = Instant::now();
        let outcome = controller.submit(&form()).await;
        assert!(outcome.accepted());

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].payload,
            Some(json!({ "name": "A", "email": "a@b.com", "message": "hi" }))
        );

        let state = view.contact();
        assert_eq!(state.form_cleared, 1);
        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices[0].kind, AlertKind::Success);
        assert_eq!(state.notices[0].message, "Sent!");
        assert!(state.submit_busy_seen);
        assert!(!state.submit_busy);

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(view.contact().notices.len(), 1);

        outcome.dismissal.await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(5));
        let state = view.contact();
        assert!(state.notices.is_empty());
        assert_eq!(state.dismissed, vec![outcome.notice.id]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_failure_keeps_form() {
        let (client, view, mut controller) = setup();
        client.add_response(
            CONTACT_ENDPOINT,
            500,
            json!({ "success": false, "error": "SMTP unavailable" }),
        );

        let outcome = controller.submit(&form()).await;
        assert!(!outcome.accepted());
        assert_eq!(outcome.notice.kind, AlertKind::Error);
        assert_eq!(outcome.notice.message, "SMTP unavailable");

        let state = view.contact();
        assert_eq!(state.form_cleared, 0);
        assert!(state.submit_busy_seen);
        assert!(!state.submit_busy);

        outcome.dismissal.await.unwrap();
        assert!(view.contact().notices.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_fallback_and_generic_messages() {
        let (client, view, mut controller) = setup();
        client.add_response(CONTACT_ENDPOINT, 200, json!({ "success": false }));
        client.add_unreachable(CONTACT_ENDPOINT);
        client.add_reply(
            CONTACT_ENDPOINT,
            crate::client::ApiReply::new(500, "Internal Server Error"),
        );

        let first = controller.submit(&form()).await;
        let second = controller.submit(&form()).await;
        let third = controller.submit(&form()).await;

        assert_eq!(first.notice.message, "Failed to send message");
        assert_eq!(second.notice.message, "Failed to send message. Please try again.");
        assert_eq!(third.notice.message, "Failed to send message. Please try again.");
        assert_ne!(first.notice.id, second.notice.id);

        let state = view.contact();
        assert_eq!(state.notices.len(), 3);
        assert_eq!(state.form_cleared, 0);
        assert!(!state.submit_busy);
    }

    #[tokio::test(start_paused = true)]
    async fn test_notice_delay_comes_from_config() {
        let config = ClientConfig {
            notice_seconds: 2,
            ..ClientConfig::default()
        };
        let client = Arc::new(MockApiClient::new(config));
        let view = Arc::new(RecordingView::new());
        let mut controller = ContactController::new(client.clone(), view.clone());
        client.add_response(CONTACT_ENDPOINT, 200, json!({ "success": true }));

        let start = Instant::now();
        let outcome = controller.submit(&form()).await;
        assert_eq!(outcome.notice.message, "Message sent");

        outcome.dismissal.await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(2));
        assert!(elapsed < Duration::from_secs(5));
    }
}
