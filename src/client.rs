//! HTTP client for the BioVerse backend

use reqwest::{header, redirect, Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{BioverseError, Result};

/// Raw reply from the backend
///
/// Controllers decide what a status means; the client only moves bytes and
/// flags replies that bounced to the login page.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    /// `Location` header of redirect replies
    pub location: Option<String>,
    pub body: String,
}

impl ApiReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            location: None,
            body: body.into(),
        }
    }

    pub fn redirect(status: u16, location: impl Into<String>) -> Self {
        Self {
            status,
            location: Some(location.into()),
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// Redirect whose target path ends with `path`
    pub fn redirects_to(&self, path: &str) -> bool {
        self.is_redirect()
            && self
                .location
                .as_deref()
                .map(|loc| {
                    let loc = loc.split(['?', '#']).next().unwrap_or(loc);
                    loc.trim_end_matches('/').ends_with(path.trim_end_matches('/'))
                })
                .unwrap_or(false)
    }

    /// Unauthenticated API calls bounce to the login page
    pub fn requires_login(&self) -> bool {
        self.status == 401 || self.redirects_to("/login")
    }

    /// Parse the body as JSON, whatever the status
    pub fn json<R: DeserializeOwned>(&self) -> Result<R> {
        serde_json::from_str(&self.body).map_err(|e| {
            BioverseError::malformed(self.status, format!("Invalid API response: {}", e))
        })
    }

    /// Parse a body that is only meaningful on success
    ///
    /// Non-2xx replies become application errors carrying the body's `error`
    /// field; bodies that cannot be read become malformed-response errors.
    pub fn success_json<R: DeserializeOwned>(&self) -> Result<R> {
        if !self.is_success() {
            let body: bioverse_protocol::api::ErrorBody = self.json()?;
            return Err(BioverseError::application(self.status, body.error));
        }
        self.json()
    }
}

/// Seam between controllers and the network
pub trait ApiClient {
    fn config(&self) -> &ClientConfig;

    async fn get(&self, endpoint: &str) -> Result<ApiReply>;

    async fn post_json<T>(&self, endpoint: &str, payload: &T) -> Result<ApiReply>
    where
        T: Serialize + ?Sized;

    async fn post_form<T>(&self, endpoint: &str, form: &T) -> Result<ApiReply>
    where
        T: Serialize + ?Sized;
}

/// reqwest-backed client
///
/// Redirects are never followed so login outcomes stay visible, and the
/// session cookie lives in an in-memory jar for the life of the process.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut client_builder = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none());

        if let Some(timeout) = config.request_timeout() {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build()?;

        Ok(Self { client, config })
    }

    async fn into_reply(method: &Method, endpoint: &str, response: Response) -> Result<ApiReply> {
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        debug!(%method, endpoint, status, "backend replied");

        let reply = ApiReply {
            status,
            location,
            body,
        };
        if endpoint.starts_with("/api/") && reply.requires_login() {
            return Err(BioverseError::login_required());
        }
        Ok(reply)
    }
}

impl ApiClient for HttpClient {
    fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get(&self, endpoint: &str) -> Result<ApiReply> {
        let url = self.config.endpoint_url(endpoint);
        let response = self.client.get(&url).send().await?;
        Self::into_reply(&Method::GET, endpoint, response).await
    }

    async fn post_json<T>(&self, endpoint: &str, payload: &T) -> Result<ApiReply>
    where
        T: Serialize + ?Sized,
    {
        let url = self.config.endpoint_url(endpoint);
        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;
        Self::into_reply(&Method::POST, endpoint, response).await
    }

    async fn post_form<T>(&self, endpoint: &str, form: &T) -> Result<ApiReply>
    where
        T: Serialize + ?Sized,
    {
        let url = self.config.endpoint_url(endpoint);
        let response = self.client.post(&url).form(form).send().await?;
        Self::into_reply(&Method::POST, endpoint, response).await
    }
}
