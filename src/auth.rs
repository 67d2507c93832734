//! Account login, registration and logout
//!
//! The backend uses cookie sessions set by HTML form posts and answers with a
//! redirect either way; only a redirect to the dashboard means success. The
//! cookie stays in the client's in-memory jar and dies with the process.

use tracing::{info, warn};

use bioverse_protocol::api::{LoginForm, RegisterForm};

use crate::client::ApiClient;
use crate::error::{BioverseError, Result};

const LOGIN_ENDPOINT: &str = "/login";
const REGISTER_ENDPOINT: &str = "/register";
const LOGOUT_ENDPOINT: &str = "/logout";
const DASHBOARD_PATH: &str = "/dashboard";

/// Username and password for one process lifetime
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Account operations against one client
pub struct AuthService<'a, C: ApiClient> {
    client: &'a C,
}

impl<'a, C: ApiClient> AuthService<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        let form = LoginForm {
            username: credentials.username.clone(),
            password: credentials.password.clone(),
        };

        let reply = self.client.post_form(LOGIN_ENDPOINT, &form).await?;
        if reply.redirects_to(DASHBOARD_PATH) {
            info!(username = %credentials.username, "logged in");
            Ok(())
        } else {
            warn!(
                username = %credentials.username,
                status = reply.status,
                "login rejected"
            );
            Err(BioverseError::invalid_credentials())
        }
    }

    /// Create an account; the backend logs the new user straight in
    pub async fn register(&self, credentials: &Credentials, email: &str) -> Result<()> {
        let form = RegisterForm {
            username: credentials.username.clone(),
            email: email.to_string(),
            password: credentials.password.clone(),
        };

        let reply = self.client.post_form(REGISTER_ENDPOINT, &form).await?;
        if reply.redirects_to(DASHBOARD_PATH) {
            info!(username = %credentials.username, "registered");
            Ok(())
        } else {
            warn!(
                username = %credentials.username,
                status = reply.status,
                "registration rejected"
            );
            Err(BioverseError::registration_rejected())
        }
    }

    pub async fn logout(&self) -> Result<()> {
        let reply = self.client.get(LOGOUT_ENDPOINT).await?;
        if reply.is_success() || reply.is_redirect() {
            info!("logged out");
            Ok(())
        } else {
            Err(BioverseError::application(reply.status, None))
        }
    }
}
