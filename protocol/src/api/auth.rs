//! Account form DTOs
//!
//! Login and registration are HTML form posts, not JSON. The backend answers
//! both with a redirect, so there are no response types here.

use serde::Serialize;

/// Form posted to `/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Form posted to `/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}
