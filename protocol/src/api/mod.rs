//! API DTOs module
//!
//! This module contains all API data transfer objects organized by domain:
//! - `auth`: account forms posted to the login and registration pages
//! - `alien`: alien creation, saving and the saved collection
//! - `contact`: contact form submission
//! - `explore`: environment exploration and health

pub mod alien;
pub mod auth;
pub mod contact;
pub mod explore;

pub use alien::*;
pub use auth::*;
pub use contact::*;
pub use explore::*;

use serde::{Deserialize, Serialize};

/// Failure body returned with a non-2xx status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}
