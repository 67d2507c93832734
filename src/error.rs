//! Unified error handling for the BioVerse client
//!
//! Every failure a controller can hit maps onto one coded variant here:
//! - Unique error codes for debugging
//! - Constructor helpers so call sites stay short
//! - Automatic conversions from the transport, JSON, config and prompt crates

use std::fmt;
use thiserror::Error;

/// Unified Result type for all BioVerse operations
pub type Result<T> = std::result::Result<T, BioverseError>;

/// Error codes for BioVerse operations
///
/// Each error has a unique code in the format `BXXX` where:
/// - B1XX: Validation errors (handled locally, nothing sent)
/// - B2XX: Transport errors
/// - B3XX: Application errors reported by the backend
/// - B4XX: Malformed responses
/// - B5XX: Controller state errors
/// - B6XX: Authentication errors
/// - B7XX: Configuration errors
/// - B8XX: IO and terminal errors
/// - B9XX: Internal errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation (B1XX)
    /// B101: Required input missing
    MissingInput,

    // Transport (B2XX)
    /// B201: Request failed before a response arrived
    RequestFailed,
    /// B202: Request timed out
    Timeout,

    // Application (B3XX)
    /// B301: Backend rejected the request
    Rejected,

    // Malformed (B4XX)
    /// B401: Body was not the expected JSON
    InvalidBody,

    // State (B5XX)
    /// B501: Nothing generated yet
    NothingToSave,
    /// B502: Current result already saved
    AlreadySaved,

    // Authentication (B6XX)
    /// B601: Credentials rejected
    InvalidCredentials,
    /// B602: Registration rejected
    RegistrationRejected,
    /// B603: Endpoint requires a logged-in session
    LoginRequired,

    // Configuration (B7XX)
    /// B701: Configuration error
    ConfigError,
    /// B702: Invalid endpoint URL
    InvalidEndpoint,

    // IO/UI (B8XX)
    /// B801: File or stream error
    IoError,
    /// B802: Prompt error
    PromptError,

    // Internal (B9XX)
    /// B901: Internal error
    InternalError,
    /// B902: Serialization error
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u16 {
        match self {
            ErrorCode::MissingInput => 101,

            ErrorCode::RequestFailed => 201,
            ErrorCode::Timeout => 202,

            ErrorCode::Rejected => 301,

            ErrorCode::InvalidBody => 401,

            ErrorCode::NothingToSave => 501,
            ErrorCode::AlreadySaved => 502,

            ErrorCode::InvalidCredentials => 601,
            ErrorCode::RegistrationRejected => 602,
            ErrorCode::LoginRequired => 603,

            ErrorCode::ConfigError => 701,
            ErrorCode::InvalidEndpoint => 702,

            ErrorCode::IoError => 801,
            ErrorCode::PromptError => 802,

            ErrorCode::InternalError => 901,
            ErrorCode::SerializationError => 902,
        }
    }

    /// Get the string code (e.g., "B101")
    pub fn as_str(&self) -> String {
        format!("B{}", self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}", self.code())
    }
}

/// Main error type for all BioVerse operations
#[derive(Error, Debug)]
pub enum BioverseError {
    // ==================== Validation Errors (B1XX) ====================
    /// Required input missing or blank
    #[error("[{code}] Validation failed: {message}")]
    Validation {
        code: ErrorCode,
        message: String,
        field: Option<String>,
    },

    // ==================== Transport Errors (B2XX) ====================
    /// Network unreachable or request rejected before a response
    #[error("[{code}] Transport error: {message}")]
    Transport {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    // ==================== Application Errors (B3XX) ====================
    /// Well-formed response signalling failure
    #[error("[{code}] Application error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Application {
        code: ErrorCode,
        status: u16,
        message: Option<String>,
    },

    // ==================== Malformed Responses (B4XX) ====================
    /// Body not parseable as the expected JSON
    #[error("[{code}] Malformed response ({status}): {message}")]
    MalformedResponse {
        code: ErrorCode,
        status: u16,
        message: String,
    },

    // ==================== State Errors (B5XX) ====================
    /// Operation not valid in the controller's current state
    #[error("[{code}] Invalid state: {message}")]
    InvalidState { code: ErrorCode, message: String },

    // ==================== Authentication Errors (B6XX) ====================
    /// Login, registration or session failure
    #[error("[{code}] Authentication failed: {message}")]
    Authentication { code: ErrorCode, message: String },

    // ==================== Configuration Errors (B7XX) ====================
    /// Configuration error
    #[error("[{code}] Configuration error: {message}")]
    Config {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<config::ConfigError>,
    },

    // ==================== IO/UI Errors (B8XX) ====================
    /// File or IO error
    #[error("[{code}] {context}: {message}")]
    Io {
        code: ErrorCode,
        context: String,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Prompt error
    #[error("[{code}] UI error: {message}")]
    Ui { code: ErrorCode, message: String },

    // ==================== Internal Errors (B9XX) ====================
    /// Internal error
    #[error("[{code}] Internal error: {message}")]
    Internal { code: ErrorCode, message: String },

    /// Serialization error
    #[error("[{code}] Serialization error: {message}")]
    Serialization {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl BioverseError {
    // --- Validation ---

    /// Create validation error with field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::MissingInput,
            message: message.into(),
            field: Some(field.into()),
        }
    }

    // --- Transport ---

    /// Create transport error without an underlying reqwest error
    #[cfg(test)]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            code: ErrorCode::RequestFailed,
            message: message.into(),
            source: None,
        }
    }

    /// Create transport error from a reqwest error
    pub fn transport_from_reqwest(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            ErrorCode::Timeout
        } else {
            ErrorCode::RequestFailed
        };
        Self::Transport {
            code,
            message: err.to_string(),
            source: Some(err),
        }
    }

    // --- Application ---

    /// Create application error; `message` is the backend's own text, if any
    pub fn application(status: u16, message: Option<String>) -> Self {
        Self::Application {
            code: ErrorCode::Rejected,
            status,
            message,
        }
    }

    // --- Malformed ---

    /// Create malformed response error
    pub fn malformed(status: u16, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            code: ErrorCode::InvalidBody,
            status,
            message: message.into(),
        }
    }

    // --- State ---

    /// Save attempted before anything was generated
    pub fn nothing_to_save() -> Self {
        Self::InvalidState {
            code: ErrorCode::NothingToSave,
            message: "No generated alien to save".to_string(),
        }
    }

    /// Save attempted twice for the same generation
    pub fn already_saved() -> Self {
        Self::InvalidState {
            code: ErrorCode::AlreadySaved,
            message: "This alien has already been saved".to_string(),
        }
    }

    // --- Authentication ---

    /// Create invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::Authentication {
            code: ErrorCode::InvalidCredentials,
            message: "Invalid username or password".to_string(),
        }
    }

    /// Create registration rejected error
    pub fn registration_rejected() -> Self {
        Self::Authentication {
            code: ErrorCode::RegistrationRejected,
            message: "Username or email already registered".to_string(),
        }
    }

    /// Create login required error
    pub fn login_required() -> Self {
        Self::Authentication {
            code: ErrorCode::LoginRequired,
            message: "Login required".to_string(),
        }
    }

    // --- Configuration ---

    /// Create configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::ConfigError,
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration error with source
    pub fn config_from_error(err: config::ConfigError) -> Self {
        Self::Config {
            code: ErrorCode::ConfigError,
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create invalid endpoint error
    pub fn invalid_endpoint(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::InvalidEndpoint,
            message: message.into(),
            source: None,
        }
    }

    // --- IO/UI ---

    /// Create IO error with context
    pub fn io_from_error(context: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            code: ErrorCode::IoError,
            context: context.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create UI error
    pub fn ui(message: impl Into<String>) -> Self {
        Self::Ui {
            code: ErrorCode::PromptError,
            message: message.into(),
        }
    }

    // --- Internal ---

    /// Create internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::InternalError,
            message: message.into(),
        }
    }

    // --- Utility Methods ---

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. } => *code,
            Self::Transport { code, .. } => *code,
            Self::Application { code, .. } => *code,
            Self::MalformedResponse { code, .. } => *code,
            Self::InvalidState { code, .. } => *code,
            Self::Authentication { code, .. } => *code,
            Self::Config { code, .. } => *code,
            Self::Io { code, .. } => *code,
            Self::Ui { code, .. } => *code,
            Self::Internal { code, .. } => *code,
            Self::Serialization { code, .. } => *code,
        }
    }

    /// Transport and malformed failures share the same user-facing text
    pub fn is_transport_like(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::MalformedResponse { .. })
    }

    /// Check if this is an authentication error
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Message supplied by the backend, for application errors that carry one
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Application { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text to put in front of the user
    ///
    /// Backend messages are shown verbatim, `fallback` stands in when the
    /// backend sent none or a blank one, and `generic` covers transport and malformed replies.
    pub fn user_message(&self, fallback: &str, generic: &str) -> String {
        match self {
            Self::Application { message, .. } => message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(fallback)
                .to_string(),
            Self::Validation { message, .. } | Self::InvalidState { message, .. } => {
                message.clone()
            }
            Self::Authentication { message, .. } => {
                format!("{}. Please log in and try again.", message)
            }
            _ => generic.to_string(),
        }
    }
}

// ==================== From Implementations ====================

impl From<std::io::Error> for BioverseError {
    fn from(err: std::io::Error) -> Self {
        Self::io_from_error("IO operation", err)
    }
}

impl From<reqwest::Error> for BioverseError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport_from_reqwest(err)
    }
}

impl From<serde_json::Error> for BioverseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            code: ErrorCode::SerializationError,
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<config::ConfigError> for BioverseError {
    fn from(err: config::ConfigError) -> Self {
        Self::config_from_error(err)
    }
}

impl From<dialoguer::Error> for BioverseError {
    fn from(err: dialoguer::Error) -> Self {
        Self::ui(format!("Prompt error: {}", err))
    }
}
