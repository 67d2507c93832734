//! Session-scoped creation state
//!
//! Holds the planet, alien and image last put on screen. The alien controller
//! owns exactly one of these; a successful generate replaces it, a successful
//! save marks it saved, and nothing else touches it.

use bioverse_protocol::api::{CreateAlienResponse, SaveAlienRequest};
use bioverse_protocol::common::{Alien, Planet};

use crate::error::{BioverseError, Result};

/// Planet, alien and image from one successful generation
#[derive(Debug, Clone, PartialEq)]
pub struct CreationResult {
    pub planet: Planet,
    pub alien: Alien,
    pub image: String,
}

impl CreationResult {
    /// Save payload borrowing this exact result
    pub fn save_request(&self) -> SaveAlienRequest<'_> {
        SaveAlienRequest {
            planet: &self.planet,
            alien: &self.alien,
            image: &self.image,
        }
    }
}

impl From<CreateAlienResponse> for CreationResult {
    fn from(response: CreateAlienResponse) -> Self {
        Self {
            planet: response.planet,
            alien: response.alien,
            image: response.image,
        }
    }
}

/// Lifecycle of the held creation result
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CreationSession {
    #[default]
    Empty,
    Unsaved(CreationResult),
    Saved(CreationResult),
}

impl CreationSession {
    /// Result currently held, saved or not
    pub fn current(&self) -> Option<&CreationResult> {
        match self {
            Self::Empty => None,
            Self::Unsaved(result) | Self::Saved(result) => Some(result),
        }
    }

    pub fn can_save(&self) -> bool {
        matches!(self, Self::Unsaved(_))
    }

    #[cfg(test)]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }

    /// Result a save may send, or why it may not
    pub fn savable(&self) -> Result<&CreationResult> {
        match self {
            Self::Empty => Err(BioverseError::nothing_to_save()),
            Self::Unsaved(result) => Ok(result),
            Self::Saved(_) => Err(BioverseError::already_saved()),
        }
    }

    /// Hold a freshly generated result, dropping whatever came before
    pub fn replace(&mut self, result: CreationResult) {
        *self = Self::Unsaved(result);
    }

    pub fn mark_saved(&mut self) {
        *self = match std::mem::take(self) {
            Self::Unsaved(result) => Self::Saved(result),
            other => other,
        };
    }
}
