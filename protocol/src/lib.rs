//! BioVerse wire protocol
//!
//! Data transfer objects for the BioVerse JSON API:
//! - `common`: records returned by the backend (planets, aliens, environments)
//! - `api`: request and response envelopes, one module per endpoint family

pub mod api;
pub mod common;
