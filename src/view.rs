//! View seams driven by the controllers
//!
//! Controllers never print. They flip the same handful of controls a web page
//! would (a trigger, a loading indicator, a results region, a save toggle) and
//! the view decides how that looks. Methods take `&self` because views are
//! shared with background notice-dismissal tasks.

use crate::render::{AlienCard, PlanetCard};

/// Severity of a message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// Identifies a transient notice so it can be dismissed later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoticeId(pub u64);

/// Non-blocking message that disappears on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub kind: AlertKind,
    pub message: String,
}

/// Controls owned by the alien generation controller
pub trait GeneratorView: Send + Sync {
    fn set_generate_enabled(&self, enabled: bool);

    fn set_loading(&self, visible: bool);

    fn show_results(&self, planet: &PlanetCard, alien: &AlienCard);

    fn hide_results(&self);

    fn set_save_visible(&self, visible: bool);

    /// Disabled with a "Saving..." label while true
    fn set_save_busy(&self, busy: bool);

    /// Blocking message; returns once the user has seen it
    fn alert(&self, kind: AlertKind, message: &str);

    fn clear_input(&self);

    fn focus_input(&self);
}

/// Controls owned by the contact form controller
pub trait ContactView: Send + Sync {
    /// Disabled with the loading label while true
    fn set_submit_busy(&self, busy: bool);

    fn clear_form(&self);

    fn show_notice(&self, notice: &Notice);

    fn dismiss_notice(&self, id: NoticeId);
}
