use console::{strip_ansi_codes, Term};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use bioverse_protocol::api::{ContactFields, Environment, Exploration, SavedAlien};

use crate::render::{AlienCard, PlanetCard};
use crate::view::{AlertKind, ContactView, GeneratorView, Notice, NoticeId};

/// Enhanced UI utilities
pub struct UI {
    term: Term,
}

impl UI {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    /// Helper method to conditionally apply color based on terminal support
    fn colorize<F>(&self, text: &str, color_fn: F) -> String
    where
        F: FnOnce(&str) -> String,
    {
        if self.supports_color() {
            color_fn(text)
        } else {
            text.to_string()
        }
    }

    /// Print a success message (color only if supported)
    pub fn success(&self, message: &str) {
        let output = self.colorize(message, |m| m.green().bold().to_string());
        println!("{}", output);
    }

    /// Print an error message (color only if supported)
    pub fn error(&self, message: &str) {
        let output = self.colorize(message, |m| m.red().bold().to_string());
        eprintln!("{}", output);
    }

    /// Print a warning message (color only if supported)
    pub fn warning(&self, message: &str) {
        let output = self.colorize(message, |m| m.yellow().bold().to_string());
        println!("{}", output);
    }

    /// Print an info message (color only if supported)
    pub fn info(&self, message: &str) {
        let output = self.colorize(message, |m| m.blue().bold().to_string());
        println!("{}", output);
    }

    /// Format server reachability with appropriate color (if supported)
    pub fn format_server_status(&self, connected: bool) -> String {
        let text = if connected {
            "Connected"
        } else {
            "Connection failed"
        };
        if self.supports_color() {
            if connected {
                text.green().to_string()
            } else {
                text.red().to_string()
            }
        } else {
            text.to_string()
        }
    }

    /// Format user field with fallback for missing data
    pub fn format_user_field(&self, value: Option<String>) -> String {
        value.unwrap_or_else(|| "-".to_string())
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        let term_width = self.width();
        let title_len = title.width() + 4; // 2 spaces on each side
        let line_len = if term_width > title_len {
            (term_width - title_len) / 2
        } else {
            0
        };

        let line = "═".repeat(line_len.min(30));

        println!();
        if self.supports_color() {
            println!("{} {} {}", line.cyan(), title.cyan().bold(), line.cyan());
        } else {
            println!("{} {} {}", line, title, line);
        }
        println!();
    }

    /// Print a separator line
    pub fn separator(&self) {
        let width = self.width();
        let line = "─".repeat(width.min(80));
        if self.supports_color() {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }

    /// Print a titled bullet list; nothing is printed for an empty list
    pub fn list(&self, title: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        if self.supports_color() {
            println!("{}", title.magenta().bold());
        } else {
            println!("{}", title);
        }
        for item in items {
            println!("  • {}", item);
        }
    }

    /// Create a card-style display for information
    pub fn card(&self, title: &str, content: Vec<(&str, String)>) {
        let term_width = self.width();
        let card_width = term_width.saturating_sub(4).clamp(50, 80);

        let supports_color = self.supports_color();

        // Card header
        println!("╭{}╮", "─".repeat(card_width - 2));
        let title_spaces = card_width.saturating_sub(title.width() + 4);
        if supports_color {
            println!("│ {} {}│", title.cyan().bold(), " ".repeat(title_spaces));
        } else {
            println!("│ {} {}│", title, " ".repeat(title_spaces));
        }
        println!("├{}┤", "─".repeat(card_width - 2));

        // Card content
        for (label, value) in content {
            // Strip ANSI codes for width calculations
            let label_plain = strip_ansi_codes(label);
            let value_plain = strip_ansi_codes(&value);

            let content_width = label_plain.width() + value_plain.width() + 4;

            let spaces = if content_width < card_width - 1 {
                card_width - content_width - 1
            } else {
                1
            };

            if supports_color {
                println!("│ {}: {}{}│", label.dimmed(), value, " ".repeat(spaces));
            } else {
                println!("│ {}: {}{}│", label, value, " ".repeat(spaces));
            }
        }

        // Card footer
        println!("╰{}╯", "─".repeat(card_width - 2));
        println!();
    }

    /// Get terminal width for responsive layout
    pub fn width(&self) -> usize {
        self.term.size().1 as usize
    }

    /// Check if terminal supports color
    pub fn supports_color(&self) -> bool {
        self.term.features().colors_supported()
    }

    /// Whether a human is at the other end
    pub fn is_interactive(&self) -> bool {
        self.term.is_term()
    }

    pub fn clear_screen(&self) {
        if self.is_interactive() {
            let _ = self.term.clear_screen();
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Domain cards
    // ─────────────────────────────────────────────────────────────

    pub fn planet_card(&self, planet: &PlanetCard) {
        let mut rows = vec![("Description", planet.description.clone())];
        rows.extend(planet.traits.iter().map(|row| (row.label, row.value.clone())));
        self.card(&format!("Planet {}", planet.name), rows);
    }

    pub fn alien_card(&self, alien: &AlienCard) {
        self.card(
            &format!("Species {}", alien.name),
            vec![
                ("Scientific name", alien.scientific_name.clone()),
                ("Description", alien.description.clone()),
                ("Image", alien.image.clone()),
            ],
        );
        self.list("Physical Traits", &alien.physical_traits);
        self.list("Special Abilities", &alien.abilities);
        println!();
    }

    pub fn saved_alien_card(&self, saved: &SavedAlien) {
        self.card(
            &format!("#{} {}", saved.id, saved.alien_data.name),
            vec![
                ("Planet", saved.planet_name.clone()),
                ("Species", saved.alien_data.scientific_name.clone()),
                ("Image", self.format_user_field(saved.image_url.clone())),
                ("Saved", saved.created_at.format("%Y-%m-%d %H:%M").to_string()),
            ],
        );
    }

    pub fn environment_card(&self, environment: &Environment) {
        let gravity = environment.gravity.map(|g| format!("{}g", g));
        self.card(
            &format!("#{} {}", environment.id, environment.name),
            vec![
                ("Type", environment.kind.clone()),
                ("Temperature", self.format_user_field(environment.temperature.clone())),
                ("Atmosphere", self.format_user_field(environment.atmosphere.clone())),
                ("Gravity", self.format_user_field(gravity)),
                ("Challenges", self.format_user_field(environment.challenges.clone())),
            ],
        );
    }

    pub fn exploration_card(&self, exploration: &Exploration) {
        let score = exploration.survival_score.map(|s| format!("{:.0}/100", s));
        self.card(
            &format!(
                "Exploration #{} in {}",
                exploration.id, exploration.environment.name
            ),
            vec![
                ("Environment type", exploration.environment.kind.clone()),
                ("Survival score", self.format_user_field(score)),
                (
                    "Explored",
                    exploration.explored_at.format("%Y-%m-%d %H:%M").to_string(),
                ),
            ],
        );
        if let Some(narrative) = &exploration.narrative_outcome {
            println!("{}", narrative);
            println!();
        }
    }
}

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a spinner with modern styling
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[derive(Debug, Default)]
struct PromptState {
    generate_enabled: bool,
    save_visible: bool,
    focus_requested: bool,
}

/// Terminal rendition of both controller views
///
/// Transient notices are printed once when raised and listed in the banner
/// the shell draws above its menu until they are dismissed.
pub struct TerminalView {
    ui: UI,
    loading: Mutex<Option<ProgressBar>>,
    saving: Mutex<Option<ProgressBar>>,
    sending: Mutex<Option<ProgressBar>>,
    prompt: Mutex<PromptState>,
    draft: Mutex<ContactFields>,
    notices: Mutex<BTreeMap<NoticeId, Notice>>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            ui: UI::new(),
            loading: Mutex::new(None),
            saving: Mutex::new(None),
            sending: Mutex::new(None),
            prompt: Mutex::new(PromptState {
                generate_enabled: true,
                ..PromptState::default()
            }),
            draft: Mutex::new(ContactFields::new()),
            notices: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn ui(&self) -> &UI {
        &self.ui
    }

    pub fn generate_enabled(&self) -> bool {
        self.prompt.lock().map(|p| p.generate_enabled).unwrap_or(false)
    }

    pub fn save_visible(&self) -> bool {
        self.prompt.lock().map(|p| p.save_visible).unwrap_or(false)
    }

    /// Consume a pending request to put the cursor back on the planet prompt
    pub fn take_focus_request(&self) -> bool {
        self.prompt
            .lock()
            .map(|mut p| std::mem::take(&mut p.focus_requested))
            .unwrap_or(false)
    }

    /// Contact fields kept from a failed submission
    pub fn draft(&self) -> ContactFields {
        self.draft.lock().map(|d| d.clone()).unwrap_or_default()
    }

    pub fn set_draft(&self, fields: &ContactFields) {
        if let Ok(mut draft) = self.draft.lock() {
            *draft = fields.clone();
        }
    }

    pub fn active_notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|n| n.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Banner of notices still inside their display window
    pub fn draw_banner(&self) {
        for notice in self.active_notices() {
            self.print_notice(&notice);
        }
    }

    fn print_notice(&self, notice: &Notice) {
        match notice.kind {
            AlertKind::Success => self.ui.success(&notice.message),
            AlertKind::Error => self.ui.error(&notice.message),
        }
    }

    fn toggle_spinner(slot: &Mutex<Option<ProgressBar>>, active: bool, message: &str) {
        let Ok(mut slot) = slot.lock() else {
            return;
        };
        if active {
            if slot.is_none() {
                *slot = Some(create_spinner(message));
            }
        } else if let Some(pb) = slot.take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorView for TerminalView {
    fn set_generate_enabled(&self, enabled: bool) {
        if let Ok(mut prompt) = self.prompt.lock() {
            prompt.generate_enabled = enabled;
        }
    }

    fn set_loading(&self, visible: bool) {
        Self::toggle_spinner(
            &self.loading,
            visible,
            "Analysing planet and evolving its inhabitants...",
        );
    }

    fn show_results(&self, planet: &PlanetCard, alien: &AlienCard) {
        self.ui.header("Discovery");
        self.ui.planet_card(planet);
        self.ui.alien_card(alien);
    }

    fn hide_results(&self) {
        self.ui.clear_screen();
    }

    fn set_save_visible(&self, visible: bool) {
        if let Ok(mut prompt) = self.prompt.lock() {
            prompt.save_visible = visible;
        }
        debug!(visible, "save action toggled");
    }

    fn set_save_busy(&self, busy: bool) {
        Self::toggle_spinner(&self.saving, busy, "Saving...");
    }

    fn alert(&self, kind: AlertKind, message: &str) {
        match kind {
            AlertKind::Success => self.ui.success(message),
            AlertKind::Error => self.ui.error(message),
        }
    }

    fn clear_input(&self) {
        debug!("planet input cleared");
    }

    fn focus_input(&self) {
        if let Ok(mut prompt) = self.prompt.lock() {
            prompt.focus_requested = true;
        }
    }
}

impl ContactView for TerminalView {
    fn set_submit_busy(&self, busy: bool) {
        Self::toggle_spinner(&self.sending, busy, "Sending...");
    }

    fn clear_form(&self) {
        if let Ok(mut draft) = self.draft.lock() {
            draft.clear();
        }
    }

    fn show_notice(&self, notice: &Notice) {
        self.print_notice(notice);
        if let Ok(mut notices) = self.notices.lock() {
            notices.insert(notice.id, notice.clone());
        }
    }

    fn dismiss_notice(&self, id: NoticeId) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.remove(&id);
        }
    }
}
