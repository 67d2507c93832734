//! Interactive session: the generator and contact form behind a menu

use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::sync::Arc;
use tracing::{debug, warn};

use bioverse_protocol::api::ContactFields;

use crate::archive::ArchiveService;
use crate::auth::AuthService;
use crate::client::ApiClient;
use crate::contact::ContactController;
use crate::error::{BioverseError, Result};
use crate::generate::AlienController;
use crate::ui::TerminalView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Generate,
    Save,
    Reset,
    Contact,
    Saved,
    Environments,
    Explore,
    Quit,
}

impl MenuItem {
    fn label(self) -> &'static str {
        match self {
            MenuItem::Generate => "Generate an alien",
            MenuItem::Save => "Save this alien",
            MenuItem::Reset => "Reset",
            MenuItem::Contact => "Contact us",
            MenuItem::Saved => "Saved aliens",
            MenuItem::Environments => "Environments",
            MenuItem::Explore => "Explore an environment",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Menu entries on offer; generate and save only while the view enables them
fn menu_items(generate_enabled: bool, save_visible: bool) -> Vec<MenuItem> {
    let mut items = Vec::new();
    if generate_enabled {
        items.push(MenuItem::Generate);
    }
    if save_visible {
        items.push(MenuItem::Save);
    }
    items.extend([
        MenuItem::Reset,
        MenuItem::Contact,
        MenuItem::Saved,
        MenuItem::Environments,
        MenuItem::Explore,
        MenuItem::Quit,
    ]);
    items
}

pub struct Shell<C: ApiClient> {
    client: Arc<C>,
    view: Arc<TerminalView>,
    generator: AlienController<C, TerminalView>,
    contact: ContactController<C, TerminalView>,
    logged_in: bool,
}

impl<C: ApiClient> Shell<C> {
    pub fn new(client: Arc<C>, logged_in: bool) -> Self {
        let view = Arc::new(TerminalView::new());
        Self {
            generator: AlienController::new(Arc::clone(&client), Arc::clone(&view)),
            contact: ContactController::new(Arc::clone(&client), Arc::clone(&view)),
            client,
            view,
            logged_in,
        }
    }

    /// Run commands until the user quits
    ///
    /// Controller failures have already been shown by the time they return,
    /// so they only end the current command. Prompt failures end the session.
    pub async fn run(&mut self) -> Result<()> {
        let theme = ColorfulTheme::default();
        self.view.ui().header("BioVerse");

        loop {
            if self.view.take_focus_request() && self.view.generate_enabled() {
                self.generate(&theme).await?;
                continue;
            }

            self.view.ui().separator();
            self.view.draw_banner();
            let items = menu_items(self.view.generate_enabled(), self.view.save_visible());
            let labels: Vec<&str> = items.iter().map(|item| item.label()).collect();
            let selection = Select::with_theme(&theme)
                .with_prompt("What next?")
                .items(&labels)
                .default(0)
                .interact()?;

            let item = items
                .get(selection)
                .copied()
                .ok_or_else(|| BioverseError::internal("menu selection out of range"))?;
            debug!(command = ?item, "shell command");
            match item {
                MenuItem::Generate => self.generate(&theme).await?,
                MenuItem::Save => {
                    if let Err(err) = self.generator.save().await {
                        debug!(error = %err, "save ended");
                    }
                }
                MenuItem::Reset => self.generator.reset(),
                MenuItem::Contact => self.contact(&theme).await?,
                MenuItem::Saved => self.saved().await,
                MenuItem::Environments => self.environments().await,
                MenuItem::Explore => self.explore(&theme).await?,
                MenuItem::Quit => break,
            }
        }

        if self.logged_in {
            if let Err(err) = AuthService::new(&*self.client).logout().await {
                warn!(error = %err, "logout failed");
            }
        }
        Ok(())
    }

    async fn generate(&mut self, theme: &ColorfulTheme) -> Result<()> {
        let planet: String = Input::with_theme(theme)
            .with_prompt("Planet name")
            .allow_empty(true)
            .interact_text()?;

        if let Err(err) = self.generator.generate(&planet).await {
            debug!(error = %err, "generate ended");
        }
        Ok(())
    }

    async fn contact(&mut self, theme: &ColorfulTheme) -> Result<()> {
        let draft = self.view.draft();
        let mut fields = ContactFields::new();
        for (key, prompt) in [("name", "Name"), ("email", "Email"), ("message", "Message")] {
            let value: String = Input::with_theme(theme)
                .with_prompt(prompt)
                .with_initial_text(draft.get(key).cloned().unwrap_or_default())
                .allow_empty(true)
                .interact_text()?;
            fields.insert(key.to_string(), value);
        }
        self.view.set_draft(&fields);

        let outcome = self.contact.submit(&fields).await;
        if let Some(err) = outcome.error {
            debug!(error = %err, "contact ended");
        }
        Ok(())
    }

    async fn saved(&self) {
        let ui = self.view.ui();
        match ArchiveService::new(&*self.client).saved_aliens().await {
            Ok(aliens) if aliens.is_empty() => ui.info("No saved aliens yet."),
            Ok(aliens) => aliens.iter().for_each(|saved| ui.saved_alien_card(saved)),
            Err(err) => ui.error(&err.to_string()),
        }
    }

    async fn environments(&self) {
        let ui = self.view.ui();
        match ArchiveService::new(&*self.client).environments().await {
            Ok(environments) => environments.iter().for_each(|env| ui.environment_card(env)),
            Err(err) => ui.error(&err.to_string()),
        }
    }

    async fn explore(&self, theme: &ColorfulTheme) -> Result<()> {
        let ui = self.view.ui();
        let archive = ArchiveService::new(&*self.client);

        let (aliens, environments) = match (archive.saved_aliens().await, archive.environments().await) {
            (Ok(aliens), Ok(environments)) => (aliens, environments),
            (Err(err), _) | (_, Err(err)) => {
                ui.error(&err.to_string());
                return Ok(());
            }
        };
        if aliens.is_empty() {
            ui.warning("Save an alien before sending it exploring.");
            return Ok(());
        }

        let alien_labels: Vec<String> = aliens
            .iter()
            .map(|saved| format!("{} from {}", saved.alien_data.name, saved.planet_name))
            .collect();
        let alien = Select::with_theme(theme)
            .with_prompt("Which alien?")
            .items(&alien_labels)
            .default(0)
            .interact()?;

        let environment_labels: Vec<String> = environments
            .iter()
            .map(|env| format!("{} ({})", env.name, env.kind))
            .collect();
        let environment = Select::with_theme(theme)
            .with_prompt("Which environment?")
            .items(&environment_labels)
            .default(0)
            .interact()?;

        let (Some(alien), Some(environment)) = (aliens.get(alien), environments.get(environment))
        else {
            return Err(BioverseError::internal("exploration selection out of range"));
        };
        match archive.explore(alien.id, environment.id).await {
            Ok(exploration) => ui.exploration_card(&exploration),
            Err(err) => ui.error(&err.to_string()),
        }
        Ok(())
    }
}
