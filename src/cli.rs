use dialoguer::{theme::ColorfulTheme, Input, Password};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use bioverse_protocol::api::ContactFields;

use crate::archive::ArchiveService;
use crate::auth::{AuthService, Credentials};
use crate::client::HttpClient;
use crate::config::{default_config_path, ClientConfig, ConfigService};
use crate::contact::ContactController;
use crate::error::{BioverseError, Result};
use crate::generate::AlienController;
use crate::shell::Shell;
use crate::ui::{TerminalView, UI};
use crate::version::format_version_info;
use crate::{
    Commands, ConfigArgs, ContactArgs, ExplorationsArgs, ExploreArgs, GenerateArgs, RegisterArgs,
};

/// CLI handler for processing commands
pub struct CliHandler {
    config_path: Option<PathBuf>,
    verbose: bool,
    ui: UI,
}

impl CliHandler {
    /// Create a new CLI handler with a custom config path
    pub fn with_config_path(config_path: Option<PathBuf>, verbose: bool) -> Self {
        Self {
            config_path,
            verbose,
            ui: UI::new(),
        }
    }

    fn config_path(&self) -> PathBuf {
        self.config_path.clone().unwrap_or_else(default_config_path)
    }

    /// Load configuration using the handler's config path
    fn load_config(&self) -> Result<ClientConfig> {
        ClientConfig::builder()
            .config_file(self.config_path())
            .verbose(self.verbose)
            .build()
    }

    /// Build a client, logging in first when a username is configured
    async fn connect(&self) -> Result<(Arc<HttpClient>, bool)> {
        let config = self.load_config()?;
        let client = HttpClient::new(config.clone())?;

        let logged_in = match config.username.clone() {
            Some(username) => {
                let credentials = Credentials {
                    password: self.password(&config)?,
                    username,
                };
                AuthService::new(&client).login(&credentials).await?;
                true
            }
            None => {
                debug!("no username configured, staying anonymous");
                false
            }
        };
        Ok((Arc::new(client), logged_in))
    }

    fn password(&self, config: &ClientConfig) -> Result<String> {
        if let Some(password) = config.password.clone() {
            return Ok(password);
        }
        Ok(Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?)
    }

    /// Execute a CLI command
    pub async fn execute(&mut self, command: Commands) -> Result<()> {
        let result = match command {
            Commands::Generate(args) => self.handle_generate(args).await,
            Commands::Contact(args) => self.handle_contact(args).await,
            Commands::Saved => self.handle_saved().await,
            Commands::Environments => self.handle_environments().await,
            Commands::Explore(args) => self.handle_explore(args).await,
            Commands::Explorations(args) => self.handle_explorations(args).await,
            Commands::Status => self.handle_status().await,
            Commands::Login => self.handle_login().await,
            Commands::Register(args) => self.handle_register(args).await,
            Commands::Session => self.handle_session().await,
            Commands::Config(args) => self.handle_config(args).await,
        };

        if let Err(err) = &result {
            if err.is_auth_error() {
                self.ui.info(
                    "Set a username with `bioverse config set-username <NAME>` to log in automatically.",
                );
            }
        }
        result
    }

    /// Handle generate command, optionally saving the result straight away
    async fn handle_generate(&mut self, args: GenerateArgs) -> Result<()> {
        let (client, _) = self.connect().await?;
        let view = Arc::new(TerminalView::new());
        let mut controller = AlienController::new(client, view);

        controller.generate(&args.planet).await?;
        if args.save {
            controller.save().await?;
        } else if controller.can_save() {
            self.ui
                .info("Run again with --save to keep this alien in your collection.");
        }
        Ok(())
    }

    /// Handle contact command
    async fn handle_contact(&mut self, args: ContactArgs) -> Result<()> {
        let config = self.load_config()?;
        let client = Arc::new(HttpClient::new(config)?);
        let view = Arc::new(TerminalView::new());
        let mut controller = ContactController::new(client, view);

        let mut fields = ContactFields::new();
        fields.insert("name".to_string(), args.name);
        fields.insert("email".to_string(), args.email);
        fields.insert("message".to_string(), args.message);
        fields.extend(args.fields);

        let outcome = controller.submit(&fields).await;
        match outcome.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Handle saved command - list the saved collection
    async fn handle_saved(&mut self) -> Result<()> {
        let (client, _) = self.connect().await?;
        let aliens = ArchiveService::new(&*client).saved_aliens().await?;

        if aliens.is_empty() {
            self.ui.info("No saved aliens yet.");
            return Ok(());
        }
        self.ui.header(&format!("Saved aliens ({})", aliens.len()));
        for saved in &aliens {
            self.ui.saved_alien_card(saved);
        }
        Ok(())
    }

    /// Handle environments command
    async fn handle_environments(&mut self) -> Result<()> {
        let (client, _) = self.connect().await?;
        let environments = ArchiveService::new(&*client).environments().await?;

        self.ui.header("Environments");
        for environment in &environments {
            self.ui.environment_card(environment);
        }
        Ok(())
    }

    /// Handle explore command
    async fn handle_explore(&mut self, args: ExploreArgs) -> Result<()> {
        let (client, _) = self.connect().await?;
        let exploration = ArchiveService::new(&*client)
            .explore(args.alien_id, args.environment_id)
            .await?;

        self.ui.exploration_card(&exploration);
        Ok(())
    }

    /// Handle explorations command
    async fn handle_explorations(&mut self, args: ExplorationsArgs) -> Result<()> {
        let (client, _) = self.connect().await?;
        let explorations = ArchiveService::new(&*client)
            .explorations(args.alien_id)
            .await?;

        if explorations.is_empty() {
            self.ui.info("This alien has not explored anywhere yet.");
            return Ok(());
        }
        for exploration in &explorations {
            self.ui.exploration_card(exploration);
        }
        Ok(())
    }

    /// Handle status command
    async fn handle_status(&mut self) -> Result<()> {
        let config = self.load_config()?;
        let client = HttpClient::new(config.clone())?;

        let server = match ArchiveService::new(&client).health().await {
            Ok(health) => format!("{} ({})", self.ui.format_server_status(true), health.status),
            Err(err) => format!("{} ({})", self.ui.format_server_status(false), err),
        };

        self.ui.card(
            "Status",
            vec![
                ("Version", format_version_info()),
                ("Endpoint", config.base_url.clone()),
                ("Server", server),
                ("Username", self.ui.format_user_field(config.username.clone())),
            ],
        );
        Ok(())
    }

    /// Handle login command - check credentials without keeping a session
    async fn handle_login(&mut self) -> Result<()> {
        let config = self.load_config()?;
        let username = match config.username.clone() {
            Some(username) => username,
            None => Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Username")
                .interact_text()?,
        };
        if username.trim().is_empty() {
            return Err(BioverseError::validation_field(
                "Username cannot be empty",
                "username",
            ));
        }
        let credentials = Credentials {
            password: self.password(&config)?,
            username,
        };

        let client = HttpClient::new(config)?;
        AuthService::new(&client).login(&credentials).await?;
        self.ui
            .success(&format!("Credentials accepted for {}", credentials.username));
        Ok(())
    }

    /// Handle register command
    async fn handle_register(&mut self, args: RegisterArgs) -> Result<()> {
        let config = self.load_config()?;
        let password = Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?;
        let credentials = Credentials {
            username: args.username,
            password,
        };

        let client = HttpClient::new(config)?;
        AuthService::new(&client)
            .register(&credentials, &args.email)
            .await?;
        self.ui
            .success(&format!("Account {} created", credentials.username));
        self.ui.info(&format!(
            "Run `bioverse config set-username {}` to log in automatically.",
            credentials.username
        ));
        Ok(())
    }

    /// Handle session command - interactive menu
    async fn handle_session(&mut self) -> Result<()> {
        let (client, logged_in) = self.connect().await?;
        Shell::new(client, logged_in).run().await
    }

    /// Handle config command
    async fn handle_config(&mut self, args: ConfigArgs) -> Result<()> {
        let config = self.load_config()?;
        let mut service = ConfigService::new(config, self.config_path());
        service.handle_config(args).await
    }
}
