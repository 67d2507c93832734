//! Configuration management for the bioverse CLI

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use crate::error::{BioverseError, Result};
use crate::ui::UI;
use crate::{ConfigArgs, ConfigCommand};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client configuration
///
/// Layered as defaults, then the JSON config file, then `BIOVERSE_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    pub base_url: String,
    /// Request timeout in seconds; unset means the transport decides
    #[serde(default)]
    pub timeout: Option<u64>,
    /// How long transient notices stay up
    #[serde(default = "default_notice_seconds")]
    pub notice_seconds: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub verbose: bool,
    /// Only ever read from `BIOVERSE_PASSWORD`
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

fn default_notice_seconds() -> u64 {
    5
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            notice_seconds: default_notice_seconds(),
            username: None,
            verbose: false,
            password: None,
        }
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    timeout: Option<u64>,
    notice_seconds: Option<u64>,
    username: Option<String>,
    verbose: Option<bool>,
    config_file: Option<PathBuf>,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn notice_seconds(mut self, seconds: u64) -> Self {
        self.notice_seconds = Some(seconds);
        self
    }

    pub fn username<S: Into<String>>(mut self, username: S) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        let mut config = ClientConfig::from_file_and_env(self.config_file.as_deref())?;

        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = Some(timeout);
        }
        if let Some(seconds) = self.notice_seconds {
            config.notice_seconds = seconds;
        }
        if let Some(username) = self.username {
            config.username = Some(username);
        }
        if let Some(verbose) = self.verbose {
            config.verbose = config.verbose || verbose;
        }

        config.validate()?;
        Ok(config)
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    pub fn from_file_and_env(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("notice_seconds", default_notice_seconds())?
            .set_default("verbose", false)?;

        if let Some(config_path) = config_file {
            if config_path.exists() {
                builder = builder.add_source(File::from(config_path).format(FileFormat::Json));
            }
        }
        builder = builder.add_source(Environment::with_prefix("BIOVERSE").try_parsing(true));

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    pub async fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(BioverseError::invalid_endpoint("Base URL cannot be empty"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(BioverseError::invalid_endpoint(format!(
                "Base URL must start with http:// or https://: {}",
                self.base_url
            )));
        }
        if self.notice_seconds == 0 {
            return Err(BioverseError::config("notice_seconds must be at least 1"));
        }
        Ok(())
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        let endpoint = endpoint.strip_prefix('/').unwrap_or(endpoint);
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    pub fn notice_delay(&self) -> Duration {
        Duration::from_secs(self.notice_seconds)
    }
}

pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bioverse")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.json")
}

/// Handles the `config` subcommands
pub struct ConfigService {
    config: ClientConfig,
    config_path: PathBuf,
    ui: UI,
}

impl ConfigService {
    pub fn new(config: ClientConfig, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
            ui: UI::new(),
        }
    }

    pub async fn handle_config(&mut self, args: ConfigArgs) -> Result<()> {
        match args.command {
            ConfigCommand::Show => {
                self.show();
                return Ok(());
            }
            ConfigCommand::SetEndpoint { url } => {
                self.config.base_url = url;
            }
            ConfigCommand::SetTimeout { seconds } => {
                self.config.timeout = if seconds == 0 { None } else { Some(seconds) };
            }
            ConfigCommand::SetUsername { name } => {
                self.config.username = Some(name);
            }
            ConfigCommand::Reset => {
                self.config = ClientConfig::default();
            }
        }

        self.config.validate()?;
        self.config.save(&self.config_path).await?;
        self.ui.success(&format!(
            "Configuration saved to {}",
            self.config_path.display()
        ));
        Ok(())
    }

    fn show(&self) {
        let timeout = match self.config.timeout {
            Some(seconds) => format!("{}s", seconds),
            None => "none".to_string(),
        };
        self.ui.card(
            "Configuration",
            vec![
                ("File", self.config_path.display().to_string()),
                ("Endpoint", self.config.base_url.clone()),
                ("Timeout", timeout),
                ("Notice delay", format!("{}s", self.config.notice_seconds)),
                (
                    "Username",
                    self.ui.format_user_field(self.config.username.clone()),
                ),
            ],
        );
    }
}
