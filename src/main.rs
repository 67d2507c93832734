use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod archive;
mod auth;
mod cli;
mod client;
mod config;
mod contact;
mod error;
mod generate;
mod render;
mod session;
mod shell;
mod ui;
mod version;
mod view;

#[cfg(test)]
mod tests;

use cli::CliHandler;
use version::CURRENT_VERSION;

#[derive(Parser)]
#[command(
    name = "bioverse",
    about = "BioVerse client: generate planets and the aliens that live on them",
    long_about = "BioVerse - planet and alien generator client

OVERVIEW:
  Describe a planet by name and the BioVerse server invents its conditions
  and a species evolved to live there. Keep the ones you like and send them
  exploring hostile environments.

QUICK START:
  bioverse generate Xyron-7             # Generate a planet and its alien
  bioverse generate Xyron-7 --save      # ...and keep it (needs a username)
  bioverse session                      # Interactive menu
  bioverse saved                        # List your saved aliens
  bioverse config set-username zorg     # Log in automatically
  bioverse status                       # Check server status",
    version = CURRENT_VERSION,
    author = "BioVerse Team",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "BIOVERSE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a planet and an alien adapted to it
    #[command(aliases = &["gen"])]
    Generate(GenerateArgs),

    /// Send a message through the contact form
    Contact(ContactArgs),

    /// List saved aliens
    #[command(aliases = &["ls"])]
    Saved,

    /// List extreme environments
    #[command(aliases = &["envs"])]
    Environments,

    /// Send a saved alien into an environment
    Explore(ExploreArgs),

    /// Show past explorations of a saved alien
    Explorations(ExplorationsArgs),

    /// Show server status
    #[command(aliases = &["st"])]
    Status,

    /// Check username and password
    Login,

    /// Create an account
    Register(RegisterArgs),

    /// Interactive session
    #[command(aliases = &["shell"])]
    Session,

    /// Configure settings
    #[command(aliases = &["cfg"])]
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    pub planet: String,

    /// Save the generated alien
    #[arg(long)]
    pub save: bool,
}

#[derive(Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(short, long)]
    pub message: String,

    /// Extra form field, repeatable
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

#[derive(Args)]
pub struct ExploreArgs {
    pub alien_id: i64,
    pub environment_id: i64,
}

#[derive(Args)]
pub struct ExplorationsArgs {
    pub alien_id: i64,
}

#[derive(Args)]
pub struct RegisterArgs {
    pub username: String,
    pub email: String,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    Show,
    SetEndpoint { url: String },
    /// Request timeout in seconds, 0 to disable
    SetTimeout { seconds: u64 },
    SetUsername { name: String },
    Reset,
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got `{}`", raw)),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(format!("bioverse={}", log_level))
        .with_writer(std::io::stderr);
    subscriber.init();

    let mut handler = CliHandler::with_config_path(cli.config, cli.verbose);
    if let Err(e) = handler.execute(cli.command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("subject=Hello=World").unwrap(),
            ("subject".to_string(), "Hello=World".to_string())
        );
        assert!(parse_field("no-equals").is_err());
        assert!(parse_field("=value").is_err());
    }

    #[test]
    fn test_contact_args_collect_extra_fields() {
        let cli = Cli::try_parse_from([
            "bioverse",
            "contact",
            "--name",
            "A",
            "--email",
            "a@b.com",
            "-m",
            "hi",
            "--field",
            "subject=Krell",
        ])
        .unwrap();

        match cli.command {
            Commands::Contact(args) => {
                assert_eq!(args.message, "hi");
                assert_eq!(args.fields, vec![("subject".to_string(), "Krell".to_string())]);
            }
            _ => panic!("expected contact command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["bioverse", "generate", "Mars", "--save", "-v", "--config", "c.json"])
                .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
        assert!(matches!(cli.command, Commands::Generate(GenerateArgs { save: true, .. })));
    }
}
