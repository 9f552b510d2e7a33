//! CLI entry and dispatch.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use evently_core::api::ApiClient;
use evently_core::config::{self, Config};
use evently_core::events::EventType;
use evently_core::logging;
use evently_core::session::{FileSessionStore, SharedSession};

mod commands;

#[derive(Parser)]
#[command(name = "evently")]
#[command(version)]
#[command(about = "Browse and create events from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        /// Password (prefer the environment variable)
        #[arg(long, env = "EVENTLY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account (does not log in)
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "EVENTLY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and forget the session token
    Logout,
    /// Show the service URL and whether a session is stored
    Status,
    /// Browse and create events
    Events {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum EventCommands {
    /// List events
    List {
        /// Only show events whose name contains this text (case-insensitive)
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Show one event
    Show {
        #[arg(value_name = "EVENT_ID")]
        id: String,
    },
    /// Create an event
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        address: String,
        /// Calendar date (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        date: String,
        /// Local time (HH:MM)
        #[arg(long, default_value = "")]
        time: String,
        /// Business, Entertainment, Education, Social or Other
        #[arg(long = "type", value_name = "TYPE")]
        event_type: Option<EventType>,
        /// Mark the event for online sync
        #[arg(long)]
        online: bool,
        /// Cover image file
        #[arg(long, value_name = "PATH")]
        cover: Option<PathBuf>,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Set the service base URL
    SetBaseUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;
    let _log_guard = match logging::init(&config.log_filter, &config::paths::logs_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    // Config commands work even when the session or base URL is broken.
    let command = match cli.command {
        Some(Commands::Config { command }) => return config_command(command),
        other => other,
    };

    let session: SharedSession =
        Arc::new(FileSessionStore::open_default().context("open session")?);
    let client = ApiClient::from_config(&config, session).context("create API client")?;

    // default to the interactive client
    let Some(command) = command else {
        return evently_tui::run_interactive(&config, client).await;
    };

    tracing::debug!(base_url = client.base_url(), "running command");
    match command {
        Commands::Login { email, password } => {
            commands::auth::login(&client, &email, &password).await
        }
        Commands::Signup {
            name,
            email,
            password,
        } => commands::auth::signup(&client, &name, &email, &password).await,
        Commands::Logout => commands::auth::logout(&client).await,
        Commands::Status => {
            commands::auth::status(&client);
            Ok(())
        }
        Commands::Events { command } => match command {
            EventCommands::List { search } => {
                commands::events::list(&client, search.as_deref()).await
            }
            EventCommands::Show { id } => commands::events::show(&client, &id).await,
            EventCommands::Create {
                name,
                address,
                date,
                time,
                event_type,
                online,
                cover,
            } => {
                let args = commands::events::CreateArgs {
                    name,
                    address,
                    date,
                    time,
                    event_type,
                    online,
                    cover,
                };
                commands::events::create(&client, args).await
            }
        },
        Commands::Config { command } => config_command(command),
    }
}

fn config_command(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            commands::config::path();
            Ok(())
        }
        ConfigCommands::Init => commands::config::init(),
        ConfigCommands::SetBaseUrl { url } => commands::config::set_base_url(&url),
    }
}
