mod adapters;
mod cli;
mod config;
mod domain;
mod factory;
mod ui;

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use crate::config::TrackerConfig;
use domain::{
    models::{Credentials, Lookup},
    services::ConnectionManager,
    ConnectionError, ConnectionEvent,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("desktop_tracker=info,jira=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::ConfigPath = cli.command {
        return print_config_path();
    }

    let config = TrackerConfig::load()?;
    tracing::debug!(?config, "loaded config");
    let (manager, mut events) = factory::build_connection_manager(&config)?;

    let result = match cli.command {
        Commands::Login {
            host,
            username,
            password,
            memorize,
        } => login(&manager, &mut events, host, username, password, memorize).await,
        Commands::Resume { watch } => resume(&manager, &mut events, watch).await,
        Commands::Status => status(&manager).await,
        Commands::Logout { forget } => logout(&manager, forget).await,
        Commands::ConfigPath => Ok(()),
    };

    ui::drain(&mut events);
    result
}

fn print_config_path() -> Result<()> {
    let path = TrackerConfig::config_path()?;
    if !path.exists() {
        TrackerConfig::default().save(&path)?;
        println!("Created default config at {}", path.display());
    } else {
        println!("{}", path.display());
    }
    Ok(())
}

async fn login(
    manager: &ConnectionManager,
    events: &mut UnboundedReceiver<ConnectionEvent>,
    host: Option<String>,
    username: Option<String>,
    password: Option<String>,
    memorize: bool,
) -> Result<()> {
    if !manager.probe_connectivity().await {
        return Err(ConnectionError::Connectivity.into());
    }

    let saved = manager.load_persisted_credentials().await?.into_option();
    ui::drain(events);

    let host = match host.or_else(|| saved.as_ref().map(|s| s.host.clone())) {
        Some(host) => host,
        None => prompt("JIRA host")?,
    };
    let username = match username.or_else(|| saved.as_ref().map(|s| s.username.clone())) {
        Some(username) => username,
        None => prompt("Username")?,
    };
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ").context("Failed to read password")?,
    };

    let credentials = Credentials {
        host,
        username,
        password,
        // Keep remembering once the user opted in.
        memorize: memorize || saved.is_some(),
    };
    manager.connect_with_credentials(&credentials).await?;
    Ok(())
}

async fn resume(
    manager: &ConnectionManager,
    events: &mut UnboundedReceiver<ConnectionEvent>,
    watch: bool,
) -> Result<()> {
    if !manager.probe_connectivity().await {
        return Err(ConnectionError::Connectivity.into());
    }

    let token = manager.load_persisted_token().await?;
    manager.connect_with_token(&token).await?;
    manager.set_auth_succeeded();

    if watch {
        ui::drain(events);
        ui::follow(events).await;
        manager.logout().await;
    }
    Ok(())
}

async fn status(manager: &ConnectionManager) -> Result<()> {
    manager.probe_connectivity().await;
    match manager.load_persisted_credentials().await? {
        Lookup::Found(saved) => println!("Saved login: {} on {}", saved.username, saved.host),
        Lookup::NotFound => println!("No saved login"),
    }
    match manager.load_persisted_token().await {
        Ok(_) => println!("Automatic login available"),
        Err(ConnectionError::MissingToken) => println!("Automatic login unavailable"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

async fn logout(manager: &ConnectionManager, forget: bool) -> Result<()> {
    manager.logout().await;
    if forget {
        manager
            .forget_persisted()
            .await
            .context("Failed to delete saved login")?;
        println!("Deleted saved token and credentials");
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    let value = line.trim().to_string();
    if value.is_empty() {
        bail!("{} is required", label);
    }
    Ok(value)
}
