use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "desktop-tracker")]
#[command(about = "Connect the desktop time tracker to JIRA")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in to JIRA with a username and password
    Login {
        /// JIRA Cloud site, e.g. "team" or "https://team"
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        username: Option<String>,
        /// Prompted for when not given
        #[arg(long, env = "JIRA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Remember host and username for the next login
        #[arg(long)]
        memorize: bool,
    },
    /// Reconnect with the session token saved by an earlier login
    Resume {
        /// Stay connected and print realtime updates until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
    /// Show connectivity and saved login state
    Status,
    /// Drop the session
    Logout {
        /// Also delete the saved token and credentials
        #[arg(long)]
        forget: bool,
    },
    /// Print config path and create default file if missing
    ConfigPath,
}
