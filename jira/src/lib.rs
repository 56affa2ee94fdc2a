mod auth;
mod client;
mod jira_host;
mod profile;

pub use auth::*;
pub use client::*;
pub use jira_host::*;
pub use profile::*;
