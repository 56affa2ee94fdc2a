mod channel_sink;
mod file_store;
mod jira_api;
mod tcp_probe;
mod tracker_server;
mod websocket;

pub use channel_sink::*;
pub use file_store::*;
pub use jira_api::*;
pub use tcp_probe::*;
pub use tracker_server::*;
pub use websocket::*;
