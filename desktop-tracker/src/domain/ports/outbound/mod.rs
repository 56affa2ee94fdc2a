mod auth_server;
mod connectivity;
mod event_sink;
mod realtime;
mod remote_api;
mod secure_store;

#[cfg(test)]
pub mod mock;

pub use auth_server::*;
pub use connectivity::*;
pub use event_sink::*;
pub use realtime::*;
pub use remote_api::*;
pub use secure_store::*;
