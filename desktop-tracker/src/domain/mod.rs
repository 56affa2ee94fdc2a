mod error;
mod events;
pub mod models;
pub mod ports;
pub mod services;

pub use error::*;
pub use events::*;
