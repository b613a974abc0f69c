pub mod config;
pub mod error;
pub mod intelligence;
pub mod models;
pub mod services;
pub mod sources;

pub use config::Config;
pub use error::{Result, SyncError};
