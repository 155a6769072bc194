//! rentbook-config
//!
//! User preferences for the Rentbook CLI and their on-disk persistence.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{resolve_home, ConfigManager, HOME_ENV_VAR};
pub use model::Config;
