mod config;

pub use config::{Config, ConfigManager, EXPLORER_API_KEY_ENV};

pub use crate::types::network::{Network, NetworkConfig};
