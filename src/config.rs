//! Server configuration

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::error::ConfigError;

pub const BIND_ADDR_VAR: &str = "TIMETABLE_BIND_ADDR";
pub const SEED_VAR: &str = "TIMETABLE_SEED";

/// Server configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Address to bind the HTTP server
    pub bind_address: SocketAddr,
    /// Seed used when a request does not carry one; `None` draws a fresh
    /// seed per run
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8080)),
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `TIMETABLE_BIND_ADDR` and `TIMETABLE_SEED`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(BIND_ADDR_VAR) {
            config.bind_address = value
                .parse()
                .map_err(|source| ConfigError::BindAddress { value, source })?;
        }
        if let Some(value) = lookup(SEED_VAR) {
            config.seed = Some(
                value
                    .parse()
                    .map_err(|source| ConfigError::Seed { value, source })?,
            );
        }
        Ok(config)
    }
}
