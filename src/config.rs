use std::net::SocketAddr;

use crate::{APIResult, Environment};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Server settings
///
/// # Environment Variables
///
/// - `QB_ENVIRONMENT`: `sandbox` (default) or `production`
/// - `INVENTORY_BIND_ADDR`: address to listen on, `127.0.0.1:8080` by default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub environment: Environment,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Reads the settings from the process environment, loading `.env` first
    /// if there is one
    ///
    /// # Errors
    ///
    /// If a variable is set but can't be parsed
    pub fn from_env() -> APIResult<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> APIResult<Self> {
        let environment = match lookup("QB_ENVIRONMENT") {
            Some(env) => env.parse()?,
            None => Environment::default(),
        };
        let bind_addr = lookup("INVENTORY_BIND_ADDR")
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()?;
        Ok(Self {
            environment,
            bind_addr,
        })
    }
}
