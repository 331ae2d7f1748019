//! Store configuration from the environment.

use std::env;
use thiserror::Error;

pub const SUPABASE_URL_VAR: &str = "SUPABASE_URL";
pub const SERVICE_ROLE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

/// Missing credentials abort a write run before any fetch or parse work.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be set")]
    MissingVar { var: &'static str },
}

/// Connection parameters for the external table store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub service_role_key: String,
}

impl StoreConfig {
    /// Reads connection parameters from the environment. Empty values count
    /// as missing. Dry runs never call this.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: required_var(SUPABASE_URL_VAR)?,
            service_role_key: required_var(SERVICE_ROLE_KEY_VAR)?,
        })
    }
}

fn required_var(var: &'static str) -> Result<String, ConfigError> {
    env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingVar { var })
}
