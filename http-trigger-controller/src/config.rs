use std::env::{var, VarError};

use http_trigger_core::resources::intent::{IntentDefaults, DEFAULT_DOMAIN, DEFAULT_PATH};
use thiserror::Error;

pub const NAMESPACE_ENV: &str = "HTTP_TRIGGER_NAMESPACE";
pub const DEFAULT_DOMAIN_ENV: &str = "HTTP_TRIGGER_DEFAULT_DOMAIN";
pub const DEFAULT_PATH_ENV: &str = "HTTP_TRIGGER_DEFAULT_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// watch a single namespace instead of the whole cluster
    pub namespace: Option<String>,
    pub intent_defaults: IntentDefaults,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Env var '{}' is set but empty!", .0)]
    EmptyVar(&'static str),
    #[error("Env var '{}' contains invalid unicode!", .0)]
    InvalidVar(&'static str),
}

impl ControllerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| var(key))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Result<String, VarError>) -> Result<Self, ConfigError> {
        let get = |key: &'static str| match lookup(key) {
            Ok(value) if value.trim().is_empty() => Err(ConfigError::EmptyVar(key)),
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::InvalidVar(key)),
        };

        Ok(Self {
            namespace: get(NAMESPACE_ENV)?,
            intent_defaults: IntentDefaults {
                domain: get(DEFAULT_DOMAIN_ENV)?.unwrap_or_else(|| DEFAULT_DOMAIN.to_owned()),
                path: get(DEFAULT_PATH_ENV)?.unwrap_or_else(|| DEFAULT_PATH.to_owned()),
            },
        })
    }
}
