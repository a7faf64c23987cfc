//! Environment Configuration Helpers
//!
//! Typed access to process environment variables. Configuration is read
//! once at startup; a missing required variable is a [`ConfigError`] and
//! must stop the process before it serves anything.

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Startup configuration error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Required variable is unset or blank
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    /// Variable is set but cannot be interpreted
    #[error("Invalid value for environment variable {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// Source of configuration values
///
/// Implemented for the process environment and for plain closures so
/// tests can supply values without touching global state.
pub trait VarSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VarSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

impl<F> VarSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Read a required variable; blank values count as missing
pub fn required<S: VarSource + ?Sized>(source: &S, name: &str) -> Result<String, ConfigError> {
    optional(source, name).ok_or_else(|| ConfigError::Missing(name.to_string()))
}

/// Read an optional variable; blank values count as unset
pub fn optional<S: VarSource + ?Sized>(source: &S, name: &str) -> Option<String> {
    source
        .var(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse an optional variable
pub fn optional_parsed<T, S>(source: &S, name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    S: VarSource + ?Sized,
{
    match optional(source, name) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                name: name.to_string(),
                reason: e.to_string(),
            }),
    }
}
