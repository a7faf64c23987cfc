//! Application Configuration
//!
//! Configuration for the planner application layer. Built once at startup
//! and shared read-only; handlers never read the environment.

use platform::config::{ConfigError, ProcessEnv, VarSource, optional, optional_parsed, required};
use std::fmt;
use std::time::Duration;
use telegram::BotToken;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
pub const ENV_SUPABASE_SERVICE_ROLE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const ENV_TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_SUPABASE_TABLE: &str = "SUPABASE_TABLE";
pub const ENV_STORE_TIMEOUT_SECS: &str = "STORE_TIMEOUT_SECS";
pub const ENV_INIT_DATA_MAX_AGE_SECS: &str = "INIT_DATA_MAX_AGE_SECS";

/// Table holding one row per `(telegram_id, date)`
pub const DEFAULT_TABLE: &str = "planner_tasks";

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Supabase service role key
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ServiceRoleKey(String);

impl ServiceRoleKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ServiceRoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServiceRoleKey").field(&"[REDACTED]").finish()
    }
}

/// Task store (Supabase PostgREST) configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    pub service_role_key: ServiceRoleKey,
    pub table: String,
    /// Whole-request timeout for one store call
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, service_role_key: ServiceRoleKey) -> Self {
        Self {
            url: url.into(),
            service_role_key,
            table: DEFAULT_TABLE.to_string(),
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// PostgREST endpoint of the task table
    pub fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), self.table)
    }
}

/// Planner application configuration
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub bot_token: BotToken,
    pub store: StoreConfig,
    /// Reject init data whose `auth_date` is older than this.
    /// `None` disables the check.
    pub max_init_data_age: Option<Duration>,
}

impl PlannerConfig {
    pub fn new(bot_token: BotToken, store: StoreConfig) -> Self {
        Self {
            bot_token,
            store,
            max_init_data_age: None,
        }
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&ProcessEnv)
    }

    /// Load from any variable source
    ///
    /// The bot token, store URL and service role key are required.
    pub fn from_source<S: VarSource + ?Sized>(source: &S) -> Result<Self, ConfigError> {
        let url = required(source, ENV_SUPABASE_URL)?;
        validate_url(&url)?;
        let key = required(source, ENV_SUPABASE_SERVICE_ROLE_KEY)?;
        let bot_token = required(source, ENV_TELEGRAM_BOT_TOKEN)?;

        let mut store = StoreConfig::new(url, ServiceRoleKey::new(key));

        if let Some(table) = optional(source, ENV_SUPABASE_TABLE) {
            validate_table(&table)?;
            store.table = table;
        }

        if let Some(secs) = optional_parsed::<u64, _>(source, ENV_STORE_TIMEOUT_SECS)? {
            store.timeout = positive_secs(ENV_STORE_TIMEOUT_SECS, secs)?;
        }

        let max_init_data_age = optional_parsed::<u64, _>(source, ENV_INIT_DATA_MAX_AGE_SECS)?
            .map(|secs| positive_secs(ENV_INIT_DATA_MAX_AGE_SECS, secs))
            .transpose()?;

        Ok(Self {
            bot_token: BotToken::new(bot_token),
            store,
            max_init_data_age,
        })
    }

    /// Freshness window as a chrono duration, for comparing against `auth_date`
    pub fn max_init_data_age_chrono(&self) -> Option<chrono::Duration> {
        self.max_init_data_age
            .and_then(|age| chrono::Duration::from_std(age).ok())
    }
}

fn validate_url(raw: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        name: ENV_SUPABASE_URL.to_string(),
        reason: reason.to_string(),
    };

    let parsed = url::Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(invalid("scheme must be http or https")),
    }
}

fn validate_table(table: &str) -> Result<(), ConfigError> {
    if table
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name: ENV_SUPABASE_TABLE.to_string(),
            reason: "only ASCII letters, digits and '_' are allowed".to_string(),
        })
    }
}

fn positive_secs(name: &str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Invalid {
            name: name.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
