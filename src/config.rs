//! Runtime settings, read once from the environment at startup.
//!
//! The binary loads a `.env` file first (see `main.rs`); library callers
//! build [`Settings`] themselves and pass it by reference.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{R6sError, Result};
use crate::normalize::MmrSourcing;
use crate::retry::{Backoff, RetryPolicy};

pub const DEFAULT_NAME_ENV_VAR: &str = "R6S_DEFAULT_NAME";
pub const MAX_RETRY_ENV_VAR: &str = "R6S_MAX_RETRY";
pub const RETRY_DELAY_ENV_VAR: &str = "R6S_RETRY_DELAY_MS";
pub const BACKOFF_ENV_VAR: &str = "R6S_BACKOFF";
pub const TIMEOUT_ENV_VAR: &str = "R6S_TIMEOUT_SECS";
pub const PROXY_ENV_VAR: &str = "R6S_PROXY";
pub const DB_USERNAME_ENV_VAR: &str = "R6S_DB_USERNAME";
pub const DB_PASSWORD_ENV_VAR: &str = "R6S_DB_PASSWORD";
pub const ADAPTERS_ENV_VAR: &str = "R6S_ADAPTERS";
pub const FONT_ENV_VAR: &str = "R6S_FONT";
pub const CACHE_DIR_ENV_VAR: &str = "R6S_CACHE_DIR";
pub const SESSION_FILE_ENV_VAR: &str = "R6S_SESSION_FILE";
pub const BINDINGS_ENV_VAR: &str = "R6S_BINDINGS";
pub const MMR_SOURCING_ENV_VAR: &str = "R6S_MMR_SOURCING";

pub const DEFAULT_PLAYER_NAME: &str = "MacieJay";
pub const DEFAULT_ADAPTER: &str = "r6tracker";
const DEFAULT_MAX_RETRY: u32 = 3;
const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// How the delay between retry attempts grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackoffMode {
    #[default]
    Fixed,
    Exponential,
}

impl FromStr for BackoffMode {
    type Err = R6sError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(BackoffMode::Fixed),
            "exponential" | "exp" => Ok(BackoffMode::Exponential),
            other => Err(R6sError::Config {
                message: format!("unknown backoff mode: {other}"),
            }),
        }
    }
}

/// Where chat-user bindings are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingBackend {
    #[default]
    Json,
    Sqlite,
}

impl FromStr for BindingBackend {
    type Err = R6sError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(BindingBackend::Json),
            "sqlite" | "db" => Ok(BindingBackend::Sqlite),
            other => Err(R6sError::Config {
                message: format!("unknown binding backend: {other}"),
            }),
        }
    }
}

/// Basic-Auth credentials for the stats database.
#[derive(Clone, PartialEq, Eq)]
pub struct DbCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for DbCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub default_name: String,
    pub max_retry: u32,
    pub retry_delay: Duration,
    pub backoff: BackoffMode,
    pub timeout: Duration,
    pub proxy: Option<String>,
    pub db_credentials: Option<DbCredentials>,
    pub adapter: String,
    /// Passed through to renderers; not read here.
    pub font: Option<PathBuf>,
    pub cache_dir: PathBuf,
    pub session_file: PathBuf,
    pub bindings: BindingBackend,
    /// Per-source replacements for the built-in MMR pointers.
    pub mmr_overrides: BTreeMap<String, MmrSourcing>,
}

impl Default for Settings {
    fn default() -> Self {
        let cache_dir = default_cache_dir();
        Self {
            default_name: DEFAULT_PLAYER_NAME.to_string(),
            max_retry: DEFAULT_MAX_RETRY,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            backoff: BackoffMode::Fixed,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            proxy: None,
            db_credentials: None,
            adapter: DEFAULT_ADAPTER.to_string(),
            font: None,
            session_file: cache_dir.join("ubisoft-session.json"),
            cache_dir,
            bindings: BindingBackend::Json,
            mmr_overrides: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut settings = Settings::default();

        if let Some(name) = get(DEFAULT_NAME_ENV_VAR) {
            settings.default_name = name;
        }
        if let Some(raw) = get(MAX_RETRY_ENV_VAR) {
            settings.max_retry = parse_number(MAX_RETRY_ENV_VAR, &raw)?;
            if settings.max_retry == 0 {
                return Err(R6sError::Config {
                    message: format!("{MAX_RETRY_ENV_VAR} must be at least 1"),
                });
            }
        }
        if let Some(raw) = get(RETRY_DELAY_ENV_VAR) {
            settings.retry_delay = Duration::from_millis(parse_number(RETRY_DELAY_ENV_VAR, &raw)?);
        }
        if let Some(raw) = get(BACKOFF_ENV_VAR) {
            settings.backoff = raw.parse()?;
        }
        if let Some(raw) = get(TIMEOUT_ENV_VAR) {
            settings.timeout = Duration::from_secs(parse_number(TIMEOUT_ENV_VAR, &raw)?);
        }
        settings.proxy = get(PROXY_ENV_VAR);
        settings.db_credentials = match (get(DB_USERNAME_ENV_VAR), get(DB_PASSWORD_ENV_VAR)) {
            (Some(username), Some(password)) => Some(DbCredentials { username, password }),
            _ => None,
        };
        if let Some(adapter) = get(ADAPTERS_ENV_VAR) {
            settings.adapter = adapter.to_ascii_lowercase();
        }
        settings.font = get(FONT_ENV_VAR).map(PathBuf::from);
        if let Some(dir) = get(CACHE_DIR_ENV_VAR) {
            settings.cache_dir = PathBuf::from(dir);
            settings.session_file = settings.cache_dir.join("ubisoft-session.json");
        }
        if let Some(file) = get(SESSION_FILE_ENV_VAR) {
            settings.session_file = PathBuf::from(file);
        }
        if let Some(raw) = get(BINDINGS_ENV_VAR) {
            settings.bindings = raw.parse()?;
        }
        if let Some(raw) = get(MMR_SOURCING_ENV_VAR) {
            settings.mmr_overrides =
                serde_json::from_str(&raw).map_err(|e| R6sError::Config {
                    message: format!("{MMR_SOURCING_ENV_VAR} is not a valid mapping: {e}"),
                })?;
        }

        Ok(settings)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let backoff = match self.backoff {
            BackoffMode::Fixed => Backoff::Fixed(self.retry_delay),
            BackoffMode::Exponential => Backoff::Exponential {
                base: self.retry_delay,
                max: MAX_BACKOFF,
            },
        };
        RetryPolicy::new(self.max_retry, backoff)
    }

    pub fn bindings_path(&self) -> PathBuf {
        match self.bindings {
            BindingBackend::Json => self.cache_dir.join("bindings.json"),
            BindingBackend::Sqlite => self.cache_dir.join("bindings.db"),
        }
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.cache_dir.join("assets")
    }
}

/// `<os cache dir>/r6s-stats`, or `~/.cache/r6s-stats` when the platform has none.
pub fn default_cache_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("r6s-stats")
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.parse().map_err(|_| R6sError::Config {
        message: format!("{key} must be a non-negative integer, got {raw:?}"),
    })
}
