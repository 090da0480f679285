//! Process configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! `config.toml` found in the working directory or up to two parents, and
//! `SVC_`-prefixed environment variables. Nested keys are joined with `_`,
//! so `postgres.host` is overridden by `SVC_POSTGRES_HOST`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "SVC_";

/// File name searched for by [`AppConfig::load`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

const SEARCH_DIRS: [&str; 3] = [".", "..", "../.."];
const DEFAULT_MAX_OPEN_CONNS: u32 = 10;

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`AppConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override could not be parsed.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// Environment variable name.
        key: String,
        /// Rejected value.
        value: String,
    },
}

/// Top-level process configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Deployment environment, such as `development` or `production`.
    pub env: String,
    /// Explicit log filter; empty means derive from [`AppConfig::env`].
    pub log_level: String,
    /// Durable store settings.
    pub postgres: PostgresConfig,
    /// Cache settings.
    pub redis: RedisConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: "development".to_owned(),
            log_level: String::new(),
            postgres: PostgresConfig::default(),
            redis: RedisConfig::default(),
        }
    }
}

/// `PostgreSQL` connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostgresConfig {
    /// Host and port, such as `localhost:5432`.
    pub host: String,
    /// Database name.
    pub database: String,
    /// Login role.
    pub username: String,
    /// Password; empty means none.
    pub password: String,
    /// `sslmode` connection parameter.
    pub sslmode: String,
    /// Maximum pool size; non-positive values fall back to the default.
    pub max_open_conns: i64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost:5432".to_owned(),
            database: "tasks".to_owned(),
            username: "postgres".to_owned(),
            password: String::new(),
            sslmode: "disable".to_owned(),
            max_open_conns: i64::from(DEFAULT_MAX_OPEN_CONNS),
        }
    }
}

impl PostgresConfig {
    /// Builds the connection URL.
    #[must_use]
    pub fn database_url(&self) -> String {
        let credentials = if self.password.is_empty() {
            self.username.clone()
        } else {
            format!("{}:{}", self.username, self.password)
        };
        format!(
            "postgres://{credentials}@{host}/{database}?sslmode={sslmode}",
            host = self.host,
            database = self.database,
            sslmode = self.sslmode,
        )
    }

    /// Returns the pool size to use.
    #[must_use]
    pub fn pool_size(&self) -> u32 {
        u32::try_from(self.max_open_conns)
            .ok()
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_MAX_OPEN_CONNS)
    }
}

/// Redis connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Host and port, such as `127.0.0.1:6379`.
    pub host: String,
    /// Password; empty means none.
    pub password: String,
    /// Logical database index.
    pub db: i64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1:6379".to_owned(),
            password: String::new(),
            db: 0,
        }
    }
}

impl RedisConfig {
    /// Builds the connection URL.
    #[must_use]
    pub fn url(&self) -> String {
        if self.password.is_empty() {
            format!("redis://{}/{}", self.host, self.db)
        } else {
            format!("redis://:{}@{}/{}", self.password, self.host, self.db)
        }
    }
}

impl AppConfig {
    /// Loads configuration from the optional file and the process environment.
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or an
    /// environment override is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match find_config_file() {
            Some(path) => Self::from_file(&path)?,
            None => {
                warn!(file = CONFIG_FILE_NAME, "config file not found, using defaults");
                Self::default()
            }
        };
        base.with_env_overrides(std::env::vars())
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `SVC_`-prefixed overrides from the given variables.
    ///
    /// Variables without the prefix, or naming an unknown key, are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a numeric override does not
    /// parse.
    pub fn with_env_overrides<I>(mut self, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            let Some(key) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match key {
                "ENV" => self.env = value,
                "LOG_LEVEL" => self.log_level = value,
                "POSTGRES_HOST" => self.postgres.host = value,
                "POSTGRES_DATABASE" => self.postgres.database = value,
                "POSTGRES_USERNAME" => self.postgres.username = value,
                "POSTGRES_PASSWORD" => self.postgres.password = value,
                "POSTGRES_SSLMODE" => self.postgres.sslmode = value,
                "POSTGRES_MAX_OPEN_CONNS" => {
                    self.postgres.max_open_conns = parse_override(&name, value)?;
                }
                "REDIS_HOST" => self.redis.host = value,
                "REDIS_PASSWORD" => self.redis.password = value,
                "REDIS_DB" => self.redis.db = parse_override(&name, value)?,
                _ => {}
            }
        }
        Ok(self)
    }

    /// Returns the log filter, derived from the environment when unset.
    ///
    /// Development environments log at `info`; everything else at `error`.
    #[must_use]
    pub fn effective_log_level(&self) -> &str {
        if !self.log_level.is_empty() {
            return &self.log_level;
        }
        match self.env.as_str() {
            "dev" | "development" => "info",
            _ => "error",
        }
    }
}

fn parse_override<T: FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_owned(),
        value,
    })
}

fn find_config_file() -> Option<PathBuf> {
    SEARCH_DIRS
        .iter()
        .map(|dir| Path::new(dir).join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}
