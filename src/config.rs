use axum_extra::extract::cookie::Key;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::SkillError;

/// Default config file, overridable with `SKILLHARBOUR_CONFIG`.
pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "SKILLHARBOUR_";

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "skillharbour_session";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub loglevel: String,
    /// Master key for the private session cookie, at least 64 bytes.
    /// A random key is generated per process when unset.
    pub cookie_secret: Option<String>,
    pub insecure_cookie: bool,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            cookie_secret: None,
            insecure_cookie: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Csv,
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
    pub users_file: String,
    pub courses_file: String,
    pub enrollments_file: String,
    pub database_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Csv,
            data_dir: PathBuf::from("."),
            users_file: "users.csv".to_string(),
            courses_file: "courses.csv".to_string(),
            enrollments_file: "enrollments.csv".to_string(),
            database_url: "sqlite:skillharbour.sqlite".to_string(),
        }
    }
}

impl StorageConfig {
    /// Flat-file storage rooted at `dir` with the default file names.
    pub fn csv_in(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    pub fn courses_path(&self) -> PathBuf {
        self.data_dir.join(&self.courses_file)
    }

    pub fn enrollments_path(&self) -> PathBuf {
        self.data_dir.join(&self.enrollments_file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Reject enrollments whose title names no course.
    pub enforce_course_exists: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            enforce_course_exists: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 60 * 60,
            sweep_interval_secs: 60,
        }
    }
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

impl Config {
    /// Defaults, then `config.toml`, then `SKILLHARBOUR_*` env vars (nested keys split by `__`).
    pub fn figment() -> Figment {
        let file = std::env::var(format!("{ENV_PREFIX}CONFIG"))
            .unwrap_or_else(|_| CONFIG_FILE.to_string());
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"))
    }

    pub fn load() -> Result<Self, SkillError> {
        Ok(Self::figment().extract()?)
    }

    pub fn cookie_key(&self) -> Result<Key, SkillError> {
        match self.basic.cookie_secret.as_deref() {
            Some(secret) => Key::try_from(secret.as_bytes()).map_err(|_| {
                SkillError::Config("basic.cookie_secret must be at least 64 bytes".to_string())
            }),
            None => Ok(Key::generate()),
        }
    }
}
