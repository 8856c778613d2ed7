//! Binary configuration: `chemquiz.toml`, then `CHEMQUIZ_*` variables and flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::Deserialize;

use services::{AppServices, Clock, QuizSettings};

const LOCAL_CONFIG: &str = "chemquiz.toml";

/// Where scores and the profile are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Nothing survives the process.
    Memory,
    /// One JSON file per key under `data_dir`.
    #[default]
    File,
    /// `kv_store` table in a `SQLite` database.
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub store: StoreBackend,
    pub data_dir: PathBuf,
    pub db_url: String,
    pub session_size: u32,
    pub reveal_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = QuizSettings::default();
        Self {
            store: StoreBackend::default(),
            data_dir: PathBuf::from(".chemquiz"),
            db_url: "sqlite://chemquiz.sqlite3".into(),
            session_size: settings.session_size(),
            reveal_seconds: settings.reveal_dwell().as_secs(),
        }
    }
}

/// Values that win over the config file. Filled from flags or `CHEMQUIZ_*`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub store: Option<StoreBackend>,
    pub data_dir: Option<PathBuf>,
    pub db_url: Option<String>,
    pub session_size: Option<u32>,
    pub reveal_seconds: Option<u64>,
}

impl AppConfig {
    /// Load an explicit config file, or `chemquiz.toml` in the current
    /// directory when present, or defaults.
    ///
    /// # Errors
    ///
    /// Fails if an explicit path does not exist or a file cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) if p.exists() => Some(p.to_path_buf()),
            Some(p) => bail!("config file not found: {}", p.display()),
            None => Some(PathBuf::from(LOCAL_CONFIG)).filter(|p| p.exists()),
        };
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?;
                Self::from_toml(&content)
                    .with_context(|| format!("failed to parse config: {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    /// # Errors
    ///
    /// Returns the TOML error for malformed input or unknown keys.
    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(store) = overrides.store {
            self.store = store;
        }
        if let Some(dir) = overrides.data_dir {
            self.data_dir = dir;
        }
        if let Some(url) = overrides.db_url {
            self.db_url = url;
        }
        if let Some(size) = overrides.session_size {
            self.session_size = size;
        }
        if let Some(secs) = overrides.reveal_seconds {
            self.reveal_seconds = secs;
        }
        self
    }

    /// # Errors
    ///
    /// Fails when the session size or reveal time is out of range.
    pub fn quiz_settings(&self) -> Result<QuizSettings> {
        QuizSettings::new(self.session_size, Duration::from_secs(self.reveal_seconds))
            .context("invalid quiz settings")
    }

    /// Open the configured backend and assemble services on it.
    ///
    /// # Errors
    ///
    /// Fails when settings are invalid or storage cannot be opened.
    pub async fn build_services(&self, clock: Clock) -> Result<AppServices> {
        let settings = self.quiz_settings()?;
        let services = match self.store {
            StoreBackend::Memory => AppServices::new_in_memory(clock, settings).await?,
            StoreBackend::File => AppServices::new_file(&self.data_dir, clock, settings)
                .await
                .with_context(|| format!("failed to open {}", self.data_dir.display()))?,
            StoreBackend::Sqlite => {
                let url = normalize_sqlite_url(&self.db_url);
                prepare_sqlite_file(&url)?;
                AppServices::new_sqlite(&url, clock, settings)
                    .await
                    .with_context(|| format!("failed to open {url}"))?
            }
        };
        Ok(services)
    }
}

/// Turn `sqlite:dev.db` or a bare path into an absolute `sqlite://` URL.
fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_owned();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<()> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let Some(path) = db_url.strip_prefix("sqlite://") else {
        bail!("invalid sqlite url: {db_url}");
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        bail!("invalid sqlite url: {db_url}");
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_quiz_settings() {
        let config = AppConfig::default();
        assert_eq!(config.store, StoreBackend::File);
        assert_eq!(config.session_size, 10);
        assert_eq!(config.reveal_seconds, 3);
        assert_eq!(config.quiz_settings().unwrap(), QuizSettings::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = AppConfig::from_toml("store = \"sqlite\"\nsession_size = 5\n").unwrap();
        assert_eq!(config.store, StoreBackend::Sqlite);
        assert_eq!(config.session_size, 5);
        assert_eq!(config.reveal_seconds, 3);
        assert_eq!(config.data_dir, PathBuf::from(".chemquiz"));
    }

    #[test]
    fn unknown_keys_and_backends_are_rejected() {
        assert!(AppConfig::from_toml("colour = \"blue\"").is_err());
        assert!(AppConfig::from_toml("store = \"redis\"").is_err());
    }

    #[test]
    fn overrides_win_over_file_values() {
        let config = AppConfig::from_toml("store = \"file\"\nreveal_seconds = 5\n")
            .unwrap()
            .with_overrides(ConfigOverrides {
                store: Some(StoreBackend::Memory),
                reveal_seconds: Some(1),
                ..ConfigOverrides::default()
            });
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.reveal_seconds, 1);
        assert_eq!(config.session_size, 10);
    }

    #[test]
    fn out_of_range_settings_fail() {
        let config = AppConfig {
            reveal_seconds: 0,
            ..AppConfig::default()
        };
        assert!(config.quiz_settings().is_err());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());

        let present = dir.path().join("chemquiz.toml");
        std::fs::write(&present, "session_size = 3\n").unwrap();
        assert_eq!(AppConfig::load(Some(&present)).unwrap().session_size, 3);
    }

    #[test]
    fn sqlite_urls_are_normalized() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/quiz.db"),
            "sqlite:///tmp/quiz.db"
        );
        assert_eq!(normalize_sqlite_url("/tmp/quiz.db"), "sqlite:///tmp/quiz.db");
    }

    #[tokio::test]
    async fn sqlite_backend_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("quiz.sqlite3");
        let config = AppConfig {
            store: StoreBackend::Sqlite,
            db_url: db.display().to_string(),
            ..AppConfig::default()
        };
        let services = config.build_services(Clock::default_clock()).await.unwrap();
        assert!(db.exists());
        assert_eq!(services.progress().profile().await.level(), 1);
    }
}
