//! Runtime settings.
//!
//! Layered with the `config` crate: compiled-in defaults, then an optional
//! TOML file, then `FOLIO_*` environment variables (`__` separates
//! sections, e.g. `FOLIO_SERVER__PORT=9000`).

use std::{path::{Path, PathBuf}, time::Duration};

use folio_mail::MailConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to load configuration: {0}")]
  Load(#[from] config::ConfigError),

  #[error("server.port must not be 0")]
  InvalidPort,

  #[error("{0} must be greater than zero")]
  ZeroTimeout(&'static str),

  #[error("database.path must be set when database.kind = \"sqlite\"")]
  EmptyDatabasePath,

  #[error("unknown log level {0:?} (expected trace, debug, info, warn or error)")]
  UnknownLogLevel(String),

  #[error("invalid mail settings: {0}")]
  Mail(#[from] folio_mail::Error),
}

// ─── Sections ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  pub read_timeout_secs:  u64,
  pub write_timeout_secs: u64,
  /// `development` or `production`; only affects logging.
  pub environment:        String,
  /// Served under `/static`.
  pub static_dir:         PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:               "127.0.0.1".into(),
      port:               8080,
      read_timeout_secs:  30,
      write_timeout_secs: 30,
      environment:        "development".into(),
      static_dir:         PathBuf::from("static"),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn read_timeout(&self) -> Duration { Duration::from_secs(self.read_timeout_secs) }

  pub fn write_timeout(&self) -> Duration { Duration::from_secs(self.write_timeout_secs) }

  pub fn is_production(&self) -> bool { self.environment.eq_ignore_ascii_case("production") }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
  #[default]
  Memory,
  Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
  pub kind:            DatabaseKind,
  pub path:            PathBuf,
  pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
  fn default() -> Self {
    Self {
      kind:            DatabaseKind::Memory,
      path:            PathBuf::from("./data/folio.db"),
      busy_timeout_ms: 30_000,
    }
  }
}

impl DatabaseConfig {
  pub fn busy_timeout(&self) -> Duration { Duration::from_millis(self.busy_timeout_ms) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
  #[default]
  #[serde(alias = "pretty")]
  Text,
  Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
  #[default]
  Stdout,
  Stderr,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
  pub level:  String,
  pub format: LogFormat,
  pub output: LogOutput,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self { level: "info".into(), format: LogFormat::Text, output: LogOutput::Stdout }
  }
}

impl LoggingConfig {
  pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
    match self.level.trim().to_ascii_lowercase().as_str() {
      "trace" => Ok(LevelFilter::TRACE),
      "debug" => Ok(LevelFilter::DEBUG),
      "info" => Ok(LevelFilter::INFO),
      "warn" | "warning" => Ok(LevelFilter::WARN),
      "error" => Ok(LevelFilter::ERROR),
      _ => Err(ConfigError::UnknownLogLevel(self.level.clone())),
    }
  }
}

// ─── Settings ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub server:   ServerConfig,
  pub database: DatabaseConfig,
  pub logging:  LoggingConfig,
  pub mail:     MailConfig,
}

impl Settings {
  /// Read `path` (if it exists) and the environment, then validate.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let settings: Settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("FOLIO")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?
      .try_deserialize()?;
    settings.validate()?;
    Ok(settings)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.server.port == 0 {
      return Err(ConfigError::InvalidPort);
    }
    if self.server.read_timeout_secs == 0 {
      return Err(ConfigError::ZeroTimeout("server.read_timeout_secs"));
    }
    if self.server.write_timeout_secs == 0 {
      return Err(ConfigError::ZeroTimeout("server.write_timeout_secs"));
    }
    if self.database.kind == DatabaseKind::Sqlite {
      if self.database.path.as_os_str().is_empty() {
        return Err(ConfigError::EmptyDatabasePath);
      }
      if self.database.busy_timeout_ms == 0 {
        return Err(ConfigError::ZeroTimeout("database.busy_timeout_ms"));
      }
    }
    self.logging.level_filter()?;
    self.mail.check_addresses()?;
    Ok(())
  }
}
