// bistro/app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// `None` runs the service on the in-memory store.
  pub database_url: Option<String>,
  pub database_max_connections: u32,
  pub run_migrations: bool,
  /// Seeds the sample menu when the menu tables are empty.
  pub seed_db: bool,
  /// Sessions untouched for this many seconds are dropped.
  pub session_idle_secs: u64,
  pub session_sweep_interval_secs: u64,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      database_url: None,
      database_max_connections: 5,
      run_migrations: true,
      seed_db: false,
      session_idle_secs: 2 * 60 * 60,
      session_sweep_interval_secs: 5 * 60,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    Self::from_lookup(|var_name| env::var(var_name).ok())
  }

  /// Builds the config from any variable source; unset or blank variables
  /// take their defaults.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| lookup(var_name).filter(|value| !value.trim().is_empty());

    fn parse<T: FromStr>(var_name: &str, raw: Option<String>, default: T) -> Result<T>
    where
      T::Err: std::fmt::Display,
    {
      match raw {
        None => Ok(default),
        Some(value) => value
          .trim()
          .parse::<T>()
          .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", var_name, value, e))),
      }
    }

    let defaults = Self::default();
    let server_host = get_env("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = parse("SERVER_PORT", get_env("SERVER_PORT"), defaults.server_port)?;
    let database_url = get_env("DATABASE_URL");
    let database_max_connections = parse(
      "DATABASE_MAX_CONNECTIONS",
      get_env("DATABASE_MAX_CONNECTIONS"),
      defaults.database_max_connections,
    )?;
    if database_max_connections == 0 {
      return Err(AppError::Config("DATABASE_MAX_CONNECTIONS must be at least 1".to_string()));
    }
    let run_migrations = parse("RUN_MIGRATIONS", get_env("RUN_MIGRATIONS"), defaults.run_migrations)?;
    let seed_db = parse("SEED_DB", get_env("SEED_DB"), defaults.seed_db)?;
    let session_idle_secs = parse("SESSION_IDLE_SECS", get_env("SESSION_IDLE_SECS"), defaults.session_idle_secs)?;
    let session_sweep_interval_secs = parse(
      "SESSION_SWEEP_INTERVAL_SECS",
      get_env("SESSION_SWEEP_INTERVAL_SECS"),
      defaults.session_sweep_interval_secs,
    )?;
    if session_sweep_interval_secs == 0 {
      return Err(AppError::Config("SESSION_SWEEP_INTERVAL_SECS must be at least 1".to_string()));
    }

    tracing::info!(
      server_host = %server_host,
      server_port,
      database_configured = database_url.is_some(),
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      run_migrations,
      seed_db,
      session_idle_secs,
      session_sweep_interval_secs,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }

  pub fn session_idle_timeout(&self) -> Duration {
    Duration::from_secs(self.session_idle_secs)
  }

  pub fn session_sweep_interval(&self) -> Duration {
    Duration::from_secs(self.session_sweep_interval_secs)
  }
}
