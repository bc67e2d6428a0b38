//! Server configuration read from the environment.

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use delve_engine::application::bus::DEFAULT_BUS_CAPACITY;
use delve_engine::application::session::Pacing;
use delve_engine::application::worker::{DEFAULT_COMMAND_BUFFER, SessionConfig};

use crate::error::AppError;

/// Everything the server needs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind (`HOST`).
    pub host: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Session tuning (`DELVE_*`).
    pub session: SessionConfig,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults
    /// for unset keys.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a value cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse(&lookup, "PORT", 3000_u16)?;
        let bus_capacity = parse(&lookup, "DELVE_BUS_CAPACITY", DEFAULT_BUS_CAPACITY)?;
        let command_buffer = parse(&lookup, "DELVE_COMMAND_BUFFER", DEFAULT_COMMAND_BUFFER)?;
        let defaults = Pacing::default();
        let hit_flash_ms = parse(&lookup, "DELVE_HIT_FLASH_MS", millis(defaults.hit_flash))?;
        let thinking_ms = parse(
            &lookup,
            "DELVE_ENEMY_THINKING_MS",
            millis(defaults.enemy_thinking),
        )?;

        if bus_capacity == 0 || command_buffer == 0 {
            return Err(AppError::Config(
                "DELVE_BUS_CAPACITY and DELVE_COMMAND_BUFFER must be positive".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            session: SessionConfig {
                bus_capacity,
                command_buffer,
                pacing: Pacing {
                    hit_flash: Duration::from_millis(hit_flash_ms),
                    enemy_thinking: Duration::from_millis(thinking_ms),
                },
            },
        })
    }

    /// The address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for an invalid `HOST:PORT` combination.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be valid: {e}"))),
        None => Ok(default),
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.session.bus_capacity, 64);
        assert_eq!(config.session.command_buffer, 32);
        assert_eq!(config.session.pacing, Pacing::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DELVE_HIT_FLASH_MS", "0"),
            ("DELVE_ENEMY_THINKING_MS", "250"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.session.pacing.hit_flash, Duration::ZERO);
        assert_eq!(
            config.session.pacing.enemy_thinking,
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_invalid_port_is_a_config_error() {
        let result = config_from(&[("PORT", "ninety")]);

        assert!(matches!(result, Err(AppError::Config(message)) if message.contains("PORT")));
    }

    #[test]
    fn test_zero_bus_capacity_is_rejected() {
        let result = config_from(&[("DELVE_BUS_CAPACITY", "0")]);

        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
