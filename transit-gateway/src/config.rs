//! Process configuration.
//!
//! Read from environment variables once at startup. The binary loads a
//! `.env` file with dotenvy before calling [`GatewayConfig::from_env`].

use std::time::Duration;

use crate::bus::BusConfig;
use crate::provider::ApiKey;
use crate::train::TrainConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or blank
    #[error("{0} is not set")]
    Missing(&'static str),

    /// A variable could not be parsed
    #[error("{name} is invalid: {message}")]
    Invalid {
        name: &'static str,
        message: String,
    },
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host to listen on
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Bus provider client settings
    pub bus: BusConfig,
    /// Train provider client settings
    pub train: TrainConfig,
}

impl GatewayConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bus_key = get("BUS_API_KEY").ok_or(ConfigError::Missing("BUS_API_KEY"))?;
        let train_key = get("TRAIN_API_KEY").ok_or(ConfigError::Missing("TRAIN_API_KEY"))?;

        let host = get("GATEWAY_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or("GATEWAY_PORT", get("GATEWAY_PORT"), DEFAULT_PORT)?;
        let timeout_secs = parse_or(
            "UPSTREAM_TIMEOUT_SECS",
            get("UPSTREAM_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "UPSTREAM_TIMEOUT_SECS",
                message: "must be greater than 0".to_string(),
            });
        }

        let mut bus = BusConfig::new(ApiKey::new(bus_key)).with_timeout(timeout_secs);
        if let Some(url) = get("BUS_BASE_URL") {
            bus = bus.with_base_url(url);
        }

        let mut train = TrainConfig::new(ApiKey::new(train_key)).with_timeout(timeout_secs);
        if let Some(url) = get("TRAIN_BASE_URL") {
            train = train.with_base_url(url);
        }

        Ok(Self {
            host,
            port,
            bus,
            train,
        })
    }

    /// The upstream call timeout shared by both providers.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.bus.timeout_secs)
    }
}

fn parse_or<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config =
            GatewayConfig::from_lookup(lookup(&[("BUS_API_KEY", "b"), ("TRAIN_API_KEY", "t")]))
                .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.bus.api_key.expose(), "b");
        assert_eq!(config.train.api_key.expose(), "t");
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
        assert_eq!(config.bus.base_url, BusConfig::new("x").base_url);
    }

    #[test]
    fn overrides() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("BUS_API_KEY", "b"),
            ("TRAIN_API_KEY", "t"),
            ("GATEWAY_HOST", "0.0.0.0"),
            ("GATEWAY_PORT", "8080"),
            ("UPSTREAM_TIMEOUT_SECS", "3"),
            ("BUS_BASE_URL", "http://bus.test"),
            ("TRAIN_BASE_URL", "http://train.test"),
        ]))
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.bus.timeout_secs, 3);
        assert_eq!(config.train.timeout_secs, 3);
        assert_eq!(config.bus.base_url, "http://bus.test");
        assert_eq!(config.train.base_url, "http://train.test");
    }

    #[test]
    fn missing_keys() {
        let err = GatewayConfig::from_lookup(lookup(&[("TRAIN_API_KEY", "t")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("BUS_API_KEY"));

        let err = GatewayConfig::from_lookup(lookup(&[("BUS_API_KEY", "b"), ("TRAIN_API_KEY", " ")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("TRAIN_API_KEY"));
    }

    #[test]
    fn invalid_numbers() {
        let err = GatewayConfig::from_lookup(lookup(&[
            ("BUS_API_KEY", "b"),
            ("TRAIN_API_KEY", "t"),
            ("GATEWAY_PORT", "http"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "GATEWAY_PORT", .. }));

        let err = GatewayConfig::from_lookup(lookup(&[
            ("BUS_API_KEY", "b"),
            ("TRAIN_API_KEY", "t"),
            ("UPSTREAM_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("UPSTREAM_TIMEOUT_SECS"));
    }
}
