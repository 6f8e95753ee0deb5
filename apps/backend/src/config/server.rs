use std::env;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_HEARTBEAT_SECS: u64 = 20;
const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 40;

/// Runtime settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Interval between websocket pings.
    pub heartbeat_interval: Duration,
    /// Silence after which a websocket client is dropped.
    pub client_timeout: Duration,
    /// Fixed base seed for reproducible deals; OS entropy when `None`.
    pub game_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            heartbeat_interval: Duration::from_secs(DEFAULT_HEARTBEAT_SECS),
            client_timeout: Duration::from_secs(DEFAULT_CLIENT_TIMEOUT_SECS),
            game_seed: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_var(&lookup, "BACKEND_PORT")?.unwrap_or(DEFAULT_PORT);
        let heartbeat_secs =
            parse_var(&lookup, "WS_HEARTBEAT_SECS")?.unwrap_or(DEFAULT_HEARTBEAT_SECS);
        let timeout_secs =
            parse_var(&lookup, "WS_CLIENT_TIMEOUT_SECS")?.unwrap_or(DEFAULT_CLIENT_TIMEOUT_SECS);
        let game_seed = parse_var(&lookup, "GAME_SEED")?;

        if heartbeat_secs == 0 {
            return Err(AppError::config("WS_HEARTBEAT_SECS must be positive"));
        }
        if timeout_secs <= heartbeat_secs {
            return Err(AppError::config(format!(
                "WS_CLIENT_TIMEOUT_SECS ({timeout_secs}) must exceed \
                 WS_HEARTBEAT_SECS ({heartbeat_secs})"
            )));
        }

        Ok(Self {
            host,
            port,
            heartbeat_interval: Duration::from_secs(heartbeat_secs),
            client_timeout: Duration::from_secs(timeout_secs),
            game_seed,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::config(format!("{key} has invalid value '{raw}'"))),
    }
}
