use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use ipnet::IpNet;
use login_throttle_application::{BAN_DURATION, LoginThrottlePolicy, MAX_ATTEMPTS};
use login_throttle_core::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

const DEFAULT_SWEEP_INTERVAL_SECONDS: u64 = 60;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub login_max_attempts: u32,
    pub login_ban_duration: Duration,
    pub sweep_interval: Duration,
    pub trusted_proxies: Vec<IpNet>,
}

impl ApiConfig {
    pub fn load() -> AppResult<Self> {
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = optional_env("API_PORT")
            .map(|value| parse_value::<u16>("API_PORT", &value))
            .transpose()?
            .unwrap_or(3001);

        let login_max_attempts = optional_env("LOGIN_MAX_ATTEMPTS")
            .map(|value| parse_value::<u32>("LOGIN_MAX_ATTEMPTS", &value))
            .transpose()?
            .unwrap_or(MAX_ATTEMPTS);
        let login_ban_duration = optional_env("LOGIN_BAN_DURATION_SECONDS")
            .map(|value| parse_seconds("LOGIN_BAN_DURATION_SECONDS", &value))
            .transpose()?
            .unwrap_or(BAN_DURATION);
        let sweep_interval = optional_env("LOGIN_THROTTLE_SWEEP_INTERVAL_SECONDS")
            .map(|value| parse_seconds("LOGIN_THROTTLE_SWEEP_INTERVAL_SECONDS", &value))
            .transpose()?
            .unwrap_or(Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECONDS));

        let trusted_proxies = optional_env("TRUSTED_PROXIES")
            .map(|value| parse_trusted_proxies(&value))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            api_host,
            api_port,
            login_max_attempts,
            login_ban_duration,
            sweep_interval,
            trusted_proxies,
        })
    }

    pub fn throttle_policy(&self) -> AppResult<LoginThrottlePolicy> {
        LoginThrottlePolicy::new(self.login_max_attempts, self.login_ban_duration)
    }

    pub fn socket_address(&self) -> AppResult<SocketAddr> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn parse_value<T>(name: &str, value: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|error| AppError::Validation(format!("invalid {name} '{value}': {error}")))
}

fn parse_seconds(name: &str, value: &str) -> AppResult<Duration> {
    let seconds = parse_value::<u64>(name, value)?;
    if seconds == 0 {
        return Err(AppError::Validation(format!(
            "{name} must be greater than zero"
        )));
    }

    Ok(Duration::from_secs(seconds))
}

/// Parses a comma-separated list of CIDR networks or bare addresses.
fn parse_trusted_proxies(value: &str) -> AppResult<Vec<IpNet>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<IpNet>()
                .or_else(|_| entry.parse::<IpAddr>().map(IpNet::from))
                .map_err(|error| {
                    AppError::Validation(format!("invalid TRUSTED_PROXIES entry '{entry}': {error}"))
                })
        })
        .collect()
}
