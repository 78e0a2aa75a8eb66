//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),

    #[error("invalid API_PROXY_TARGET: {0} (expected an http:// or https:// URL)")]
    InvalidProxyTarget(String),

    #[error("proxy client: {0}")]
    ProxyClient(String),

    #[error("leptos configuration: {0}")]
    Leptos(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    /// Origin that `/api/*` is forwarded to. `None` disables the proxy.
    pub proxy_target: Option<String>,
}

impl HostConfig {
    /// Build typed host config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `API_PROXY_TARGET`: backend origin, e.g. `http://localhost:8081`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT").map(|raw| raw.trim().to_owned()) {
            Some(raw) if !raw.is_empty() => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            _ => DEFAULT_PORT,
        };
        let proxy_target = lookup("API_PROXY_TARGET")
            .map(|raw| raw.trim().trim_end_matches('/').to_owned())
            .filter(|target| !target.is_empty())
            .map(validate_target)
            .transpose()?;
        Ok(Self { port, proxy_target })
    }
}

fn validate_target(target: String) -> Result<String, ConfigError> {
    let rest = target
        .strip_prefix("http://")
        .or_else(|| target.strip_prefix("https://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(target),
        _ => Err(ConfigError::InvalidProxyTarget(target)),
    }
}
