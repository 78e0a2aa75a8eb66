//! Build-time client configuration.
//!
//! The REST backend address is baked into the WASM bundle when it is
//! compiled, the same way bundlers inline `VITE_*` variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Backend address used when `API_BASE_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081/api";

/// Resolved client settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
}

impl ClientConfig {
    /// Build a config for `api_base_url`, dropping any trailing slash so
    /// endpoint paths can be appended verbatim.
    pub fn new(api_base_url: &str) -> Self {
        let trimmed = api_base_url.trim().trim_end_matches('/');
        let api_base_url = if trimmed.is_empty() { DEFAULT_API_BASE_URL } else { trimmed };
        Self { api_base_url: api_base_url.to_owned() }
    }

    /// Read `API_BASE_URL` from the compile-time environment.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
