//! API endpoint configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Environment variable overriding the base URL.
pub const API_URL_ENV: &str = "MEDQR_API_URL";

/// Where the remote service lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Build a config from an explicit base URL. Blank input falls back to
    /// [`DEFAULT_API_URL`]; trailing slashes are dropped.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::default();
        }
        Self { base_url: trimmed.to_owned() }
    }

    /// Read [`API_URL_ENV`], defaulting when unset or blank.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(API_URL_ENV).map_or_else(|_| Self::default(), |v| Self::new(&v))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an absolute API path (`/auth/login`) onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_URL.to_owned() }
    }
}
