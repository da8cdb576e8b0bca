//! Client configuration.

/// Backend origin used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://blogs-backend-jx2t.onrender.com/api";

/// Environment variable overriding the backend origin.
pub const BASE_URL_ENV: &str = "BLOG_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`. Unset or blank values fall back to
    /// the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(BASE_URL_ENV) {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_hosted_backend() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn lookup_overrides_base_url() {
        let config = ClientConfig::from_lookup(|key| {
            (key == BASE_URL_ENV).then(|| " http://127.0.0.1:3000/api ".to_string())
        });
        assert_eq!(config.base_url, "http://127.0.0.1:3000/api");
    }

    #[test]
    fn blank_value_falls_back() {
        let config = ClientConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config, ClientConfig::default());
    }
}
