//! Client Configuration
//!
//! The SPA has no runtime config source, so values are baked in at build time.

/// Default backend when `TASKFLOW_API_URL` is not set at build time
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL prepended to relative paths, without trailing slash
    pub api_base_url: String,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let url: String = api_base_url.into();
        Self {
            api_base_url: url.trim_end_matches('/').to_string(),
        }
    }

    /// Read `TASKFLOW_API_URL` from the build environment
    pub fn from_build_env() -> Self {
        Self::new(option_env!("TASKFLOW_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    /// Absolute URLs pass through; relative paths are joined to the base
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.api_base_url, path)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        let config = ClientConfig::new("https://api.example.com/");
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.resolve("/api/tasks/"), "https://api.example.com/api/tasks/");
    }

    #[test]
    fn test_resolve_absolute_url_untouched() {
        let config = ClientConfig::default();
        assert_eq!(
            config.resolve("https://cdn.example.com/file.png"),
            "https://cdn.example.com/file.png"
        );
    }
}
