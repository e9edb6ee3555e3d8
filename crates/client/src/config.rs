use std::time::Duration;

use paddyscan_core::{
    DEFAULT_API_URL, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT_SECS, env_parse_with_default,
    env_string_with_default,
};

/// Connection and presentation settings for one running client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Service base including any path prefix, without a trailing `/`.
    pub base_url: String,
    pub page_size: usize,
    pub request_timeout: Duration,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ScannerConfig {
    /// Build from `PADDYSCAN_API_URL`, `PADDYSCAN_PAGE_SIZE` and `PADDYSCAN_TIMEOUT_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env_string_with_default("PADDYSCAN_API_URL", DEFAULT_API_URL);
        let page_size = env_parse_with_default("PADDYSCAN_PAGE_SIZE", DEFAULT_PAGE_SIZE);
        let timeout_secs =
            env_parse_with_default("PADDYSCAN_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS);
        Self::default()
            .with_base_url(base_url)
            .with_page_size(page_size)
            .with_request_timeout(Duration::from_secs(timeout_secs))
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        if page_size == 0 {
            tracing::warn!(page_size, "page size clamped to 1");
        }
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScannerConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert_eq!(config.page_size, 8);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_trailing_slashes_trimmed() {
        let config = ScannerConfig::default().with_base_url("http://scanner.local/api//");
        assert_eq!(config.base_url, "http://scanner.local/api");
    }

    #[test]
    fn test_zero_page_size_clamped() {
        assert_eq!(ScannerConfig::default().with_page_size(0).page_size, 1);
    }
}
