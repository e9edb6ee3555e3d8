//! Shared constants for paddyscan.

/// Number of history items shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Base URL of the classification service when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Transport timeout for a single request, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Placeholder rendered for a field the service did not return.
pub const NOT_AVAILABLE: &str = "N/A";

/// Message rendered when the service has no recorded predictions.
pub const EMPTY_HISTORY_MESSAGE: &str = "No predictions recorded yet.";

/// Message rendered until the first history fetch succeeds.
pub const LOADING_HISTORY_MESSAGE: &str = "Loading history...";

/// Fixed pattern used when rendering wire timestamps.
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
