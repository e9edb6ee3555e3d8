//! Read-only mirror of the service's classification history.

use serde::{Deserialize, Serialize};

use crate::prediction::{ScoredField, render_scored_lines};
use crate::timestamp::render_timestamp;

/// One past classification as returned by `/history/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub image_id: String,
    /// Path relative to the service origin.
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// ISO-8601, kept exactly as received.
    pub timestamp: String,
    #[serde(default)]
    pub disease: Option<ScoredField<String>>,
    #[serde(default)]
    pub variety: Option<ScoredField<String>>,
    #[serde(default)]
    pub age: Option<ScoredField<f64>>,
}

impl HistoryItem {
    /// Timestamp in the fixed display pattern.
    #[must_use]
    pub fn display_timestamp(&self) -> String {
        render_timestamp(&self.timestamp)
    }

    #[must_use]
    pub fn render_lines(&self) -> [String; 3] {
        render_scored_lines(self.disease.as_ref(), self.variety.as_ref(), self.age.as_ref())
    }
}

/// History in service order (reverse-chronological); never re-sorted locally.
pub type HistoryList = Vec<HistoryItem>;
