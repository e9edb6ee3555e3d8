use async_trait::async_trait;
use paddyscan_core::{HistoryList, PredictionResult};

use crate::client::ScannerClient;
use crate::error::ClientError;
use crate::upload::ImageUpload;

/// Remote classification of a single image.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// One outbound call, no retry, no caching.
    async fn predict(&self, upload: &ImageUpload) -> Result<PredictionResult, ClientError>;
}

/// Source of the full classification history.
#[async_trait]
pub trait HistorySource: Send + Sync {
    async fn fetch_history(&self) -> Result<HistoryList, ClientError>;
}

#[async_trait]
impl PredictionService for ScannerClient {
    async fn predict(&self, upload: &ImageUpload) -> Result<PredictionResult, ClientError> {
        Self::predict(self, upload).await
    }
}

#[async_trait]
impl HistorySource for ScannerClient {
    async fn fetch_history(&self) -> Result<HistoryList, ClientError> {
        Self::fetch_history(self).await
    }
}
