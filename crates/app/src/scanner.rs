use std::sync::Arc;

use paddyscan_client::{ClientError, ScannerClient, ScannerConfig};
use paddyscan_core::NotificationChannel;

use crate::history::HistoryView;
use crate::upload::UploadController;

/// Composition root: one client and one notification channel per running
/// application, injected into every producer and consumer it hands out.
#[derive(Debug, Clone)]
pub struct Scanner {
    client: Arc<ScannerClient>,
    channel: NotificationChannel,
    config: ScannerConfig,
}

impl Scanner {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built from `config`.
    pub fn new(config: ScannerConfig) -> Result<Self, ClientError> {
        let client = Arc::new(ScannerClient::new(&config)?);
        tracing::info!(base_url = %client.base_url(), page_size = config.page_size, "scanner initialized");
        Ok(Self { client, channel: NotificationChannel::new(), config })
    }

    #[must_use]
    pub fn client(&self) -> &ScannerClient {
        &self.client
    }

    #[must_use]
    pub const fn channel(&self) -> &NotificationChannel {
        &self.channel
    }

    #[must_use]
    pub const fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Upload controller emitting on this scanner's channel.
    #[must_use]
    pub fn upload_controller(&self) -> UploadController {
        UploadController::new(self.client.clone(), self.channel.clone())
    }

    /// History view subscribed to this scanner's channel, after its initial fetch.
    pub async fn history_view(&self) -> HistoryView {
        HistoryView::activate(self.client.clone(), &self.channel, self.config.page_size).await
    }
}
