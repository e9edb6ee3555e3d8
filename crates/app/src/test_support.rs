//! In-memory fakes for the service seams.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use paddyscan_client::{ClientError, HistorySource, ImageUpload, PredictionService};
use paddyscan_core::{HistoryItem, HistoryList, PredictionResult, ScoredField};
use tokio::sync::Notify;

pub(crate) fn network_error() -> ClientError {
    ClientError::HttpStatus { code: 503, body: "Service Unavailable".to_owned() }
}

pub(crate) fn malformed_error() -> ClientError {
    let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
    ClientError::JsonParse { context: "test body".to_owned(), source }
}

pub(crate) fn blast_result() -> PredictionResult {
    PredictionResult {
        image_id: Some("img-1".to_owned()),
        disease: Some(ScoredField::new("blast".to_owned(), 0.92)),
        variety: Some(ScoredField::new("jasmine".to_owned(), 0.81)),
        age: Some(ScoredField::new(60.0, 0.77)),
    }
}

pub(crate) fn history(len: usize) -> HistoryList {
    (0..len)
        .map(|i| HistoryItem {
            image_id: format!("img-{i}"),
            image_url: format!("/api/image/img-{i}"),
            filename: None,
            timestamp: format!("2024-05-{:02}T10:00:00", (i % 28) + 1),
            disease: Some(ScoredField::new("healthy".to_owned(), 0.9)),
            variety: None,
            age: Some(ScoredField::new(50.0, 0.6)),
        })
        .collect()
}

pub(crate) fn upload() -> ImageUpload {
    ImageUpload::new("leaf.jpg", b"fake".to_vec())
}

#[derive(Default)]
pub(crate) struct FakePredictor {
    responses: Mutex<VecDeque<Result<PredictionResult, ClientError>>>,
    pub(crate) calls: AtomicUsize,
    pub(crate) gate: Option<Notify>,
}

impl FakePredictor {
    pub(crate) fn with(responses: Vec<Result<PredictionResult, ClientError>>) -> Self {
        Self { responses: Mutex::new(responses.into()), ..Self::default() }
    }

    pub(crate) fn gated(responses: Vec<Result<PredictionResult, ClientError>>) -> Self {
        Self { gate: Some(Notify::new()), ..Self::with(responses) }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PredictionService for FakePredictor {
    async fn predict(&self, _upload: &ImageUpload) -> Result<PredictionResult, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| Err(network_error()))
    }
}

pub(crate) struct FakeHistory {
    queued: Mutex<VecDeque<Result<HistoryList, ClientError>>>,
    fallback: HistoryList,
    calls: AtomicUsize,
}

impl FakeHistory {
    pub(crate) fn always(list: HistoryList) -> Self {
        Self::sequence(Vec::new(), list)
    }

    /// Serve `queued` first, then `fallback` forever.
    pub(crate) fn sequence(
        queued: Vec<Result<HistoryList, ClientError>>,
        fallback: HistoryList,
    ) -> Self {
        Self { queued: Mutex::new(queued.into()), fallback, calls: AtomicUsize::new(0) }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistorySource for FakeHistory {
    async fn fetch_history(&self) -> Result<HistoryList, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.queued.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}
