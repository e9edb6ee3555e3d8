use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use paddyscan_client::{ImageUpload, PredictionService};
use paddyscan_core::{FailureKind, NotificationChannel};

use crate::presenter::ResultPresenter;

/// What a call to [`UploadController::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No file selected; nothing was sent.
    NoFile,
    /// A submission is already in flight; nothing was sent.
    Busy,
    /// The result is displayed and the notification was emitted.
    Succeeded,
    /// The previous result is still displayed; no notification was emitted.
    Failed(FailureKind),
}

/// Sets the loading flag for its lifetime, clearing it on every exit path.
struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Selected-file state plus the submit workflow.
pub struct UploadController {
    predictor: Arc<dyn PredictionService>,
    channel: NotificationChannel,
    selected: Mutex<Option<Arc<ImageUpload>>>,
    presenter: Mutex<ResultPresenter>,
    loading: AtomicBool,
}

impl std::fmt::Debug for UploadController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadController")
            .field("selected", &*self.selected())
            .field("loading", &self.is_loading())
            .finish_non_exhaustive()
    }
}

impl UploadController {
    #[must_use]
    pub fn new(predictor: Arc<dyn PredictionService>, channel: NotificationChannel) -> Self {
        Self {
            predictor,
            channel,
            selected: Mutex::new(None),
            presenter: Mutex::new(ResultPresenter::new()),
            loading: AtomicBool::new(false),
        }
    }

    fn selected(&self) -> MutexGuard<'_, Option<Arc<ImageUpload>>> {
        self.selected.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn presenter_mut(&self) -> MutexGuard<'_, ResultPresenter> {
        self.presenter.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the selected image and its preview, clearing the last result.
    pub fn select_file(&self, upload: ImageUpload) {
        tracing::debug!(file = %upload.file_name, bytes = upload.len(), "image selected");
        *self.selected() = Some(Arc::new(upload));
        self.presenter_mut().clear();
    }

    /// The currently selected image, if any.
    #[must_use]
    pub fn preview(&self) -> Option<Arc<ImageUpload>> {
        self.selected().clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Copy of the presenter as it currently stands.
    #[must_use]
    pub fn presenter(&self) -> ResultPresenter {
        self.presenter_mut().clone()
    }

    /// Send the selected image for classification.
    ///
    /// On success the result is applied, the loading flag is cleared and then
    /// exactly one notification is emitted, in that order. On failure the
    /// previous result stays on display and nothing is emitted.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(upload) = self.preview() else {
            return SubmitOutcome::NoFile;
        };
        let Some(guard) = LoadingGuard::acquire(&self.loading) else {
            tracing::debug!("submit ignored, prediction already in flight");
            return SubmitOutcome::Busy;
        };

        match self.predictor.predict(&upload).await {
            Ok(result) => {
                self.presenter_mut().show(result);
                drop(guard);
                self.channel.emit();
                SubmitOutcome::Succeeded
            },
            Err(e) => {
                let kind = e.kind();
                tracing::warn!(error = %e, %kind, file = %upload.file_name, "prediction failed");
                self.presenter_mut().report_failure(kind, &e.to_string());
                SubmitOutcome::Failed(kind)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::PresenterState;
    use crate::test_support::{
        FakePredictor, blast_result, malformed_error, network_error, upload,
    };
    use std::sync::atomic::AtomicUsize;

    fn listener(channel: &NotificationChannel) -> (Arc<AtomicUsize>, paddyscan_core::Subscription) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let sub = channel.subscribe(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (count, sub)
    }

    #[tokio::test]
    async fn test_submit_without_file_is_noop() {
        let predictor = Arc::new(FakePredictor::with(vec![Ok(blast_result())]));
        let channel = NotificationChannel::new();
        let (emitted, _sub) = listener(&channel);
        let controller = UploadController::new(predictor.clone(), channel);

        assert_eq!(controller.submit().await, SubmitOutcome::NoFile);
        assert_eq!(predictor.calls(), 0);
        assert_eq!(emitted.load(Ordering::SeqCst), 0);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_success_shows_result_and_emits_once() {
        let predictor = Arc::new(FakePredictor::with(vec![Ok(blast_result())]));
        let channel = NotificationChannel::new();
        let (emitted, _sub) = listener(&channel);
        let controller = UploadController::new(predictor, channel);

        controller.select_file(upload());
        assert_eq!(controller.submit().await, SubmitOutcome::Succeeded);

        assert_eq!(controller.presenter().result(), Some(&blast_result()));
        assert_eq!(emitted.load(Ordering::SeqCst), 1);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_emission_happens_after_result_applied() {
        let predictor = Arc::new(FakePredictor::with(vec![Ok(blast_result())]));
        let channel = NotificationChannel::new();
        let controller = Arc::new(UploadController::new(predictor, channel.clone()));

        let observed = Arc::new(Mutex::new(None));
        let (c, o) = (Arc::clone(&controller), Arc::clone(&observed));
        let _sub = channel.subscribe(move || {
            *o.lock().unwrap() = Some((c.presenter().result().cloned(), c.is_loading()));
        });

        controller.select_file(upload());
        controller.submit().await;

        let seen = observed.lock().unwrap().clone();
        assert_eq!(seen, Some((Some(blast_result()), false)));
    }

    #[tokio::test]
    async fn test_network_failure_keeps_previous_result() {
        let predictor =
            Arc::new(FakePredictor::with(vec![Ok(blast_result()), Err(network_error())]));
        let channel = NotificationChannel::new();
        let (emitted, _sub) = listener(&channel);
        let controller = UploadController::new(predictor, channel);

        controller.select_file(upload());
        controller.submit().await;
        assert_eq!(
            controller.submit().await,
            SubmitOutcome::Failed(FailureKind::NetworkError)
        );

        let presenter = controller.presenter();
        assert_eq!(presenter.result(), Some(&blast_result()));
        assert!(presenter.error_banner().is_some());
        assert_eq!(emitted.load(Ordering::SeqCst), 1);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_malformed_failure_does_not_emit() {
        let predictor = Arc::new(FakePredictor::with(vec![Err(malformed_error())]));
        let channel = NotificationChannel::new();
        let (emitted, _sub) = listener(&channel);
        let controller = UploadController::new(predictor, channel);

        controller.select_file(upload());
        assert_eq!(
            controller.submit().await,
            SubmitOutcome::Failed(FailureKind::MalformedResponse)
        );
        assert_eq!(controller.presenter().state(), &PresenterState::NoResult);
        assert_eq!(emitted.load(Ordering::SeqCst), 0);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_select_file_clears_result() {
        let predictor = Arc::new(FakePredictor::with(vec![Ok(blast_result())]));
        let controller = UploadController::new(predictor, NotificationChannel::new());

        controller.select_file(upload());
        controller.submit().await;
        controller.select_file(ImageUpload::new("other.png", b"png".to_vec()));

        assert_eq!(controller.presenter().state(), &PresenterState::NoResult);
        assert_eq!(controller.preview().unwrap().file_name, "other.png");
    }

    #[tokio::test]
    async fn test_concurrent_submit_is_busy() {
        let predictor = Arc::new(FakePredictor::gated(vec![Ok(blast_result())]));
        let channel = NotificationChannel::new();
        let (emitted, _sub) = listener(&channel);
        let controller = UploadController::new(predictor.clone(), channel);
        controller.select_file(upload());

        let (first, second) = tokio::join!(controller.submit(), async {
            assert!(controller.is_loading());
            let outcome = controller.submit().await;
            if let Some(gate) = &predictor.gate {
                gate.notify_one();
            }
            outcome
        });

        assert_eq!(first, SubmitOutcome::Succeeded);
        assert_eq!(second, SubmitOutcome::Busy);
        assert_eq!(predictor.calls(), 1);
        assert_eq!(emitted.load(Ordering::SeqCst), 1);
        assert!(!controller.is_loading());
    }
}
