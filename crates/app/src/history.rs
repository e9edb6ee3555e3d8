//! Paginated history view kept in sync with the notification channel.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use paddyscan_client::{ClientError, HistorySource};
use paddyscan_core::{
    EMPTY_HISTORY_MESSAGE, HistoryItem, HistoryList, LOADING_HISTORY_MESSAGE, NotificationChannel,
    Pagination, Subscription,
};
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::AbortHandle;

/// Owned copy of the visible page.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPage {
    pub items: Vec<HistoryItem>,
    pub page_number: usize,
    pub total_pages: usize,
}

impl HistoryPage {
    /// The service has no history at all.
    #[must_use]
    pub const fn is_empty_history(&self) -> bool {
        self.total_pages == 0
    }
}

struct ViewState {
    /// `None` until the first successful fetch.
    list: Option<HistoryList>,
    pagination: Pagination,
    last_error: Option<String>,
}

struct Shared {
    source: Arc<dyn HistorySource>,
    state: Mutex<ViewState>,
    active: AtomicBool,
    in_flight: AtomicUsize,
    idle: Notify,
    tasks: Mutex<Vec<AbortHandle>>,
}

/// Decrements the in-flight count even when the refresh task is aborted.
struct InFlight(Arc<Shared>);

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.0.in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// One fetch. Success replaces the list wholesale; failure keeps the
    /// previous list. Results arriving after teardown are discarded.
    async fn fetch_all(&self) -> Result<HistoryList, ClientError> {
        let result = self.source.fetch_history().await;
        if !self.active.load(Ordering::Acquire) {
            tracing::debug!("history view torn down, discarding fetch result");
            return result;
        }
        let mut state = self.state();
        match &result {
            Ok(list) => {
                let page = state.pagination.reclamp(list.len());
                state.list = Some(list.clone());
                state.last_error = None;
                tracing::debug!(items = list.len(), page, "history refreshed");
            },
            Err(e) => {
                tracing::warn!(error = %e, kind = %e.kind(), "history fetch failed, keeping previous list");
                state.last_error = Some(e.to_string());
            },
        }
        result
    }

    /// Start a background refresh. Overlapping refreshes are allowed; whichever
    /// resolves last is the one left applied.
    fn spawn_refresh(self: &Arc<Self>, runtime: &Handle) {
        if !self.active.load(Ordering::Acquire) {
            return;
        }
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        let guard = InFlight(Arc::clone(self));
        let handle = runtime.spawn(async move {
            let shared = Arc::clone(&guard.0);
            drop(shared.fetch_all().await);
            drop(guard);
        });
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|t| !t.is_finished());
        tasks.push(handle.abort_handle());
    }
}

/// History list plus page state.
///
/// Fetches once on activation and once per notification until torn down.
/// Dropping the view (or calling [`HistoryView::deactivate`]) unsubscribes,
/// aborts in-flight refreshes and discards any result that still arrives.
pub struct HistoryView {
    shared: Arc<Shared>,
    subscription: Option<Subscription>,
}

impl std::fmt::Debug for HistoryView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state();
        f.debug_struct("HistoryView")
            .field("items", &state.list.as_ref().map(Vec::len))
            .field("page", &state.pagination.page())
            .field("in_flight", &self.shared.in_flight.load(Ordering::Acquire))
            .finish()
    }
}

impl HistoryView {
    /// Subscribe to `channel` and perform the initial fetch.
    ///
    /// The subscription is registered before the initial fetch starts, so a
    /// signal emitted meanwhile still triggers its own refresh. Must be
    /// awaited inside a Tokio runtime; refreshes are spawned onto it.
    pub async fn activate(
        source: Arc<dyn HistorySource>,
        channel: &NotificationChannel,
        page_size: usize,
    ) -> Self {
        let shared = Arc::new(Shared {
            source,
            state: Mutex::new(ViewState {
                list: None,
                pagination: Pagination::new(page_size),
                last_error: None,
            }),
            active: AtomicBool::new(true),
            in_flight: AtomicUsize::new(0),
            idle: Notify::new(),
            tasks: Mutex::new(Vec::new()),
        });

        let runtime = Handle::current();
        let weak: Weak<Shared> = Arc::downgrade(&shared);
        let subscription = channel.subscribe(move || {
            if let Some(shared) = weak.upgrade() {
                shared.spawn_refresh(&runtime);
            }
        });
        tracing::info!(page_size, "history view activated");

        if let Err(e) = shared.fetch_all().await {
            tracing::warn!(error = %e, "initial history fetch failed");
        }
        Self { shared, subscription: Some(subscription) }
    }

    /// Fetch now and apply the result.
    ///
    /// # Errors
    /// Returns the fetch error; the previously held list is kept in that case.
    pub async fn fetch_all(&self) -> Result<HistoryList, ClientError> {
        self.shared.fetch_all().await
    }

    /// Wait until no notification-triggered refresh is in flight.
    pub async fn settle(&self) {
        loop {
            let idle = self.shared.idle.notified();
            tokio::pin!(idle);
            idle.as_mut().enable();
            if self.shared.in_flight.load(Ordering::Acquire) == 0 {
                return;
            }
            idle.await;
        }
    }

    /// `true` until the first successful fetch.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.shared.state().list.is_none()
    }

    /// Error of the most recent fetch, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.shared.state().last_error.clone()
    }

    /// Full list as last fetched.
    #[must_use]
    pub fn list(&self) -> Option<HistoryList> {
        self.shared.state().list.clone()
    }

    /// Jump to page `n`, saturating into range. Returns the resulting page.
    pub fn set_page(&self, n: i64) -> usize {
        let mut state = self.shared.state();
        let len = state.list.as_ref().map_or(0, Vec::len);
        state.pagination.set_page(n, len)
    }

    pub fn next_page(&self) -> usize {
        let mut state = self.shared.state();
        let len = state.list.as_ref().map_or(0, Vec::len);
        state.pagination.next_page(len)
    }

    pub fn previous_page(&self) -> usize {
        let mut state = self.shared.state();
        let len = state.list.as_ref().map_or(0, Vec::len);
        state.pagination.previous_page(len)
    }

    /// Visible page, or `None` while still loading.
    #[must_use]
    pub fn current_page(&self) -> Option<HistoryPage> {
        let state = self.shared.state();
        let list = state.list.as_ref()?;
        let window = state.pagination.window(list);
        Some(HistoryPage {
            items: window.items.to_vec(),
            page_number: window.page_number,
            total_pages: window.total_pages,
        })
    }

    /// Text rendering of the visible page.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let Some(page) = self.current_page() else {
            return vec![LOADING_HISTORY_MESSAGE.to_owned()];
        };
        if page.is_empty_history() {
            return vec![EMPTY_HISTORY_MESSAGE.to_owned()];
        }
        let mut lines = Vec::with_capacity(page.items.len() * 5 + 1);
        for item in &page.items {
            let name = item.filename.as_deref().unwrap_or(&item.image_id);
            lines.push(format!("[{}] {name}", item.display_timestamp()));
            lines.extend(item.render_lines().into_iter().map(|l| format!("  {l}")));
            lines.push(format!("  Image: {}", item.image_url));
        }
        lines.push(format!("Page {} of {}", page.page_number, page.total_pages));
        lines
    }

    /// Tear down: unsubscribe, abort in-flight refreshes, ignore late results.
    pub fn deactivate(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        self.shared.active.store(false, Ordering::Release);
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            let tasks = std::mem::take(
                &mut *self.shared.tasks.lock().unwrap_or_else(PoisonError::into_inner),
            );
            for task in tasks {
                task.abort();
            }
            tracing::info!("history view deactivated");
        }
    }
}

impl Drop for HistoryView {
    fn drop(&mut self) {
        self.teardown();
    }
}
