use paddyscan_core::{FailureKind, PredictionResult};

/// Shown before the first successful prediction.
pub const NO_RESULT_HINT: &str = "Results will appear here after scanning.";

/// Latest prediction outcome, or the explicit absence of one.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PresenterState {
    #[default]
    NoResult,
    Ready(PredictionResult),
}

/// Holds and renders the latest prediction.
///
/// A new result replaces the previous one wholesale. A failure leaves the
/// displayed result untouched and only raises a transient error banner.
#[derive(Debug, Clone, Default)]
pub struct ResultPresenter {
    state: PresenterState,
    error_banner: Option<String>,
}

impl ResultPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &PresenterState {
        &self.state
    }

    #[must_use]
    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.state {
            PresenterState::Ready(result) => Some(result),
            PresenterState::NoResult => None,
        }
    }

    #[must_use]
    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    pub fn show(&mut self, result: PredictionResult) {
        self.state = PresenterState::Ready(result);
        self.error_banner = None;
    }

    /// Back to "no result yet", e.g. after a new file was selected.
    pub fn clear(&mut self) {
        self.state = PresenterState::NoResult;
        self.error_banner = None;
    }

    pub fn report_failure(&mut self, kind: FailureKind, detail: &str) {
        self.error_banner = Some(format!("Scan failed ({kind}): {detail}"));
    }

    /// Lines to display: the banner first if present, then the result.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.error_banner.iter().cloned().collect();
        match &self.state {
            PresenterState::Ready(result) => lines.extend(result.render_lines()),
            PresenterState::NoResult => lines.push(NO_RESULT_HINT.to_owned()),
        }
        lines
    }
}
