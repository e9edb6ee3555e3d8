//! Prediction workflow and history view for paddyscan.
//!
//! [`UploadController`] submits the selected image and, on success, emits on
//! the shared [`NotificationChannel`](paddyscan_core::NotificationChannel).
//! [`HistoryView`] is subscribed to the same channel and re-fetches the
//! history on every signal. [`Scanner`] wires both to one channel and one
//! client at startup.

mod history;
mod presenter;
mod scanner;
mod upload;

#[cfg(test)]
mod test_support;

pub use history::{HistoryPage, HistoryView};
pub use presenter::{NO_RESULT_HINT, PresenterState, ResultPresenter};
pub use scanner::Scanner;
pub use upload::{SubmitOutcome, UploadController};
