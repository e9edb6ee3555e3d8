//! HTTP client for the paddy classification service.
//!
//! [`ScannerClient`] speaks the service's JSON/multipart API. The
//! [`PredictionService`] and [`HistorySource`] traits are the seams the
//! application layer depends on, so it can be driven by fakes in tests.

mod client;
mod config;
mod error;
mod service;
mod upload;

pub use client::{ScannerClient, truncate};
pub use config::ScannerConfig;
pub use error::ClientError;
pub use service::{HistorySource, PredictionService};
pub use upload::{ImageUpload, mime_from_extension};
