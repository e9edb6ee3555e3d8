//! Core types and primitives for paddyscan
//!
//! This crate contains the domain types shared across all other crates, the
//! pure pagination derivation and the zero-payload notification bus.

mod constants;
mod env_config;
mod error;
mod history;
mod notification;
mod pagination;
mod prediction;
mod timestamp;

pub use constants::*;
pub use env_config::*;
pub use error::*;
pub use history::*;
pub use notification::*;
pub use pagination::*;
pub use prediction::*;
pub use timestamp::*;
