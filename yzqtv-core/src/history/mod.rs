//! Search history request handling.
//!
//! Validates caller input, delegates to a [`SearchHistoryStore`] and bounds
//! what is handed back to callers.
//!
//! [`SearchHistoryStore`]: crate::storage::SearchHistoryStore

pub mod errors;
pub mod service;

pub use errors::{SearchHistoryError, ValidationError};
pub use service::SearchHistoryService;
