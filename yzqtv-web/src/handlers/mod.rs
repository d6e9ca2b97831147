//! HTTP request handlers organized by functionality

pub mod search_history;
pub mod site;

// Re-export handler functions
pub use search_history::{
    AddHistoryBody, BodyError, HistoryQuery, add_search_history, delete_search_history,
    list_search_history,
};
pub use site::site_info;
