//! Remote conversational search collaborator.
//!
//! - `result`: Wire types returned by the service
//! - `service`: The `SearchService` trait implemented by the HTTP client

mod result;
mod service;

// Re-export public API
pub use result::{
    ConversationReply, ResultData, ResultMessage, SourceDocument, ACTION_SEARCH,
};
pub use service::SearchService;
