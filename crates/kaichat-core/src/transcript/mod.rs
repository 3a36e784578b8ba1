//! Transcript domain module.
//!
//! This module contains the message bubble types and the append-only
//! transcript store they accumulate in.
//!
//! - `entry`: Entry types (`Sender`, `MessageContent`, `RichSegment`,
//!   `TranscriptEntry`)
//! - `store`: The append-only `Transcript` store

mod entry;
mod store;

// Re-export public API
pub use entry::{MessageContent, RichSegment, Sender, TranscriptEntry};
pub use store::Transcript;
