pub mod controller;
pub mod error;
pub mod search;
pub mod transcript;

// Re-export common error type
pub use error::ChatError;
