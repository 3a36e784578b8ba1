pub mod config;
pub mod kai_client;

// Re-export public API
pub use config::{ChatbotConfig, Credentials};
pub use kai_client::KaiSearchClient;
