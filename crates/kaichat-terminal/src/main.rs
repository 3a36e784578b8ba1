//! Terminal front end for the kaichat demo client.

use std::process::ExitCode;
use std::sync::Arc;

use kaichat_core::controller::ConversationController;
use kaichat_interaction::{ChatbotConfig, KaiSearchClient};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod app;
mod render;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match ChatbotConfig::load() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid startup configuration");
            eprintln!("kaichat: {err}");
            return ExitCode::FAILURE;
        }
    };

    let service = Arc::new(KaiSearchClient::new(&config));
    let user_id = uuid::Uuid::new_v4().to_string();
    let controller = Arc::new(ConversationController::new(
        service,
        config.multi_documents,
        user_id,
    ));

    let result = app::run(controller.clone()).await;
    controller.shutdown().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("kaichat: {err}");
            ExitCode::FAILURE
        }
    }
}
