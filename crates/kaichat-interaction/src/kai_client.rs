//! HTTP implementation of the conversation service.
//!
//! One POST per turn against the chatbot conversation endpoint. Single-shot:
//! no retry, no streaming; the only timeout is the per-request one below.

use std::time::Duration;

use async_trait::async_trait;
use kaichat_core::error::{ChatError, Result};
use kaichat_core::search::{ConversationReply, SearchService};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::config::ChatbotConfig;

const CONVERSATION_PATH: &str = "/api/chatbot/conversation";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the hosted conversational search service.
#[derive(Debug, Clone)]
pub struct KaiSearchClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConversationRequest<'a> {
    /// Conversation id, empty on the first turn.
    id: &'a str,
    message: &'a str,
    multi_documents: bool,
    user_id: &'a str,
}

impl KaiSearchClient {
    /// Creates a client from a validated configuration.
    pub fn new(config: &ChatbotConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.credentials.base_url(),
            api_key: config.credentials.api_key().map(str::to_string),
        }
    }

    fn conversation_url(&self) -> String {
        format!("{}{}", self.base_url, CONVERSATION_PATH)
    }
}

#[async_trait]
impl SearchService for KaiSearchClient {
    async fn send_turn(
        &self,
        conversation_id: &str,
        message: &str,
        multi_documents: bool,
        user_id: &str,
    ) -> Result<ConversationReply> {
        let url = self.conversation_url();
        debug!(url = %url, "posting conversation turn");

        let mut request = self
            .client
            .post(&url)
            .json(&ConversationRequest {
                id: conversation_id,
                message,
                multi_documents,
                user_id,
            })
            .timeout(REQUEST_TIMEOUT);

        if let Some(api_key) = &self.api_key {
            request = request.header("api-key", api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ChatError::remote(format!("conversation request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ChatError::remote(format!(
                "conversation endpoint returned {status}: {error_text}"
            )));
        }

        response
            .json::<ConversationReply>()
            .await
            .map_err(|e| ChatError::malformed(format!("failed to decode conversation reply: {e}")))
    }
}
