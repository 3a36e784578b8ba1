//! The remote conversation service interface.

use async_trait::async_trait;

use super::result::ConversationReply;
use crate::error::Result;

/// The remote conversational search collaborator.
///
/// Implementations perform exactly one network round trip per call. The
/// controller adds no retry, no streaming and no timeout on top of what the
/// implementation itself enforces.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Sends one conversation turn.
    ///
    /// # Arguments
    ///
    /// * `conversation_id` - Server-assigned id of the dialogue, empty on
    ///   the first turn
    /// * `message` - The user's text
    /// * `multi_documents` - Whether the service may cite multiple source
    ///   documents
    /// * `user_id` - Opaque caller identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the reply cannot be decoded.
    async fn send_turn(
        &self,
        conversation_id: &str,
        message: &str,
        multi_documents: bool,
        user_id: &str,
    ) -> Result<ConversationReply>;
}
