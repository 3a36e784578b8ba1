//! Wire types returned by the conversational search service.
//!
//! Field names follow the service's JSON casing. Everything the
//! classification step does not strictly require is optional or defaulted,
//! so a sparse payload still decodes.

use serde::{Deserialize, Serialize};

/// The action tag of a result that carries a search answer.
pub const ACTION_SEARCH: &str = "SEARCH";

/// One full reply from the conversation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationReply {
    /// The conversation identifier, possibly reissued by the service.
    pub id: String,
    /// The result message to classify and display.
    pub message: ResultMessage,
}

/// The displayable part of a conversation reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultMessage {
    /// Action tag, e.g. `"SEARCH"`.
    pub action: String,
    /// The answer or rejection text.
    pub content: String,
    /// Structured search data. Absent for plain replies.
    pub datas: Option<ResultData>,
    /// Origin marker set by the service.
    pub from: Option<String>,
}

/// Structured data attached to a search result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultData {
    pub answer: Option<String>,
    pub confident_rate: Option<f64>,
    pub documents: Vec<SourceDocument>,
    pub following_questions: Vec<String>,
    pub is_answered: bool,
    pub query: Option<String>,
    /// Why the question was not answered, when it was not.
    pub reason: Option<String>,
}

/// A source document cited by an answered search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub url: String,
}
