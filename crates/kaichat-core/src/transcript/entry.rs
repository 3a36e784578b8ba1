//! Transcript entry types.
//!
//! An entry is one rendered message bubble. Entries are immutable once
//! created; assistant content is a tagged union so that no layer below the
//! renderer ever deals in markup strings.

use serde::{Deserialize, Serialize};

/// Represents the author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    /// Entry authored by the user.
    User,
    /// Entry authored by the assistant.
    Assistant,
}

/// One structural piece of rich assistant content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichSegment {
    /// Literal text, rendered verbatim by the display layer.
    Text { text: String },
    /// A hyperlink. The renderer decides how this becomes live markup.
    Link { label: String, url: String },
    /// An explicit line break.
    LineBreak,
}

/// The content of a transcript entry.
///
/// The display layer is the only place where `Rich` segments turn into
/// visible markup; core code never produces HTML or ANSI sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MessageContent {
    /// Plain text.
    Plain(String),
    /// Structured content with links and line breaks.
    Rich(Vec<RichSegment>),
}

impl MessageContent {
    /// Creates plain text content.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Flattens the content to plain text.
    ///
    /// Links collapse to their label, line breaks to `\n`. Intended for
    /// logging and tests, not for display.
    pub fn to_plain_text(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Rich(segments) => {
                let mut out = String::new();
                for segment in segments {
                    match segment {
                        RichSegment::Text { text } => out.push_str(text),
                        RichSegment::Link { label, .. } => out.push_str(label),
                        RichSegment::LineBreak => out.push('\n'),
                    }
                }
                out
            }
        }
    }
}

/// A single message in the conversation transcript.
///
/// Each entry has a sender, content, and a timestamp indicating when it
/// was created. Entries are never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// The author of the entry.
    pub sender: Sender,
    /// The entry content.
    pub content: MessageContent,
    /// Timestamp when the entry was created (ISO 8601 format).
    pub timestamp: String,
}

impl TranscriptEntry {
    fn new(sender: Sender, content: MessageContent) -> Self {
        Self {
            sender,
            content,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Creates a user entry with plain text content.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, MessageContent::plain(text))
    }

    /// Creates an assistant entry with the given content.
    pub fn assistant(content: MessageContent) -> Self {
        Self::new(Sender::Assistant, content)
    }

    /// Creates an assistant entry with plain text content.
    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, MessageContent::plain(text))
    }
}
