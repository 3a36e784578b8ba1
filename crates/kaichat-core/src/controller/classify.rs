//! Result classification.
//!
//! Turns one service result message into the assistant transcript entries it
//! should produce. Pure and total: any decodable message classifies; replies
//! that cannot be decoded are rejected upstream by the client.

use crate::search::{ResultMessage, SourceDocument, ACTION_SEARCH};
use crate::transcript::{MessageContent, RichSegment, TranscriptEntry};

const ANSWER_LABEL: &str = "Answer:";
const SOURCE_LABEL: &str = "Source:";

/// Classifies a result message into assistant entries, in display order.
///
/// - An answered `SEARCH` result yields the `Answer:` label and the answer
///   text, followed by the `Source:` label and one rich entry listing the
///   cited documents when there are any.
/// - Any other result yields its content, followed by the rejection reason
///   when one is present and non-empty.
pub fn classify(message: &ResultMessage) -> Vec<TranscriptEntry> {
    match &message.datas {
        Some(datas) if message.action == ACTION_SEARCH && datas.is_answered => {
            let mut entries = vec![
                TranscriptEntry::assistant_text(ANSWER_LABEL),
                TranscriptEntry::assistant_text(&message.content),
            ];
            if !datas.documents.is_empty() {
                entries.push(TranscriptEntry::assistant_text(SOURCE_LABEL));
                entries.push(TranscriptEntry::assistant(MessageContent::Rich(
                    document_segments(&datas.documents),
                )));
            }
            entries
        }
        _ => {
            let mut entries = vec![TranscriptEntry::assistant_text(&message.content)];
            if let Some(reason) = message.datas.as_ref().and_then(|d| d.reason.as_deref())
                && !reason.is_empty()
            {
                entries.push(TranscriptEntry::assistant_text(reason));
            }
            entries
        }
    }
}

/// Builds the rich segments for one source list entry: for each document its
/// name, its url as a link, and a blank line after it, in list order.
fn document_segments(documents: &[SourceDocument]) -> Vec<RichSegment> {
    let mut segments = Vec::with_capacity(documents.len() * 6);
    for document in documents {
        segments.push(RichSegment::Text {
            text: format!("name: {}", document.name),
        });
        segments.push(RichSegment::LineBreak);
        segments.push(RichSegment::Text {
            text: "url: ".to_string(),
        });
        segments.push(RichSegment::Link {
            label: document.url.clone(),
            url: document.url.clone(),
        });
        segments.push(RichSegment::LineBreak);
        segments.push(RichSegment::LineBreak);
    }
    segments
}
