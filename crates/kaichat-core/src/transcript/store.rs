//! The append-only transcript store.

use super::entry::TranscriptEntry;

/// An ordered, append-only sequence of transcript entries.
///
/// Entries accumulate for the life of the process. There is no deletion
/// and no mutation of entries once appended; ordering is insertion order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry to the end of the sequence.
    pub fn append(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// Appends a user-authored plain text entry.
    ///
    /// The text is trimmed first; empty or whitespace-only input is
    /// rejected silently and nothing is appended.
    ///
    /// # Returns
    ///
    /// `true` if an entry was appended, `false` if the input was rejected.
    pub fn append_user_text(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.append(TranscriptEntry::user(trimmed));
        true
    }

    /// Returns the full ordered snapshot of entries for rendering.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the transcript holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
