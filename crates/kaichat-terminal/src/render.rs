//! Transcript rendering for the terminal.
//!
//! This is the only layer that turns message content into visible markup.
//! Rich segments are rendered here from their structured form; remote
//! content is never interpreted as markup.

use std::io::Write;

use colored::Colorize;
use kaichat_core::transcript::{MessageContent, RichSegment, Sender, TranscriptEntry};

const BUBBLE_INDENT: &str = "      ";
// Carriage return plus the ANSI erase-to-end-of-line sequence.
const CLEAR_LINE: &str = "\r\x1b[K";

/// Renders a slice of transcript entries in order.
pub fn render_transcript(entries: &[TranscriptEntry]) {
    for entry in entries {
        render_entry(entry);
    }
}

/// Renders one entry as a sender-labelled bubble line.
pub fn render_entry(entry: &TranscriptEntry) {
    match entry.sender {
        Sender::User => println!("{} {}", "USER".bold().blue(), render_content(&entry.content)),
        Sender::Assistant => {
            println!("{}  {}", "BOT".bold().green(), render_content(&entry.content))
        }
    }
}

/// Renders the in-flight progress line, overwriting itself in place.
pub fn render_progress(percentage: u8) {
    print!(
        "\r{}  Searching... {}%",
        "BOT".bold().green(),
        percentage
    );
    let _ = std::io::stdout().flush();
}

/// Clears the progress line, however long it grew.
pub fn clear_progress() {
    print!("{CLEAR_LINE}");
    let _ = std::io::stdout().flush();
}

fn render_content(content: &MessageContent) -> String {
    match content {
        MessageContent::Plain(text) => text.clone(),
        MessageContent::Rich(segments) => {
            let mut out = String::new();
            for segment in segments {
                match segment {
                    RichSegment::Text { text } => out.push_str(text),
                    RichSegment::Link { label, url } => {
                        if label == url {
                            out.push_str(&url.underline().cyan().to_string());
                        } else {
                            out.push_str(&format!("{} ({})", label.underline().cyan(), url));
                        }
                    }
                    RichSegment::LineBreak => {
                        out.push('\n');
                        out.push_str(BUBBLE_INDENT);
                    }
                }
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rich_content_renders_without_markup_interpretation() {
        colored::control::set_override(false);

        let content = MessageContent::Rich(vec![
            RichSegment::Text {
                text: "name: <b>doc1</b>".to_string(),
            },
            RichSegment::LineBreak,
            RichSegment::Text {
                text: "url: ".to_string(),
            },
            RichSegment::Link {
                label: "http://x".to_string(),
                url: "http://x".to_string(),
            },
        ]);

        let rendered = render_content(&content);
        // Angle brackets survive verbatim; nothing is treated as HTML.
        assert!(rendered.contains("name: <b>doc1</b>"));
        assert!(rendered.contains("url: http://x"));
    }

    #[test]
    fn test_clear_line_erases_whole_line() {
        // Return to column 0, then erase to end of line. No fixed-width
        // blanking, so the clear works for any progress line length.
        assert!(CLEAR_LINE.starts_with('\r'));
        assert!(CLEAR_LINE.ends_with("\x1b[K"));
    }

    #[test]
    fn test_labelled_link_shows_both_label_and_url() {
        colored::control::set_override(false);

        let content = MessageContent::Rich(vec![RichSegment::Link {
            label: "doc1".to_string(),
            url: "http://x".to_string(),
        }]);

        assert_eq!(render_content(&content), "doc1 (http://x)");
    }
}
