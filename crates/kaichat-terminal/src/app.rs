//! The interactive input loop.
//!
//! The prompt is only shown between turns: the loop awaits each submission
//! to completion before asking for input again, so a second submission while
//! a request is pending is impossible through this surface.

use std::sync::Arc;
use std::time::Duration;

use kaichat_core::controller::{ConversationController, SubmitOutcome};
use kaichat_core::error::{ChatError, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::time::sleep;

use crate::render;

const PROMPT: &str = "you> ";
const PROGRESS_POLL: Duration = Duration::from_millis(100);

/// Runs the read-submit-render loop until the user exits.
pub async fn run(controller: Arc<ConversationController>) -> Result<()> {
    let mut editor =
        DefaultEditor::new().map_err(|e| ChatError::internal(format!("terminal setup: {e}")))?;

    render::render_transcript(&controller.transcript().await);

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(ChatError::internal(format!("terminal read: {e}"))),
        };

        let trimmed = line.trim();
        if trimmed == "quit" || trimmed == "exit" {
            break;
        }

        let before = controller.transcript().await.len();
        let turn = {
            let controller = controller.clone();
            let line = line.clone();
            tokio::spawn(async move { controller.submit(&line).await })
        };

        // Show the simulated percentage while the request is in flight and
        // keep the 100% line up until the meter hides itself.
        let meter = controller.progress_meter();
        loop {
            let finished = turn.is_finished();
            let (visible, percentage) = {
                let meter = meter.read().await;
                (meter.is_visible(), meter.percentage())
            };
            if visible {
                render::render_progress(percentage);
            }
            if finished && !visible {
                break;
            }
            sleep(PROGRESS_POLL).await;
        }
        render::clear_progress();

        let outcome = turn
            .await
            .map_err(|e| ChatError::internal(format!("submit task: {e}")))??;

        if outcome != SubmitOutcome::Ignored {
            let _ = editor.add_history_entry(line.trim());
        }

        let transcript = controller.transcript().await;
        render::render_transcript(&transcript[before..]);
    }

    Ok(())
}
