//! The conversation controller state machine.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error};

use super::classify::classify;
use super::progress::{ProgressMeter, ProgressTask};
use super::view_state::ViewState;
use crate::error::{ChatError, Result};
use crate::search::SearchService;
use crate::transcript::{Transcript, TranscriptEntry};

const GREETING: &str = "Hello, how can I help you today?";

/// What a call to [`ConversationController::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty or whitespace-only input; nothing changed.
    Ignored,
    /// The reply was classified and appended to the transcript.
    Replied,
    /// The remote call failed. The failure was logged and the transcript
    /// gained no assistant entries.
    Failed,
}

struct ControllerState {
    transcript: Transcript,
    view_state: ViewState,
    conversation_id: String,
}

/// Coordinates the transcript, the progress simulation and the remote
/// conversation service.
///
/// `ConversationController` is responsible for:
/// - Validating and appending user input to the transcript
/// - Keeping at most one request in flight (`Idle` -> `Pending` -> `Idle`)
/// - Driving the cosmetic progress simulation across the request
/// - Classifying replies into assistant entries
///
/// Failures never reach the transcript; the controller logs them and
/// silently returns to `Idle`.
pub struct ConversationController {
    state: RwLock<ControllerState>,
    progress: Mutex<ProgressTask>,
    meter: Arc<RwLock<ProgressMeter>>,
    service: Arc<dyn SearchService>,
    user_id: String,
    multi_documents: bool,
}

impl ConversationController {
    /// Creates a controller with an empty conversation and a greeting entry.
    ///
    /// # Arguments
    ///
    /// * `service` - The remote conversation collaborator
    /// * `multi_documents` - Whether the service may cite multiple source
    ///   documents
    /// * `user_id` - Opaque caller identifier forwarded on every turn
    pub fn new(
        service: Arc<dyn SearchService>,
        multi_documents: bool,
        user_id: impl Into<String>,
    ) -> Self {
        let mut transcript = Transcript::new();
        transcript.append(TranscriptEntry::assistant_text(GREETING));

        let progress = ProgressTask::new();
        let meter = progress.meter();

        Self {
            state: RwLock::new(ControllerState {
                transcript,
                view_state: ViewState::Idle,
                conversation_id: String::new(),
            }),
            progress: Mutex::new(progress),
            meter,
            service,
            user_id: user_id.into(),
            multi_documents,
        }
    }

    /// Submits one user turn and drives it to completion.
    ///
    /// Appends the user entry, enters `Pending`, invokes the remote call,
    /// classifies the reply and returns to `Idle`. Remote failures
    /// (including replies the client could not decode) are logged and leave
    /// the transcript without assistant entries for this turn.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::RequestInFlight`] if called while a request is
    /// already pending. The front end hides the input surface while pending,
    /// so this guard only fires on misuse of the API.
    pub async fn submit(&self, text: &str) -> Result<SubmitOutcome> {
        let conversation_id = {
            let mut state = self.state.write().await;
            if state.view_state == ViewState::Pending {
                return Err(ChatError::RequestInFlight);
            }
            if !state.transcript.append_user_text(text) {
                return Ok(SubmitOutcome::Ignored);
            }
            state.view_state = ViewState::Pending;
            state.conversation_id.clone()
        };

        self.progress.lock().await.start().await;
        debug!(conversation_id = %conversation_id, "sending conversation turn");

        let call = self
            .service
            .send_turn(
                &conversation_id,
                text.trim(),
                self.multi_documents,
                &self.user_id,
            )
            .await;

        self.progress.lock().await.finish().await;

        let mut state = self.state.write().await;
        let outcome = match call {
            Ok(reply) => {
                state.conversation_id = reply.id;
                for entry in classify(&reply.message) {
                    state.transcript.append(entry);
                }
                SubmitOutcome::Replied
            }
            Err(err) => {
                // The user gets no visible feedback for this, only the log.
                error!(error = %err, "conversation call failed");
                SubmitOutcome::Failed
            }
        };
        state.view_state = ViewState::Idle;

        Ok(outcome)
    }

    /// Returns the full ordered transcript snapshot for rendering.
    pub async fn transcript(&self) -> Vec<TranscriptEntry> {
        self.state.read().await.transcript.entries().to_vec()
    }

    /// Returns the current view state.
    pub async fn state(&self) -> ViewState {
        self.state.read().await.view_state
    }

    /// Returns the current conversation id (empty before the first reply).
    pub async fn conversation_id(&self) -> String {
        self.state.read().await.conversation_id.clone()
    }

    /// Returns a handle to the shared progress meter for the display layer.
    pub fn progress_meter(&self) -> Arc<RwLock<ProgressMeter>> {
        self.meter.clone()
    }

    /// Aborts the progress timers. Call on teardown so nothing leaks.
    pub async fn shutdown(&self) {
        self.progress.lock().await.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{ConversationReply, ResultData, ResultMessage, SourceDocument};
    use crate::transcript::Sender;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Notify;

    struct MockSearchService {
        replies: StdMutex<VecDeque<Result<ConversationReply>>>,
        calls: StdMutex<Vec<(String, String, bool, String)>>,
    }

    impl MockSearchService {
        fn new(replies: Vec<Result<ConversationReply>>) -> Self {
            Self {
                replies: StdMutex::new(replies.into()),
                calls: StdMutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, String, bool, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl SearchService for MockSearchService {
        async fn send_turn(
            &self,
            conversation_id: &str,
            message: &str,
            multi_documents: bool,
            user_id: &str,
        ) -> Result<ConversationReply> {
            self.calls.lock().unwrap().push((
                conversation_id.to_string(),
                message.to_string(),
                multi_documents,
                user_id.to_string(),
            ));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ChatError::remote("no scripted reply")))
        }
    }

    // Blocks inside send_turn until released, so tests can observe Pending.
    struct GatedSearchService {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait::async_trait]
    impl SearchService for GatedSearchService {
        async fn send_turn(
            &self,
            _conversation_id: &str,
            _message: &str,
            _multi_documents: bool,
            _user_id: &str,
        ) -> Result<ConversationReply> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(reply("conv-1", plain_reply("done")))
        }
    }

    fn plain_reply(content: &str) -> ResultMessage {
        ResultMessage {
            action: "CHAT".to_string(),
            content: content.to_string(),
            datas: None,
            from: None,
        }
    }

    fn answered_reply(content: &str, documents: Vec<SourceDocument>) -> ResultMessage {
        ResultMessage {
            action: "SEARCH".to_string(),
            content: content.to_string(),
            datas: Some(ResultData {
                is_answered: true,
                documents,
                ..ResultData::default()
            }),
            from: None,
        }
    }

    fn reply(id: &str, message: ResultMessage) -> ConversationReply {
        ConversationReply {
            id: id.to_string(),
            message,
        }
    }

    fn controller_with(replies: Vec<Result<ConversationReply>>) -> ConversationController {
        ConversationController::new(
            Arc::new(MockSearchService::new(replies)),
            false,
            "user-1",
        )
    }

    #[tokio::test]
    async fn test_controller_starts_idle_with_greeting() {
        let controller = controller_with(vec![]);

        assert_eq!(controller.state().await, ViewState::Idle);
        assert_eq!(controller.conversation_id().await, "");

        let transcript = controller.transcript().await;
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].sender, Sender::Assistant);
        assert_eq!(
            transcript[0].content.to_plain_text(),
            "Hello, how can I help you today?"
        );
    }

    #[tokio::test]
    async fn test_submit_appends_user_entry_and_reply() {
        let controller = controller_with(vec![Ok(reply("conv-1", plain_reply("hi there")))]);

        let outcome = controller.submit("hello").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Replied);
        assert_eq!(controller.state().await, ViewState::Idle);
        assert_eq!(controller.conversation_id().await, "conv-1");

        let transcript = controller.transcript().await;
        // greeting + user + one plain assistant entry
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].sender, Sender::User);
        assert_eq!(transcript[1].content.to_plain_text(), "hello");
        assert_eq!(transcript[2].content.to_plain_text(), "hi there");
    }

    #[tokio::test]
    async fn test_whitespace_submit_changes_nothing() {
        let controller = controller_with(vec![]);

        let outcome = controller.submit("   \t").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert_eq!(controller.state().await, ViewState::Idle);
        assert_eq!(controller.transcript().await.len(), 1);
    }

    #[tokio::test]
    async fn test_answered_search_appends_four_entries() {
        let documents = vec![SourceDocument {
            id: None,
            name: "doc1".to_string(),
            url: "http://x".to_string(),
        }];
        let controller = controller_with(vec![Ok(reply(
            "conv-1",
            answered_reply("Paris is the capital", documents),
        ))]);

        controller.submit("capital of France?").await.unwrap();

        let transcript = controller.transcript().await;
        // greeting + user + Answer: + content + Source: + documents
        assert_eq!(transcript.len(), 6);
        assert_eq!(transcript[2].content.to_plain_text(), "Answer:");
        assert_eq!(
            transcript[3].content.to_plain_text(),
            "Paris is the capital"
        );
        assert_eq!(transcript[4].content.to_plain_text(), "Source:");
        assert_eq!(
            transcript[5].content.to_plain_text(),
            "name: doc1\nurl: http://x\n\n"
        );
    }

    #[tokio::test]
    async fn test_rejection_with_reason_appends_two_entries() {
        let message = ResultMessage {
            action: "REJECT".to_string(),
            content: "I cannot help with that".to_string(),
            datas: Some(ResultData {
                reason: Some("out of scope".to_string()),
                ..ResultData::default()
            }),
            from: None,
        };
        let controller = controller_with(vec![Ok(reply("conv-1", message))]);

        controller.submit("do something odd").await.unwrap();

        let transcript = controller.transcript().await;
        assert_eq!(transcript.len(), 4);
        assert_eq!(
            transcript[2].content.to_plain_text(),
            "I cannot help with that"
        );
        assert_eq!(transcript[3].content.to_plain_text(), "out of scope");
    }

    #[tokio::test]
    async fn test_remote_failure_leaves_no_assistant_entries() {
        let controller =
            controller_with(vec![Err(ChatError::remote("connection refused"))]);

        let outcome = controller.submit("hello").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(controller.state().await, ViewState::Idle);
        // conversation id untouched on failure
        assert_eq!(controller.conversation_id().await, "");

        let transcript = controller.transcript().await;
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1].sender, Sender::User);
    }

    #[tokio::test]
    async fn test_undecodable_reply_leaves_no_assistant_entries() {
        // A reply the client could not decode surfaces as MalformedResult
        // and degrades exactly like a remote failure.
        let controller = controller_with(vec![Err(ChatError::malformed(
            "failed to decode conversation reply",
        ))]);

        let outcome = controller.submit("hello").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(controller.state().await, ViewState::Idle);
        assert_eq!(controller.transcript().await.len(), 2);
        assert_eq!(controller.conversation_id().await, "");
    }

    #[tokio::test]
    async fn test_answered_reply_with_empty_content_appends_two_entries() {
        let controller =
            controller_with(vec![Ok(reply("conv-1", answered_reply("", vec![])))]);

        let outcome = controller.submit("hello").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Replied);

        let transcript = controller.transcript().await;
        // greeting + user + Answer: + empty content
        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript[2].content.to_plain_text(), "Answer:");
        assert_eq!(transcript[3].content.to_plain_text(), "");
    }

    #[tokio::test]
    async fn test_turn_arguments_are_forwarded() {
        let service = Arc::new(MockSearchService::new(vec![
            Ok(reply("conv-1", plain_reply("first"))),
            Ok(reply("conv-2", plain_reply("second"))),
        ]));
        let controller = ConversationController::new(service.clone(), true, "user-7");

        controller.submit("  one  ").await.unwrap();
        controller.submit("two").await.unwrap();

        let calls = service.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ("".into(), "one".into(), true, "user-7".into()));
        assert_eq!(
            calls[1],
            ("conv-1".into(), "two".into(), true, "user-7".into())
        );
    }

    #[tokio::test]
    async fn test_second_submit_while_pending_is_rejected() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let service = Arc::new(GatedSearchService {
            entered: entered.clone(),
            release: release.clone(),
        });
        let controller = Arc::new(ConversationController::new(service, false, "user-1"));

        let background = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit("first").await })
        };

        // Wait until the first request is actually in flight.
        entered.notified().await;
        assert_eq!(controller.state().await, ViewState::Pending);

        let err = controller.submit("second").await.unwrap_err();
        assert!(err.is_request_in_flight());

        release.notify_one();
        let outcome = background.await.unwrap().unwrap();
        assert_eq!(outcome, SubmitOutcome::Replied);
        assert_eq!(controller.state().await, ViewState::Idle);

        // Only the first turn reached the transcript.
        let transcript = controller.transcript().await;
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].content.to_plain_text(), "first");
    }

    #[tokio::test]
    async fn test_progress_meter_completes_after_turn() {
        let controller = controller_with(vec![Ok(reply("conv-1", plain_reply("done")))]);
        let meter = controller.progress_meter();

        controller.submit("hello").await.unwrap();

        // finish() has run: 100% and still visible until the hide delay.
        assert_eq!(meter.read().await.percentage(), 100);
        controller.shutdown().await;
    }
}
