//! Conversation controller module.
//!
//! This module contains the state machine that coordinates one in-flight
//! conversation request at a time:
//!
//! - `view_state`: The `Idle`/`Pending` view states
//! - `progress`: The cosmetic progress simulation
//! - `classify`: Result classification into transcript entries
//! - `manager`: The `ConversationController` itself

mod classify;
mod manager;
mod progress;
mod view_state;

// Re-export public API
pub use classify::classify;
pub use manager::{ConversationController, SubmitOutcome};
pub use progress::{ProgressMeter, ProgressTask, HIDE_DELAY, MAX_PENDING_PERCENTAGE, TICK_INTERVAL};
pub use view_state::ViewState;
