//! View state types for the conversation controller.

use serde::{Deserialize, Serialize};

/// Represents the current operational state of the conversation controller.
///
/// There is no error state: failures are logged and treated identically to
/// the transition back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    /// The controller is waiting for user input.
    Idle,
    /// A request is in flight and the input surface is hidden.
    Pending,
}
