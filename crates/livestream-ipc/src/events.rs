//! Events sent from the session to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::state::SessionState;

/// Events that the session can send to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Session state has changed.
    StateChanged {
        /// Previous state.
        previous: Box<SessionState>,

        /// Current state.
        current: Box<SessionState>,
    },

    /// The engine confirmed that the channel was left.
    ///
    /// The state was already reset when the leave was requested.
    LeaveConfirmed,

    /// Session finished initialization and accepts commands.
    Ready,

    /// Session has shut down.
    Shutdown,
}
