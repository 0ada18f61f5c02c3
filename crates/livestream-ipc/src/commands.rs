//! Commands sent from the presentation layer to the session.

use serde::{Deserialize, Serialize};

use crate::types::ClientRole;

/// Commands that the presentation layer can send to the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionCommand {
    /// Join the channel at the given directory index.
    Join { selector: usize },

    /// Leave the current channel.
    Leave,

    /// Set the role used for the next join.
    SetRole(ClientRole),

    /// Request the current session state.
    GetState,

    /// Leave if joined and stop the session.
    Shutdown,
}
