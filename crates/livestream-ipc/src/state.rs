//! Session state types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{ClientRole, ParticipantId, VideoSurface};

/// Status message after a confirmed join.
pub const STATUS_JOINED: &str = "joined channel";

/// Status message after a leave request.
pub const STATUS_LEFT: &str = "left channel";

/// Status message when a role change is refused.
pub const STATUS_ROLE_LOCKED: &str = "cannot change role while joined";

/// Application-visible state of the channel session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Whether the engine confirmed the join.
    pub joined: bool,

    /// Role used for the next join.
    pub role: ClientRole,

    /// Remote participants currently publishing.
    pub remote_participants: BTreeSet<ParticipantId>,

    /// Last human-readable status.
    pub status_message: String,
}

impl SessionState {
    /// Create the initial, not-joined state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the coarse lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        if self.joined {
            SessionPhase::Joined
        } else {
            SessionPhase::Idle
        }
    }

    /// Returns true if the given remote participant is present.
    pub fn has_participant(&self, id: ParticipantId) -> bool {
        self.remote_participants.contains(&id)
    }

    /// Reset to not-joined after a leave request, keeping the role.
    pub fn reset_after_leave(&mut self) {
        self.joined = false;
        self.remote_participants.clear();
        self.status_message = STATUS_LEFT.to_string();
    }

    /// Surfaces to render: local first, then remotes in id order.
    pub fn video_surfaces(&self, local: ParticipantId) -> Vec<VideoSurface> {
        if !self.joined {
            return Vec::new();
        }

        std::iter::once(VideoSurface::local(local))
            .chain(
                self.remote_participants
                    .iter()
                    .copied()
                    .map(VideoSurface::remote),
            )
            .collect()
    }
}

/// Coarse lifecycle phase of the session.
///
/// A requested but unconfirmed join is still `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Not joined.
    Idle,

    /// Join confirmed by the engine.
    Joined,
}

impl SessionPhase {
    /// Returns the display name for this phase.
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Joined => "Joined",
        }
    }
}
