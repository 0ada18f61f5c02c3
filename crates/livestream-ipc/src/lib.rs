//! Typed presentation<->session messages for the live channel demo.
//!
//! This crate defines the message and state types exchanged between the
//! presentation layer and the session actor.

mod commands;
mod events;
mod state;
mod types;

pub use commands::SessionCommand;
pub use events::SessionEvent;
pub use state::{SessionPhase, SessionState, STATUS_JOINED, STATUS_LEFT, STATUS_ROLE_LOCKED};
pub use types::{
    Capability, ChannelDescriptor, ChannelProfile, ClientRole, ParticipantId, PermissionGrant,
    PermissionStatus, SessionConfig, VideoSurface,
};

use crossbeam_channel::{Receiver, Sender};

/// Channel capacity for commands (presentation → session).
pub const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Channel capacity for events (session → presentation).
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Creates a bounded command channel.
pub fn command_channel() -> (Sender<SessionCommand>, Receiver<SessionCommand>) {
    crossbeam_channel::bounded(COMMAND_CHANNEL_CAPACITY)
}

/// Creates a bounded event channel.
pub fn event_channel() -> (Sender<SessionEvent>, Receiver<SessionEvent>) {
    crossbeam_channel::bounded(EVENT_CHANNEL_CAPACITY)
}
