//! Channel session state machine for the live broadcast demo.
//!
//! This crate wires an opaque RTC engine to application-visible session
//! state. The engine's asynchronous callbacks and the presentation layer's
//! commands are serialized through a single actor that owns the state.

mod adapter;
mod directory;
mod error;
mod handle;
mod permissions;
mod session;

#[cfg(test)]
mod test_support;

pub use adapter::{JoinOptions, RtcEngine, RtcEvent, RtcEventSink};
pub use directory::ChannelDirectory;
pub use error::{AdapterError, SessionError};
pub use handle::SessionHandle;
pub use permissions::{AutoGrant, PermissionProvider, REQUIRED_CAPABILITIES};
pub use session::Session;

use std::sync::Arc;

use livestream_ipc::{command_channel, event_channel, SessionConfig};

/// Result type for engine adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Create a session and the handle the presentation layer talks through.
///
/// The session does nothing until [`Session::run`] is called, normally on a
/// dedicated thread.
pub fn create_session(
    config: SessionConfig,
    directory: ChannelDirectory,
    engine: Box<dyn RtcEngine>,
    permissions: Box<dyn PermissionProvider>,
) -> (Session, SessionHandle) {
    let directory = Arc::new(directory);
    let (command_tx, command_rx) = command_channel();
    let (event_tx, event_rx) = event_channel();

    let session = Session::new(
        config,
        Arc::clone(&directory),
        engine,
        permissions,
        command_rx,
        event_tx,
    );
    let handle = SessionHandle::new(command_tx, event_rx, session.state(), directory);

    (session, handle)
}
