//! Presentation-side handle to a running session.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use parking_lot::RwLock;
use tracing::{debug, instrument};

use livestream_ipc::{ClientRole, SessionCommand, SessionEvent, SessionState};

use crate::directory::ChannelDirectory;
use crate::SessionError;

/// Commands and read-only state access for the presentation layer.
pub struct SessionHandle {
    command_tx: Sender<SessionCommand>,
    event_rx: Receiver<SessionEvent>,
    state: Arc<RwLock<SessionState>>,
    directory: Arc<ChannelDirectory>,
}

impl SessionHandle {
    pub(crate) fn new(
        command_tx: Sender<SessionCommand>,
        event_rx: Receiver<SessionEvent>,
        state: Arc<RwLock<SessionState>>,
        directory: Arc<ChannelDirectory>,
    ) -> Self {
        Self {
            command_tx,
            event_rx,
            state,
            directory,
        }
    }

    /// Request a join of the channel at `selector`.
    ///
    /// Selectors outside the directory are rejected, never defaulted.
    #[instrument(skip(self))]
    pub fn join(&self, selector: usize) -> Result<(), SessionError> {
        self.directory.get(selector)?;
        debug!("join command");
        self.send(SessionCommand::Join { selector })
    }

    /// Leave the current channel.
    #[instrument(skip(self))]
    pub fn leave(&self) -> Result<(), SessionError> {
        debug!("leave command");
        self.send(SessionCommand::Leave)
    }

    /// Set the role for the next join. Refused while joined.
    pub fn set_role(&self, role: ClientRole) -> Result<(), SessionError> {
        if self.state.read().joined {
            return Err(SessionError::RoleLocked);
        }
        self.send(SessionCommand::SetRole(role))
    }

    /// Ask the session to publish its current state as an event.
    pub fn request_state(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::GetState)
    }

    /// Stop the session, leaving the channel first if needed.
    pub fn shutdown(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Shutdown)
    }

    /// Copy of the current session state.
    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn directory(&self) -> &ChannelDirectory {
        &self.directory
    }

    /// Drain pending events without blocking.
    pub fn poll_events(&self) -> Result<Vec<SessionEvent>, SessionError> {
        let mut events = Vec::new();

        loop {
            match self.event_rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if events.is_empty() {
                        return Err(SessionError::Disconnected);
                    }
                    break;
                }
            }
        }

        Ok(events)
    }

    /// Wait for the first event matching `predicate`, skipping others.
    ///
    /// Returns `Ok(None)` on timeout.
    pub fn wait_for(
        &self,
        timeout: Duration,
        mut predicate: impl FnMut(&SessionEvent) -> bool,
    ) -> Result<Option<SessionEvent>, SessionError> {
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.event_rx.recv_timeout(remaining) {
                Ok(event) if predicate(&event) => return Ok(Some(event)),
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout) => return Ok(None),
                Err(RecvTimeoutError::Disconnected) => return Err(SessionError::Disconnected),
            }
        }
    }

    fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.command_tx
            .send(command)
            .map_err(|_| SessionError::Disconnected)
    }
}
