//! Session actor: the single writer of [`SessionState`].

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::RwLock;
use tracing::{debug, error, info, instrument, warn};

use livestream_ipc::{
    ChannelDescriptor, ClientRole, ParticipantId, PermissionStatus, SessionCommand, SessionConfig,
    SessionEvent, SessionState, STATUS_JOINED, STATUS_ROLE_LOCKED,
};

use crate::adapter::{JoinOptions, RtcEngine, RtcEvent, RtcEventSink};
use crate::directory::ChannelDirectory;
use crate::permissions::{PermissionProvider, REQUIRED_CAPABILITIES};
use crate::AdapterResult;

/// Drives the RTC engine and maps its callbacks onto session state.
///
/// Commands from the presentation layer and callbacks from the engine are
/// both consumed on the thread running [`Session::run`], so state mutation
/// is serialized without relying on the engine's threading model.
pub struct Session {
    config: SessionConfig,
    directory: Arc<ChannelDirectory>,
    engine: Box<dyn RtcEngine>,
    permissions: Box<dyn PermissionProvider>,
    command_rx: Receiver<SessionCommand>,
    event_tx: Sender<SessionEvent>,
    rtc_sink: RtcEventSink,
    rtc_rx: Receiver<RtcEvent>,
    state: Arc<RwLock<SessionState>>,
    /// Channel of the outstanding or confirmed join.
    active_channel: Option<ChannelDescriptor>,
}

impl Session {
    /// Create a new session around an engine.
    pub fn new(
        config: SessionConfig,
        directory: Arc<ChannelDirectory>,
        engine: Box<dyn RtcEngine>,
        permissions: Box<dyn PermissionProvider>,
        command_rx: Receiver<SessionCommand>,
        event_tx: Sender<SessionEvent>,
    ) -> Self {
        let (rtc_sink, rtc_rx) = RtcEventSink::channel();

        Self {
            config,
            directory,
            engine,
            permissions,
            command_rx,
            event_tx,
            rtc_sink,
            rtc_rx,
            state: Arc::new(RwLock::new(SessionState::new())),
            active_channel: None,
        }
    }

    /// Shared state cell, read-only outside the actor.
    pub fn state(&self) -> Arc<RwLock<SessionState>> {
        Arc::clone(&self.state)
    }

    /// Initialize the engine, then process commands and callbacks (blocking).
    #[instrument(name = "session_run", skip(self))]
    pub fn run(&mut self) {
        info!("Session starting");
        self.initialize();
        self.send_event(SessionEvent::Ready);

        let command_rx = self.command_rx.clone();
        let rtc_rx = self.rtc_rx.clone();

        loop {
            crossbeam_channel::select! {
                recv(rtc_rx) -> event => {
                    // The actor holds a sink itself, so this never disconnects.
                    if let Ok(event) = event {
                        self.apply_rtc_event(event);
                    }
                }
                recv(command_rx) -> command => {
                    match command {
                        Ok(command) => {
                            if !self.handle_command(command) {
                                break;
                            }
                        }
                        Err(_) => {
                            info!("Command channel disconnected, shutting down");
                            self.shutdown();
                            break;
                        }
                    }
                }
            }
        }

        info!("Session stopped");
    }

    /// Request device capabilities and configure the engine.
    ///
    /// Failures are logged and otherwise ignored; the session stays idle.
    /// Calling this twice registers the event sink twice.
    #[instrument(name = "session_initialize", skip(self))]
    pub fn initialize(&mut self) {
        for grant in self.permissions.request(&REQUIRED_CAPABILITIES) {
            match grant.status {
                PermissionStatus::Granted => debug!(capability = ?grant.capability, "Granted"),
                PermissionStatus::Denied => warn!(capability = ?grant.capability, "Denied"),
            }
        }

        match self.configure_engine() {
            Ok(()) => info!("Engine initialized"),
            Err(e) => error!("Engine initialization failed: {}", e),
        }
    }

    fn configure_engine(&mut self) -> AdapterResult<()> {
        self.engine
            .initialize(&self.config.app_id, self.config.channel_profile)?;
        self.engine.register_event_handler(self.rtc_sink.clone())?;
        self.engine.enable_video()
    }

    /// Handle a command. Returns false if the session should stop.
    pub(crate) fn handle_command(&mut self, command: SessionCommand) -> bool {
        debug!(?command, "Handling command");

        match command {
            SessionCommand::Join { selector } => self.join(selector),
            SessionCommand::Leave => self.leave(),
            SessionCommand::SetRole(role) => self.set_role(role),
            SessionCommand::GetState => self.send_state(),
            SessionCommand::Shutdown => {
                self.shutdown();
                return false;
            }
        }

        true
    }

    /// Request a join. `joined` flips only on the engine's confirmation.
    #[instrument(name = "session_join", skip(self))]
    fn join(&mut self, selector: usize) {
        let channel = match self.directory.get(selector) {
            Ok(channel) => channel.clone(),
            Err(e) => {
                error!("Rejecting join: {}", e);
                return;
            }
        };

        let (joined, role) = {
            let state = self.state.read();
            (state.joined, state.role)
        };

        if joined {
            warn!("Join requested while already joined, forwarding to engine");
        }

        info!(channel = %channel.channel_name, role = role.name(), "Joining channel");

        match self.request_join(&channel, role) {
            Ok(()) => {
                // A roster carried over from another channel may hold our new uid.
                let local = channel.local_participant_id;
                self.update_state(|state| {
                    state.remote_participants.remove(&local);
                });
                self.active_channel = Some(channel);
            }
            Err(e) => error!("Join request failed: {}", e),
        }
    }

    fn request_join(&mut self, channel: &ChannelDescriptor, role: ClientRole) -> AdapterResult<()> {
        self.engine.set_channel_profile(self.config.channel_profile)?;

        if role.is_broadcaster() {
            self.engine.start_preview()?;
        }

        self.engine.join_channel(
            &channel.token,
            &channel.channel_name,
            channel.local_participant_id,
            JoinOptions { role },
        )
    }

    /// Request a leave and reset state without waiting for confirmation.
    #[instrument(name = "session_leave", skip(self))]
    fn leave(&mut self) {
        if let Err(e) = self.engine.leave_channel() {
            error!("Leave request failed: {}", e);
        }

        self.active_channel = None;
        self.update_state(SessionState::reset_after_leave);
        info!("Left channel");
    }

    fn set_role(&mut self, role: ClientRole) {
        if self.state.read().joined {
            warn!(role = role.name(), "Ignoring role change while joined");
            self.update_state(|state| state.status_message = STATUS_ROLE_LOCKED.to_string());
            return;
        }

        self.update_state(|state| state.role = role);
    }

    fn shutdown(&mut self) {
        if self.active_channel.is_some() || self.state.read().joined {
            self.leave();
        }
        self.send_event(SessionEvent::Shutdown);
    }

    /// Apply an engine callback.
    pub(crate) fn apply_rtc_event(&mut self, event: RtcEvent) {
        debug!(?event, "Engine event");

        match event {
            RtcEvent::JoinSuccess => {
                if self.active_channel.is_none() {
                    debug!("Join confirmation after leave, ignoring");
                    return;
                }
                self.update_state(|state| {
                    state.joined = true;
                    state.status_message = STATUS_JOINED.to_string();
                });
            }
            RtcEvent::ParticipantJoined(id) => {
                if !self.accepts_participant_event(id) {
                    return;
                }
                self.update_state(|state| {
                    state.remote_participants.insert(id);
                    state.status_message = format!("participant {id} joined");
                });
            }
            RtcEvent::ParticipantLeft(id) => {
                if !self.accepts_participant_event(id) {
                    return;
                }
                self.update_state(|state| {
                    state.remote_participants.remove(&id);
                    state.status_message = format!("participant {id} left");
                });
            }
            RtcEvent::LeftChannel => self.send_event(SessionEvent::LeaveConfirmed),
            RtcEvent::Error { code, message } => {
                warn!(code, %message, "Engine reported error");
                self.update_state(|state| {
                    state.status_message = format!("engine error {code}: {message}");
                });
            }
        }
    }

    /// Apply every callback queued so far.
    #[cfg(test)]
    pub(crate) fn drain_rtc_events(&mut self) {
        while let Ok(event) = self.rtc_rx.try_recv() {
            self.apply_rtc_event(event);
        }
    }

    fn accepts_participant_event(&self, id: ParticipantId) -> bool {
        if !self.state.read().joined {
            debug!(%id, "Participant event while not joined, ignoring");
            return false;
        }

        let is_local = self
            .active_channel
            .as_ref()
            .is_some_and(|channel| channel.local_participant_id == id);
        if is_local {
            debug!(%id, "Participant event for local id, ignoring");
            return false;
        }

        true
    }

    fn send_state(&self) {
        let state = self.state.read().clone();
        self.send_event(SessionEvent::StateChanged {
            previous: Box::new(state.clone()),
            current: Box::new(state),
        });
    }

    fn update_state(&self, mutate: impl FnOnce(&mut SessionState)) {
        let (previous, current) = {
            let mut state = self.state.write();
            let previous = state.clone();
            mutate(&mut *state);
            (previous, state.clone())
        };

        if previous == current {
            return;
        }

        debug!(
            previous = %previous.phase().name(),
            current = %current.phase().name(),
            status = %current.status_message,
            "State transition"
        );

        self.send_event(SessionEvent::StateChanged {
            previous: Box::new(previous),
            current: Box::new(current),
        });
    }

    fn send_event(&self, event: SessionEvent) {
        if let Err(e) = self.event_tx.try_send(event) {
            warn!("Failed to send event: {}", e);
        }
    }
}
