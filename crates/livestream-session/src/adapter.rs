//! Capability interface of the vendor RTC engine.
//!
//! The engine does all media and network work on its own threads and reports
//! back through the [`RtcEventSink`] registered with it. The sink only
//! enqueues; the session applies events in the order they were emitted.

use crossbeam_channel::{Receiver, Sender};
use tracing::debug;

use livestream_ipc::{ChannelProfile, ClientRole, ParticipantId};

use crate::AdapterResult;

/// Per-join options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinOptions {
    /// Role to join with.
    pub role: ClientRole,
}

/// Imperative operations of the RTC engine.
pub trait RtcEngine: Send {
    /// Configure the engine with the vendor application id.
    fn initialize(&mut self, app_id: &str, profile: ChannelProfile) -> AdapterResult<()>;

    /// Enable local video capture.
    fn enable_video(&mut self) -> AdapterResult<()>;

    /// Register the sink that receives engine callbacks.
    fn register_event_handler(&mut self, sink: RtcEventSink) -> AdapterResult<()>;

    /// Set the channel profile for subsequent joins.
    fn set_channel_profile(&mut self, profile: ChannelProfile) -> AdapterResult<()>;

    /// Start the local video preview.
    fn start_preview(&mut self) -> AdapterResult<()>;

    /// Request to join a channel. Completion is reported through the sink.
    fn join_channel(
        &mut self,
        token: &str,
        channel_name: &str,
        uid: ParticipantId,
        options: JoinOptions,
    ) -> AdapterResult<()>;

    /// Request to leave the current channel.
    fn leave_channel(&mut self) -> AdapterResult<()>;
}

/// Callback raised by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RtcEvent {
    /// The local client joined the channel.
    JoinSuccess,

    /// A remote participant started publishing.
    ParticipantJoined(ParticipantId),

    /// A remote participant went offline.
    ParticipantLeft(ParticipantId),

    /// The engine finished leaving the channel.
    LeftChannel,

    /// The engine reported an asynchronous failure.
    Error { code: i32, message: String },
}

/// Handle given to the engine for reporting callbacks.
///
/// Cheap to clone and safe to call from any thread.
#[derive(Debug, Clone)]
pub struct RtcEventSink {
    tx: Sender<RtcEvent>,
}

impl RtcEventSink {
    /// Create a sink and the receiver the session drains.
    pub fn channel() -> (Self, Receiver<RtcEvent>) {
        // Unbounded: the engine thread must never block or lose a roster event.
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }

    pub fn on_join_success(&self) {
        self.emit(RtcEvent::JoinSuccess);
    }

    pub fn on_participant_joined(&self, id: ParticipantId) {
        self.emit(RtcEvent::ParticipantJoined(id));
    }

    pub fn on_participant_left(&self, id: ParticipantId) {
        self.emit(RtcEvent::ParticipantLeft(id));
    }

    pub fn on_left_channel(&self) {
        self.emit(RtcEvent::LeftChannel);
    }

    pub fn on_error(&self, code: i32, message: impl Into<String>) {
        self.emit(RtcEvent::Error {
            code,
            message: message.into(),
        });
    }

    fn emit(&self, event: RtcEvent) {
        if let Err(e) = self.tx.send(event) {
            debug!(event = ?e.into_inner(), "Session gone, dropping engine event");
        }
    }
}
