//! Recording engine used by the session tests.

use std::sync::Arc;

use parking_lot::Mutex;

use livestream_ipc::{
    Capability, ChannelProfile, ClientRole, ParticipantId, PermissionGrant, PermissionStatus,
};

use crate::{AdapterError, AdapterResult, JoinOptions, PermissionProvider, RtcEngine, RtcEventSink};

/// One call made against the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Initialize { app_id: String, profile: ChannelProfile },
    EnableVideo,
    RegisterEventHandler,
    SetChannelProfile(ChannelProfile),
    StartPreview,
    JoinChannel { channel_name: String, uid: ParticipantId, role: ClientRole },
    LeaveChannel,
}

#[derive(Default)]
struct Shared {
    calls: Vec<EngineCall>,
    sinks: Vec<RtcEventSink>,
    fail_initialize: bool,
    fail_join: bool,
    fail_leave: bool,
}

/// Engine that records every call and lets tests raise callbacks.
pub struct RecordingEngine {
    shared: Arc<Mutex<Shared>>,
}

/// Test-side view of a [`RecordingEngine`].
#[derive(Clone)]
pub struct EngineProbe {
    shared: Arc<Mutex<Shared>>,
}

impl RecordingEngine {
    pub fn new() -> (Self, EngineProbe) {
        let shared = Arc::new(Mutex::new(Shared::default()));
        (
            Self {
                shared: Arc::clone(&shared),
            },
            EngineProbe { shared },
        )
    }

    fn record(&self, call: EngineCall) {
        self.shared.lock().calls.push(call);
    }
}

impl RtcEngine for RecordingEngine {
    fn initialize(&mut self, app_id: &str, profile: ChannelProfile) -> AdapterResult<()> {
        self.record(EngineCall::Initialize {
            app_id: app_id.to_string(),
            profile,
        });
        if self.shared.lock().fail_initialize {
            return Err(AdapterError::Unavailable("no engine".to_string()));
        }
        Ok(())
    }

    fn enable_video(&mut self) -> AdapterResult<()> {
        self.record(EngineCall::EnableVideo);
        Ok(())
    }

    fn register_event_handler(&mut self, sink: RtcEventSink) -> AdapterResult<()> {
        self.record(EngineCall::RegisterEventHandler);
        self.shared.lock().sinks.push(sink);
        Ok(())
    }

    fn set_channel_profile(&mut self, profile: ChannelProfile) -> AdapterResult<()> {
        self.record(EngineCall::SetChannelProfile(profile));
        Ok(())
    }

    fn start_preview(&mut self) -> AdapterResult<()> {
        self.record(EngineCall::StartPreview);
        Ok(())
    }

    fn join_channel(
        &mut self,
        _token: &str,
        channel_name: &str,
        uid: ParticipantId,
        options: JoinOptions,
    ) -> AdapterResult<()> {
        self.record(EngineCall::JoinChannel {
            channel_name: channel_name.to_string(),
            uid,
            role: options.role,
        });
        if self.shared.lock().fail_join {
            return Err(AdapterError::Rejected {
                code: 17,
                message: "join rejected".to_string(),
            });
        }
        Ok(())
    }

    fn leave_channel(&mut self) -> AdapterResult<()> {
        self.record(EngineCall::LeaveChannel);
        if self.shared.lock().fail_leave {
            return Err(AdapterError::NotInitialized);
        }
        Ok(())
    }
}

impl EngineProbe {
    pub fn calls(&self) -> Vec<EngineCall> {
        self.shared.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.shared.lock().calls.clear();
    }

    pub fn registered_sinks(&self) -> usize {
        self.shared.lock().sinks.len()
    }

    /// The most recently registered sink.
    pub fn sink(&self) -> RtcEventSink {
        self.shared
            .lock()
            .sinks
            .last()
            .cloned()
            .expect("event handler registered")
    }

    pub fn fail_initialize(&self) {
        self.shared.lock().fail_initialize = true;
    }

    pub fn fail_join(&self) {
        self.shared.lock().fail_join = true;
    }

    pub fn fail_leave(&self) {
        self.shared.lock().fail_leave = true;
    }
}

/// Provider that denies every capability and counts requests.
#[derive(Default)]
pub struct DenyAll {
    pub requested: Arc<Mutex<Vec<Capability>>>,
}

impl PermissionProvider for DenyAll {
    fn request(&mut self, capabilities: &[Capability]) -> Vec<PermissionGrant> {
        self.requested.lock().extend_from_slice(capabilities);
        capabilities
            .iter()
            .map(|&capability| PermissionGrant {
                capability,
                status: PermissionStatus::Denied,
            })
            .collect()
    }
}
