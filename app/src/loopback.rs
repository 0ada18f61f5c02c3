//! In-process stand-in for the vendor RTC engine.
//!
//! Accepts every request, optionally confirms joins and leaves, and lets the
//! console inject remote participants.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use livestream_ipc::{ChannelProfile, ParticipantId};
use livestream_session::{AdapterError, AdapterResult, JoinOptions, RtcEngine, RtcEventSink};

#[derive(Default)]
struct Shared {
    sinks: Vec<RtcEventSink>,
    initialized: bool,
}

impl Shared {
    fn each_sink(&self, f: impl Fn(&RtcEventSink)) {
        self.sinks.iter().for_each(f);
    }
}

/// Loopback engine.
pub struct LoopbackEngine {
    shared: Arc<Mutex<Shared>>,
    auto_confirm: bool,
}

/// Simulates remote participants publishing into the loopback channel.
#[derive(Clone)]
pub struct LoopbackRemote {
    shared: Arc<Mutex<Shared>>,
}

impl LoopbackEngine {
    pub fn new(auto_confirm: bool) -> (Self, LoopbackRemote) {
        let shared = Arc::new(Mutex::new(Shared::default()));
        let remote = LoopbackRemote {
            shared: Arc::clone(&shared),
        };
        (
            Self {
                shared,
                auto_confirm,
            },
            remote,
        )
    }

    fn ensure_initialized(&self) -> AdapterResult<()> {
        if self.shared.lock().initialized {
            Ok(())
        } else {
            Err(AdapterError::NotInitialized)
        }
    }
}

impl RtcEngine for LoopbackEngine {
    fn initialize(&mut self, app_id: &str, profile: ChannelProfile) -> AdapterResult<()> {
        if app_id.is_empty() {
            return Err(AdapterError::Rejected {
                code: 101,
                message: "invalid app id".to_string(),
            });
        }
        info!(?profile, "Loopback engine initialized");
        self.shared.lock().initialized = true;
        Ok(())
    }

    fn enable_video(&mut self) -> AdapterResult<()> {
        self.ensure_initialized()
    }

    fn register_event_handler(&mut self, sink: RtcEventSink) -> AdapterResult<()> {
        self.shared.lock().sinks.push(sink);
        Ok(())
    }

    fn set_channel_profile(&mut self, profile: ChannelProfile) -> AdapterResult<()> {
        self.ensure_initialized()?;
        debug!(?profile, "Channel profile set");
        Ok(())
    }

    fn start_preview(&mut self) -> AdapterResult<()> {
        self.ensure_initialized()?;
        debug!("Preview started");
        Ok(())
    }

    fn join_channel(
        &mut self,
        _token: &str,
        channel_name: &str,
        uid: ParticipantId,
        options: JoinOptions,
    ) -> AdapterResult<()> {
        self.ensure_initialized()?;
        info!(channel = channel_name, %uid, role = options.role.name(), "Loopback join");

        if self.auto_confirm {
            self.shared.lock().each_sink(RtcEventSink::on_join_success);
        }
        Ok(())
    }

    fn leave_channel(&mut self) -> AdapterResult<()> {
        self.ensure_initialized()?;
        info!("Loopback leave");

        if self.auto_confirm {
            self.shared.lock().each_sink(RtcEventSink::on_left_channel);
        }
        Ok(())
    }
}

impl LoopbackRemote {
    /// A remote participant starts publishing.
    pub fn participant_joined(&self, id: ParticipantId) {
        self.shared
            .lock()
            .each_sink(|sink| sink.on_participant_joined(id));
    }

    /// A remote participant goes offline.
    pub fn participant_left(&self, id: ParticipantId) {
        self.shared
            .lock()
            .each_sink(|sink| sink.on_participant_left(id));
    }

    /// Confirm an outstanding join (when auto-confirm is off).
    pub fn confirm_join(&self) {
        self.shared.lock().each_sink(RtcEventSink::on_join_success);
    }
}
