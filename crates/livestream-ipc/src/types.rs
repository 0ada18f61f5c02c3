//! Common types used across IPC messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a stream publisher within a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ParticipantId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Role of the local client within a channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientRole {
    /// Publishes and receives media.
    #[default]
    Broadcaster,

    /// Receives media only.
    Audience,
}

impl ClientRole {
    /// Returns true for the broadcaster role.
    pub fn is_broadcaster(self) -> bool {
        matches!(self, Self::Broadcaster)
    }

    /// Maps the host/audience toggle onto a role.
    pub fn from_host_toggle(is_host: bool) -> Self {
        if is_host {
            Self::Broadcaster
        } else {
            Self::Audience
        }
    }

    /// Returns the display name for this role.
    pub fn name(self) -> &'static str {
        match self {
            Self::Broadcaster => "Broadcaster",
            Self::Audience => "Audience",
        }
    }
}

/// Channel profile requested from the RTC engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelProfile {
    /// Symmetric calls where everyone publishes.
    Communication,

    /// One-to-many broadcast with broadcaster/audience roles.
    #[default]
    LiveBroadcasting,
}

/// Static description of a joinable channel.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    /// Channel-scoped credential token.
    pub token: String,

    /// Channel name.
    pub channel_name: String,

    /// Participant id the local client joins with.
    pub local_participant_id: ParticipantId,
}

impl ChannelDescriptor {
    /// Create a new descriptor.
    pub fn new(
        token: impl Into<String>,
        channel_name: impl Into<String>,
        local_participant_id: impl Into<ParticipantId>,
    ) -> Self {
        Self {
            token: token.into(),
            channel_name: channel_name.into(),
            local_participant_id: local_participant_id.into(),
        }
    }
}

/// Redacts the credential token.
impl fmt::Debug for ChannelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelDescriptor")
            .field("token", &"[REDACTED]")
            .field("channel_name", &self.channel_name)
            .field("local_participant_id", &self.local_participant_id)
            .finish()
    }
}

/// Configuration handed to the session at startup.
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Application identifier issued by the RTC vendor.
    pub app_id: String,

    /// Channel profile used for initialization and every join.
    pub channel_profile: ChannelProfile,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            channel_profile: ChannelProfile::LiveBroadcasting,
        }
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("app_id", &"[REDACTED]")
            .field("channel_profile", &self.channel_profile)
            .finish()
    }
}

/// Device capability that may need an explicit grant from the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    /// Audio recording.
    Microphone,

    /// Video capture.
    Camera,
}

/// Outcome of a capability request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    /// Capability granted.
    Granted,

    /// Capability denied by the user or platform.
    Denied,
}

/// A single capability grant result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub capability: Capability,
    pub status: PermissionStatus,
}

/// A video surface the presentation layer should render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSurface {
    /// Participant whose stream is rendered.
    pub participant: ParticipantId,

    /// Whether this is the local preview.
    pub is_local: bool,

    /// Caption shown under the surface.
    pub caption: String,
}

impl VideoSurface {
    /// Surface for the local stream.
    pub fn local(participant: ParticipantId) -> Self {
        Self {
            participant,
            is_local: true,
            caption: format!("Your stream (uid: {participant})"),
        }
    }

    /// Surface for a remote participant.
    pub fn remote(participant: ParticipantId) -> Self {
        Self {
            participant,
            is_local: false,
            caption: format!("Remote user stream (uid: {participant})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_debug_redacts_token() {
        let descriptor = ChannelDescriptor::new("secret-token", "testing", 0);
        let rendered = format!("{:?}", descriptor);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("testing"));
    }

    #[test]
    fn test_role_from_host_toggle() {
        assert_eq!(ClientRole::from_host_toggle(true), ClientRole::Broadcaster);
        assert_eq!(ClientRole::from_host_toggle(false), ClientRole::Audience);
        assert_eq!(ClientRole::default(), ClientRole::Broadcaster);
    }

    #[test]
    fn test_participant_id_serializes_as_number() {
        let json = serde_json::to_string(&ParticipantId(7)).unwrap();
        assert_eq!(json, "7");
    }
}
