//! Device capability requests.

use livestream_ipc::{Capability, PermissionGrant, PermissionStatus};

/// Capabilities the session asks for before configuring the engine.
pub const REQUIRED_CAPABILITIES: [Capability; 2] = [Capability::Microphone, Capability::Camera];

/// Host platform permission prompts.
pub trait PermissionProvider: Send {
    /// Request the given capabilities. Returns one grant per capability.
    fn request(&mut self, capabilities: &[Capability]) -> Vec<PermissionGrant>;
}

/// Provider for hosts that need no explicit grant.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoGrant;

impl PermissionProvider for AutoGrant {
    fn request(&mut self, capabilities: &[Capability]) -> Vec<PermissionGrant> {
        capabilities
            .iter()
            .map(|&capability| PermissionGrant {
                capability,
                status: PermissionStatus::Granted,
            })
            .collect()
    }
}
