//! Static registry of joinable channels.

use livestream_ipc::{ChannelDescriptor, ParticipantId};

use crate::SessionError;

const TESTING_TOKEN: &str = "007eJxTYBAN3br3oIL+u5q2kJQPwT5N+5fU/mEtWnbiftZL46+FH3YpMBgbmpsZG6dZGidZGJokpiRbJFoapSWbGRknm1gamqeZXvdYldoQyMiQsvgYIyMDBIL47AwlqcUlmXnpDAwAUpMjMA==";
const TESTING2_TOKEN: &str = "007eJxTYHggK/FtM5+RqZgsh8WGitfnM7xjnvV+ZN1Qu6egxHyF1iMFBmNDczNj4zRL4yQLQ5PElGSLREujtGQzI+NkE0tD8zTTdeGrUhsCGRnaeyewMjJAIIjPwVCSWlySmZduxMAAAGbaIAE=";

/// Ordered, immutable list of channels indexed by position.
#[derive(Debug, Clone)]
pub struct ChannelDirectory {
    channels: Vec<ChannelDescriptor>,
}

impl ChannelDirectory {
    /// Create a directory from the given channels.
    pub fn new(channels: Vec<ChannelDescriptor>) -> Self {
        Self { channels }
    }

    /// The two demo channels shipped with the app.
    pub fn builtin() -> Self {
        Self::new(vec![
            ChannelDescriptor::new(TESTING_TOKEN, "testing", ParticipantId(0)),
            ChannelDescriptor::new(TESTING2_TOKEN, "testing2", ParticipantId(1)),
        ])
    }

    /// Look up a channel by selector.
    pub fn get(&self, index: usize) -> Result<&ChannelDescriptor, SessionError> {
        self.channels.get(index).ok_or(SessionError::UnknownChannel {
            index,
            len: self.channels.len(),
        })
    }

    /// Human-facing label for a selector.
    pub fn label(index: usize) -> String {
        format!("Channel {}", index + 1)
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Returns true if there are no channels.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Channels in selector order.
    pub fn iter(&self) -> impl Iterator<Item = &ChannelDescriptor> {
        self.channels.iter()
    }
}

impl Default for ChannelDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}
