//! Transient message types.

use chrono::{DateTime, Utc};
use std::fmt;

/// Severity of a transient message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Success,
    Error,
    Info,
    Warning,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        })
    }
}

/// Display slot a message is raised on.
///
/// Each channel shows at most one message; a newer message on the same channel
/// replaces the older one and restarts its expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Status line attached to the product form.
    Inline,
    /// Floating popup notification.
    Toast,
}

/// A message with a bounded lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientMessage {
    pub kind: MessageKind,
    pub text: String,
    pub raised_at: DateTime<Utc>,
}

impl TransientMessage {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            raised_at: Utc::now(),
        }
    }
}
