use std::io;

use hookline_types::InstanceId;

/// Failures reported by an instance's outbound send primitives.
#[derive(Debug, thiserror::Error)]
pub enum OutboundError {
    /// Socket-level failure while writing the line.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The instance has no live connection to write to.
    #[error("instance is not connected")]
    NotConnected,

    /// The instance refused to send the line (flood control, length, ...).
    #[error("outbound line rejected: {0}")]
    Rejected(String),
}

/// Errors produced by the event subsystem.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// `respond` was called where there is nothing to reply to.
    #[error("cannot respond to {kind} event: {reason}")]
    InvalidResponse { kind: &'static str, reason: String },

    /// The event was created without an owning instance.
    #[error("event has no owning instance")]
    MissingOwner,

    /// The owner is not the instance type the caller asked for.
    #[error("owner {instance} is not a {expected}")]
    CapabilityMismatch {
        expected: &'static str,
        instance: InstanceId,
    },

    /// The owner's send primitive failed; passed through untouched.
    #[error(transparent)]
    Outbound(#[from] OutboundError),

    /// A listener returned an error while handling an event.
    #[error("listener {listener} failed: {source}")]
    Listener {
        listener: String,
        #[source]
        source: Box<EventError>,
    },

    /// Dispatch configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the hooks crate.
pub type Result<T> = std::result::Result<T, EventError>;
