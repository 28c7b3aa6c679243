//! External engine capability interface.
//!
//! The peer-to-peer protocol, cryptography, and network I/O all live in an
//! external engine. This module defines the narrow surface the shell talks
//! to: lifecycle, identity persistence, profile setters, and event
//! subscription. The engine owns its own concurrency; event handlers may be
//! invoked from an engine-owned thread and must be `Send + Sync`.

mod stub;

pub use stub::StubEngine;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Error reported by the external engine.
///
/// The shell never inspects these; they propagate out of the command loop
/// and terminate the process.
#[derive(Error, Debug)]
#[error("engine error: {0}")]
pub struct EngineError(String);

impl EngineError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// The kinds of events the engine can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ConnectionStatus,
    FriendAction,
    FriendMessage,
    FriendRequest,
    GroupInvite,
    ReadReceipt,
}

impl EventKind {
    /// Every event kind the engine is declared to raise. Registration over
    /// this list guarantees no event arrives without a bound handler.
    pub const ALL: [EventKind; 6] = [
        EventKind::ConnectionStatus,
        EventKind::FriendAction,
        EventKind::FriendMessage,
        EventKind::FriendRequest,
        EventKind::GroupInvite,
        EventKind::ReadReceipt,
    ];
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::ConnectionStatus => "connection-status",
            EventKind::FriendAction => "friend-action",
            EventKind::FriendMessage => "friend-message",
            EventKind::FriendRequest => "friend-request",
            EventKind::GroupInvite => "group-invite",
            EventKind::ReadReceipt => "read-receipt",
        };
        f.write_str(name)
    }
}

/// An inbound network event with its engine-defined payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ConnectionStatus { friend: u32, online: bool },
    FriendAction { friend: u32, action: String },
    FriendMessage { friend: u32, message: String },
    FriendRequest { public_key: String, message: String },
    GroupInvite { friend: u32, group: String },
    ReadReceipt { friend: u32, receipt: u32 },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::ConnectionStatus { .. } => EventKind::ConnectionStatus,
            Event::FriendAction { .. } => EventKind::FriendAction,
            Event::FriendMessage { .. } => EventKind::FriendMessage,
            Event::FriendRequest { .. } => EventKind::FriendRequest,
            Event::GroupInvite { .. } => EventKind::GroupInvite,
            Event::ReadReceipt { .. } => EventKind::ReadReceipt,
        }
    }
}

/// A reaction to an inbound event.
pub type EventHandler = Arc<dyn Fn(&Event) + Send + Sync>;

/// Identifies one attached listener so it can be detached later.
///
/// Closures have no usable identity in Rust, so subscription hands back a
/// token instead of comparing handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Event subscription capability of the engine.
///
/// `subscribe`/`unsubscribe` are synchronous, non-blocking bookkeeping
/// calls; event delivery itself happens on the engine's own schedule.
pub trait EventSource {
    fn subscribe(&self, kind: EventKind, handler: EventHandler) -> ListenerId;
    fn unsubscribe(&self, kind: EventKind, id: ListenerId);
}

/// Full engine capability: network lifecycle, identity persistence,
/// profile setters, and event subscription.
pub trait Engine: EventSource {
    /// Begin network participation.
    fn start(&self) -> Result<(), EngineError>;

    /// End network participation. Safe to call when not running.
    fn stop(&self) -> Result<(), EngineError>;

    fn is_running(&self) -> bool;

    /// The engine's own network address, for display only.
    fn own_address(&self) -> String;

    /// Load identity material from an opaque file owned by the engine.
    fn load_identity(&self, path: &str) -> Result<(), EngineError>;

    /// Persist identity material to an opaque file owned by the engine.
    fn save_identity(&self, path: &str) -> Result<(), EngineError>;

    fn set_display_name(&self, name: &str) -> Result<(), EngineError>;

    /// Set the numeric presence status ("online/away/busy"-style code).
    fn set_presence_status(&self, code: i64) -> Result<(), EngineError>;

    fn set_status_message(&self, text: &str) -> Result<(), EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_roundtrip() {
        let event = Event::FriendMessage {
            friend: 7,
            message: "hi".into(),
        };
        assert_eq!(event.kind(), EventKind::FriendMessage);
    }

    #[test]
    fn test_all_kinds_are_distinct() {
        use std::collections::HashSet;
        let kinds: HashSet<_> = EventKind::ALL.iter().collect();
        assert_eq!(kinds.len(), EventKind::ALL.len());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(EventKind::ReadReceipt.to_string(), "read-receipt");
        assert_eq!(EventKind::ConnectionStatus.to_string(), "connection-status");
    }

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::new("no such file");
        assert!(err.to_string().contains("no such file"));
    }
}
