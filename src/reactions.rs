//! Built-in reactions to inbound network events.
//!
//! The shell is a controller, not a full client, so reactions are
//! observational: each one logs what arrived. Kinds without a dedicated
//! reaction fall back to [`log_unhandled`] via the bindings layer, so no
//! event ever goes unrouted.

use std::sync::Arc;

use tracing::info;

use crate::dispatch::EventBindings;
use crate::engine::{Event, EventHandler, EventKind, EventSource};

/// Resolve the dedicated reaction for an event kind, if one exists.
pub fn resolve(kind: EventKind) -> Option<EventHandler> {
    match kind {
        EventKind::ConnectionStatus => Some(Arc::new(on_connection_status)),
        EventKind::FriendMessage => Some(Arc::new(on_friend_message)),
        EventKind::FriendRequest => Some(Arc::new(on_friend_request)),
        EventKind::FriendAction | EventKind::GroupInvite | EventKind::ReadReceipt => None,
    }
}

/// The designated fallback reaction: log the raw event.
pub fn fallback() -> EventHandler {
    Arc::new(log_unhandled)
}

/// Attach the built-in reactions (plus fallback) to an event source.
pub fn bind_all<S: EventSource + ?Sized>(source: &S) -> EventBindings {
    let mut bindings = EventBindings::new();
    bindings.register(source, &EventKind::ALL, resolve, fallback());
    bindings
}

fn on_connection_status(event: &Event) {
    if let Event::ConnectionStatus { friend, online } = event {
        info!(friend = *friend, online = *online, "friend connection status changed");
    }
}

fn on_friend_message(event: &Event) {
    if let Event::FriendMessage { friend, message } = event {
        info!(friend = *friend, message = %message, "friend message received");
    }
}

fn on_friend_request(event: &Event) {
    if let Event::FriendRequest {
        public_key,
        message,
    } = event
    {
        info!(public_key = %public_key, message = %message, "friend request received");
    }
}

fn log_unhandled(event: &Event) {
    info!(kind = %event.kind(), ?event, "unhandled engine event");
}
