//! In-process stand-in for the external engine.
//!
//! Keeps just enough state to exercise the shell end to end: a running
//! flag, a fixed address, the current profile, and the listener table.
//! Identity persistence is logged, not performed; the real engine owns
//! that format.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

use tracing::info;

use super::{Engine, EngineError, Event, EventHandler, EventKind, EventSource, ListenerId};

/// Local engine stub for interactive runs and integration tests.
pub struct StubEngine {
    running: AtomicBool,
    address: String,
    next_listener: AtomicU64,
    listeners: RwLock<HashMap<EventKind, Vec<(ListenerId, EventHandler)>>>,
}

impl StubEngine {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            running: AtomicBool::new(false),
            address: address.into(),
            next_listener: AtomicU64::new(1),
            listeners: RwLock::new(HashMap::new()),
        }
    }

    /// Deliver an event to every listener bound to its kind.
    ///
    /// Delivery is synchronous here; a real engine raises events on its
    /// own thread or loop.
    pub fn raise(&self, event: &Event) {
        let handlers: Vec<EventHandler> = {
            let listeners = self
                .listeners
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            listeners
                .get(&event.kind())
                .map(|bound| bound.iter().map(|(_, h)| h.clone()).collect())
                .unwrap_or_default()
        };
        for handler in handlers {
            handler(event);
        }
    }

    /// Number of listeners currently attached for the given kind.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&kind)
            .map(|bound| bound.len())
            .unwrap_or(0)
    }
}

impl Default for StubEngine {
    fn default() -> Self {
        Self::new("stub-0000000000000000")
    }
}

impl EventSource for StubEngine {
    fn subscribe(&self, kind: EventKind, handler: EventHandler) -> ListenerId {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .entry(kind)
            .or_default()
            .push((id, handler));
        id
    }

    fn unsubscribe(&self, kind: EventKind, id: ListenerId) {
        if let Some(bound) = self
            .listeners
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get_mut(&kind)
        {
            bound.retain(|(bound_id, _)| *bound_id != id);
        }
    }
}

impl Engine for StubEngine {
    fn start(&self) -> Result<(), EngineError> {
        self.running.store(true, Ordering::SeqCst);
        info!("stub engine started");
        Ok(())
    }

    fn stop(&self) -> Result<(), EngineError> {
        self.running.store(false, Ordering::SeqCst);
        info!("stub engine stopped");
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn own_address(&self) -> String {
        self.address.clone()
    }

    fn load_identity(&self, path: &str) -> Result<(), EngineError> {
        if path.is_empty() {
            return Err(EngineError::new("cannot load identity from empty path"));
        }
        info!(path, "stub engine loaded identity");
        Ok(())
    }

    fn save_identity(&self, path: &str) -> Result<(), EngineError> {
        if path.is_empty() {
            return Err(EngineError::new("cannot save identity to empty path"));
        }
        info!(path, "stub engine saved identity");
        Ok(())
    }

    fn set_display_name(&self, name: &str) -> Result<(), EngineError> {
        info!(name, "stub engine set display name");
        Ok(())
    }

    fn set_presence_status(&self, code: i64) -> Result<(), EngineError> {
        info!(code, "stub engine set presence status");
        Ok(())
    }

    fn set_status_message(&self, text: &str) -> Result<(), EngineError> {
        info!(text, "stub engine set status message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn test_start_stop() {
        let engine = StubEngine::default();
        assert!(!engine.is_running());

        engine.start().unwrap();
        assert!(engine.is_running());

        engine.stop().unwrap();
        assert!(!engine.is_running());

        // Stopping again is safe
        engine.stop().unwrap();
        assert!(!engine.is_running());
    }

    #[test]
    fn test_raise_reaches_subscriber() {
        let engine = StubEngine::default();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in_handler = hits.clone();

        engine.subscribe(
            EventKind::FriendMessage,
            Arc::new(move |_| {
                hits_in_handler.fetch_add(1, Ordering::SeqCst);
            }),
        );

        engine.raise(&Event::FriendMessage {
            friend: 1,
            message: "hello".into(),
        });
        // Different kind must not trigger the handler
        engine.raise(&Event::ReadReceipt {
            friend: 1,
            receipt: 9,
        });

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_detaches() {
        let engine = StubEngine::default();
        let id = engine.subscribe(EventKind::GroupInvite, Arc::new(|_| {}));
        assert_eq!(engine.listener_count(EventKind::GroupInvite), 1);

        engine.unsubscribe(EventKind::GroupInvite, id);
        assert_eq!(engine.listener_count(EventKind::GroupInvite), 0);

        // Unsubscribing an unknown id is a no-op
        engine.unsubscribe(EventKind::GroupInvite, id);
        assert_eq!(engine.listener_count(EventKind::GroupInvite), 0);
    }

    #[test]
    fn test_empty_identity_paths_rejected() {
        let engine = StubEngine::default();
        assert!(engine.load_identity("").is_err());
        assert!(engine.save_identity("").is_err());
        assert!(engine.load_identity("id.bin").is_ok());
    }
}
