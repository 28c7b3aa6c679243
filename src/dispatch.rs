//! Generic key-to-handler dispatch.
//!
//! Two routers share this module: the shell resolves commands through a
//! [`Registry`], and [`EventBindings`] attaches reaction handlers to the
//! engine's event source with a fallback for kinds nobody claimed.

use std::collections::HashMap;
use std::hash::Hash;

use crate::engine::{EventHandler, EventKind, EventSource, ListenerId};

/// A mapping from keys to handlers.
///
/// Plain bookkeeping over a `HashMap`; the value type is opaque, so the
/// same registry backs command function tables and anything else keyed by
/// an enumerated type.
#[derive(Debug, Default)]
pub struct Registry<K, H> {
    entries: HashMap<K, H>,
}

impl<K: Eq + Hash + Copy, H> Registry<K, H> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Bind a handler to a key, replacing any previous binding.
    pub fn bind(&mut self, key: K, handler: H) {
        self.entries.insert(key, handler);
    }

    /// Look up the handler for a key. `None` means the key is unbound;
    /// callers decide whether that is an error (commands) or falls back
    /// (events).
    pub fn resolve(&self, key: &K) -> Option<&H> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Handlers attached to an external event source, remembered so they can
/// be detached again.
///
/// `register` binds a handler for every declared event kind: the resolver's
/// choice when it has one, otherwise a clone of the fallback. Lookup on the
/// event path therefore never fails. `unregister` detaches exactly what was
/// attached and is safe to call repeatedly.
#[derive(Default)]
pub struct EventBindings {
    bound: Vec<(EventKind, ListenerId)>,
}

impl EventBindings {
    pub fn new() -> Self {
        Self { bound: Vec::new() }
    }

    /// Attach a handler for each kind in `kinds` to `source`.
    ///
    /// Kinds the resolver declines get the fallback, so every declared
    /// kind ends up with a listener.
    pub fn register<S, R>(
        &mut self,
        source: &S,
        kinds: &[EventKind],
        resolve: R,
        fallback: EventHandler,
    ) where
        S: EventSource + ?Sized,
        R: Fn(EventKind) -> Option<EventHandler>,
    {
        for &kind in kinds {
            let handler = resolve(kind).unwrap_or_else(|| fallback.clone());
            let id = source.subscribe(kind, handler);
            self.bound.push((kind, id));
        }
    }

    /// Detach every listener attached by previous `register` calls.
    ///
    /// No-op when nothing is registered.
    pub fn unregister<S>(&mut self, source: &S)
    where
        S: EventSource + ?Sized,
    {
        for (kind, id) in self.bound.drain(..) {
            source.unsubscribe(kind, id);
        }
    }

    /// Number of listeners currently attached.
    pub fn active(&self) -> usize {
        self.bound.len()
    }
}
