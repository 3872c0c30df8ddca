//! Event system for property changes
//!
//! Listeners are either global (called for every change, including reloads)
//! or bound to one exact physical key.

use crate::sync::RwLockExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// A change delivered to listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyChange {
    /// Physical key that changed; `None` means the whole set was reloaded
    pub key: Option<String>,
    /// Previous value (not tracked by the store, always `None` for now)
    pub old_value: Option<String>,
    /// New value; `None` when the key was removed
    pub new_value: Option<String>,
}

impl PropertyChange {
    /// Change of a single key
    pub fn key(key: impl Into<String>, new_value: Option<String>) -> Self {
        Self {
            key: Some(key.into()),
            old_value: None,
            new_value,
        }
    }

    /// Whole-set reload
    pub fn reload() -> Self {
        Self {
            key: None,
            old_value: None,
            new_value: None,
        }
    }

    /// True for a whole-set reload
    #[must_use]
    pub fn is_reload(&self) -> bool {
        self.key.is_none()
    }
}

/// Type alias for a change callback
pub type ChangeCallback = Arc<dyn Fn(&PropertyChange) + Send + Sync>;

/// Handle returned on registration, used to unregister
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Manages event listeners for property changes
pub struct EventManager {
    next_id: AtomicU64,

    /// Global listeners (called for all changes)
    global_listeners: RwLock<Vec<(ListenerId, ChangeCallback)>>,

    /// Per-key listeners (called only for changes of that exact key)
    key_listeners: RwLock<HashMap<String, Vec<(ListenerId, ChangeCallback)>>>,
}

impl EventManager {
    /// Create a new event manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            global_listeners: RwLock::new(Vec::new()),
            key_listeners: RwLock::new(HashMap::new()),
        }
    }

    fn allocate_id(&self) -> ListenerId {
        ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Register a global change listener
    pub fn on_change<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        let id = self.allocate_id();
        self.global_listeners
            .write_recovered()
            .push((id, Arc::new(callback)));
        id
    }

    /// Register a listener for one exact key
    pub fn watch<F>(&self, key: &str, callback: F) -> ListenerId
    where
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        let id = self.allocate_id();
        self.key_listeners
            .write_recovered()
            .entry(key.to_string())
            .or_default()
            .push((id, Arc::new(callback)));
        id
    }

    /// Unregister a global listener. Returns false if it was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut guard = self.global_listeners.write_recovered();
        let before = guard.len();
        guard.retain(|(existing, _)| *existing != id);
        guard.len() != before
    }

    /// Unregister a key listener. Returns false if it was not registered for `key`.
    pub fn unwatch(&self, key: &str, id: ListenerId) -> bool {
        let mut guard = self.key_listeners.write_recovered();
        let Some(listeners) = guard.get_mut(key) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        let removed = listeners.len() != before;
        if listeners.is_empty() {
            guard.remove(key);
        }
        removed
    }

    /// Notify matching listeners about a change
    ///
    /// Global listeners run first, then listeners of the changed key, each in
    /// registration order. No lock is held while callbacks run, so a callback
    /// may register or remove listeners.
    pub fn notify(&self, change: &PropertyChange) {
        let global: Vec<ChangeCallback> = self
            .global_listeners
            .read_recovered()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        let keyed: Vec<ChangeCallback> = match &change.key {
            Some(key) => self
                .key_listeners
                .read_recovered()
                .get(key)
                .map(|listeners| listeners.iter().map(|(_, cb)| Arc::clone(cb)).collect())
                .unwrap_or_default(),
            None => Vec::new(),
        };

        for callback in global.iter().chain(keyed.iter()) {
            callback(change);
        }
    }

    /// Number of registered listeners, global and keyed
    pub fn len(&self) -> usize {
        let keyed: usize = self.key_listeners.read_recovered().values().map(Vec::len).sum();
        self.global_listeners.read_recovered().len() + keyed
    }

    /// True when no listener is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all listeners
    pub fn clear(&self) {
        self.global_listeners.write_recovered().clear();
        self.key_listeners.write_recovered().clear();
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("listeners", &self.len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
