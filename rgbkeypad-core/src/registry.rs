//! Callback registry
//!
//! Maps (key, event kind) pairs to an ordered list of handlers. Handlers
//! are plain function pointers; state they need lives in the host context
//! `C` passed into every [`Keypad::tick`](crate::Keypad::tick).

use core::fmt;

use heapless::Vec;

use crate::engine::KeyContext;
use crate::key::Key;
use crate::scan::TransitionKind;

/// Maximum handlers across all keys and event kinds
pub const MAX_HANDLERS: usize = 64;

/// Handler invoked for a key event
///
/// Receives the key-scoped context of the key that fired and the host
/// context. An error aborts the tick and is returned to the host.
pub type Handler<C, E> = fn(&mut KeyContext<'_>, &mut C) -> Result<(), E>;

/// Key events handlers can be registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    /// Key went down
    Press,
    /// Key went up
    Release,
    /// Key stayed down for the hold duration
    Hold,
}

impl EventKind {
    /// Event kind dispatched for a transition, if any
    pub fn from_transition(transition: TransitionKind) -> Option<Self> {
        match transition {
            TransitionKind::None => None,
            TransitionKind::Pressed => Some(EventKind::Press),
            TransitionKind::Released => Some(EventKind::Release),
            TransitionKind::HeldFirst => Some(EventKind::Hold),
        }
    }
}

/// Stable handle to a registered handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandlerId(u32);

/// Registry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// No room for another handler
    Full,
}

struct Entry<C, E> {
    id: HandlerId,
    key: Key,
    kind: EventKind,
    handler: Handler<C, E>,
}

/// Ordered handler table
pub struct CallbackRegistry<C, E> {
    entries: Vec<Entry<C, E>, MAX_HANDLERS>,
    next_id: u32,
}

impl<C, E> Default for CallbackRegistry<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, E> fmt::Debug for CallbackRegistry<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("handlers", &self.entries.len())
            .finish()
    }
}

impl<C, E> CallbackRegistry<C, E> {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Append a handler for a key event
    ///
    /// Handlers for the same (key, kind) run in registration order.
    pub fn register(
        &mut self,
        key: Key,
        kind: EventKind,
        handler: Handler<C, E>,
    ) -> Result<HandlerId, RegistryError> {
        let id = HandlerId(self.next_id);
        self.entries
            .push(Entry {
                id,
                key,
                kind,
                handler,
            })
            .map_err(|_| RegistryError::Full)?;
        self.next_id = self.next_id.wrapping_add(1);
        Ok(id)
    }

    /// Remove a handler
    ///
    /// Returns false if the handle is unknown (or already removed). The
    /// order of the remaining handlers is preserved.
    pub fn unregister(&mut self, id: HandlerId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove every handler for a key
    pub fn clear_key(&mut self, key: Key) {
        self.entries.retain(|e| e.key != key);
    }

    /// Handlers for a key event, in registration order
    pub fn handlers_for(
        &self,
        key: Key,
        kind: EventKind,
    ) -> impl Iterator<Item = Handler<C, E>> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.key == key && e.kind == kind)
            .map(|e| e.handler)
    }

    /// Number of handlers for a key event
    pub fn count_for(&self, key: Key, kind: EventKind) -> usize {
        self.handlers_for(key, kind).count()
    }

    /// Total number of registered handlers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no handlers are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u8) -> Key {
        Key::new(n).unwrap()
    }

    fn first(_: &mut KeyContext<'_>, log: &mut u32) -> Result<(), ()> {
        *log = *log * 10 + 1;
        Ok(())
    }

    fn second(_: &mut KeyContext<'_>, log: &mut u32) -> Result<(), ()> {
        *log = *log * 10 + 2;
        Ok(())
    }

    #[test]
    fn test_from_transition() {
        assert_eq!(EventKind::from_transition(TransitionKind::None), None);
        assert_eq!(
            EventKind::from_transition(TransitionKind::HeldFirst),
            Some(EventKind::Hold)
        );
    }

    #[test]
    fn test_lookup_filters_by_key_and_kind() {
        let mut registry: CallbackRegistry<u32, ()> = CallbackRegistry::new();
        registry.register(key(1), EventKind::Press, first).unwrap();
        registry.register(key(1), EventKind::Release, second).unwrap();
        registry.register(key(2), EventKind::Press, second).unwrap();

        assert_eq!(registry.count_for(key(1), EventKind::Press), 1);
        assert_eq!(registry.count_for(key(1), EventKind::Hold), 0);
        assert_eq!(registry.count_for(key(2), EventKind::Press), 1);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_unregister_keeps_order() {
        let mut registry: CallbackRegistry<u32, ()> = CallbackRegistry::new();
        let a = registry.register(key(0), EventKind::Hold, first).unwrap();
        let b = registry.register(key(0), EventKind::Hold, second).unwrap();
        registry.register(key(0), EventKind::Hold, first).unwrap();
        assert_ne!(a, b);

        assert!(registry.unregister(a));
        assert!(!registry.unregister(a));
        assert_eq!(registry.count_for(key(0), EventKind::Hold), 2);

        registry.clear_key(key(0));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_full_registry() {
        let mut registry: CallbackRegistry<u32, ()> = CallbackRegistry::new();
        for _ in 0..MAX_HANDLERS {
            registry.register(key(4), EventKind::Press, first).unwrap();
        }
        assert_eq!(
            registry.register(key(4), EventKind::Press, first),
            Err(RegistryError::Full)
        );
    }
}
