//! Event dispatch system
//!
//! Pointer input normalized across mouse and touch, plus a keyed dispatcher
//! for notifications emitted by interactive widgets.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::geometry::Point;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    /// Drag event (pointer down + move past the drag threshold)
    pub const DRAG: EventType = 6;

    // Sortable list notifications
    pub const SORT_START: EventType = 90;
    pub const SORT_MOVED: EventType = 91;
    pub const SORT_ADDED: EventType = 92;
    pub const SORT_REMOVED: EventType = 93;
    pub const SORT_STOP: EventType = 94;
}

/// Primary (left) pointer button
pub const PRIMARY_BUTTON: u8 = 0;

/// A pointer event with coordinates already normalized to the viewport.
///
/// `T` is the handle of the element the platform reported as the event target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent<T> {
    pub event_type: EventType,
    pub target: T,
    pub position: Point,
    pub button: u8,
    pub default_prevented: bool,
}

impl<T> PointerEvent<T> {
    pub fn new(event_type: EventType, target: T, x: f32, y: f32) -> Self {
        Self {
            event_type,
            target,
            position: Point::new(x, y),
            button: PRIMARY_BUTTON,
            default_prevented: false,
        }
    }

    pub fn down(target: T, x: f32, y: f32) -> Self {
        Self::new(event_types::POINTER_DOWN, target, x, y)
    }

    pub fn moved(target: T, x: f32, y: f32) -> Self {
        Self::new(event_types::POINTER_MOVE, target, x, y)
    }

    pub fn up(target: T, x: f32, y: f32) -> Self {
        Self::new(event_types::POINTER_UP, target, x, y)
    }

    pub fn with_button(mut self, button: u8) -> Self {
        self.button = button;
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Event handler function type
pub type EventHandler<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Dispatches events to handlers registered per `(key, event type)`, plus
/// wildcard handlers that observe everything.
pub struct EventDispatcher<K, E> {
    handlers: FxHashMap<(K, EventType), Vec<EventHandler<E>>>,
    wildcard: Vec<EventHandler<E>>,
}

impl<K: Copy + Eq + Hash, E> EventDispatcher<K, E> {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
            wildcard: Vec::new(),
        }
    }

    /// Register an event handler for a key and event type
    pub fn register<F>(&mut self, key: K, event_type: EventType, handler: F)
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.handlers
            .entry((key, event_type))
            .or_default()
            .push(Box::new(handler));
    }

    /// Register a handler that receives every dispatched event
    pub fn register_any<F>(&mut self, handler: F)
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.wildcard.push(Box::new(handler));
    }

    /// Drop every handler registered for `key`
    pub fn unregister(&mut self, key: K) {
        self.handlers.retain(|(k, _), _| *k != key);
    }

    /// Dispatch an event to keyed handlers first, then wildcard handlers
    pub fn dispatch(&self, key: K, event_type: EventType, event: &E) {
        if let Some(handlers) = self.handlers.get(&(key, event_type)) {
            for handler in handlers {
                handler(event);
            }
        }
        for handler in &self.wildcard {
            handler(event);
        }
    }
}

impl<K: Copy + Eq + Hash, E> Default for EventDispatcher<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_dispatch_keyed_and_wildcard() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher: EventDispatcher<u64, &'static str> = EventDispatcher::new();

        let keyed = seen.clone();
        dispatcher.register(1, event_types::SORT_START, move |e| {
            keyed.lock().unwrap().push(format!("keyed:{e}"));
        });
        let any = seen.clone();
        dispatcher.register_any(move |e| {
            any.lock().unwrap().push(format!("any:{e}"));
        });

        dispatcher.dispatch(1, event_types::SORT_START, &"a");
        dispatcher.dispatch(2, event_types::SORT_START, &"b");

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["keyed:a".to_string(), "any:a".to_string(), "any:b".to_string()]
        );
    }

    #[test]
    fn test_unregister_drops_key() {
        let count = Arc::new(Mutex::new(0));
        let mut dispatcher: EventDispatcher<u64, ()> = EventDispatcher::new();

        let clone = count.clone();
        dispatcher.register(7, event_types::SORT_STOP, move |_| {
            *clone.lock().unwrap() += 1;
        });
        dispatcher.unregister(7);
        dispatcher.dispatch(7, event_types::SORT_STOP, &());

        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn test_pointer_event_builders() {
        let mut event = PointerEvent::down(3u64, 10.0, 20.0).with_button(2);
        assert_eq!(event.event_type, event_types::POINTER_DOWN);
        assert_eq!(event.position, Point::new(10.0, 20.0));
        assert_eq!(event.button, 2);
        event.prevent_default();
        assert!(event.default_prevented);
    }
}
