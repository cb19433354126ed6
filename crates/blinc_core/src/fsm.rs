//! State Machine Runtime
//!
//! Flat state machines whose states are user-defined enums. Each state type
//! maps incoming events to its successor through [`StateTransitions`], and the
//! [`StateMachine`] wrapper tracks the current state plus a transition history
//! for debugging.

use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

use crate::events::EventType;

/// Trait for user-defined state types that can handle event transitions
///
/// # Example
///
/// ```
/// use blinc_core::events::event_types::*;
/// use blinc_core::fsm::StateTransitions;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// enum Press {
///     #[default]
///     Up,
///     Down,
/// }
///
/// impl StateTransitions for Press {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         match (self, event) {
///             (Press::Up, POINTER_DOWN) => Some(Press::Down),
///             (Press::Down, POINTER_UP) => Some(Press::Up),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Press::Up.on_event(POINTER_DOWN), Some(Press::Down));
/// ```
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
    /// History of state transitions (for debugging)
    history: SmallVec<[(S, EventType, S); 4]>,
}

impl<S: StateTransitions> StateMachine<S> {
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
            history: SmallVec::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, EventType, S)] {
        &self.history
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: EventType) -> bool {
        self.current_state.on_event(event).is_some()
    }

    /// Send an event, returning the new state if a transition happened
    pub fn send(&mut self, event: EventType) -> Option<S> {
        let from = self.current_state;
        let to = from.on_event(event)?;

        tracing::trace!(?from, ?to, event, "fsm transition");

        self.current_state = to;
        self.history.push((from, event, to));
        Some(to)
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
