//! Notifications emitted while sorting

use blinc_core::events::event_types;
use blinc_core::{EventDispatcher, EventType};

use crate::registry::ControllerId;

/// Kinds of sortable notifications
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortableEventKind {
    /// The press turned into a drag
    Start,
    /// The item was dropped in its own list at a different index
    Moved,
    /// The item arrived in this list from another one
    Added,
    /// The item left this list for another one
    Removed,
    /// The drag ended, whatever the outcome
    Stop,
}

impl SortableEventKind {
    pub fn event_type(self) -> EventType {
        match self {
            SortableEventKind::Start => event_types::SORT_START,
            SortableEventKind::Moved => event_types::SORT_MOVED,
            SortableEventKind::Added => event_types::SORT_ADDED,
            SortableEventKind::Removed => event_types::SORT_REMOVED,
            SortableEventKind::Stop => event_types::SORT_STOP,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SortableEventKind::Start => "start",
            SortableEventKind::Moved => "moved",
            SortableEventKind::Added => "added",
            SortableEventKind::Removed => "removed",
            SortableEventKind::Stop => "stop",
        }
    }
}

/// A notification, carrying the list it concerns and the dragged item
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortableEvent<E> {
    pub kind: SortableEventKind,
    pub controller: ControllerId,
    pub element: E,
}

pub type SortableDispatcher<E> = EventDispatcher<ControllerId, SortableEvent<E>>;

pub(crate) fn emit<E>(
    dispatcher: &SortableDispatcher<E>,
    kind: SortableEventKind,
    controller: ControllerId,
    element: E,
) {
    tracing::debug!(kind = kind.name(), ?controller, "sortable event");
    dispatcher.dispatch(
        controller,
        kind.event_type(),
        &SortableEvent {
            kind,
            controller,
            element,
        },
    );
}
