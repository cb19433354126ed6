//! Per-press drag state
//!
//! A [`DragSession`] exists from an accepted pointer-down until the matching
//! pointer-up. It starts `Armed`; once the pointer travels past the list's
//! threshold it becomes `Dragging`, creates the floating proxy and starts
//! moving the placeholder (the dragged item itself) between and within lists
//! on every pointer move.

use std::time::Instant;

use blinc_core::events::event_types::{DRAG, POINTER_DOWN, POINTER_UP};
use blinc_core::{EventType, Point, StateMachine, StateTransitions};
use indexmap::IndexSet;

use crate::autoscroll::ScrollTracker;
use crate::events::{emit, SortableDispatcher, SortableEventKind};
use crate::geometry;
use crate::host::{HostElement, SortableHost};
use crate::registry::{ControllerId, ControllerRegistry};

/// Drag interaction states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pressed on an item, threshold not yet exceeded
    Armed,
    Dragging,
}

impl StateTransitions for DragState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            (DragState::Idle, POINTER_DOWN) => Some(DragState::Armed),
            (DragState::Armed, DRAG) => Some(DragState::Dragging),
            (DragState::Armed | DragState::Dragging, POINTER_UP) => Some(DragState::Idle),
            _ => None,
        }
    }
}

/// Where the drag came from
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragOrigin<E> {
    /// Element the press landed on (the item or something inside it)
    pub target: E,
    /// Index of the item in its list at press time
    pub index: usize,
    /// Pointer position at press time
    pub pointer: Point,
    /// Pointer offset from the item's top-left corner, measured when the
    /// drag starts
    pub grab_offset: Point,
}

pub struct DragSession<E> {
    fsm: StateMachine<DragState>,
    controller: ControllerId,
    placeholder: E,
    origin: DragOrigin<E>,
    pointer: Point,
    proxy: Option<E>,
    touched: IndexSet<ControllerId>,
    scroll: Option<ScrollTracker>,
}

impl<E: HostElement> DragSession<E> {
    pub(crate) fn arm(
        controller: ControllerId,
        placeholder: E,
        target: E,
        index: usize,
        pointer: Point,
    ) -> Self {
        let mut fsm = StateMachine::new(DragState::Idle);
        fsm.send(POINTER_DOWN);

        let mut touched = IndexSet::new();
        touched.insert(controller);

        Self {
            fsm,
            controller,
            placeholder,
            origin: DragOrigin {
                target,
                index,
                pointer,
                grab_offset: Point::ZERO,
            },
            pointer,
            proxy: None,
            touched,
            scroll: None,
        }
    }

    pub fn state(&self) -> DragState {
        self.fsm.current_state()
    }

    /// Transition history, for debugging
    pub fn history(&self) -> &[(DragState, EventType, DragState)] {
        self.fsm.history()
    }

    /// The list the drag started in
    pub fn origin_controller(&self) -> ControllerId {
        self.controller
    }

    pub fn origin(&self) -> &DragOrigin<E> {
        &self.origin
    }

    /// The dragged item, which doubles as the landing-slot placeholder
    pub fn placeholder(&self) -> E {
        self.placeholder
    }

    pub fn proxy(&self) -> Option<E> {
        self.proxy
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Every list the placeholder has entered during this drag
    pub fn touched(&self) -> impl Iterator<Item = ControllerId> + '_ {
        self.touched.iter().copied()
    }

    pub(crate) fn set_pointer(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    /// Whether the pointer has travelled past `threshold` on either axis
    pub(crate) fn exceeds_threshold(&self, threshold: f32) -> bool {
        let (dx, dy) = self.pointer.delta_from(self.origin.pointer);
        dx.abs() > threshold || dy.abs() > threshold
    }

    /// Turn the press into a drag: create the proxy, mark the lists, notify
    /// `Start`, start auto-scrolling and place the placeholder once.
    pub(crate) fn start<H: SortableHost<Element = E>>(
        &mut self,
        host: &mut H,
        registry: &ControllerRegistry<E>,
        dispatcher: &SortableDispatcher<E>,
        now: Instant,
    ) {
        let Some(controller) = registry.get(self.controller) else {
            return;
        };
        let Some(proxy) = host.create_drag_proxy(self.placeholder) else {
            tracing::warn!(placeholder = ?self.placeholder, "drag not started: no proxy");
            return;
        };

        let rect = host.bounding_rect(self.placeholder);
        self.origin.grab_offset =
            Point::new(self.pointer.x - rect.left(), self.pointer.y - rect.top());

        let classes = &controller.config().classes;
        host.add_class(proxy, &classes.drag);
        if let Some(custom) = &classes.custom {
            host.add_class(proxy, custom);
        }
        host.add_class(self.placeholder, &classes.placeholder);
        for item in controller.items(host) {
            host.add_class(item, &classes.item);
        }
        let root = host.root();
        host.add_class(root, &classes.drag_state);

        self.proxy = Some(proxy);
        self.fsm.send(DRAG);
        tracing::debug!(
            controller = ?self.controller,
            placeholder = ?self.placeholder,
            "drag started"
        );

        emit(
            dispatcher,
            SortableEventKind::Start,
            self.controller,
            self.placeholder,
        );

        self.scroll = Some(ScrollTracker::start(now));
        self.update(host, registry);
    }

    /// Follow the pointer: move the proxy, then move the placeholder into
    /// whichever list is under the pointer at the resolved position.
    pub(crate) fn update<H: SortableHost<Element = E>>(
        &mut self,
        host: &mut H,
        registry: &ControllerRegistry<E>,
    ) {
        let Some(proxy) = self.proxy else {
            return;
        };
        if host.parent(self.placeholder).is_none() {
            return;
        }

        let offset = self.origin.grab_offset;
        host.set_position(
            proxy,
            Point::new(self.pointer.x - offset.x, self.pointer.y - offset.y),
        );

        let under_pointer = host.element_from_point(self.pointer);
        let Some(target_id) = under_pointer
            .and_then(|element| registry.resolve_controller(&*host, self.controller, element))
        else {
            tracing::trace!(pointer = ?self.pointer, "no sortable list under pointer");
            return;
        };
        let Some(target) = registry.get(target_id) else {
            return;
        };

        let items = target.items(host);
        if items.iter().any(|&item| host.is_transitioning(item)) {
            tracing::trace!(list = ?target_id, "list still animating");
            return;
        }

        let hovered = geometry::find_target(host, &items, self.pointer);
        if !items.is_empty() && hovered.map_or(true, |item| item == self.placeholder) {
            return;
        }

        self.touched.insert(target_id);

        let previous = registry.resolve_controller(&*host, self.controller, self.placeholder);
        if previous != Some(target_id) {
            tracing::debug!(from = ?previous, to = ?target_id, "placeholder changes list");
            if let Some(previous) = previous.and_then(|id| registry.get(id)) {
                previous.remove(host, self.placeholder);
            }
        }

        let before = geometry::resolve_insertion_target(
            host,
            target.container(),
            hovered,
            self.placeholder,
            self.pointer,
        );
        target.insert(host, self.placeholder, before);
    }

    /// One auto-scroll poll; a no-op until the drag has started
    pub(crate) fn tick<H: SortableHost<Element = E>>(
        &mut self,
        host: &mut H,
        now: Instant,
    ) -> Option<E> {
        let pointer = self.pointer;
        self.scroll.as_mut()?.tick(host, pointer, now)
    }

    /// End the session: classify the drop, notify, and strip every marker
    /// this drag added. Safe to call in any state.
    pub(crate) fn finish<H: SortableHost<Element = E>>(
        mut self,
        host: &mut H,
        registry: &ControllerRegistry<E>,
        dispatcher: &SortableDispatcher<E>,
    ) {
        self.fsm.send(POINTER_UP);
        self.scroll = None;

        let Some(proxy) = self.proxy.take() else {
            tracing::debug!(controller = ?self.controller, "released before drag threshold");
            return;
        };

        let origin = self.controller;
        let placeholder = self.placeholder;
        match registry.resolve_controller(&*host, origin, placeholder) {
            Some(current) if current == origin => {
                let index = host.index_of(placeholder);
                if index != Some(self.origin.index) {
                    tracing::debug!(from = self.origin.index, to = ?index, "item moved");
                    emit(dispatcher, SortableEventKind::Moved, origin, placeholder);
                }
            }
            Some(destination) => {
                tracing::debug!(from = ?origin, to = ?destination, "item transferred");
                emit(dispatcher, SortableEventKind::Added, destination, placeholder);
                emit(dispatcher, SortableEventKind::Removed, origin, placeholder);
            }
            None => {
                tracing::warn!(?placeholder, "placeholder has no owning list after drop");
            }
        }

        emit(dispatcher, SortableEventKind::Stop, origin, placeholder);

        host.destroy(proxy);

        let touched: Vec<_> = self.touched.iter().filter_map(|&id| registry.get(id)).collect();
        for list in &touched {
            for item in list.items(host) {
                for other in &touched {
                    let classes = &other.config().classes;
                    host.remove_class(item, &classes.placeholder);
                    host.remove_class(item, &classes.item);
                }
            }
        }
        self.touched.clear();

        if let Some(origin) = registry.get(origin) {
            let root = host.root();
            host.remove_class(root, &origin.config().classes.drag_state);
        }
    }
}
