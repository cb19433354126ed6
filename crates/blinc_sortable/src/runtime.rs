//! Sortable runtime
//!
//! [`SortableRuntime`] is what a host wires its pointer events into. It owns
//! every registered list, the notification listeners and the single active
//! [`DragSession`].
//!
//! ```ignore
//! let mut runtime = SortableRuntime::new();
//! let list = runtime.register(&mut doc, container, SortableConfig::default());
//! runtime.on(list, SortableEventKind::Moved, |event| println!("{:?}", event.element));
//!
//! runtime.pointer_down(&mut doc, &mut PointerEvent::down(item, 10.0, 10.0), now);
//! runtime.pointer_move(&mut doc, &PointerEvent::moved(item, 10.0, 80.0), now);
//! runtime.pointer_up(&mut doc, &PointerEvent::up(item, 10.0, 80.0));
//! ```

use std::time::Instant;

use blinc_core::events::PRIMARY_BUTTON;
use blinc_core::PointerEvent;

use crate::config::SortableConfig;
use crate::controller::ListController;
use crate::error::SortableError;
use crate::events::{SortableDispatcher, SortableEvent, SortableEventKind};
use crate::host::{HostElement, SortableHost};
use crate::registry::{ControllerId, ControllerRegistry};
use crate::session::{DragSession, DragState};

pub struct SortableRuntime<E> {
    registry: ControllerRegistry<E>,
    dispatcher: SortableDispatcher<E>,
    session: Option<DragSession<E>>,
}

impl<E: HostElement> SortableRuntime<E> {
    pub fn new() -> Self {
        Self {
            registry: ControllerRegistry::new(),
            dispatcher: SortableDispatcher::new(),
            session: None,
        }
    }

    /// Make the children of `root` sortable
    pub fn register<H: SortableHost<Element = E>>(
        &mut self,
        host: &mut H,
        root: E,
        config: SortableConfig,
    ) -> ControllerId {
        self.registry.register(host, root, config)
    }

    /// Make the children of `container` sortable, with the list mounted on
    /// `root`
    pub fn register_with_container<H: SortableHost<Element = E>>(
        &mut self,
        host: &mut H,
        root: E,
        container: E,
        config: SortableConfig,
    ) -> ControllerId {
        self.registry
            .register_with_container(host, root, container, config)
    }

    /// Remove a list along with its listeners. A drag that started in it is
    /// cancelled first.
    pub fn unregister<H: SortableHost<Element = E>>(
        &mut self,
        host: &mut H,
        id: ControllerId,
    ) -> Result<(), SortableError> {
        if self.registry.get(id).is_none() {
            return Err(SortableError::UnknownController(id));
        }
        if self
            .session
            .as_ref()
            .is_some_and(|session| session.origin_controller() == id)
        {
            self.cancel(host);
        }

        self.dispatcher.unregister(id);
        self.registry
            .unregister(host, id)
            .map(|_| ())
            .ok_or(SortableError::UnknownController(id))
    }

    pub fn registry(&self) -> &ControllerRegistry<E> {
        &self.registry
    }

    pub fn controller(&self, id: ControllerId) -> Result<&ListController<E>, SortableError> {
        self.registry
            .get(id)
            .ok_or(SortableError::UnknownController(id))
    }

    /// Current items of a list, in order
    pub fn items<H: SortableHost<Element = E>>(
        &self,
        host: &H,
        id: ControllerId,
    ) -> Result<Vec<E>, SortableError> {
        Ok(self.controller(id)?.items(host))
    }

    /// Listen for `kind` notifications concerning list `id`
    pub fn on<F>(&mut self, id: ControllerId, kind: SortableEventKind, handler: F)
    where
        F: Fn(&SortableEvent<E>) + Send + Sync + 'static,
    {
        self.dispatcher.register(id, kind.event_type(), handler);
    }

    /// Listen for every notification of every list
    pub fn on_any<F>(&mut self, handler: F)
    where
        F: Fn(&SortableEvent<E>) + Send + Sync + 'static,
    {
        self.dispatcher.register_any(handler);
    }

    pub fn session(&self) -> Option<&DragSession<E>> {
        self.session.as_ref()
    }

    /// Whether an item is being dragged (past the threshold)
    pub fn is_dragging(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.state() == DragState::Dragging)
    }

    /// Handle a pointer press. Returns whether it armed a drag; in that case
    /// the event is marked as handled.
    pub fn pointer_down<H: SortableHost<Element = E>>(
        &mut self,
        host: &mut H,
        event: &mut PointerEvent<E>,
        now: Instant,
    ) -> bool {
        if self.session.is_some() {
            tracing::trace!("pointer down ignored: drag in progress");
            return false;
        }
        if event.default_prevented || event.button != PRIMARY_BUTTON {
            return false;
        }

        let target = event.target;
        if host.is_input(target) {
            return false;
        }

        for (id, item) in self.registry.grab_candidates(&*host, target) {
            let Some(controller) = self.registry.get(id) else {
                continue;
            };
            let config = controller.config();
            if host
                .closest_with_class(target, &config.classes.no_drag)
                .is_some()
            {
                continue;
            }
            if let Some(handle) = &config.handle {
                if host.closest_with_class(target, handle).is_none() {
                    continue;
                }
            }
            let Some(index) = host.index_of(item) else {
                continue;
            };

            event.prevent_default();
            let threshold = config.threshold;
            tracing::debug!(controller = ?id, ?item, index, "drag armed");

            let mut session = DragSession::arm(id, item, target, index, event.position);
            if threshold <= 0.0 {
                session.start(host, &self.registry, &self.dispatcher, now);
            }
            self.session = Some(session);
            return true;
        }
        false
    }

    /// Handle pointer movement while a drag is armed or running
    pub fn pointer_move<H: SortableHost<Element = E>>(
        &mut self,
        host: &mut H,
        event: &PointerEvent<E>,
        now: Instant,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.set_pointer(event.position);

        match session.state() {
            DragState::Armed => {
                let threshold = self
                    .registry
                    .get(session.origin_controller())
                    .map_or(0.0, |controller| controller.config().threshold);
                if session.exceeds_threshold(threshold) {
                    session.start(host, &self.registry, &self.dispatcher, now);
                }
            }
            DragState::Dragging => session.update(host, &self.registry),
            DragState::Idle => {}
        }
    }

    /// Handle the pointer release that ends the drag
    pub fn pointer_up<H: SortableHost<Element = E>>(
        &mut self,
        host: &mut H,
        event: &PointerEvent<E>,
    ) {
        if let Some(session) = self.session.as_mut() {
            session.set_pointer(event.position);
        }
        self.cancel(host);
    }

    /// End the active session, if any, exactly as a pointer release would
    pub fn cancel<H: SortableHost<Element = E>>(&mut self, host: &mut H) {
        if let Some(session) = self.session.take() {
            session.finish(host, &self.registry, &self.dispatcher);
        }
    }

    /// Drive auto-scrolling. Hosts call this every poll interval while a
    /// drag is running; returns the container that was scrolled, if any.
    pub fn tick<H: SortableHost<Element = E>>(&mut self, host: &mut H, now: Instant) -> Option<E> {
        self.session.as_mut()?.tick(host, now)
    }
}

impl<E: HostElement> Default for SortableRuntime<E> {
    fn default() -> Self {
        Self::new()
    }
}
