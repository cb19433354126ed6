//! Which list owns an element
//!
//! Lists register their root element here instead of attaching themselves to
//! the tree. Ownership questions are answered by walking an element's
//! ancestors and looking each one up in the root index.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::config::SortableConfig;
use crate::controller::ListController;
use crate::host::{HostElement, SortableHost};

new_key_type! {
    /// Unique identifier for a registered list
    pub struct ControllerId;
}

pub struct ControllerRegistry<E> {
    controllers: SlotMap<ControllerId, ListController<E>>,
    by_root: FxHashMap<E, ControllerId>,
    by_container: FxHashMap<E, ControllerId>,
}

impl<E: HostElement> ControllerRegistry<E> {
    pub fn new() -> Self {
        Self {
            controllers: SlotMap::with_key(),
            by_root: FxHashMap::default(),
            by_container: FxHashMap::default(),
        }
    }

    /// Register a list whose items are the children of `root`
    pub fn register<H: SortableHost<Element = E>>(
        &mut self,
        host: &mut H,
        root: E,
        config: SortableConfig,
    ) -> ControllerId {
        self.register_with_container(host, root, root, config)
    }

    /// Register a list mounted on `root` whose items live in `container`
    /// (a table body inside its table, for instance)
    pub fn register_with_container<H: SortableHost<Element = E>>(
        &mut self,
        host: &mut H,
        root: E,
        container: E,
        config: SortableConfig,
    ) -> ControllerId {
        let id = self
            .controllers
            .insert_with_key(|id| ListController::new(id, root, container, config));
        self.by_root.insert(root, id);
        self.by_container.insert(container, id);

        let controller = &self.controllers[id];
        host.add_class(root, &controller.config().classes.base);
        controller.sync_empty_class(host);

        tracing::debug!(?id, ?root, group = ?controller.group(), "registered sortable list");
        id
    }

    /// Remove a list and the marker classes registration added
    pub fn unregister<H: SortableHost<Element = E>>(
        &mut self,
        host: &mut H,
        id: ControllerId,
    ) -> Option<ListController<E>> {
        let controller = self.controllers.remove(id)?;
        self.by_root.remove(&controller.root());
        self.by_container.remove(&controller.container());

        let classes = &controller.config().classes;
        host.remove_class(controller.root(), &classes.base);
        host.remove_class(controller.container(), &classes.empty);
        Some(controller)
    }

    pub fn get(&self, id: ControllerId) -> Option<&ListController<E>> {
        self.controllers.get(id)
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// The list mounted exactly on `element`, if any
    pub fn controller_at(&self, element: E) -> Option<ControllerId> {
        self.by_root.get(&element).copied()
    }

    /// The list whose items are the children of `element`, if any
    pub fn controller_for_container(&self, element: E) -> Option<ControllerId> {
        self.by_container.get(&element).copied()
    }

    /// Find the list that owns `element` from the point of view of `calling`.
    ///
    /// Walks up from `element` (inclusive). A list found on the way is
    /// accepted when it is `calling` itself or shares its group; other lists
    /// are skipped and the walk continues, so nested lists of unrelated
    /// groups do not shadow an outer match.
    pub fn resolve_controller<H: SortableHost<Element = E>>(
        &self,
        host: &H,
        calling: ControllerId,
        element: E,
    ) -> Option<ControllerId> {
        let caller = self.controllers.get(calling)?;

        let mut current = Some(element);
        while let Some(el) = current {
            if let Some(found) = self.controller_at(el).and_then(|id| self.controllers.get(id)) {
                if found.id() == calling || caller.shares_group_with(found) {
                    return Some(found.id());
                }
            }
            current = host.parent(el);
        }
        None
    }

    /// Items containing `target` together with the list they belong to,
    /// innermost first
    pub fn grab_candidates<H: SortableHost<Element = E>>(
        &self,
        host: &H,
        target: E,
    ) -> Vec<(ControllerId, E)> {
        let mut candidates = Vec::new();
        let mut current = Some(target);
        while let Some(el) = current {
            let parent = host.parent(el);
            if let Some(id) = parent.and_then(|p| self.controller_for_container(p)) {
                candidates.push((id, el));
            }
            current = parent;
        }
        candidates
    }
}

impl<E: HostElement> Default for ControllerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blinc_core::Size;
    use blinc_layout::{Document, ElementId, LayoutStyle};

    fn setup() -> (Document, ControllerRegistry<ElementId>) {
        (
            Document::new(Size::new(800.0, 600.0)).unwrap(),
            ControllerRegistry::new(),
        )
    }

    fn list_with_items(
        doc: &mut Document,
        parent: ElementId,
        count: usize,
    ) -> (ElementId, Vec<ElementId>) {
        let list = doc.create(parent, LayoutStyle::flex_column()).unwrap();
        let items = (0..count)
            .map(|_| doc.create(list, LayoutStyle::fixed_size(100.0, 30.0)).unwrap())
            .collect();
        (list, items)
    }

    #[test]
    fn test_register_applies_base_and_empty_classes() {
        let (mut doc, mut registry) = setup();
        let root = doc.root();
        let (empty, _) = list_with_items(&mut doc, root, 0);
        let (full, _) = list_with_items(&mut doc, root, 2);

        registry.register(&mut doc, empty, SortableConfig::default());
        let id = registry.register(&mut doc, full, SortableConfig::default());

        assert!(doc.has_class(empty, "blinc-sortable"));
        assert!(doc.has_class(empty, "blinc-sortable-empty"));
        assert!(!doc.has_class(full, "blinc-sortable-empty"));

        registry.unregister(&mut doc, id).unwrap();
        assert!(!doc.has_class(full, "blinc-sortable"));
        assert_eq!(registry.controller_at(full), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_returns_caller_without_group() {
        let (mut doc, mut registry) = setup();
        let root = doc.root();
        let (a, a_items) = list_with_items(&mut doc, root, 2);
        let (b, b_items) = list_with_items(&mut doc, root, 2);
        let a_id = registry.register(&mut doc, a, SortableConfig::default());
        registry.register(&mut doc, b, SortableConfig::default());

        assert_eq!(registry.resolve_controller(&doc, a_id, a_items[1]), Some(a_id));
        assert_eq!(registry.resolve_controller(&doc, a_id, b_items[0]), None);
        assert_eq!(registry.resolve_controller(&doc, a_id, root), None);
    }

    #[test]
    fn test_resolve_accepts_same_group_only() {
        let (mut doc, mut registry) = setup();
        let root = doc.root();
        let (a, _) = list_with_items(&mut doc, root, 1);
        let (b, b_items) = list_with_items(&mut doc, root, 1);
        let (c, c_items) = list_with_items(&mut doc, root, 1);
        let a_id = registry.register(&mut doc, a, SortableConfig::default().with_group("cards"));
        let b_id = registry.register(&mut doc, b, SortableConfig::default().with_group("cards"));
        registry.register(&mut doc, c, SortableConfig::default().with_group("other"));

        assert_eq!(registry.resolve_controller(&doc, a_id, b_items[0]), Some(b_id));
        assert_eq!(registry.resolve_controller(&doc, a_id, c_items[0]), None);
    }

    #[test]
    fn test_resolve_walks_past_foreign_nested_list() {
        let (mut doc, mut registry) = setup();
        let root = doc.root();
        let (outer, outer_items) = list_with_items(&mut doc, root, 1);
        let (inner, inner_items) = list_with_items(&mut doc, outer_items[0], 1);
        let outer_id = registry.register(&mut doc, outer, SortableConfig::default());
        let inner_id = registry.register(&mut doc, inner, SortableConfig::default());

        assert_eq!(
            registry.resolve_controller(&doc, outer_id, inner_items[0]),
            Some(outer_id)
        );
        assert_eq!(
            registry.resolve_controller(&doc, inner_id, inner_items[0]),
            Some(inner_id)
        );
    }

    #[test]
    fn test_grab_candidates_innermost_first() {
        let (mut doc, mut registry) = setup();
        let root = doc.root();
        let (outer, outer_items) = list_with_items(&mut doc, root, 1);
        let (inner, inner_items) = list_with_items(&mut doc, outer_items[0], 1);
        let outer_id = registry.register(&mut doc, outer, SortableConfig::default());
        let inner_id = registry.register(&mut doc, inner, SortableConfig::default());

        assert_eq!(
            registry.grab_candidates(&doc, inner_items[0]),
            vec![(inner_id, inner_items[0]), (outer_id, outer_items[0])]
        );
        assert!(registry.grab_candidates(&doc, root).is_empty());
    }
}
