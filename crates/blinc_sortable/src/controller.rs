//! One sortable list

use crate::config::SortableConfig;
use crate::host::{HostElement, Mutation, SortableHost};
use crate::registry::ControllerId;

/// The logical owner of one list's items and configuration.
///
/// Items are never cached: the host's live children of [`container`] are the
/// list, so external re-renders are always picked up.
///
/// [`container`]: ListController::container
#[derive(Clone, Debug)]
pub struct ListController<E> {
    id: ControllerId,
    root: E,
    container: E,
    config: SortableConfig,
}

impl<E: HostElement> ListController<E> {
    pub(crate) fn new(id: ControllerId, root: E, container: E, config: SortableConfig) -> Self {
        Self {
            id,
            root,
            container,
            config,
        }
    }

    pub fn id(&self) -> ControllerId {
        self.id
    }

    /// The element the list is mounted on
    pub fn root(&self) -> E {
        self.root
    }

    /// The element whose children are the items (the root unless a distinct
    /// body element was given at registration)
    pub fn container(&self) -> E {
        self.container
    }

    pub fn config(&self) -> &SortableConfig {
        &self.config
    }

    pub fn group(&self) -> Option<&str> {
        self.config.group.as_deref()
    }

    /// Whether items may move between this list and `other`
    pub fn shares_group_with(&self, other: &ListController<E>) -> bool {
        self.config.group.is_some() && self.config.group == other.config.group
    }

    pub fn items<H: SortableHost<Element = E>>(&self, host: &H) -> Vec<E> {
        host.children(self.container)
    }

    pub fn is_empty<H: SortableHost<Element = E>>(&self, host: &H) -> bool {
        self.items(host).is_empty()
    }

    /// Toggle the empty-state class to match the current item count
    pub fn sync_empty_class<H: SortableHost<Element = E>>(&self, host: &mut H) {
        let class = &self.config.classes.empty;
        if self.is_empty(host) {
            host.add_class(self.container, class);
        } else {
            host.remove_class(self.container, class);
        }
    }

    /// Put `element` before `before` (or last) in this list.
    ///
    /// Returns `false` without touching the tree when the element already
    /// sits at that position.
    pub fn insert<H: SortableHost<Element = E>>(
        &self,
        host: &mut H,
        element: E,
        before: Option<E>,
    ) -> bool {
        let in_place = match before {
            Some(before) => before == element || host.next_sibling(element) == Some(before),
            None => {
                host.parent(element) == Some(self.container)
                    && host.next_sibling(element).is_none()
            }
        };
        if in_place {
            tracing::trace!(?element, "insert skipped: already in place");
            return false;
        }

        for item in self.items(host) {
            host.add_class(item, &self.config.classes.item);
        }

        host.mutate(
            self.container,
            Mutation::InsertBefore { element, before },
            self.config.transition(),
        );
        self.sync_empty_class(host);
        true
    }

    /// Take `element` out of this list. Elements outside the list are left
    /// alone and `false` is returned.
    pub fn remove<H: SortableHost<Element = E>>(&self, host: &mut H, element: E) -> bool {
        if !host.contains(self.container, element) {
            return false;
        }

        host.mutate(
            self.container,
            Mutation::Detach { element },
            self.config.transition(),
        );
        self.sync_empty_class(host);
        true
    }
}
