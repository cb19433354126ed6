//! The element tree a sortable list operates on
//!
//! Sortable logic never touches a concrete tree. Everything it needs from the
//! platform (ordered children, measured rectangles, hit testing, marker
//! classes, scroll offsets, animated mutations, the floating drag proxy) goes
//! through [`SortableHost`]. `blinc_layout::Document` implements it for
//! headless use.

use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use blinc_core::{Point, Rect};
use blinc_layout::{Document, ElementId, ElementKind};

/// Bounds required of element handles
pub trait HostElement: Copy + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T: Copy + Eq + Hash + Debug + Send + Sync + 'static> HostElement for T {}

/// A structural change applied to a list container
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation<E> {
    /// Move `element` before `before`, or to the end when `before` is `None`
    InsertBefore { element: E, before: Option<E> },
    /// Take `element` out of the tree
    Detach { element: E },
}

pub trait SortableHost {
    type Element: HostElement;

    /// The document element, which carries the global drag-state class
    fn root(&self) -> Self::Element;

    fn parent(&self, element: Self::Element) -> Option<Self::Element>;

    /// Ordered, live children of `element`
    fn children(&self, element: Self::Element) -> Vec<Self::Element>;

    fn next_sibling(&self, element: Self::Element) -> Option<Self::Element>;

    fn index_of(&self, element: Self::Element) -> Option<usize>;

    /// Whether `element` is `ancestor` or lies inside it
    fn contains(&self, ancestor: Self::Element, element: Self::Element) -> bool {
        let mut current = Some(element);
        while let Some(el) = current {
            if el == ancestor {
                return true;
            }
            current = self.parent(el);
        }
        false
    }

    /// Bounding rectangle in viewport coordinates. Detached elements report
    /// an empty rectangle at the origin.
    fn bounding_rect(&self, element: Self::Element) -> Rect;

    fn element_from_point(&self, point: Point) -> Option<Self::Element>;

    /// Editable form controls never start a drag
    fn is_input(&self, element: Self::Element) -> bool;

    fn has_class(&self, element: Self::Element, class: &str) -> bool;

    fn add_class(&mut self, element: Self::Element, class: &str);

    fn remove_class(&mut self, element: Self::Element, class: &str);

    /// Nearest element, starting at `element` itself, that carries `class`
    fn closest_with_class(&self, element: Self::Element, class: &str) -> Option<Self::Element> {
        let mut current = Some(element);
        while let Some(el) = current {
            if self.has_class(el, class) {
                return Some(el);
            }
            current = self.parent(el);
        }
        None
    }

    /// Apply `mutation` to `container`. With a transition duration the
    /// container's children animate into their new places and report
    /// [`is_transitioning`](Self::is_transitioning) until they settle.
    fn mutate(
        &mut self,
        container: Self::Element,
        mutation: Mutation<Self::Element>,
        transition: Option<Duration>,
    );

    fn is_transitioning(&self, element: Self::Element) -> bool;

    /// Create the floating clone that follows the pointer during a drag
    fn create_drag_proxy(&mut self, source: Self::Element) -> Option<Self::Element>;

    /// Place a floating element's top-left corner at `position`
    fn set_position(&mut self, element: Self::Element, position: Point);

    fn destroy(&mut self, element: Self::Element);

    /// Scrollable ancestors of `element`, innermost first
    fn scroll_parents(&self, element: Self::Element) -> Vec<Self::Element>;

    /// Visible area of a scroll container
    fn viewport_rect(&self, element: Self::Element) -> Rect {
        self.bounding_rect(element)
    }

    fn scroll_top(&self, element: Self::Element) -> f32;

    fn set_scroll_top(&mut self, element: Self::Element, offset: f32);

    fn scroll_height(&self, element: Self::Element) -> f32;
}

impl SortableHost for Document {
    type Element = ElementId;

    fn root(&self) -> ElementId {
        Document::root(self)
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        Document::parent(self, element)
    }

    fn children(&self, element: ElementId) -> Vec<ElementId> {
        Document::children(self, element).to_vec()
    }

    fn next_sibling(&self, element: ElementId) -> Option<ElementId> {
        Document::next_sibling(self, element)
    }

    fn index_of(&self, element: ElementId) -> Option<usize> {
        Document::index_of(self, element)
    }

    fn contains(&self, ancestor: ElementId, element: ElementId) -> bool {
        Document::contains(self, ancestor, element)
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.bounds(element)
    }

    fn element_from_point(&self, point: Point) -> Option<ElementId> {
        Document::element_from_point(self, point)
    }

    fn is_input(&self, element: ElementId) -> bool {
        self.kind(element) == ElementKind::Input
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        Document::has_class(self, element, class)
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        Document::add_class(self, element, class);
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        Document::remove_class(self, element, class);
    }

    fn mutate(
        &mut self,
        container: ElementId,
        mutation: Mutation<ElementId>,
        transition: Option<Duration>,
    ) {
        let result = match mutation {
            Mutation::InsertBefore { element, before } => {
                self.insert_before(container, element, before)
            }
            Mutation::Detach { element } => self.detach(element),
        };
        if let Err(err) = result {
            tracing::warn!(?mutation, "sortable mutation failed: {err}");
            return;
        }

        if let Some(duration) = transition {
            for child in Document::children(self, container).to_vec() {
                self.begin_transition(child, duration);
            }
        }
    }

    fn is_transitioning(&self, element: ElementId) -> bool {
        Document::is_transitioning(self, element)
    }

    fn create_drag_proxy(&mut self, source: ElementId) -> Option<ElementId> {
        self.clone_floating(source)
            .map_err(|err| tracing::warn!("failed to create drag proxy: {err}"))
            .ok()
    }

    fn set_position(&mut self, element: ElementId, position: Point) {
        if let Err(err) = Document::set_position(self, element, position) {
            tracing::warn!("failed to position drag proxy: {err}");
        }
    }

    fn destroy(&mut self, element: ElementId) {
        if let Err(err) = Document::destroy(self, element) {
            tracing::warn!("failed to destroy element: {err}");
        }
    }

    fn scroll_parents(&self, element: ElementId) -> Vec<ElementId> {
        Document::scroll_parents(self, element)
    }

    fn scroll_top(&self, element: ElementId) -> f32 {
        Document::scroll_top(self, element)
    }

    fn set_scroll_top(&mut self, element: ElementId, offset: f32) {
        Document::set_scroll_top(self, element, offset);
    }

    fn scroll_height(&self, element: ElementId) -> f32 {
        Document::scroll_height(self, element)
    }
}
