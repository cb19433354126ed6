//! Retained element tree with Taffy-computed geometry
//!
//! `Document` is the headless stand-in for a browser DOM: ordered children,
//! marker classes, bounding rectangles after layout, hit testing, vertical
//! scroll containers, floating overlays and timed transitions. Every mutation
//! re-runs layout so geometry queries always reflect the current tree.

use std::time::Duration;

use blinc_core::{Point, Rect, Size};
use slotmap::SlotMap;
use taffy::prelude::{AvailableSpace, Dimension, LengthPercentageAuto, Position, Style};

use crate::element::{Element, ElementId, ElementKind};
use crate::error::LayoutError;
use crate::scroll::ScrollState;
use crate::style::{uniform_auto, LayoutStyle};
use crate::tree::LayoutTree;

pub struct Document {
    elements: SlotMap<ElementId, Element>,
    layout: LayoutTree,
    root: ElementId,
    viewport: Size,
    /// Animation clock, advanced explicitly by the host
    clock: Duration,
}

impl Document {
    /// Create an empty document whose root fills the viewport as a column
    pub fn new(viewport: Size) -> Result<Self, LayoutError> {
        let mut layout = LayoutTree::new();
        let style = Style {
            size: taffy::geometry::Size {
                width: Dimension::Length(viewport.width),
                height: Dimension::Length(viewport.height),
            },
            ..LayoutStyle::flex_column()
        };
        let node = layout.create_node(style)?;

        let mut elements = SlotMap::with_key();
        let root = elements.insert(Element::new(node, ElementKind::Block));

        let mut document = Self {
            elements,
            layout,
            root,
            viewport,
            clock: Duration::ZERO,
        };
        document.relayout()?;
        Ok(document)
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Construction and mutation
    // ─────────────────────────────────────────────────────────────────────

    /// Append a new block element to `parent`
    pub fn create(&mut self, parent: ElementId, style: Style) -> Result<ElementId, LayoutError> {
        self.create_with(parent, style, ElementKind::Block)
    }

    /// Append a new element of the given kind to `parent`
    pub fn create_with(
        &mut self,
        parent: ElementId,
        style: Style,
        kind: ElementKind,
    ) -> Result<ElementId, LayoutError> {
        if !self.elements.contains_key(parent) {
            return Err(LayoutError::UnknownElement);
        }

        let scrolls = LayoutStyle::scrolls_y(&style);
        let node = self.layout.create_node(style)?;
        let mut element = Element::new(node, kind);
        if scrolls {
            element.scroll = Some(ScrollState::default());
        }

        let id = self.elements.insert(element);
        self.attach(parent, id, None)?;
        self.relayout()?;
        Ok(id)
    }

    /// Attach a debugging label, used by tooling to name elements
    pub fn set_label(&mut self, id: ElementId, label: impl Into<String>) {
        if let Some(element) = self.elements.get_mut(id) {
            element.label = Some(label.into());
        }
    }

    pub fn label(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id).and_then(Element::label)
    }

    /// Find the first element carrying `label`
    pub fn find_by_label(&self, label: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|(_, element)| element.label() == Some(label))
            .map(|(id, _)| id)
    }

    /// Move `child` under `parent`, before `before` (or last when `None`).
    ///
    /// A reference that is not a child of `parent` appends, and inserting an
    /// element before itself leaves the tree untouched.
    pub fn insert_before(
        &mut self,
        parent: ElementId,
        child: ElementId,
        before: Option<ElementId>,
    ) -> Result<(), LayoutError> {
        if before == Some(child) {
            return Ok(());
        }
        if !self.elements.contains_key(parent) || !self.elements.contains_key(child) {
            return Err(LayoutError::UnknownElement);
        }

        self.detach_from_parent(child)?;
        self.attach(parent, child, before)?;
        self.relayout()
    }

    /// Move `child` to the end of `parent`
    pub fn append(&mut self, parent: ElementId, child: ElementId) -> Result<(), LayoutError> {
        self.insert_before(parent, child, None)
    }

    /// Remove `child` from its parent without destroying it
    pub fn detach(&mut self, child: ElementId) -> Result<(), LayoutError> {
        if !self.elements.contains_key(child) {
            return Err(LayoutError::UnknownElement);
        }
        self.detach_from_parent(child)?;
        self.relayout()
    }

    /// Remove an element and its whole subtree from the document
    pub fn destroy(&mut self, id: ElementId) -> Result<(), LayoutError> {
        if id == self.root || !self.elements.contains_key(id) {
            return Err(LayoutError::UnknownElement);
        }
        self.detach_from_parent(id)?;

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.elements.remove(current) {
                stack.extend(element.children.iter().copied());
                self.layout.remove_node(element.node);
            }
        }
        self.relayout()
    }

    fn attach(
        &mut self,
        parent: ElementId,
        child: ElementId,
        before: Option<ElementId>,
    ) -> Result<(), LayoutError> {
        let siblings = &self.elements[parent].children;
        let index = before
            .and_then(|b| siblings.iter().position(|&s| s == b))
            .unwrap_or(siblings.len());

        let (parent_node, child_node) = (self.elements[parent].node, self.elements[child].node);
        self.layout.insert_child(parent_node, index, child_node)?;

        self.elements[parent].children.insert(index, child);
        self.elements[child].parent = Some(parent);
        Ok(())
    }

    fn detach_from_parent(&mut self, child: ElementId) -> Result<(), LayoutError> {
        let Some(parent) = self.elements[child].parent.take() else {
            return Ok(());
        };
        self.elements[parent].children.retain(|&c| c != child);

        let (parent_node, child_node) = (self.elements[parent].node, self.elements[child].node);
        self.layout.remove_child(parent_node, child_node)
    }

    fn relayout(&mut self) -> Result<(), LayoutError> {
        let root_node = self.elements[self.root].node;
        self.layout.compute_layout(
            root_node,
            taffy::geometry::Size {
                width: AvailableSpace::Definite(self.viewport.width),
                height: AvailableSpace::Definite(self.viewport.height),
            },
        )?;

        let scrollers: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|(_, element)| element.is_scroll_container())
            .map(|(id, _)| id)
            .collect();
        for id in scrollers {
            let (viewport, content) = self.measure_scroll(id);
            if let Some(scroll) = self.elements[id].scroll.as_mut() {
                scroll.resize(viewport, content);
            }
        }
        Ok(())
    }

    fn measure_scroll(&self, id: ElementId) -> (f32, f32) {
        let element = &self.elements[id];
        let viewport = self
            .layout
            .get_layout(element.node)
            .map_or(0.0, |layout| layout.size.height);
        let content = element
            .children
            .iter()
            .filter_map(|&child| self.layout.get_layout(self.elements[child].node))
            .map(|layout| layout.location.y + layout.size.height)
            .fold(0.0, f32::max);
        (viewport, content)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tree queries
    // ─────────────────────────────────────────────────────────────────────

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id).and_then(|element| element.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(id)
            .map_or(&[], |element| element.children.as_slice())
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    pub fn next_sibling(&self, id: ElementId) -> Option<ElementId> {
        let parent = self.parent(id)?;
        let index = self.index_of(id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Iterate from `id` up to the root, starting with `id` itself
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(
            self.elements.contains_key(id).then_some(id),
            move |&current| self.parent(current),
        )
    }

    /// Whether `id` is `ancestor` or lies inside it
    pub fn contains(&self, ancestor: ElementId, id: ElementId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    pub fn kind(&self, id: ElementId) -> ElementKind {
        self.elements
            .get(id)
            .map_or(ElementKind::Block, Element::kind)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Classes
    // ─────────────────────────────────────────────────────────────────────

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if class.is_empty() {
            return;
        }
        if let Some(element) = self.elements.get_mut(id) {
            if !element.has_class(class) {
                element.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.classes.retain(|c| c != class);
        }
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|element| element.has_class(class))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Geometry
    // ─────────────────────────────────────────────────────────────────────

    /// Bounding rectangle in viewport coordinates, after scroll offsets.
    ///
    /// Elements not connected to the root have no geometry and report
    /// [`Rect::ZERO`], like a detached DOM node.
    pub fn bounds(&self, id: ElementId) -> Rect {
        let Some(element) = self.elements.get(id) else {
            return Rect::ZERO;
        };
        let Some(own) = self.layout.get_layout(element.node) else {
            return Rect::ZERO;
        };

        let (mut x, mut y) = (0.0, 0.0);
        let mut current = Some(id);
        while let Some(cur) = current {
            let element = &self.elements[cur];
            if let Some(layout) = self.layout.get_layout(element.node) {
                x += layout.location.x;
                y += layout.location.y;
            }
            current = element.parent;
            if current.is_none() && cur != self.root {
                return Rect::ZERO;
            }
            if let Some(scroll) = current.and_then(|p| self.elements[p].scroll) {
                y -= scroll.offset_y;
            }
        }

        Rect::new(x, y, own.size.width, own.size.height)
    }

    /// Topmost hit-testable element under `point`
    pub fn element_from_point(&self, point: Point) -> Option<ElementId> {
        self.hit_test(self.root, point)
    }

    fn hit_test(&self, id: ElementId, point: Point) -> Option<ElementId> {
        let element = &self.elements[id];
        if !element.hit_testable {
            return None;
        }

        let inside = self.bounds(id).contains(point);
        if element.is_scroll_container() && !inside {
            return None;
        }

        element
            .children
            .iter()
            .rev()
            .find_map(|&child| self.hit_test(child, point))
            .or_else(|| inside.then_some(id))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────

    pub fn scroll_state(&self, id: ElementId) -> Option<ScrollState> {
        self.elements.get(id).and_then(|element| element.scroll)
    }

    pub fn scroll_top(&self, id: ElementId) -> f32 {
        self.scroll_state(id).map_or(0.0, |scroll| scroll.offset_y)
    }

    pub fn set_scroll_top(&mut self, id: ElementId, offset: f32) {
        if let Some(scroll) = self.elements.get_mut(id).and_then(|e| e.scroll.as_mut()) {
            scroll.set_offset_y(offset);
        }
    }

    pub fn scroll_height(&self, id: ElementId) -> f32 {
        self.scroll_state(id)
            .map_or_else(|| self.bounds(id).height(), |scroll| scroll.scroll_height())
    }

    /// Scrollable ancestors of `id`, innermost first
    pub fn scroll_parents(&self, id: ElementId) -> Vec<ElementId> {
        self.ancestors(id)
            .skip(1)
            .filter(|&a| self.elements[a].is_scroll_container())
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────

    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Advance the animation clock, settling elapsed transitions
    pub fn advance(&mut self, dt: Duration) {
        self.clock += dt;
        let clock = self.clock;
        for (_, element) in self.elements.iter_mut() {
            if element.transition_until.is_some_and(|until| until <= clock) {
                element.transition_until = None;
            }
        }
    }

    /// Start a transition on `id` that settles after `duration`
    pub fn begin_transition(&mut self, id: ElementId, duration: Duration) {
        let until = self.clock + duration;
        if let Some(element) = self.elements.get_mut(id) {
            let settles = element.transition_until.map_or(until, |u| u.max(until));
            element.transition_until = Some(settles);
        }
    }

    pub fn is_transitioning(&self, id: ElementId) -> bool {
        self.elements
            .get(id)
            .and_then(|element| element.transition_until)
            .is_some_and(|until| until > self.clock)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Floating overlays
    // ─────────────────────────────────────────────────────────────────────

    /// Clone `source` into an absolutely positioned overlay on the root.
    ///
    /// The overlay matches the source's border box, keeps its padding, drops
    /// its margins, copies its classes and never takes part in hit testing.
    pub fn clone_floating(&mut self, source: ElementId) -> Result<ElementId, LayoutError> {
        let element = self
            .elements
            .get(source)
            .ok_or(LayoutError::UnknownElement)?;
        let rect = self.bounds(source);
        let source_style = self
            .layout
            .style(element.node)
            .cloned()
            .unwrap_or_default();
        let classes = element.classes.clone();
        let label = element.label.as_ref().map(|l| format!("{l}:drag"));

        let style = Style {
            display: source_style.display,
            flex_direction: source_style.flex_direction,
            position: Position::Absolute,
            inset: taffy::geometry::Rect {
                left: LengthPercentageAuto::Length(rect.x()),
                top: LengthPercentageAuto::Length(rect.y()),
                right: LengthPercentageAuto::Auto,
                bottom: LengthPercentageAuto::Auto,
            },
            size: taffy::geometry::Size {
                width: Dimension::Length(rect.width()),
                height: Dimension::Length(rect.height()),
            },
            padding: source_style.padding,
            margin: uniform_auto(0.0),
            flex_shrink: 0.0,
            ..Default::default()
        };

        let clone = self.create(self.root, style)?;
        let overlay = &mut self.elements[clone];
        overlay.classes = classes;
        overlay.hit_testable = false;
        overlay.label = label;
        Ok(clone)
    }

    /// Move an absolutely positioned element so its top-left sits at `position`
    pub fn set_position(&mut self, id: ElementId, position: Point) -> Result<(), LayoutError> {
        let node = self
            .elements
            .get(id)
            .map(|element| element.node)
            .ok_or(LayoutError::UnknownElement)?;
        let mut style = self.layout.style(node).cloned().unwrap_or_default();
        style.inset.left = LengthPercentageAuto::Length(position.x);
        style.inset.top = LengthPercentageAuto::Length(position.y);
        self.layout.set_style(node, style)?;
        self.relayout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_with_items(doc: &mut Document, count: usize) -> (ElementId, Vec<ElementId>) {
        let list = doc
            .create(doc.root(), LayoutStyle::flex_column())
            .unwrap();
        let items = (0..count)
            .map(|_| doc.create(list, LayoutStyle::fixed_size(100.0, 20.0)).unwrap())
            .collect();
        (list, items)
    }

    #[test]
    fn test_column_layout_bounds() {
        let mut doc = Document::new(Size::new(400.0, 300.0)).unwrap();
        let (_, items) = column_with_items(&mut doc, 3);

        assert_eq!(doc.bounds(items[0]), Rect::new(0.0, 0.0, 100.0, 20.0));
        assert_eq!(doc.bounds(items[2]), Rect::new(0.0, 40.0, 100.0, 20.0));
    }

    #[test]
    fn test_insert_before_reorders_and_relayouts() {
        let mut doc = Document::new(Size::new(400.0, 300.0)).unwrap();
        let (list, items) = column_with_items(&mut doc, 3);

        doc.insert_before(list, items[2], Some(items[0])).unwrap();

        assert_eq!(doc.children(list), &[items[2], items[0], items[1]]);
        assert_eq!(doc.bounds(items[2]).y(), 0.0);
        assert_eq!(doc.index_of(items[1]), Some(2));
        assert_eq!(doc.next_sibling(items[2]), Some(items[0]));
    }

    #[test]
    fn test_insert_before_self_is_noop() {
        let mut doc = Document::new(Size::new(400.0, 300.0)).unwrap();
        let (list, items) = column_with_items(&mut doc, 2);

        doc.insert_before(list, items[0], Some(items[0])).unwrap();
        assert_eq!(doc.children(list), &[items[0], items[1]]);
    }

    #[test]
    fn test_hit_testing_prefers_deepest() {
        let mut doc = Document::new(Size::new(400.0, 300.0)).unwrap();
        let (list, items) = column_with_items(&mut doc, 2);

        assert_eq!(doc.element_from_point(Point::new(10.0, 25.0)), Some(items[1]));
        assert_eq!(doc.element_from_point(Point::new(300.0, 25.0)), Some(list));
        assert_eq!(doc.element_from_point(Point::new(300.0, 250.0)), Some(doc.root()));
    }

    #[test]
    fn test_scroll_container_offsets_children() {
        let mut doc = Document::new(Size::new(400.0, 300.0)).unwrap();
        let scroller = doc
            .create(doc.root(), LayoutStyle::scroll_column(200.0, 100.0))
            .unwrap();
        let items: Vec<_> = (0..10)
            .map(|_| doc.create(scroller, LayoutStyle::fixed_size(100.0, 20.0)).unwrap())
            .collect();

        assert_eq!(doc.scroll_height(scroller), 200.0);
        doc.set_scroll_top(scroller, 30.0);
        assert_eq!(doc.bounds(items[2]).y(), 10.0);

        doc.set_scroll_top(scroller, 500.0);
        assert_eq!(doc.scroll_top(scroller), 100.0);
        assert_eq!(doc.scroll_parents(items[0]), vec![scroller]);
    }

    #[test]
    fn test_floating_clone_is_not_hit() {
        let mut doc = Document::new(Size::new(400.0, 300.0)).unwrap();
        let (_, items) = column_with_items(&mut doc, 2);
        doc.add_class(items[0], "card");

        let proxy = doc.clone_floating(items[0]).unwrap();
        assert!(doc.has_class(proxy, "card"));
        assert_eq!(doc.bounds(proxy), Rect::new(0.0, 0.0, 100.0, 20.0));

        doc.set_position(proxy, Point::new(50.0, 60.0)).unwrap();
        assert_eq!(doc.bounds(proxy).origin, Point::new(50.0, 60.0));
        assert_eq!(doc.element_from_point(Point::new(55.0, 65.0)), Some(doc.root()));
    }

    #[test]
    fn test_transitions_settle_with_clock() {
        let mut doc = Document::new(Size::new(400.0, 300.0)).unwrap();
        let (_, items) = column_with_items(&mut doc, 1);

        doc.begin_transition(items[0], Duration::from_millis(150));
        assert!(doc.is_transitioning(items[0]));

        doc.advance(Duration::from_millis(100));
        assert!(doc.is_transitioning(items[0]));

        doc.advance(Duration::from_millis(50));
        assert!(!doc.is_transitioning(items[0]));
    }

    #[test]
    fn test_detached_elements_have_no_geometry() {
        let mut doc = Document::new(Size::new(400.0, 300.0)).unwrap();
        let (_, items) = column_with_items(&mut doc, 2);

        doc.detach(items[1]).unwrap();
        assert_eq!(doc.bounds(items[1]), Rect::ZERO);
        assert_eq!(doc.parent(items[1]), None);
    }

    #[test]
    fn test_destroy_removes_subtree() {
        let mut doc = Document::new(Size::new(400.0, 300.0)).unwrap();
        let (list, items) = column_with_items(&mut doc, 2);
        let before = doc.len();

        doc.destroy(list).unwrap();
        assert_eq!(doc.len(), before - 3);
        assert!(doc.get(items[0]).is_none());
        assert!(doc.destroy(doc.root()).is_err());
    }
}
