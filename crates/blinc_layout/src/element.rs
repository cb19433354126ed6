//! Element records stored in a [`Document`](crate::document::Document)

use std::time::Duration;

use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::scroll::ScrollState;
use crate::tree::LayoutNodeId;

new_key_type! {
    /// Handle to an element in a document
    pub struct ElementId;
}

/// What kind of element this is, as far as pointer handling cares
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Generic container or content box
    #[default]
    Block,
    /// Editable form control (text input, textarea, select, button)
    Input,
}

/// One node of the retained element tree
#[derive(Clone, Debug)]
pub struct Element {
    pub(crate) node: LayoutNodeId,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) classes: SmallVec<[String; 4]>,
    pub(crate) kind: ElementKind,
    /// Floating overlays opt out of hit testing
    pub(crate) hit_testable: bool,
    /// Present on overflow containers only
    pub(crate) scroll: Option<ScrollState>,
    /// Animation clock time at which the running transition settles
    pub(crate) transition_until: Option<Duration>,
    pub(crate) label: Option<String>,
}

impl Element {
    pub(crate) fn new(node: LayoutNodeId, kind: ElementKind) -> Self {
        Self {
            node,
            parent: None,
            children: Vec::new(),
            classes: SmallVec::new(),
            kind,
            hit_testable: true,
            scroll: None,
            transition_until: None,
            label: None,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_scroll_container(&self) -> bool {
        self.scroll.is_some()
    }
}
