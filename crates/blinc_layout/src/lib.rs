//! Blinc Layout Engine
//!
//! Flexbox layout powered by Taffy, plus the retained [`Document`] tree that
//! interactive widgets query for geometry, hit testing and scrolling.

pub mod document;
pub mod element;
pub mod error;
pub mod scroll;
pub mod style;
pub mod tree;

pub use document::Document;
pub use element::{Element, ElementId, ElementKind};
pub use error::LayoutError;
pub use scroll::ScrollState;
pub use style::LayoutStyle;
pub use tree::{LayoutNodeId, LayoutTree};
