//! Blinc Sortable
//!
//! Drag-to-reorder for list-like containers, including transfer between
//! lists that share a group and auto-scrolling of scroll containers while the
//! pointer is held near their edges.
//!
//! The crate never touches a concrete element tree directly; everything goes
//! through [`SortableHost`]. [`blinc_layout::Document`] implements it, which
//! is what the tests and the `blinc-sortable` replay tool use.
//!
//! # Example
//!
//! ```rust
//! use std::time::Instant;
//!
//! use blinc_core::{PointerEvent, Size};
//! use blinc_layout::{Document, LayoutStyle};
//! use blinc_sortable::{SortableConfig, SortableRuntime};
//!
//! let mut doc = Document::new(Size::new(400.0, 300.0)).unwrap();
//! let root = doc.root();
//! let list = doc.create(root, LayoutStyle::flex_column()).unwrap();
//! let a = doc.create(list, LayoutStyle::fixed_size(100.0, 40.0)).unwrap();
//! let b = doc.create(list, LayoutStyle::fixed_size(100.0, 40.0)).unwrap();
//!
//! let mut runtime = SortableRuntime::new();
//! let id = runtime.register(&mut doc, list, SortableConfig::default());
//!
//! let now = Instant::now();
//! assert!(runtime.pointer_down(&mut doc, &mut PointerEvent::down(a, 10.0, 10.0), now));
//! runtime.pointer_move(&mut doc, &PointerEvent::moved(a, 10.0, 70.0), now);
//! runtime.pointer_up(&mut doc, &PointerEvent::up(a, 10.0, 70.0));
//!
//! assert_eq!(runtime.items(&doc, id).unwrap(), vec![b, a]);
//! ```

pub mod autoscroll;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod geometry;
pub mod host;
pub mod registry;
pub mod runtime;
pub mod session;

pub use autoscroll::ScrollTracker;
pub use config::{SortableClasses, SortableConfig};
pub use controller::ListController;
pub use error::SortableError;
pub use events::{SortableDispatcher, SortableEvent, SortableEventKind};
pub use host::{HostElement, Mutation, SortableHost};
pub use registry::{ControllerId, ControllerRegistry};
pub use runtime::SortableRuntime;
pub use session::{DragOrigin, DragSession, DragState};
