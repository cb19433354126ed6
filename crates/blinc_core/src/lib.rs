//! Blinc Core Runtime
//!
//! This crate provides the foundational primitives for the Blinc UI framework:
//!
//! - **Geometry**: points, sizes, rectangles and axis spans in viewport space
//! - **State Machines**: enum-driven state machines for widget interaction states
//! - **Event Dispatch**: pointer events and keyed notification dispatch
//!
//! # Example
//!
//! ```rust
//! use blinc_core::{Point, Rect};
//!
//! let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
//! assert!(rect.contains(Point::new(50.0, 20.0)));
//! assert!(rect.vertical_span().overlaps(Rect::new(0.0, 39.0, 10.0, 10.0).vertical_span()));
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{event_types, EventDispatcher, EventType, PointerEvent};
pub use fsm::{StateMachine, StateTransitions};
pub use geometry::{Point, Rect, Size, Span};
