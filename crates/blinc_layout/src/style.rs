//! Layout style helpers
//!
//! Every helper disables flex shrinking: list items keep their declared size
//! and overflow their container instead of being squeezed, which is what a
//! scrollable list needs.

pub use taffy::prelude::*;
use taffy::style::Overflow;

/// Helper to create common layout styles
pub struct LayoutStyle;

impl LayoutStyle {
    /// Create a flex column style
    pub fn flex_column() -> Style {
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            flex_shrink: 0.0,
            ..Default::default()
        }
    }

    /// Create a flex row style
    pub fn flex_row() -> Style {
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            flex_shrink: 0.0,
            ..Default::default()
        }
    }

    /// Create a wrapping row (a grid-like flow of cards) of the given width
    pub fn flex_row_wrap(width: f32) -> Style {
        Style {
            flex_wrap: FlexWrap::Wrap,
            size: Size {
                width: Dimension::Length(width),
                height: Dimension::Auto,
            },
            ..Self::flex_row()
        }
    }

    /// Create a fixed size style
    pub fn fixed_size(width: f32, height: f32) -> Style {
        Style {
            size: Size {
                width: Dimension::Length(width),
                height: Dimension::Length(height),
            },
            flex_shrink: 0.0,
            ..Default::default()
        }
    }

    /// Create a vertically scrolling column with a fixed viewport
    pub fn scroll_column(width: f32, height: f32) -> Style {
        Style {
            size: Size {
                width: Dimension::Length(width),
                height: Dimension::Length(height),
            },
            overflow: taffy::geometry::Point {
                x: Overflow::Visible,
                y: Overflow::Scroll,
            },
            ..Self::flex_column()
        }
    }

    /// Apply uniform padding to a style
    pub fn padded(style: Style, px: f32) -> Style {
        Style {
            padding: taffy::geometry::Rect {
                left: LengthPercentage::Length(px),
                right: LengthPercentage::Length(px),
                top: LengthPercentage::Length(px),
                bottom: LengthPercentage::Length(px),
            },
            ..style
        }
    }

    /// Apply uniform margin to a style
    pub fn margined(style: Style, px: f32) -> Style {
        Style {
            margin: uniform_auto(px),
            ..style
        }
    }

    /// Check whether a style clips and scrolls its content vertically
    pub fn scrolls_y(style: &Style) -> bool {
        matches!(style.overflow.y, Overflow::Scroll | Overflow::Hidden)
    }
}

/// A `Rect<LengthPercentageAuto>` with the same length on every side
pub(crate) fn uniform_auto(px: f32) -> taffy::geometry::Rect<LengthPercentageAuto> {
    taffy::geometry::Rect {
        left: LengthPercentageAuto::Length(px),
        right: LengthPercentageAuto::Length(px),
        top: LengthPercentageAuto::Length(px),
        bottom: LengthPercentageAuto::Length(px),
    }
}
