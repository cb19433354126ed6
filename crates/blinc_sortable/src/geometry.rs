//! Where in a list the pointer is
//!
//! These functions only read measured rectangles; they never introspect flex
//! or grid settings. A list counts as a horizontal flow as soon as two of its
//! items sit side by side, and insertion points are chosen against the
//! hovered item's midpoints.

use blinc_core::{Point, Rect};

use crate::host::{Mutation, SortableHost};

/// First item whose bounding rectangle contains `point`
pub fn find_target<H: SortableHost>(
    host: &H,
    items: &[H::Element],
    point: Point,
) -> Option<H::Element> {
    items
        .iter()
        .copied()
        .find(|&item| host.bounding_rect(item).contains(point))
}

/// Whether any two items have disjoint horizontal projections, meaning the
/// list flows into rows rather than a single vertical stack.
pub fn is_flow_horizontal<H: SortableHost>(host: &H, items: &[H::Element]) -> bool {
    let rects: Vec<Rect> = items.iter().map(|&item| host.bounding_rect(item)).collect();
    rects.iter().enumerate().any(|(i, a)| {
        rects[i + 1..]
            .iter()
            .any(|b| !a.horizontal_span().overlaps(b.horizontal_span()))
    })
}

/// Pick the sibling `placeholder` should be inserted before so it lands where
/// the pointer is. `None` means append (or, for an empty container, that
/// there is nothing to insert against).
///
/// A container holding a single item gives no flow information on its own,
/// so the placeholder is appended for the duration of the measurement and
/// then put back where it was.
pub fn resolve_insertion_target<H: SortableHost>(
    host: &mut H,
    container: H::Element,
    target: Option<H::Element>,
    placeholder: H::Element,
    point: Point,
) -> Option<H::Element> {
    let items = host.children(container);
    if items.is_empty() {
        return None;
    }
    let target = target?;

    let horizontal = if items.len() == 1 {
        probe_flow_with(host, container, placeholder)
    } else {
        is_flow_horizontal(host, &items)
    };

    let rect = host.bounding_rect(target);
    if !horizontal {
        return if point.y < rect.top() + rect.height() / 2.0 {
            Some(target)
        } else {
            host.next_sibling(target)
        };
    }

    let placeholder_rect = host.bounding_rect(placeholder);
    let same_line = rect
        .vertical_span()
        .overlaps(placeholder_rect.vertical_span());

    let after = if same_line {
        point.x > rect.left() + rect.width() / 2.0
    } else {
        placeholder_rect.top() < rect.top()
    };

    if after {
        host.next_sibling(target)
    } else {
        Some(target)
    }
}

fn probe_flow_with<H: SortableHost>(
    host: &mut H,
    container: H::Element,
    placeholder: H::Element,
) -> bool {
    let home = host
        .parent(placeholder)
        .map(|parent| (parent, host.next_sibling(placeholder)));

    host.mutate(
        container,
        Mutation::InsertBefore {
            element: placeholder,
            before: None,
        },
        None,
    );
    let horizontal = is_flow_horizontal(host, &host.children(container));

    match home {
        Some((parent, before)) => host.mutate(
            parent,
            Mutation::InsertBefore {
                element: placeholder,
                before,
            },
            None,
        ),
        None => host.mutate(
            container,
            Mutation::Detach {
                element: placeholder,
            },
            None,
        ),
    }

    horizontal
}
