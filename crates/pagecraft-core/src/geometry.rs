//! Pure geometry for drag, resize-by-handle and marquee selection.

use crate::element::{Element, ElementId, MIN_ELEMENT_EXTENT};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle size in pixels.
pub const HANDLE_SIZE: f64 = 12.0;

/// Direction of a resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeDirection {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ResizeDirection {
    /// All directions, corners first (hit-test priority order).
    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::Nw,
        ResizeDirection::Ne,
        ResizeDirection::Sw,
        ResizeDirection::Se,
        ResizeDirection::N,
        ResizeDirection::S,
        ResizeDirection::W,
        ResizeDirection::E,
    ];

    /// Compass name of the direction.
    pub fn name(self) -> &'static str {
        match self {
            ResizeDirection::N => "n",
            ResizeDirection::S => "s",
            ResizeDirection::E => "e",
            ResizeDirection::W => "w",
            ResizeDirection::Ne => "ne",
            ResizeDirection::Nw => "nw",
            ResizeDirection::Se => "se",
            ResizeDirection::Sw => "sw",
        }
    }

    /// Where this handle sits on an element's bounding box.
    pub fn handle_position(self, bounds: Rect) -> Point {
        let center = bounds.center();
        match self {
            ResizeDirection::N => Point::new(center.x, bounds.y0),
            ResizeDirection::S => Point::new(center.x, bounds.y1),
            ResizeDirection::E => Point::new(bounds.x1, center.y),
            ResizeDirection::W => Point::new(bounds.x0, center.y),
            ResizeDirection::Ne => Point::new(bounds.x1, bounds.y0),
            ResizeDirection::Nw => Point::new(bounds.x0, bounds.y0),
            ResizeDirection::Se => Point::new(bounds.x1, bounds.y1),
            ResizeDirection::Sw => Point::new(bounds.x0, bounds.y1),
        }
    }
}

impl fmt::Display for ResizeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Translate a position by a pointer delta.
pub fn compute_drag_position(position: Point, delta: Vec2) -> Point {
    position + delta
}

/// Keep a box of `size` at `position` fully inside a `bounds`-sized parent.
///
/// A box larger than the parent is pinned to the parent's origin on that axis.
pub fn clamp_to_bounds(position: Point, size: Size, bounds: Size) -> Point {
    let max_x = (bounds.width - size.width).max(0.0);
    let max_y = (bounds.height - size.height).max(0.0);
    Point::new(position.x.clamp(0.0, max_x), position.y.clamp(0.0, max_y))
}

/// Apply one incremental resize delta through the handle in `direction`.
///
/// Width and height are floored at [`MIN_ELEMENT_EXTENT`], but the position offset
/// always uses the raw delta. Once an element hits the floor, further drags of a
/// west/north handle keep moving its position while the size stays put.
pub fn compute_resize(
    direction: ResizeDirection,
    position: Point,
    size: Size,
    delta: Vec2,
) -> (Point, Size) {
    let (dx, dy) = (delta.x, delta.y);
    let floor = |v: f64| v.max(MIN_ELEMENT_EXTENT);

    let (mut x, mut y) = (position.x, position.y);
    let (mut width, mut height) = (size.width, size.height);

    match direction {
        ResizeDirection::E => {
            width = floor(size.width + dx);
        }
        ResizeDirection::W => {
            width = floor(size.width - dx);
            x += dx;
        }
        ResizeDirection::S => {
            height = floor(size.height + dy);
        }
        ResizeDirection::N => {
            height = floor(size.height - dy);
            y -= dy;
        }
        ResizeDirection::Se => {
            width = floor(size.width + dx);
            height = floor(size.height + dy);
        }
        ResizeDirection::Sw => {
            width = floor(size.width - dx);
            height = floor(size.height + dy);
            x += dx;
        }
        ResizeDirection::Ne => {
            width = floor(size.width + dx);
            height = floor(size.height - dy);
            y -= dy;
        }
        ResizeDirection::Nw => {
            width = floor(size.width - dx);
            height = floor(size.height - dy);
            x += dx;
            y += dy;
        }
    }

    (Point::new(x, y), Size::new(width, height))
}

/// Apply a resize delta to an element, returning the resized copy.
pub fn resize_element(element: &Element, direction: ResizeDirection, delta: Vec2) -> Element {
    let (position, size) = compute_resize(direction, element.position, element.size, delta);
    let mut resized = element.clone();
    resized.position = position;
    resized.size = size;
    resized
}

/// Build a marquee rectangle from two corners given in any order.
pub fn marquee_rect(a: Point, b: Point) -> Rect {
    Rect::from_points(a, b)
}

/// Check whether an element's bounding box is not strictly disjoint from `rect`.
///
/// Touching edges count as intersecting.
pub fn intersects(rect: Rect, element: &Element) -> bool {
    let b = element.bounds();
    !(b.x0 > rect.x1 || b.x1 < rect.x0 || b.y0 > rect.y1 || b.y1 < rect.y0)
}

/// IDs of all elements intersecting `rect`, in document order.
pub fn elements_in_rect<'a>(
    rect: Rect,
    elements: impl IntoIterator<Item = &'a Element>,
) -> Vec<ElementId> {
    elements
        .into_iter()
        .filter(|el| intersects(rect, el))
        .map(Element::id)
        .collect()
}

/// Find which handle of `bounds` (if any) is under `point`.
pub fn hit_test_handle(bounds: Rect, point: Point, tolerance: f64) -> Option<ResizeDirection> {
    let reach = HANDLE_SIZE / 2.0 + tolerance;
    ResizeDirection::ALL.into_iter().find(|dir| {
        let handle = dir.handle_position(bounds);
        (point.x - handle.x).abs() <= reach && (point.y - handle.y).abs() <= reach
    })
}
