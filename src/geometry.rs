//! Rectangles in client space and their page-relative counterparts.

use crate::dom::DomNode;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in CSS pixels (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Translate this rect into the coordinate space whose origin is `origin`'s top-left.
    /// Width and height are unchanged.
    pub fn relative_to(&self, origin: &Rect) -> Rect {
        Rect {
            x: self.x - origin.x,
            y: self.y - origin.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Smallest rect containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Rect {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }
}

/// Bounding box of a sequence of rects, or `None` when the sequence is empty.
pub fn union_all<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
    rects
        .into_iter()
        .copied()
        .reduce(|acc, rect| acc.union(&rect))
}

/// Client rects of `element` expressed relative to the origin of `surface`'s
/// bounding client rect, in the element's native rect order.
///
/// An element that wraps across lines or columns yields one rect per box. An
/// element that is not rendered yields none.
pub fn relative_client_rects(element: &DomNode, surface: &DomNode) -> Vec<Rect> {
    let origin = surface.bounding_client_rect();
    element
        .client_rects()
        .iter()
        .map(|rect| rect.relative_to(&origin))
        .collect()
}
