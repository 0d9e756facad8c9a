//! The page document: ordered elements plus the canvas background.

use crate::element::{Element, ElementId};
use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Background given to new documents.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Error returned when a color string is not a hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color: {0}")]
pub struct ParseColorError(pub String);

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` into a color.
pub fn parse_hex_color(s: &str) -> Result<Color, ParseColorError> {
    let err = || ParseColorError(s.to_string());
    let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
    if !hex.is_ascii() {
        return Err(err());
    }

    let channel = |i: usize, len: usize| -> Result<u8, ParseColorError> {
        let digits = &hex[i * len..(i + 1) * len];
        let value = u8::from_str_radix(digits, 16).map_err(|_| err())?;
        // Short form: "f" means "ff".
        Ok(if len == 1 { value * 17 } else { value })
    };

    let (r, g, b, a) = match hex.len() {
        3 => (channel(0, 1)?, channel(1, 1)?, channel(2, 1)?, 255),
        6 => (channel(0, 2)?, channel(1, 2)?, channel(2, 2)?, 255),
        8 => (channel(0, 2)?, channel(1, 2)?, channel(2, 2)?, channel(3, 2)?),
        _ => return Err(err()),
    };

    Ok(Color::from_rgba8(r, g, b, a))
}

/// The full serializable canvas state. This is the unit of undo/redo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Elements in paint order (later entries render above earlier ones).
    elements: Vec<Element>,
    /// Canvas background color, passed through to the renderer unvalidated.
    canvas_background: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with the default background.
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), DEFAULT_BACKGROUND)
    }

    /// Create a document from an element list and a background.
    pub fn from_parts(elements: Vec<Element>, canvas_background: impl Into<String>) -> Self {
        Self {
            elements,
            canvas_background: canvas_background.into(),
        }
    }

    /// Elements in paint order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The raw background color value.
    pub fn canvas_background(&self) -> &str {
        &self.canvas_background
    }

    /// The background parsed as a color, for renderers.
    pub fn background_color(&self) -> Result<Color, ParseColorError> {
        parse_hex_color(&self.canvas_background)
    }

    /// Get an element by ID.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id() == id)
    }

    /// Check if an element with this ID exists.
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.iter().any(|el| el.id() == id)
    }

    /// All element IDs in paint order.
    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(Element::id).collect()
    }

    /// Find elements under a point, topmost first.
    pub fn elements_at_point(&self, point: Point) -> Vec<ElementId> {
        self.elements
            .iter()
            .rev()
            .filter(|el| el.hit_test(point))
            .map(Element::id)
            .collect()
    }

    /// Bounding box of all elements.
    pub fn bounds(&self) -> Option<Rect> {
        self.elements
            .iter()
            .map(Element::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    /// Check if the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub(crate) fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Replace the element with the same ID. Returns false if there is none.
    pub(crate) fn replace(&mut self, element: Element) -> bool {
        match self.elements.iter_mut().find(|el| el.id() == element.id()) {
            Some(slot) => {
                *slot = element;
                true
            }
            None => false,
        }
    }

    /// Remove every element whose ID is in `ids`. Returns how many were removed.
    pub(crate) fn remove_all(&mut self, ids: &[ElementId]) -> usize {
        let before = self.elements.len();
        self.elements.retain(|el| !ids.contains(&el.id()));
        before - self.elements.len()
    }

    pub(crate) fn set_background(&mut self, color: impl Into<String>) {
        self.canvas_background = color.into();
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn test_new_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.canvas_background(), DEFAULT_BACKGROUND);
        assert!(doc.bounds().is_none());
    }

    #[test]
    fn test_replace_and_remove() {
        let mut doc = Document::new();
        let el = Element::new(ElementKind::Text, Point::ZERO);
        let id = el.id();
        doc.push(el.clone());

        let mut moved = el.clone();
        moved.position = Point::new(5.0, 5.0);
        assert!(doc.replace(moved));
        assert_eq!(doc.get(id).map(|e| e.position), Some(Point::new(5.0, 5.0)));

        let stranger = Element::new(ElementKind::Text, Point::ZERO);
        assert!(!doc.replace(stranger.clone()));
        assert_eq!(doc.remove_all(&[stranger.id()]), 0);
        assert_eq!(doc.remove_all(&[id]), 1);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_elements_at_point_topmost_first() {
        let mut doc = Document::new();
        let below = Element::new(ElementKind::Rectangle, Point::new(0.0, 0.0));
        let above = Element::new(ElementKind::Rectangle, Point::new(50.0, 50.0));
        doc.push(below.clone());
        doc.push(above.clone());

        assert_eq!(doc.elements_at_point(Point::new(60.0, 60.0)), vec![above.id(), below.id()]);
        assert_eq!(doc.elements_at_point(Point::new(10.0, 10.0)), vec![below.id()]);
        assert!(doc.elements_at_point(Point::new(500.0, 500.0)).is_empty());
    }

    #[test]
    fn test_bounds_union() {
        let mut doc = Document::new();
        doc.push(Element::new(ElementKind::Circle, Point::new(0.0, 0.0)));
        doc.push(Element::new(ElementKind::Circle, Point::new(100.0, 200.0)));
        assert_eq!(doc.bounds(), Some(Rect::new(0.0, 0.0, 180.0, 280.0)));
    }

    #[test]
    fn test_json_roundtrip_is_exact() {
        let mut doc = Document::from_parts(Vec::new(), "#f8f9fa");
        doc.push(Element::new(ElementKind::Arrow, Point::new(3.5, 4.25)));
        doc.push(Element::new(ElementKind::Image, Point::new(10.0, 10.0)));
        doc.push(Element::new(ElementKind::Button, Point::new(7.0, 8.0)));

        let json = doc.to_json().unwrap();
        assert!(json.contains("\"canvasBackground\""));
        let back = Document::from_json(&json).unwrap();
        assert_eq!(back, doc);
    }

    fn rgba(color: Color) -> (u8, u8, u8, u8) {
        let c = color.to_rgba8();
        (c.r, c.g, c.b, c.a)
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ffffff").map(rgba), Ok((255, 255, 255, 255)));
        assert_eq!(parse_hex_color("#f80").map(rgba), Ok((255, 136, 0, 255)));
        assert_eq!(parse_hex_color("#10b98180").map(rgba), Ok((16, 185, 129, 128)));
        assert!(parse_hex_color("red").is_err());
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#gggggg").is_err());
    }

    #[test]
    fn test_background_color() {
        let doc = Document::from_parts(Vec::new(), "#e9ecef");
        assert_eq!(doc.background_color().map(rgba), Ok((0xe9, 0xec, 0xef, 255)));
    }
}
