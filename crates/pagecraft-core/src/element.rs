//! Element model: the placed visual objects of a page.

use kurbo::{Point, Rect, Size, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Minimum width and height an element can be resized to.
pub const MIN_ELEMENT_EXTENT: f64 = 20.0;

/// Range used for the random placement of toolbar-created elements.
const RANDOM_PLACEMENT_MIN: i32 = 20;
const RANDOM_PLACEMENT_MAX: i32 = 320;

/// Placeholder content for freshly created text elements.
pub const TEXT_PLACEHOLDER: &str = "Double click to edit text";
/// Placeholder content for freshly created buttons.
pub const BUTTON_PLACEHOLDER: &str = "Button";

const STANDARD_SHADOW: &str = "0 4px 6px rgba(0, 0, 0, 0.1)";

/// The closed set of element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Button,
    Image,
    Rectangle,
    Circle,
    Arrow,
    Triangle,
    Star,
    Heart,
    Hexagon,
}

impl ElementKind {
    /// All element kinds, in toolbar order.
    pub const ALL: [ElementKind; 10] = [
        ElementKind::Text,
        ElementKind::Button,
        ElementKind::Image,
        ElementKind::Rectangle,
        ElementKind::Circle,
        ElementKind::Arrow,
        ElementKind::Triangle,
        ElementKind::Star,
        ElementKind::Heart,
        ElementKind::Hexagon,
    ];

    /// Name used on the wire and in drag-and-drop payloads.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Button => "button",
            ElementKind::Image => "image",
            ElementKind::Rectangle => "rectangle",
            ElementKind::Circle => "circle",
            ElementKind::Arrow => "arrow",
            ElementKind::Triangle => "triangle",
            ElementKind::Star => "star",
            ElementKind::Heart => "heart",
            ElementKind::Hexagon => "hexagon",
        }
    }

    /// Size given to new elements of this kind.
    pub fn default_size(self) -> Size {
        match self {
            ElementKind::Text => Size::new(200.0, 40.0),
            ElementKind::Button => Size::new(120.0, 40.0),
            ElementKind::Rectangle => Size::new(120.0, 80.0),
            ElementKind::Circle | ElementKind::Triangle | ElementKind::Heart => {
                Size::new(80.0, 80.0)
            }
            ElementKind::Star | ElementKind::Hexagon => Size::new(100.0, 100.0),
            ElementKind::Arrow => Size::new(150.0, 20.0),
            ElementKind::Image => Size::new(200.0, 150.0),
        }
    }

    /// Style seeded into new elements of this kind.
    pub fn default_style(self) -> StyleMap {
        let filled = |color: &str| {
            style_map([
                ("backgroundColor", StyleValue::from(color)),
                ("boxShadow", StyleValue::from(STANDARD_SHADOW)),
            ])
        };

        match self {
            ElementKind::Text => style_map([
                ("color", StyleValue::from("#000000")),
                ("fontSize", StyleValue::from("16px")),
            ]),
            ElementKind::Button => style_map([
                ("backgroundColor", StyleValue::from("#3b82f6")),
                ("color", StyleValue::from("#ffffff")),
                ("borderRadius", StyleValue::from("4px")),
            ]),
            ElementKind::Rectangle => filled("#3b82f6"),
            ElementKind::Circle => filled("#10b981"),
            ElementKind::Triangle => filled("#8b5cf6"),
            ElementKind::Star => filled("#f59e0b"),
            ElementKind::Heart => filled("#ef4444"),
            ElementKind::Hexagon => filled("#6366f1"),
            ElementKind::Arrow => style_map([
                ("stroke", StyleValue::from("#000000")),
                ("strokeWidth", StyleValue::from("2")),
            ]),
            ElementKind::Image => StyleMap::new(),
        }
    }

    /// Whether elements of this kind carry a text payload.
    pub fn has_content(self) -> bool {
        matches!(self, ElementKind::Text | ElementKind::Button)
    }

    fn placeholder_content(self) -> Option<String> {
        match self {
            ElementKind::Text => Some(TEXT_PLACEHOLDER.to_string()),
            ElementKind::Button => Some(BUTTON_PLACEHOLDER.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown element kind name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown element kind: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for ElementKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

/// A single presentation attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl StyleValue {
    /// Get the value as a string slice, if it is textual.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            StyleValue::Number(_) => None,
        }
    }

    /// Get the value as a number, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            StyleValue::Text(_) => None,
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::Text(s) => f.write_str(s),
        }
    }
}

/// Open mapping of presentation attribute name to value.
///
/// The engine never interprets these keys; they are consumed by the renderer.
pub type StyleMap = BTreeMap<String, StyleValue>;

/// Build a style map from key/value pairs.
pub fn style_map<const N: usize>(entries: [(&str, StyleValue); N]) -> StyleMap {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// A placed visual object on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub(crate) id: ElementId,
    /// Kind of element (determines defaults and editable properties).
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Top-left anchor.
    pub position: Point,
    /// Width and height.
    pub size: Size,
    /// Text payload for text and button elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Resource reference for image elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Presentation attributes.
    #[serde(default)]
    pub style: StyleMap,
    /// Endpoint path for arrow elements, relative to `position`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
}

impl Element {
    /// Create a new element of `kind` at `position` with the kind's defaults.
    pub fn new(kind: ElementKind, position: Point) -> Self {
        let size = kind.default_size();
        let points = match kind {
            ElementKind::Arrow => Some(vec![Point::ZERO, Point::new(size.width, 0.0)]),
            _ => None,
        };

        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            size,
            content: kind.placeholder_content(),
            image_url: (kind == ElementKind::Image).then(String::new),
            style: kind.default_style(),
            points,
        }
    }

    /// Get the unique identifier.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Set the text payload.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Replace the whole style map.
    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = style;
        self
    }

    /// Replace the size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Get the axis-aligned bounding box.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Check if a point lies inside the element's bounding box.
    pub fn hit_test(&self, point: Point) -> bool {
        let b = self.bounds();
        point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
    }

    /// Assign a fresh unique identifier.
    pub fn regenerate_id(&mut self) {
        self.id = Uuid::new_v4();
    }

    /// Deep copy with a fresh id, shifted by `offset` on both axes.
    pub fn duplicate(&self, offset: f64) -> Self {
        let mut copy = self.clone();
        copy.regenerate_id();
        copy.position += Vec2::new(offset, offset);
        copy
    }
}

/// Create an element, placing it at a random offset when no position is given.
pub fn create_element(kind: ElementKind, position: Option<Point>) -> Element {
    let position = position.unwrap_or_else(random_position);
    Element::new(kind, position)
}

/// Pick a pseudo-random integer position inside the placement margin box.
pub fn random_position() -> Point {
    let mut rng = rand::rng();
    let x = rng.random_range(RANDOM_PLACEMENT_MIN..RANDOM_PLACEMENT_MAX);
    let y = rng.random_range(RANDOM_PLACEMENT_MIN..RANDOM_PLACEMENT_MAX);
    Point::new(f64::from(x), f64::from(y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_text_defaults() {
        let el = Element::new(ElementKind::Text, Point::new(10.0, 20.0));
        assert!((el.size.width - 200.0).abs() < f64::EPSILON);
        assert!((el.size.height - 40.0).abs() < f64::EPSILON);
        assert_eq!(el.content.as_deref(), Some(TEXT_PLACEHOLDER));
        assert_eq!(el.style.get("color"), Some(&StyleValue::from("#000000")));
        assert_eq!(el.style.get("fontSize"), Some(&StyleValue::from("16px")));
        assert!(el.image_url.is_none());
        assert!(el.points.is_none());
    }

    #[test]
    fn test_circle_defaults() {
        let el = Element::new(ElementKind::Circle, Point::ZERO);
        assert_eq!(el.size, Size::new(80.0, 80.0));
        assert_eq!(el.style.get("backgroundColor"), Some(&StyleValue::from("#10b981")));
        assert_eq!(el.style.get("boxShadow"), Some(&StyleValue::from(STANDARD_SHADOW)));
        assert!(el.content.is_none());
    }

    #[test]
    fn test_arrow_has_two_point_path() {
        let el = Element::new(ElementKind::Arrow, Point::ZERO);
        assert_eq!(el.size, Size::new(150.0, 20.0));
        assert_eq!(el.points, Some(vec![Point::new(0.0, 0.0), Point::new(150.0, 0.0)]));
    }

    #[test]
    fn test_image_has_empty_url() {
        let el = Element::new(ElementKind::Image, Point::ZERO);
        assert_eq!(el.image_url.as_deref(), Some(""));
        assert!(el.style.is_empty());
    }

    #[test]
    fn test_button_placeholder() {
        let el = Element::new(ElementKind::Button, Point::ZERO);
        assert_eq!(el.content.as_deref(), Some(BUTTON_PLACEHOLDER));
        assert!(ElementKind::Button.has_content());
        assert!(!ElementKind::Image.has_content());
    }

    #[test]
    fn test_ids_unique_in_batch() {
        let ids: HashSet<ElementId> = (0..500)
            .map(|_| Element::new(ElementKind::Rectangle, Point::ZERO).id())
            .collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_random_position_in_margin_box() {
        for _ in 0..200 {
            let el = create_element(ElementKind::Star, None);
            assert!(el.position.x >= 20.0 && el.position.x < 320.0);
            assert!(el.position.y >= 20.0 && el.position.y < 320.0);
            assert!((el.position.x - el.position.x.floor()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_explicit_position_is_kept() {
        let el = create_element(ElementKind::Text, Some(Point::new(400.0, 5.0)));
        assert_eq!(el.position, Point::new(400.0, 5.0));
    }

    #[test]
    fn test_duplicate_offsets_and_keeps_payload() {
        let el = Element::new(ElementKind::Button, Point::new(10.0, 10.0));
        let copy = el.duplicate(20.0);
        assert_ne!(copy.id(), el.id());
        assert_eq!(copy.position, Point::new(30.0, 30.0));
        assert_eq!(copy.kind, el.kind);
        assert_eq!(copy.style, el.style);
        assert_eq!(copy.content, el.content);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("hexagon".parse::<ElementKind>(), Ok(ElementKind::Hexagon));
        assert!(matches!("blob".parse::<ElementKind>(), Err(ParseKindError(_))));
        for kind in ElementKind::ALL {
            assert_eq!(kind.to_string().parse::<ElementKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_json_shape() {
        let el = Element::new(ElementKind::Text, Point::new(1.0, 2.0));
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["position"]["x"], 1.0);
        assert_eq!(json["size"]["width"], 200.0);
        assert!(json.get("imageUrl").is_none());

        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back, el);
    }

    #[test]
    fn test_style_values_keep_variant() {
        let style = style_map([
            ("opacity", StyleValue::from(0.5)),
            ("color", StyleValue::from("#ff0000")),
        ]);
        let json = serde_json::to_string(&style).unwrap();
        let back: StyleMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get("opacity").and_then(StyleValue::as_f64), Some(0.5));
        assert_eq!(back.get("color").and_then(StyleValue::as_str), Some("#ff0000"));
    }

    #[test]
    fn test_hit_test_inclusive_edges() {
        let el = Element::new(ElementKind::Circle, Point::new(10.0, 10.0));
        assert!(el.hit_test(Point::new(10.0, 10.0)));
        assert!(el.hit_test(Point::new(90.0, 90.0)));
        assert!(!el.hit_test(Point::new(91.0, 50.0)));
    }
}
