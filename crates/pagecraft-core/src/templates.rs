//! Built-in page templates.

use crate::document::Document;
use crate::element::{Element, ElementKind, StyleValue, style_map};
use kurbo::Point;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A named starter layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Portfolio,
    BusinessCard,
    SocialPost,
}

/// Error returned when parsing an unknown template name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown template: {0}")]
pub struct ParseTemplateError(pub String);

impl Template {
    /// All templates.
    pub const ALL: [Template; 3] = [Template::Portfolio, Template::BusinessCard, Template::SocialPost];

    /// Name used by the template picker.
    pub fn name(self) -> &'static str {
        match self {
            Template::Portfolio => "portfolio",
            Template::BusinessCard => "business-card",
            Template::SocialPost => "social-post",
        }
    }

    /// Build the template document. Every call yields fresh element IDs.
    pub fn build(self) -> Document {
        match self {
            Template::Portfolio => portfolio(),
            Template::BusinessCard => business_card(),
            Template::SocialPost => social_post(),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Template {
    type Err = ParseTemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| ParseTemplateError(s.to_string()))
    }
}

fn text(x: f64, y: f64, w: f64, h: f64, content: &str) -> Element {
    Element::new(ElementKind::Text, Point::new(x, y))
        .with_size(w, h)
        .with_content(content)
}

fn block(kind: ElementKind, x: f64, y: f64, w: f64, h: f64) -> Element {
    Element::new(kind, Point::new(x, y)).with_size(w, h)
}

fn button(x: f64, y: f64, w: f64, h: f64, content: &str) -> Element {
    Element::new(ElementKind::Button, Point::new(x, y))
        .with_size(w, h)
        .with_content(content)
}

fn s(v: &str) -> StyleValue {
    StyleValue::from(v)
}

fn portfolio() -> Document {
    let tile = |x: f64, color: &str| {
        block(ElementKind::Rectangle, x, 230.0, 200.0, 200.0)
            .with_style(style_map([("backgroundColor", s(color)), ("borderRadius", s("8px"))]))
    };

    let elements = vec![
        text(50.0, 50.0, 400.0, 60.0, "John Doe - Designer & Developer").with_style(style_map([
            ("fontSize", s("32px")),
            ("fontWeight", s("bold")),
            ("color", s("#333333")),
        ])),
        text(
            50.0,
            120.0,
            500.0,
            80.0,
            "I create beautiful and functional web experiences with a focus on user experience and modern design principles.",
        )
        .with_style(style_map([("fontSize", s("16px")), ("color", s("#666666"))])),
        tile(50.0, "#4c6ef5"),
        tile(270.0, "#ff922b"),
        tile(490.0, "#51cf66"),
        button(50.0, 450.0, 150.0, 50.0, "Contact Me").with_style(style_map([
            ("backgroundColor", s("#212529")),
            ("color", s("#ffffff")),
            ("borderRadius", s("4px")),
        ])),
    ];

    Document::from_parts(elements, "#f8f9fa")
}

fn business_card() -> Document {
    let elements = vec![
        block(ElementKind::Rectangle, 100.0, 100.0, 400.0, 200.0)
            .with_style(style_map([("backgroundColor", s("#343a40")), ("borderRadius", s("8px"))])),
        text(130.0, 130.0, 200.0, 40.0, "John Doe").with_style(style_map([
            ("fontSize", s("24px")),
            ("fontWeight", s("bold")),
            ("color", s("#ffffff")),
        ])),
        text(130.0, 170.0, 200.0, 30.0, "Product Designer")
            .with_style(style_map([("fontSize", s("16px")), ("color", s("#ced4da"))])),
        text(130.0, 230.0, 300.0, 30.0, "john@example.com | (555) 123-4567")
            .with_style(style_map([("fontSize", s("14px")), ("color", s("#ced4da"))])),
        block(ElementKind::Circle, 400.0, 150.0, 60.0, 60.0)
            .with_style(style_map([("backgroundColor", s("#fd7e14"))])),
    ];

    Document::from_parts(elements, "#ffffff")
}

fn social_post() -> Document {
    let elements = vec![
        block(ElementKind::Rectangle, 100.0, 100.0, 500.0, 500.0)
            .with_style(style_map([("backgroundColor", s("#dee2e6")), ("borderRadius", s("12px"))])),
        text(150.0, 150.0, 400.0, 100.0, "Your Amazing Product Launch").with_style(style_map([
            ("fontSize", s("32px")),
            ("fontWeight", s("bold")),
            ("color", s("#212529")),
            ("textAlign", s("center")),
        ])),
        block(ElementKind::Circle, 300.0, 300.0, 100.0, 100.0)
            .with_style(style_map([("backgroundColor", s("#339af0"))])),
        text(150.0, 420.0, 400.0, 60.0, "Coming Soon - Stay Tuned!").with_style(style_map([
            ("fontSize", s("18px")),
            ("color", s("#495057")),
            ("textAlign", s("center")),
        ])),
        button(275.0, 500.0, 150.0, 40.0, "Learn More").with_style(style_map([
            ("backgroundColor", s("#339af0")),
            ("color", s("#ffffff")),
            ("borderRadius", s("20px")),
        ])),
    ];

    Document::from_parts(elements, "#e9ecef")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_template_sizes() {
        assert_eq!(Template::Portfolio.build().len(), 6);
        assert_eq!(Template::BusinessCard.build().len(), 5);
        assert_eq!(Template::SocialPost.build().len(), 5);
    }

    #[test]
    fn test_template_backgrounds() {
        assert_eq!(Template::Portfolio.build().canvas_background(), "#f8f9fa");
        assert_eq!(Template::BusinessCard.build().canvas_background(), "#ffffff");
        assert_eq!(Template::SocialPost.build().canvas_background(), "#e9ecef");
    }

    #[test]
    fn test_template_ids_unique_across_loads() {
        let mut ids = HashSet::new();
        for _ in 0..3 {
            for template in Template::ALL {
                for id in template.build().ids() {
                    assert!(ids.insert(id));
                }
            }
        }
    }

    #[test]
    fn test_template_names_roundtrip() {
        for template in Template::ALL {
            assert_eq!(template.name().parse::<Template>(), Ok(template));
        }
        assert_eq!(
            "landing".parse::<Template>(),
            Err(ParseTemplateError("landing".to_string()))
        );
    }

    #[test]
    fn test_business_card_content() {
        let doc = Template::BusinessCard.build();
        let name = &doc.elements()[1];
        assert_eq!(name.kind, ElementKind::Text);
        assert_eq!(name.content.as_deref(), Some("John Doe"));
        assert_eq!(name.position, Point::new(130.0, 130.0));
        assert_eq!(name.style.get("fontWeight"), Some(&StyleValue::from("bold")));
        // Template styles replace the kind defaults entirely.
        assert!(name.style.get("boxShadow").is_none());
    }
}
