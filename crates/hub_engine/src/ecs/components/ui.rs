//! Components used by menu and credits style scenes

use crate::assets::FontHandle;
use crate::ecs::Component;
use crate::render::Color;

/// Text rendered into the entity's texture through the resource loader
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// The string shown
    pub content: String,
    /// Font used for rasterisation; `None` if the font failed to load
    pub font: Option<FontHandle>,
    /// Text colour
    pub color: Color,
}

impl Text {
    /// Create a text component
    pub fn new(content: impl Into<String>, font: Option<FontHandle>, color: Color) -> Self {
        Self {
            content: content.into(),
            font,
            color,
        }
    }
}

impl Component for Text {}

/// Marks an entity as a click target. The hit area is the entity's collider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clickable {
    /// Link opened when the entity is clicked
    pub url: Option<String>,
    /// Disabled targets ignore clicks
    pub enabled: bool,
}

impl Clickable {
    /// Enabled click target without a link
    pub fn new() -> Self {
        Self {
            url: None,
            enabled: true,
        }
    }

    /// Enabled click target that opens `url`
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            enabled: true,
        }
    }
}

impl Component for Clickable {}
