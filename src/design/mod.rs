//! Design model: positioned text and image elements on a product canvas.
//!
//! A `Design` is an ordered list of `Element`s. Order is paint order: later
//! elements sit above earlier ones. Mutations are pure: `move_element` and
//! `delete_element` return a new `Design` and leave `self` untouched, so a
//! caller can keep the previous design around until it decides to commit.
//!
//! Positions are canvas-local pixels and are never clamped. An element may
//! be dragged entirely outside the printable area.

pub mod canvas;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an element, unique within its design.
pub type ElementId = String;

/// Where newly added elements land.
pub const DEFAULT_POSITION: Position = Position { x: 50.0, y: 50.0 };
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
pub const DEFAULT_FONT_SIZE: f64 = 24.0;
pub const DEFAULT_FONT_WEIGHT: &str = "normal";
pub const DEFAULT_IMAGE_SIZE: f64 = 100.0;

// =============================================================================
// TYPES
// =============================================================================

/// Canvas-local pixel coordinates of an element's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This position shifted by a pixel delta.
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub id: ElementId,
    pub content: String,
    /// Hex color, e.g. `#FF6B35`.
    pub color: String,
    pub font_size: f64,
    #[serde(default = "default_font_weight")]
    pub font_weight: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    pub id: ElementId,
    /// Data URL for uploads, asset path for clipart.
    pub src: String,
    #[serde(default = "default_image_size")]
    pub width: f64,
    #[serde(default = "default_image_size")]
    pub height: f64,
    pub position: Position,
}

/// One placed item on a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text(TextElement),
    Image(ImageElement),
}

fn default_font_weight() -> String {
    DEFAULT_FONT_WEIGHT.to_string()
}

fn default_image_size() -> f64 {
    DEFAULT_IMAGE_SIZE
}

/// Generate a fresh element id.
#[must_use]
pub fn new_element_id() -> ElementId {
    Uuid::new_v4().to_string()
}

impl Element {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Text(text) => &text.id,
            Self::Image(image) => &image.id,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Text(text) => text.position,
            Self::Image(image) => image.position,
        }
    }

    /// Copy of this element at `position`.
    #[must_use]
    pub fn with_position(&self, position: Position) -> Self {
        let mut moved = self.clone();
        match &mut moved {
            Self::Text(text) => text.position = position,
            Self::Image(image) => image.position = position,
        }
        moved
    }

    /// Copy of this element under a new id. Used when stamping template
    /// elements into a draft.
    #[must_use]
    pub fn with_id(&self, id: ElementId) -> Self {
        let mut renamed = self.clone();
        match &mut renamed {
            Self::Text(text) => text.id = id,
            Self::Image(image) => image.id = id,
        }
        renamed
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DesignError {
    #[error("element not found: {0}")]
    ElementNotFound(ElementId),
    #[error("duplicate element id: {0}")]
    DuplicateElement(ElementId),
    #[error("text content is empty")]
    BlankText,
    #[error("no element is selected")]
    NothingSelected,
}

// =============================================================================
// DESIGN
// =============================================================================

/// The ordered element list placed on a product mockup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Design {
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Design {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Checks that every element id appears once.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateElement` naming the first repeated id.
    pub fn validate(&self) -> Result<(), DesignError> {
        let mut seen = HashSet::with_capacity(self.elements.len());
        for element in &self.elements {
            if !seen.insert(element.id()) {
                return Err(DesignError::DuplicateElement(element.id().to_string()));
            }
        }
        Ok(())
    }

    /// New design with `element` appended on top.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateElement` if the id is already taken.
    pub fn with_element(&self, element: Element) -> Result<Self, DesignError> {
        if self.contains(element.id()) {
            return Err(DesignError::DuplicateElement(element.id().to_string()));
        }
        let mut elements = self.elements.clone();
        elements.push(element);
        Ok(Self { elements })
    }

    /// New design with element `id` placed at `position`.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no element has `id`.
    pub fn move_element(&self, id: &str, position: Position) -> Result<Self, DesignError> {
        if !self.contains(id) {
            return Err(DesignError::ElementNotFound(id.to_string()));
        }
        let elements = self
            .elements
            .iter()
            .map(|e| if e.id() == id { e.with_position(position) } else { e.clone() })
            .collect();
        Ok(Self { elements })
    }

    /// New design with element `id` shifted by a pixel delta.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no element has `id`.
    pub fn translate_element(&self, id: &str, dx: f64, dy: f64) -> Result<Self, DesignError> {
        let current = self
            .get(id)
            .ok_or_else(|| DesignError::ElementNotFound(id.to_string()))?
            .position();
        self.move_element(id, current.translated(dx, dy))
    }

    /// New design without element `id`; the rest keep their order.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no element has `id`.
    pub fn delete_element(&self, id: &str) -> Result<Self, DesignError> {
        if !self.contains(id) {
            return Err(DesignError::ElementNotFound(id.to_string()));
        }
        let elements = self.elements.iter().filter(|e| e.id() != id).cloned().collect();
        Ok(Self { elements })
    }
}

// =============================================================================
// BUILDERS
// =============================================================================

/// Text element at the default drop position.
///
/// # Errors
///
/// Returns `BlankText` when `content` is empty after trimming.
pub fn text_element(
    content: &str,
    color: Option<&str>,
    font_size: Option<f64>,
    font_weight: Option<&str>,
    font_family: Option<&str>,
) -> Result<Element, DesignError> {
    if content.trim().is_empty() {
        return Err(DesignError::BlankText);
    }
    Ok(Element::Text(TextElement {
        id: new_element_id(),
        content: content.to_string(),
        color: color.unwrap_or(DEFAULT_TEXT_COLOR).to_string(),
        font_size: font_size.unwrap_or(DEFAULT_FONT_SIZE),
        font_weight: font_weight.unwrap_or(DEFAULT_FONT_WEIGHT).to_string(),
        font_family: font_family.map(str::to_string),
        position: DEFAULT_POSITION,
    }))
}

/// Image element at `position` (default drop position when `None`).
#[must_use]
pub fn image_element(src: &str, width: Option<f64>, height: Option<f64>, position: Option<Position>) -> Element {
    Element::Image(ImageElement {
        id: new_element_id(),
        src: src.to_string(),
        width: width.unwrap_or(DEFAULT_IMAGE_SIZE),
        height: height.unwrap_or(DEFAULT_IMAGE_SIZE),
        position: position.unwrap_or(DEFAULT_POSITION),
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
