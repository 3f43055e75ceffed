//! Character style model.
//!
//! A text block carries block-level defaults ([`TextOptions`]) and a sparse
//! override table ([`TextStyle`]) keyed by line index and character index.
//! Resolving a character merges the two into a
//! [`CompleteTextStyleDeclaration`].
//!
//! ```text
//! TextOptions ──defaults()──► CompleteTextStyleDeclaration
//!                                      │
//! TextStyle[line][char] ──merge──────►─┘
//! ```
//!
//! [`TextOptions`]: crate::options::TextOptions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// RGBA color, each channel in [0.0, 1.0].
pub type Rgba = [f32; 4];

// ── Font style ──────────────────────────────────────────────────────

/// Font style (normal, italic, or oblique).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    /// Keyword used in a font declaration.
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
            Self::Oblique => "oblique",
        }
    }
}

// ── Declarations ────────────────────────────────────────────────────

/// Fully resolved style of one character. Every property is defined.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompleteTextStyleDeclaration {
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Font weight (100–900). 400 = normal, 700 = bold.
    pub font_weight: u16,
    pub font_style: FontStyle,
    pub fill: Option<Rgba>,
    pub stroke: Option<Rgba>,
    pub stroke_width: f32,
    /// Vertical offset applied to the glyph when drawn.
    pub delta_y: f32,
    pub text_background_color: Option<Rgba>,
}

impl CompleteTextStyleDeclaration {
    /// Apply a sparse override on top of this declaration.
    pub fn merged(mut self, decl: Option<&TextStyleDeclaration>) -> Self {
        let Some(decl) = decl else {
            return self;
        };
        if let Some(family) = &decl.font_family {
            self.font_family.clone_from(family);
        }
        if let Some(size) = decl.font_size {
            self.font_size = size;
        }
        if let Some(weight) = decl.font_weight {
            self.font_weight = weight;
        }
        if let Some(style) = decl.font_style {
            self.font_style = style;
        }
        if let Some(fill) = decl.fill {
            self.fill = Some(fill);
        }
        if let Some(stroke) = decl.stroke {
            self.stroke = Some(stroke);
        }
        if let Some(width) = decl.stroke_width {
            self.stroke_width = width;
        }
        if let Some(delta_y) = decl.delta_y {
            self.delta_y = delta_y;
        }
        if let Some(bg) = decl.text_background_color {
            self.text_background_color = Some(bg);
        }
        self
    }

    /// True when a fill pass would put marks on the surface.
    pub fn should_fill(&self) -> bool {
        self.fill.is_some()
    }

    /// True when a stroke pass would put marks on the surface.
    pub fn should_stroke(&self) -> bool {
        self.stroke.is_some() && self.stroke_width > 0.0
    }
}

/// Sparse per-character override. `None` means "inherit".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyleDeclaration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta_y: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_background_color: Option<Rgba>,
}

impl TextStyleDeclaration {
    /// True when no property is overridden.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Returns true when two resolved styles would render differently.
///
/// Only the properties that split a run are compared.
pub fn has_style_changed(
    prev: &CompleteTextStyleDeclaration,
    this: &CompleteTextStyleDeclaration,
) -> bool {
    prev.fill != this.fill
        || prev.stroke != this.stroke
        || prev.stroke_width != this.stroke_width
        || prev.font_size != this.font_size
        || prev.font_family != this.font_family
        || prev.font_weight != this.font_weight
        || prev.font_style != this.font_style
        || prev.text_background_color != this.text_background_color
        || prev.delta_y != this.delta_y
}

// ── Sparse override table ───────────────────────────────────────────

/// Line index → character index → override.
///
/// Absence of an entry means the character inherits the block defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextStyle {
    lines: BTreeMap<usize, BTreeMap<usize, TextStyleDeclaration>>,
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override lookup for one character.
    pub fn get(&self, line: usize, ch: usize) -> Option<&TextStyleDeclaration> {
        self.lines.get(&line).and_then(|chars| chars.get(&ch))
    }

    /// Replace the override of one character. An empty declaration removes it.
    pub fn set(&mut self, line: usize, ch: usize, decl: TextStyleDeclaration) {
        if decl.is_empty() {
            self.remove(line, ch);
            return;
        }
        self.lines.entry(line).or_default().insert(ch, decl);
    }

    /// Remove the override of one character, returning it.
    pub fn remove(&mut self, line: usize, ch: usize) -> Option<TextStyleDeclaration> {
        let chars = self.lines.get_mut(&line)?;
        let removed = chars.remove(&ch);
        if chars.is_empty() {
            self.lines.remove(&line);
        }
        removed
    }

    /// True when the line (or, with `None`, the whole table) has no
    /// non-empty override.
    pub fn is_empty_styles(&self, line: Option<usize>) -> bool {
        match line {
            Some(line) => self
                .lines
                .get(&line)
                .map_or(true, |chars| chars.values().all(TextStyleDeclaration::is_empty)),
            None => self
                .lines
                .values()
                .all(|chars| chars.values().all(TextStyleDeclaration::is_empty)),
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

// ===================================================================
// Tests
// ===================================================================
