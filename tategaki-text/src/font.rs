//! Font declarations: the string a drawing surface is given as its font.
//!
//! A declaration has the shape `"<style> <weight> <size>px <family>"`.
//! The family is quoted unless it is already quoted, is a fallback list,
//! or is a CSS generic family keyword.
//!
//! Measurement always happens at [`CACHE_FONT_SIZE`] so that one cache
//! entry serves every target size of the same face.

use std::fmt;

use tategaki_core::{CompleteTextStyleDeclaration, FontStyle};

/// Reference font size used for every cached measurement.
pub const CACHE_FONT_SIZE: f32 = 400.0;

// ── Generic family ──────────────────────────────────────────────────

/// CSS generic font families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenericFamily {
    Serif,
    SansSerif,
    Monospace,
    Cursive,
    Fantasy,
}

impl GenericFamily {
    /// Parse a generic family keyword, ignoring ASCII case.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "serif" => Some(Self::Serif),
            "sans-serif" => Some(Self::SansSerif),
            "monospace" => Some(Self::Monospace),
            "cursive" => Some(Self::Cursive),
            "fantasy" => Some(Self::Fantasy),
            _ => None,
        }
    }
}

/// Quote a family name for a font declaration when needed.
pub fn quote_family(family: &str) -> String {
    if family.contains('\'')
        || family.contains('"')
        || family.contains(',')
        || GenericFamily::parse(family).is_some()
    {
        family.to_owned()
    } else {
        format!("\"{family}\"")
    }
}

// ── Declaration ─────────────────────────────────────────────────────

/// The font-affecting subset of a style, at a concrete size.
///
/// Two declarations compare equal exactly when their formatted strings do.
#[derive(Clone, Debug, PartialEq)]
pub struct FontDeclaration {
    pub family: String,
    pub style: FontStyle,
    pub weight: u16,
    /// Size in pixels.
    pub size: f32,
}

impl FontDeclaration {
    /// Build the declaration for `style`.
    ///
    /// With `for_measuring` the size is [`CACHE_FONT_SIZE`] instead of the
    /// character's own size.
    pub fn new(style: &CompleteTextStyleDeclaration, for_measuring: bool) -> Self {
        Self {
            family: style.font_family.clone(),
            style: style.font_style,
            weight: style.font_weight,
            size: if for_measuring { CACHE_FONT_SIZE } else { style.font_size },
        }
    }

    /// First family of the (possibly quoted) fallback list.
    pub fn primary_family(&self) -> &str {
        self.family
            .split(',')
            .next()
            .unwrap_or(&self.family)
            .trim()
            .trim_matches('"')
            .trim_matches('\'')
    }
}

impl fmt::Display for FontDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}px {}",
            self.style.as_css(),
            self.weight,
            self.size,
            quote_family(&self.family),
        )
    }
}

/// Format the font declaration string for `style`.
pub fn font_declaration(style: &CompleteTextStyleDeclaration, for_measuring: bool) -> String {
    FontDeclaration::new(style, for_measuring).to_string()
}

// ===================================================================
// Tests
// ===================================================================
