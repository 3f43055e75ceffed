//! Block-level options for a vertical text block.
//!
//! These are the defaults every character inherits, plus the geometry
//! knobs the layout engine reads (line height, char spacing, minimum
//! dimensions). Options deserialize from JSON with every field optional.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::style::{CompleteTextStyleDeclaration, FontStyle, Rgba};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid value for '{option}': {reason}")]
    InvalidValue {
        option: &'static str,
        reason: String,
    },
}

// ── Alignment / direction ───────────────────────────────────────────

/// Text alignment along the line direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
    JustifyLeft,
    JustifyCenter,
    JustifyRight,
}

impl TextAlign {
    /// True for every justify variant.
    pub fn is_justify(self) -> bool {
        matches!(
            self,
            Self::Justify | Self::JustifyLeft | Self::JustifyCenter | Self::JustifyRight
        )
    }
}

/// Drawing direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    /// +1 for left-to-right, -1 for right-to-left.
    pub fn sign(self) -> f32 {
        match self {
            Self::Ltr => 1.0,
            Self::Rtl => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Which pass is painted first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaintFirst {
    #[default]
    Fill,
    Stroke,
}

// ── Options ─────────────────────────────────────────────────────────

/// Block defaults and layout configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Font weight (100–900).
    pub font_weight: u16,
    pub font_style: FontStyle,
    pub fill: Option<Rgba>,
    pub stroke: Option<Rgba>,
    pub stroke_width: f32,
    pub stroke_line_cap: LineCap,
    pub stroke_line_join: LineJoin,
    pub stroke_miter_limit: f32,
    pub stroke_dash_offset: f32,
    pub stroke_dash_array: Option<Vec<f32>>,
    pub text_background_color: Option<Rgba>,
    /// Extra spacing per character in thousandths of an em.
    pub char_spacing: f32,
    /// Line height multiplier; also the normalization constant of the
    /// block-width formula.
    pub line_height: f32,
    /// Ratio between font size and the nominal glyph extent.
    pub font_size_mult: f32,
    pub text_align: TextAlign,
    pub direction: Direction,
    pub paint_first: PaintFirst,
    pub min_width: f32,
    pub min_height: f32,
    /// Height used for an empty block before `min_height` applies.
    pub cursor_height: f32,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font_family: String::from("Times New Roman"),
            font_size: 40.0,
            font_weight: 400,
            font_style: FontStyle::Normal,
            fill: Some([0.0, 0.0, 0.0, 1.0]),
            stroke: None,
            stroke_width: 1.0,
            stroke_line_cap: LineCap::Butt,
            stroke_line_join: LineJoin::Miter,
            stroke_miter_limit: 4.0,
            stroke_dash_offset: 0.0,
            stroke_dash_array: None,
            text_background_color: None,
            char_spacing: 0.0,
            line_height: 1.16,
            font_size_mult: 1.13,
            text_align: TextAlign::Left,
            direction: Direction::Ltr,
            paint_first: PaintFirst::Fill,
            min_width: 2.0,
            min_height: 10.0,
            cursor_height: 10.0,
        }
    }
}

impl TextOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        log::debug!(
            "Loaded text options: {}px {:?}, align {:?}",
            options.font_size, options.font_family, options.text_align
        );
        Ok(options)
    }

    /// Reject values the layout engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.font_size > 0.0) {
            return Err(ConfigError::InvalidValue {
                option: "font_size",
                reason: format!("must be positive, got {}", self.font_size),
            });
        }
        if !(self.line_height > 0.0) {
            return Err(ConfigError::InvalidValue {
                option: "line_height",
                reason: format!("must be positive, got {}", self.line_height),
            });
        }
        if self.min_width < 0.0 || self.min_height < 0.0 || self.cursor_height < 0.0 {
            return Err(ConfigError::InvalidValue {
                option: "min_width/min_height/cursor_height",
                reason: String::from("must not be negative"),
            });
        }
        Ok(())
    }

    /// The resolved style every character starts from.
    pub fn defaults(&self) -> CompleteTextStyleDeclaration {
        CompleteTextStyleDeclaration {
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            font_weight: self.font_weight,
            font_style: self.font_style,
            fill: self.fill,
            stroke: self.stroke,
            stroke_width: self.stroke_width,
            delta_y: 0.0,
            text_background_color: self.text_background_color,
        }
    }

    /// Char spacing converted to pixels at the block font size.
    pub fn char_spacing_px(&self) -> f32 {
        if self.char_spacing != 0.0 {
            self.font_size * self.char_spacing / 1000.0
        } else {
            0.0
        }
    }
}

// ===================================================================
// Tests
// ===================================================================
