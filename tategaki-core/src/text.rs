//! Text content and the host-facing style source.
//!
//! The layout and render crates never own text or styles directly; they
//! read them through [`StyleSource`]. [`StyledText`] is the stock host:
//! a string split into grapheme lines, a sparse style table and options.

use unicode_segmentation::UnicodeSegmentation;

use crate::options::TextOptions;
use crate::style::{CompleteTextStyleDeclaration, TextStyle, TextStyleDeclaration};

/// One layout line, split into extended grapheme clusters.
pub type GraphemeLine = Vec<String>;

/// Split text on `\n` / `\r\n` and each line into grapheme clusters.
///
/// Empty text still yields one (empty) line.
pub fn split_lines(text: &str) -> Vec<GraphemeLine> {
    text.split('\n')
        .map(|line| {
            line.strip_suffix('\r')
                .unwrap_or(line)
                .graphemes(true)
                .map(str::to_owned)
                .collect()
        })
        .collect()
}

/// True for the characters justification may stretch.
pub fn is_space_or_tab(grapheme: &str) -> bool {
    matches!(grapheme, " " | "\t" | "\r")
}

/// Everything the layout engine consumes from its host shape.
pub trait StyleSource {
    /// Block-level defaults.
    fn options(&self) -> &TextOptions;

    /// Content split into grapheme lines.
    fn lines(&self) -> &[GraphemeLine];

    /// Raw sparse override for one character, without defaults merged.
    fn style_override(&self, line: usize, ch: usize) -> Option<&TextStyleDeclaration>;

    /// Block defaults merged with the character's override.
    fn complete_style(&self, line: usize, ch: usize) -> CompleteTextStyleDeclaration {
        self.options().defaults().merged(self.style_override(line, ch))
    }

    /// Whether `line` ends a wrapped paragraph. Unwrapped text has only
    /// one such line: the last.
    fn is_end_of_wrapping(&self, line: usize) -> bool {
        line + 1 >= self.lines().len()
    }

    /// Whether `line` has no per-character overrides.
    fn is_empty_styles(&self, line: usize) -> bool;

    /// Whether no line has overrides.
    fn has_no_styles(&self) -> bool {
        (0..self.lines().len()).all(|line| self.is_empty_styles(line))
    }
}

/// Stock host: plain text + sparse styles + options.
#[derive(Clone, Debug, Default)]
pub struct StyledText {
    text: String,
    lines: Vec<GraphemeLine>,
    pub styles: TextStyle,
    pub options: TextOptions,
}

impl StyledText {
    pub fn new(text: &str, options: TextOptions) -> Self {
        Self {
            text: text.to_owned(),
            lines: split_lines(text),
            styles: TextStyle::new(),
            options,
        }
    }

    pub fn with_styles(mut self, styles: TextStyle) -> Self {
        self.styles = styles;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the content. Styles are kept; the caller decides whether
    /// they still apply.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_owned();
        self.lines = split_lines(text);
    }
}

impl StyleSource for StyledText {
    fn options(&self) -> &TextOptions {
        &self.options
    }

    fn lines(&self) -> &[GraphemeLine] {
        &self.lines
    }

    fn style_override(&self, line: usize, ch: usize) -> Option<&TextStyleDeclaration> {
        self.styles.get(line, ch)
    }

    fn is_empty_styles(&self, line: usize) -> bool {
        self.styles.is_empty_styles(Some(line))
    }

    fn has_no_styles(&self) -> bool {
        self.styles.is_empty_styles(None)
    }
}

// ===================================================================
// Tests
// ===================================================================
