/// Bounding box of one grapheme within its line.
///
/// `left` chains through the line: for `i > 0`,
/// `left[i] = left[i-1] + width[i-1] + (kerned_width[i] - width[i])`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GraphemeBBox {
    pub width: f32,
    pub height: f32,
    /// Width adjusted for the kerning couple with the previous grapheme.
    pub kerned_width: f32,
    /// Offset within the line.
    pub left: f32,
    /// Vertical style offset.
    pub delta_y: f32,
    /// Extra advance along the column added by justification.
    pub slack: f32,
    pub render_left: Option<f32>,
    pub render_top: Option<f32>,
    pub angle: Option<f32>,
}

/// Result of measuring one line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineMetrics {
    /// Nominal width of the line (the block font size).
    pub width: f32,
    /// Sum of the graphemes' heights: the extent along the line.
    pub height: f32,
    /// One box per grapheme plus a trailing caret box.
    pub boxes: Vec<GraphemeBBox>,
}
