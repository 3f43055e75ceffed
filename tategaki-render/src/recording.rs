//! A display-list surface.
//!
//! [`RecordingSurface`] draws nothing; it records every call as a
//! [`DrawCommand`] so hosts can replay the list onto a real backend and
//! tests can assert on exactly what was painted.

use tategaki_core::{Direction, Rgba};
use tategaki_text::FontDeclaration;

use crate::surface::{DrawingSurface, StrokeStyle};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    SetDirection(Direction),
    SetFont(String),
    SetFillStyle(Rgba),
    SetStrokeStyle(StrokeStyle),
    SetLineDash(Vec<f32>),
    RemoveShadow,
    FillText { text: String, x: f32, y: f32 },
    StrokeText { text: String, x: f32, y: f32 },
}

impl DrawCommand {
    pub fn is_draw(&self) -> bool {
        matches!(self, Self::FillText { .. } | Self::StrokeText { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    direction: Direction,
    saved: Vec<Direction>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded list, keeping the current state.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of unmatched `save` calls.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn fill_calls(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillText { .. }))
            .count()
    }

    pub fn stroke_calls(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeText { .. }))
            .count()
    }

    /// Text of every fill/stroke call, in order.
    pub fn drawn_text(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } | DrawCommand::StrokeText { text, .. } => {
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn save(&mut self) {
        self.saved.push(self.direction);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if let Some(direction) = self.saved.pop() {
            self.direction = direction;
            self.commands.push(DrawCommand::Restore);
        }
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.commands.push(DrawCommand::SetDirection(direction));
    }

    fn set_font(&mut self, font: &FontDeclaration) {
        self.commands.push(DrawCommand::SetFont(font.to_string()));
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::SetFillStyle(color));
    }

    fn set_stroke_style(&mut self, style: &StrokeStyle) {
        self.commands.push(DrawCommand::SetStrokeStyle(style.clone()));
    }

    fn set_line_dash(&mut self, segments: &[f32]) {
        self.commands.push(DrawCommand::SetLineDash(segments.to_vec()));
    }

    fn remove_shadow(&mut self) {
        self.commands.push(DrawCommand::RemoveShadow);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::FillText { text: text.to_owned(), x, y });
    }

    fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::StrokeText { text: text.to_owned(), x, y });
    }
}

// ===================================================================
// Tests
// ===================================================================
