use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{ClearPrimitive, DrawSurface, LinePrimitive, RectPrimitive, TextPrimitive};

/// One primitive call against a drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(ClearPrimitive),
    FillRect(RectPrimitive),
    StrokeLine(LinePrimitive),
    Text(TextPrimitive),
}

/// Backend-agnostic, ordered draw-call list for one chart redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn push_clear(&mut self, clear: ClearPrimitive) {
        self.commands.push(DrawCommand::Clear(clear));
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.commands.push(DrawCommand::FillRect(rect));
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.commands.push(DrawCommand::StrokeLine(line));
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        self.commands.push(DrawCommand::Text(text));
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillRect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::StrokeLine(line) => Some(line),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for command in &self.commands {
            match command {
                DrawCommand::Clear(clear) => clear.validate()?,
                DrawCommand::FillRect(rect) => rect.validate()?,
                DrawCommand::StrokeLine(line) => line.validate()?,
                DrawCommand::Text(text) => text.validate()?,
            }
        }
        Ok(())
    }

    /// Replays every command, in order, onto `surface`.
    pub fn draw_onto<S: DrawSurface + ?Sized>(&self, surface: &mut S) -> ChartResult<()> {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(clear) => surface.clear(*clear)?,
                DrawCommand::FillRect(rect) => surface.fill_rect(*rect)?,
                DrawCommand::StrokeLine(line) => surface.stroke_line(*line)?,
                DrawCommand::Text(text) => surface.draw_text(text)?,
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
