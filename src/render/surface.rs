use crate::error::ChartResult;
use crate::render::{
    ClearPrimitive, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextPrimitive,
};

/// Primitive operations a 2D drawing surface exposes to the chart.
pub trait DrawSurface {
    fn clear(&mut self, region: ClearPrimitive) -> ChartResult<()>;
    fn fill_rect(&mut self, rect: RectPrimitive) -> ChartResult<()>;
    fn stroke_line(&mut self, line: LinePrimitive) -> ChartResult<()>;
    fn draw_text(&mut self, text: &TextPrimitive) -> ChartResult<()>;
}

/// A call observed by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(ClearPrimitive),
    FillRect(RectPrimitive),
    StrokeLine(LinePrimitive),
    DrawText(TextPrimitive),
}

/// Surface that remembers every call it receives, for tests and headless hosts.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
    renders: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of frames rendered through the `Renderer` impl.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.renders
    }

    #[must_use]
    pub fn fill_rect_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::FillRect(_)))
            .count()
    }

    #[must_use]
    pub fn stroke_line_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::StrokeLine(_)))
            .count()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::DrawText(_)))
            .count()
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, region: ClearPrimitive) -> ChartResult<()> {
        self.calls.push(DrawCall::Clear(region));
        Ok(())
    }

    fn fill_rect(&mut self, rect: RectPrimitive) -> ChartResult<()> {
        self.calls.push(DrawCall::FillRect(rect));
        Ok(())
    }

    fn stroke_line(&mut self, line: LinePrimitive) -> ChartResult<()> {
        self.calls.push(DrawCall::StrokeLine(line));
        Ok(())
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> ChartResult<()> {
        self.calls.push(DrawCall::DrawText(text.clone()));
        Ok(())
    }
}

impl Renderer for RecordingSurface {
    /// Keeps only the latest frame's calls, like a real surface after a clear.
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.calls.clear();
        frame.draw_onto(self)?;
        self.renders += 1;
        Ok(())
    }
}
