use crate::canvas::{Canvas, Document};
use crate::theme::Theme;
use crate::types::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyPhase {
    Start,
    Cover,
    SectionLoop,
    Done,
}

/// Mutable state for one render call: the running page number, the selected
/// theme and the open canvas. Pages only move forward.
pub struct RenderState {
    page_number: usize,
    theme: Theme,
    phase: AssemblyPhase,
    canvas: Canvas,
}

impl RenderState {
    pub fn new(theme: Theme, page_size: Size) -> Self {
        Self {
            page_number: 0,
            theme,
            phase: AssemblyPhase::Start,
            canvas: Canvas::new(page_size),
        }
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn phase(&self) -> AssemblyPhase {
        self.phase
    }

    pub(crate) fn enter(&mut self, phase: AssemblyPhase) {
        self.phase = phase;
    }

    /// Claims the next page number; the page is painted under this number.
    pub(crate) fn begin_page(&mut self) -> usize {
        self.page_number += 1;
        self.page_number
    }

    pub(crate) fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub(crate) fn finalize_page(&mut self) {
        self.canvas.show_page();
    }

    pub(crate) fn finish(self) -> Document {
        self.canvas.finish()
    }
}
