use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests catch invalid geometry before
/// it reaches a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_series_count: usize,
    pub last_shape_count: usize,
    pub last_label_count: usize,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_series_count = frame.series.len();
        self.last_shape_count = frame.series.iter().map(|s| s.shape_count()).sum();
        self.last_label_count = frame.series.iter().map(|s| s.labels.len()).sum();
        self.frames_rendered += 1;
        Ok(())
    }
}
