use indexmap::IndexMap;
use tracing::debug;

use crate::core::{CartesianTransformer, LinearAxis, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{ProjectionContext, RenderFrame, Renderer, SeriesFrame, project_series};

use super::{ChartSeries, EngineConfig, InvalidationLevel, SeriesId};

/// Main orchestration facade consumed by host applications.
///
/// `SeriesEngine` owns the registered series, the shared axes and the
/// renderer. Hosts bind data, report configuration changes, call
/// [`Self::regenerate`] and then render or hit-test the result.
pub struct SeriesEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: EngineConfig,
    pub(super) x_axis: LinearAxis,
    pub(super) y_axis: LinearAxis,
    pub(super) series: IndexMap<SeriesId, ChartSeries>,
    pub(super) next_id: u32,
}

impl<R: Renderer> SeriesEngine<R> {
    pub fn new(renderer: R, config: EngineConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let x_axis = LinearAxis::new(config.x_start, config.x_end)?.with_inversed(config.x_inversed);
        let y_axis = LinearAxis::new(config.y_start, config.y_end)?.with_inversed(config.y_inversed);
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            "series engine initialized"
        );
        Ok(Self {
            renderer,
            config,
            x_axis,
            y_axis,
            series: IndexMap::new(),
            next_id: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.config.viewport = viewport;
        Ok(())
    }

    pub fn set_x_visible_range(&mut self, start: f64, end: f64) -> ChartResult<()> {
        self.x_axis.set_visible_range(start, end)?;
        self.config.x_start = start;
        self.config.x_end = end;
        Ok(())
    }

    pub fn set_y_visible_range(&mut self, start: f64, end: f64) -> ChartResult<()> {
        self.y_axis.set_visible_range(start, end)?;
        self.config.y_start = start;
        self.config.y_end = end;
        Ok(())
    }

    #[must_use]
    pub fn x_axis(&self) -> &LinearAxis {
        &self.x_axis
    }

    #[must_use]
    pub fn y_axis(&self) -> &LinearAxis {
        &self.y_axis
    }

    /// Registered series ids in registration order.
    #[must_use]
    pub fn series_ids(&self) -> Vec<SeriesId> {
        self.series.keys().copied().collect()
    }

    pub fn series(&self, id: SeriesId) -> ChartResult<&ChartSeries> {
        self.series.get(&id).ok_or(ChartError::UnknownSeries(id.0))
    }

    pub(super) fn series_mut(&mut self, id: SeriesId) -> ChartResult<&mut ChartSeries> {
        self.series
            .get_mut(&id)
            .ok_or(ChartError::UnknownSeries(id.0))
    }

    /// Highest pending level over every series.
    #[must_use]
    pub fn pending_invalidation(&self) -> InvalidationLevel {
        self.series
            .values()
            .fold(InvalidationLevel::None, |level, series| {
                level.max(series.pending)
            })
    }

    pub(super) fn project(&self, series: &ChartSeries) -> ChartResult<SeriesFrame> {
        let transformer = CartesianTransformer::new(
            &self.x_axis,
            &self.y_axis,
            self.config.viewport,
            series.config.is_transposed(),
        )?;
        let ctx = ProjectionContext {
            transformer,
            stroke_width: series.config.stroke_thickness,
            explode_offset_px: series.config.explode_offset_px,
        };
        Ok(project_series(
            series.id.0,
            series.config.kind,
            &series.segments,
            &series.adornments,
            &ctx,
        ))
    }

    /// Projects every visible series into pixel primitives.
    pub fn build_frame(&self) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.config.viewport);
        for series in self.series.values().filter(|series| series.config.visible) {
            frame = frame.with_series(self.project(series)?);
        }
        frame.validate()?;
        Ok(frame)
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_frame()?;
        debug!(series = frame.series.len(), "render frame");
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
