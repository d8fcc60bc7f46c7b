use serde::{Deserialize, Serialize};

use crate::core::{SeriesKind, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    EllipsePrimitive, LabelPrimitive, LinePrimitive, PolygonPrimitive, PolylinePrimitive,
    RectPrimitive,
};

/// Pixel geometry of one series for one draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesFrame {
    pub series_id: u32,
    pub kind: SeriesKind,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub ellipses: Vec<EllipsePrimitive>,
    pub polygons: Vec<PolygonPrimitive>,
    pub labels: Vec<LabelPrimitive>,
}

impl SeriesFrame {
    #[must_use]
    pub fn new(series_id: u32, kind: SeriesKind) -> Self {
        Self {
            series_id,
            kind,
            rects: Vec::new(),
            lines: Vec::new(),
            polylines: Vec::new(),
            ellipses: Vec::new(),
            polygons: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for polyline in &self.polylines {
            polyline.validate()?;
        }
        for ellipse in &self.ellipses {
            ellipse.validate()?;
        }
        for polygon in &self.polygons {
            polygon.validate()?;
        }
        for label in &self.labels {
            label.validate()?;
        }
        Ok(())
    }

    /// Number of drawable shapes, labels excluded.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.rects.len()
            + self.lines.len()
            + self.polylines.len()
            + self.ellipses.len()
            + self.polygons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shape_count() == 0 && self.labels.is_empty()
    }
}

/// Backend-agnostic scene handed to a [`crate::render::Renderer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub series: Vec<SeriesFrame>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            series: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_series(mut self, series: SeriesFrame) -> Self {
        self.series.push(series);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for series in &self.series {
            series.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(SeriesFrame::is_empty)
    }
}
