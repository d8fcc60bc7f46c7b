use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::core::{CartesianTransformer, Point};
use crate::error::ChartResult;
use crate::interaction::{hit_test_frame, nearest_point};
use crate::render::Renderer;

use super::{SeriesEngine, SeriesId};

/// Series and source index under a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesHit {
    pub series: SeriesId,
    pub index: usize,
}

/// Data behind a tooltip: the hit plus its resolved values and source record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipInfo {
    pub series: SeriesId,
    pub index: usize,
    pub x: f64,
    pub y: f64,
    /// Category label when the x binding holds labels.
    pub category: Option<String>,
    pub item: Option<Value>,
}

impl<R: Renderer> SeriesEngine<R> {
    /// Finds the topmost series hit at pixel `(x, y)`.
    ///
    /// Series are probed in reverse registration order, so the series drawn
    /// last wins. Hidden series are skipped.
    pub fn hit_test(&self, x: f64, y: f64) -> ChartResult<Option<SeriesHit>> {
        let cursor = Point::new(x, y);
        for series in self.series.values().rev() {
            if !series.config.visible {
                continue;
            }
            let frame = self.project(series)?;
            if let Some(index) = hit_test_frame(&frame, cursor, self.config.hit_tolerance_px) {
                trace!(id = %series.id, index, x, y, "series hit");
                return Ok(Some(SeriesHit {
                    series: series.id,
                    index,
                }));
            }
        }
        Ok(None)
    }

    /// Hit-tests a single series, ignoring its siblings.
    pub fn hit_test_series(&self, id: SeriesId, x: f64, y: f64) -> ChartResult<Option<usize>> {
        let series = self.series(id)?;
        if !series.config.visible {
            return Ok(None);
        }
        let frame = self.project(series)?;
        Ok(hit_test_frame(
            &frame,
            Point::new(x, y),
            self.config.hit_tolerance_px,
        ))
    }

    /// Index of the resolved sample nearest to pixel `(x, y)`, by euclidean
    /// pixel distance. Toggled and missing samples are skipped.
    pub fn nearest_data_index(&self, id: SeriesId, x: f64, y: f64) -> ChartResult<Option<usize>> {
        let series = self.series(id)?;
        let transformer = CartesianTransformer::new(
            &self.x_axis,
            &self.y_axis,
            self.config.viewport,
            series.config.is_transposed(),
        )?;
        let (indices, points): (Vec<usize>, Vec<Point>) = series
            .data_points()
            .into_iter()
            .filter(|point| !point.is_missing())
            .map(|point| (point.index, transformer.transform_to_visible(point.x, point.y)))
            .filter(|(_, pixel)| pixel.is_finite())
            .unzip();
        Ok(nearest_point(&points, Point::new(x, y)).map(|position| indices[position]))
    }

    /// Tooltip content for the topmost hit at pixel `(x, y)`.
    pub fn tooltip_at(&self, x: f64, y: f64) -> ChartResult<Option<TooltipInfo>> {
        let Some(hit) = self.hit_test(x, y)? else {
            return Ok(None);
        };
        let series = self.series(hit.series)?;
        let x_value = series
            .x
            .values
            .get(hit.index)
            .copied()
            .unwrap_or(f64::NAN);
        Ok(Some(TooltipInfo {
            series: hit.series,
            index: hit.index,
            x: x_value,
            y: series.y.get(hit.index).copied().unwrap_or(f64::NAN),
            category: series.x.category_label(x_value).map(str::to_owned),
            item: series.item(hit.index).cloned(),
        }))
    }
}
