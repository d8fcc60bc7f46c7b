use serde::{Deserialize, Serialize};

use crate::core::{
    CumulativeStack, DataPoint, SegmentCollection, SeriesKind, SideBySideInfo, Viewport,
    XValueType,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::Adornment;
use crate::render::Renderer;

use super::{SeriesEngine, SeriesId};

/// Serializable deterministic state of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    pub id: SeriesId,
    pub kind: SeriesKind,
    pub visible: bool,
    pub x_value_type: XValueType,
    pub points: Vec<DataPoint>,
    pub side_by_side: Option<SideBySideInfo>,
    pub stack: Option<CumulativeStack>,
    pub segments: SegmentCollection,
    pub adornments: Vec<Option<Adornment>>,
}

/// Serializable deterministic engine snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub series: Vec<SeriesSnapshot>,
}

impl<R: Renderer> SeriesEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            viewport: self.config.viewport,
            x_range: (self.config.x_start, self.config.x_end),
            y_range: (self.config.y_start, self.config.y_end),
            series: self
                .series
                .values()
                .map(|series| SeriesSnapshot {
                    id: series.id,
                    kind: series.config.kind,
                    visible: series.config.visible,
                    x_value_type: series.x.value_type,
                    points: series.data_points(),
                    side_by_side: series.side_by_side,
                    stack: series.stack.clone(),
                    segments: series.segments.clone(),
                    adornments: series.adornments.clone(),
                })
                .collect(),
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
