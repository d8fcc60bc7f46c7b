use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{
    CumulativeStack, DataPoint, SegmentCollection, SegmentStrategy, SideBySideInfo, XValues,
    resolve_x_values, resolve_y_values,
};
use crate::extensions::Adornment;

use super::{InvalidationLevel, SeriesConfig};

/// Stable handle of a registered series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesId(pub u32);

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "series#{}", self.0)
    }
}

/// Bound data and generated geometry of one series.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub(super) id: SeriesId,
    pub(super) config: SeriesConfig,
    pub(super) records: Vec<Value>,
    pub(super) x: XValues,
    pub(super) y: Vec<f64>,
    pub(super) segments: SegmentCollection,
    pub(super) adornments: Vec<Option<Adornment>>,
    pub(super) side_by_side: Option<SideBySideInfo>,
    pub(super) stack: Option<CumulativeStack>,
    pub(super) pending: InvalidationLevel,
}

impl ChartSeries {
    pub(super) fn new(id: SeriesId, config: SeriesConfig) -> Self {
        Self {
            id,
            config,
            records: Vec::new(),
            x: XValues::default(),
            y: Vec::new(),
            segments: SegmentCollection::new(),
            adornments: Vec::new(),
            side_by_side: None,
            stack: None,
            pending: InvalidationLevel::Data,
        }
    }

    #[must_use]
    pub fn id(&self) -> SeriesId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    #[must_use]
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Source record behind `index`.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&Value> {
        self.records.get(index)
    }

    #[must_use]
    pub fn x_values(&self) -> &XValues {
        &self.x
    }

    #[must_use]
    pub fn y_values(&self) -> &[f64] {
        &self.y
    }

    /// Resolved samples. Accumulation series drop legend-toggled indices;
    /// toggling has no effect on cartesian kinds.
    #[must_use]
    pub fn data_points(&self) -> Vec<DataPoint> {
        let accumulation = self.is_accumulation();
        self.x
            .values
            .iter()
            .zip(&self.y)
            .enumerate()
            .filter(|(index, _)| !(accumulation && self.config.toggled_indices.contains(index)))
            .map(|(index, (&x, &y))| DataPoint::new(index, x, y))
            .collect()
    }

    #[must_use]
    pub fn segments(&self) -> &SegmentCollection {
        &self.segments
    }

    #[must_use]
    pub fn adornments(&self) -> &[Option<Adornment>] {
        &self.adornments
    }

    /// Slot inside the category width, for clustered kinds.
    #[must_use]
    pub fn side_by_side(&self) -> Option<SideBySideInfo> {
        self.side_by_side
    }

    #[must_use]
    pub fn stack(&self) -> Option<&CumulativeStack> {
        self.stack.as_ref()
    }

    #[must_use]
    pub fn pending_invalidation(&self) -> InvalidationLevel {
        self.pending
    }

    #[must_use]
    pub fn strategy(&self) -> &'static dyn SegmentStrategy {
        self.config.kind.strategy()
    }

    /// Funnel and pyramid kinds, which split the plot by value share.
    #[must_use]
    pub fn is_accumulation(&self) -> bool {
        self.strategy().as_accumulation().is_some()
    }

    /// Category data laid out by distinct label instead of record index.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        !self.config.arrange_by_index && self.x.is_category()
    }

    pub(super) fn invalidate(&mut self, level: InvalidationLevel) {
        self.pending = self.pending.max(level);
    }

    pub(super) fn resolve_values(&mut self) {
        self.x = resolve_x_values(&self.records, self.config.x_path.as_ref());
        self.y = resolve_y_values(&self.records, &self.config.y_path);
    }
}
