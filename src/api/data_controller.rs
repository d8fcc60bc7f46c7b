use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{ChartSeries, InvalidationLevel, SeriesConfig, SeriesEngine, SeriesId};

impl<R: Renderer> SeriesEngine<R> {
    /// Registers a series after the existing ones.
    ///
    /// Siblings are invalidated at layout level: a new clustered or stacked
    /// series moves their slots and stacks.
    pub fn add_series(&mut self, config: SeriesConfig) -> ChartResult<SeriesId> {
        config.validate()?;
        let id = SeriesId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| ChartError::InvalidData("series id space exhausted".to_owned()))?;
        debug!(%id, kind = ?config.kind, "add series");
        self.invalidate_all(InvalidationLevel::Layout);
        self.series.insert(id, ChartSeries::new(id, config));
        Ok(id)
    }

    pub fn remove_series(&mut self, id: SeriesId) -> ChartResult<ChartSeries> {
        let removed = self
            .series
            .shift_remove(&id)
            .ok_or(ChartError::UnknownSeries(id.0))?;
        debug!(%id, "remove series");
        self.invalidate_all(InvalidationLevel::Layout);
        Ok(removed)
    }

    /// Replaces the bound records of a series.
    pub fn set_data(&mut self, id: SeriesId, records: Vec<Value>) -> ChartResult<()> {
        let series = self.series_mut(id)?;
        debug!(%id, count = records.len(), "set series data");
        series.records = records;
        series.invalidate(InvalidationLevel::Data);
        self.invalidate_stack_siblings(id);
        Ok(())
    }

    /// Appends one record; a subsequent patch regeneration still rebuilds
    /// because the segment count changes.
    pub fn append_record(&mut self, id: SeriesId, record: Value) -> ChartResult<()> {
        let series = self.series_mut(id)?;
        series.records.push(record);
        trace!(%id, count = series.records.len(), "append series record");
        series.invalidate(InvalidationLevel::Data);
        self.invalidate_stack_siblings(id);
        Ok(())
    }

    /// Replaces the record at `index` in place.
    pub fn update_record(&mut self, id: SeriesId, index: usize, record: Value) -> ChartResult<()> {
        let series = self.series_mut(id)?;
        let len = series.records.len();
        let slot = series.records.get_mut(index).ok_or_else(|| {
            ChartError::InvalidData(format!("record index {index} out of bounds for {len} records"))
        })?;
        *slot = record;
        trace!(%id, index, "update series record");
        series.invalidate(InvalidationLevel::Data);
        self.invalidate_stack_siblings(id);
        Ok(())
    }

    pub fn clear_data(&mut self, id: SeriesId) -> ChartResult<()> {
        self.set_data(id, Vec::new())
    }

    pub(super) fn invalidate_all(&mut self, level: InvalidationLevel) {
        for series in self.series.values_mut() {
            series.invalidate(level);
        }
    }

    /// Stack members above a changed series sit on its values.
    fn invalidate_stack_siblings(&mut self, id: SeriesId) {
        let Some(changed) = self.series.get(&id) else {
            return;
        };
        if changed.strategy().as_stackable().is_none() {
            return;
        }
        let group = changed.config.stack_group_label().to_owned();
        let kind = changed.config.kind;
        for series in self.series.values_mut() {
            if series.config.kind == kind && series.config.stack_group_label() == group {
                series.invalidate(InvalidationLevel::Segments);
            }
        }
    }
}
