use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    BuildContext, ClusterEntry, RegenerationMode, RegenerationOutcome, SegmentParams,
    StackMember, assign_cluster_slots, compute_stack_group, line_vertices, regenerate,
};
use crate::extensions::{Adornment, build_adornments, place_vertex_adornments};
use crate::render::Renderer;

use super::{ChartSeries, InvalidationLevel, SeriesEngine, SeriesId};

/// What one [`SeriesEngine::regenerate`] call did for one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRegeneration {
    pub series: SeriesId,
    pub level: InvalidationLevel,
    /// `None` when only adornments were refreshed.
    pub outcome: Option<RegenerationOutcome>,
}

/// Key shared by members of one stack: kind plus group label.
fn stack_key(series: &ChartSeries) -> Option<String> {
    series.strategy().as_stackable().map(|_| {
        format!(
            "{:?}:{}",
            series.config.kind,
            series.config.stack_group_label()
        )
    })
}

impl<R: Renderer> SeriesEngine<R> {
    /// Brings every series up to date with its pending invalidation.
    ///
    /// Values are re-resolved for data-level changes, then side-by-side slots
    /// and stacks are recomputed across all series, then segments and
    /// adornments are regenerated where needed. `mode` only affects segment
    /// collections; a patch that cannot line up falls back to a rebuild.
    pub fn regenerate(&mut self, mode: RegenerationMode) -> Vec<SeriesRegeneration> {
        if self.pending_invalidation() == InvalidationLevel::None {
            return Vec::new();
        }

        for series in self.series.values_mut() {
            if series.pending >= InvalidationLevel::Data {
                series.resolve_values();
                trace!(id = %series.id, samples = series.y.len(), "resolved series values");
            }
        }
        self.assign_side_by_side_slots();
        self.compute_stacks();

        let mut report = Vec::with_capacity(self.series.len());
        for series in self.series.values_mut() {
            let level = series.pending;
            if level == InvalidationLevel::None {
                continue;
            }
            let outcome = (level >= InvalidationLevel::Segments)
                .then(|| Self::regenerate_segments(series, mode));
            series.adornments = Self::series_adornments(series);
            series.pending = InvalidationLevel::None;
            report.push(SeriesRegeneration {
                series: series.id,
                level,
                outcome,
            });
        }
        debug!(series = report.len(), ?mode, "regeneration pass finished");
        report
    }

    fn build_context<'a>(series: &'a ChartSeries, params: &'a SegmentParams) -> BuildContext<'a> {
        let mut ctx = BuildContext::new(&series.x.values, &series.y, params)
            .with_grouping(series.is_grouped());
        if let Some(info) = series.side_by_side {
            ctx = ctx.with_side_by_side(info);
        }
        if let Some(stack) = series.stack.as_ref() {
            ctx = ctx.with_stack(stack);
        }
        ctx
    }

    fn regenerate_segments(series: &mut ChartSeries, mode: RegenerationMode) -> RegenerationOutcome {
        if !series.config.visible {
            series.segments.clear();
            return RegenerationOutcome::Rebuilt;
        }
        let params = series.config.segment_params();
        let mut segments = std::mem::take(&mut series.segments);
        let outcome = regenerate(
            series.strategy(),
            &Self::build_context(series, &params),
            &mut segments,
            mode,
        );
        series.segments = segments;
        outcome
    }

    /// Segment anchors, plus vertex anchors for line kinds.
    fn series_adornments(series: &ChartSeries) -> Vec<Option<Adornment>> {
        let mut slots = build_adornments(
            &series.segments,
            &series.y,
            series.config.adornment_position,
        );
        if series.config.visible && series.config.kind.is_line_family() {
            let params = series.config.segment_params();
            let vertices = line_vertices(&Self::build_context(series, &params));
            place_vertex_adornments(&mut slots, &vertices, &series.y);
        }
        slots
    }

    fn assign_side_by_side_slots(&mut self) {
        let keys: Vec<Option<String>> = self.series.values().map(stack_key).collect();
        let entries: Vec<ClusterEntry<'_>> = self
            .series
            .values()
            .zip(&keys)
            .map(|(series, key)| ClusterEntry {
                clusterable: series.strategy().as_clusterable().is_some(),
                visible: series.config.visible,
                stack_group: key.as_deref(),
            })
            .collect();
        let slots = assign_cluster_slots(&entries);

        for (series, slot) in self.series.values_mut().zip(slots) {
            let spacing = series.config.segment_spacing;
            series.side_by_side = match (series.strategy().as_clusterable(), slot) {
                (Some(clusterable), Some(slot)) => Some(clusterable.slot_info(slot.info(), spacing)),
                _ => None,
            };
        }
    }

    fn compute_stacks(&mut self) {
        let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (position, series) in self.series.values().enumerate() {
            if let Some(key) = stack_key(series) {
                groups.entry(key).or_default().push(position);
            }
        }

        let mut stacks = Vec::new();
        for (key, positions) in &groups {
            let Some(mode) = positions
                .first()
                .and_then(|&position| self.series.get_index(position))
                .and_then(|(_, series)| series.strategy().as_stackable())
                .map(|stackable| stackable.stacking_mode())
            else {
                continue;
            };
            let members: Vec<StackMember<'_>> = positions
                .iter()
                .filter_map(|&position| self.series.get_index(position))
                .map(|(_, series)| StackMember {
                    y: &series.y,
                    active: series.config.visible,
                })
                .collect();
            trace!(group = %key, members = members.len(), ?mode, "stack group");
            stacks.extend(
                positions
                    .iter()
                    .copied()
                    .zip(compute_stack_group(&members, mode)),
            );
        }

        for series in self.series.values_mut() {
            series.stack = None;
        }
        for (position, stack) in stacks {
            if let Some((_, series)) = self.series.get_index_mut(position) {
                series.stack = Some(stack);
            }
        }
    }
}
