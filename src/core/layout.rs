//! Side-by-side slot assignment for clustered series.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Horizontal slot of one series inside a unit category width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideBySideInfo {
    pub start: f64,
    pub end: f64,
    pub delta: f64,
}

impl SideBySideInfo {
    /// Whole category width, used by series that do not cluster.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
            delta: 1.0,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.end - self.start
    }

    /// Shrinks the slot symmetrically by `spacing` (clamped to `[0, 1]`).
    ///
    /// `delta` keeps the unshrunk slot width.
    #[must_use]
    pub fn with_spacing(self, spacing: f64) -> Self {
        let spacing = if spacing.is_nan() {
            0.0
        } else {
            spacing.clamp(0.0, 1.0)
        };
        let inset = self.width() * spacing / 2.0;
        Self {
            start: self.start + inset,
            end: self.end - inset,
            delta: self.delta,
        }
    }
}

impl Default for SideBySideInfo {
    fn default() -> Self {
        Self::full()
    }
}

/// Slot `position` of `count` equal slots over `[0, 1)`.
///
/// `count == 0` is treated as a single slot.
#[must_use]
pub fn side_by_side_info(position: usize, count: usize) -> SideBySideInfo {
    let count = count.max(1);
    let position = position.min(count - 1);
    let delta = 1.0 / count as f64;
    SideBySideInfo {
        start: position as f64 * delta,
        end: (position + 1) as f64 * delta,
        delta,
    }
}

/// Position of one series among its clustered siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSlot {
    pub position: usize,
    pub count: usize,
}

impl ClusterSlot {
    #[must_use]
    pub fn info(self) -> SideBySideInfo {
        side_by_side_info(self.position, self.count)
    }
}

/// Registration-order description of one sibling series for slot assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterEntry<'a> {
    pub clusterable: bool,
    pub visible: bool,
    /// Stacked siblings sharing a group share one slot.
    pub stack_group: Option<&'a str>,
}

/// Assigns side-by-side slots in registration order.
///
/// Hidden and non-clusterable entries get `None` and do not consume a slot.
#[must_use]
pub fn assign_cluster_slots(entries: &[ClusterEntry<'_>]) -> Vec<Option<ClusterSlot>> {
    let mut next_position = 0usize;
    let mut group_positions: IndexMap<&str, usize> = IndexMap::new();
    let positions: Vec<Option<usize>> = entries
        .iter()
        .map(|entry| {
            if !entry.clusterable || !entry.visible {
                return None;
            }
            let position = match entry.stack_group {
                Some(group) => *group_positions.entry(group).or_insert_with(|| {
                    next_position += 1;
                    next_position - 1
                }),
                None => {
                    next_position += 1;
                    next_position - 1
                }
            };
            Some(position)
        })
        .collect();

    let count = next_position;
    positions
        .into_iter()
        .map(|position| position.map(|position| ClusterSlot { position, count }))
        .collect()
}
