use serde::{Deserialize, Serialize};
use tracing::trace;

/// How contributions accumulate inside a stack group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StackingMode {
    /// Raw absolute values.
    #[default]
    Normal,
    /// Contributions rescaled so each index totals 100.
    Percent,
}

/// Running start/end values of one series inside its stack group.
///
/// For an active series `end[i] = start[i] + |y[i]|`; `end[i]` is `NaN` when
/// `y[i]` is missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CumulativeStack {
    pub start: Vec<f64>,
    pub end: Vec<f64>,
}

impl CumulativeStack {
    #[must_use]
    pub fn len(&self) -> usize {
        self.start.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start.is_empty()
    }

    /// `(start, end)` at `index`, if both are defined.
    #[must_use]
    pub fn span(&self, index: usize) -> Option<(f64, f64)> {
        let start = *self.start.get(index)?;
        let end = *self.end.get(index)?;
        (!start.is_nan() && !end.is_nan()).then_some((start, end))
    }
}

/// One series of a stack group, in registration order.
#[derive(Debug, Clone, Copy)]
pub struct StackMember<'a> {
    pub y: &'a [f64],
    /// Toggled (legend-hidden) members are excluded from the sum.
    pub active: bool,
}

/// Computes cumulative stacks for one group.
///
/// Every member receives an entry per index of the longest member so index
/// alignment survives toggling. Inactive members get zero-height placeholders
/// sitting on the running sum. A missing value leaves the running sum
/// untouched for the members after it.
#[must_use]
pub fn compute_stack_group(members: &[StackMember<'_>], mode: StackingMode) -> Vec<CumulativeStack> {
    let len = members.iter().map(|member| member.y.len()).max().unwrap_or(0);

    let scale: Vec<f64> = match mode {
        StackingMode::Normal => vec![1.0; len],
        StackingMode::Percent => (0..len)
            .map(|index| {
                let total: f64 = members
                    .iter()
                    .filter(|member| member.active)
                    .filter_map(|member| member.y.get(index))
                    .filter(|value| !value.is_nan())
                    .map(|value| value.abs())
                    .sum();
                if total > 0.0 { 100.0 / total } else { 0.0 }
            })
            .collect(),
    };

    let mut running = vec![0.0; len];
    let stacks = members
        .iter()
        .map(|member| {
            let mut stack = CumulativeStack {
                start: Vec::with_capacity(len),
                end: Vec::with_capacity(len),
            };
            for index in 0..len {
                let start = running[index];
                let value = member.y.get(index).copied().unwrap_or(f64::NAN);
                if !member.active {
                    stack.start.push(start);
                    stack.end.push(start);
                } else if value.is_nan() {
                    stack.start.push(start);
                    stack.end.push(f64::NAN);
                } else {
                    let end = start + value.abs() * scale[index];
                    running[index] = end;
                    stack.start.push(start);
                    stack.end.push(end);
                }
            }
            stack
        })
        .collect();

    trace!(members = members.len(), len, ?mode, "computed stack group");
    stacks
}
