use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::{BindingPath, FunnelMode, PyramidMode, SegmentParams, SeriesKind, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::AdornmentPosition;

/// Per-series configuration value object.
///
/// Hosts mutate a copy, store it with
/// [`super::SeriesEngine::update_series_config`] and then report the touched
/// field through [`super::SeriesEngine::on_configuration_changed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub kind: SeriesKind,
    #[serde(default)]
    pub x_path: Option<BindingPath>,
    pub y_path: BindingPath,
    /// Stack group label; stacking series without a label share the default group.
    #[serde(default)]
    pub stack_group: Option<String>,
    /// Fraction of the accumulation height reserved for gaps, in `[0, 1)`.
    #[serde(default)]
    pub gap_ratio: f64,
    /// Fraction of the side-by-side slot left empty, in `[0, 1]`.
    #[serde(default)]
    pub segment_spacing: f64,
    #[serde(default)]
    pub explode_index: Option<usize>,
    #[serde(default)]
    pub explode_all: bool,
    #[serde(default = "default_explode_offset_px")]
    pub explode_offset_px: f64,
    #[serde(default = "default_min_width")]
    pub min_width: f64,
    #[serde(default)]
    pub funnel_mode: FunnelMode,
    #[serde(default)]
    pub pyramid_mode: PyramidMode,
    /// When `false`, category data is grouped by distinct label.
    #[serde(default = "default_true")]
    pub arrange_by_index: bool,
    #[serde(default = "default_scatter_extent")]
    pub scatter_width: f64,
    #[serde(default = "default_scatter_extent")]
    pub scatter_height: f64,
    #[serde(default = "default_stroke_thickness")]
    pub stroke_thickness: f64,
    #[serde(default)]
    pub adornment_position: AdornmentPosition,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Legend-toggled slices; only funnel and pyramid kinds honor them.
    #[serde(default)]
    pub toggled_indices: IndexSet<usize>,
    /// Swap axes; always on for [`SeriesKind::Bar`].
    #[serde(default)]
    pub transposed: bool,
}

impl SeriesConfig {
    #[must_use]
    pub fn new(kind: SeriesKind, y_path: BindingPath) -> Self {
        Self {
            kind,
            x_path: None,
            y_path,
            stack_group: None,
            gap_ratio: 0.0,
            segment_spacing: 0.0,
            explode_index: None,
            explode_all: false,
            explode_offset_px: default_explode_offset_px(),
            min_width: default_min_width(),
            funnel_mode: FunnelMode::default(),
            pyramid_mode: PyramidMode::default(),
            arrange_by_index: true,
            scatter_width: default_scatter_extent(),
            scatter_height: default_scatter_extent(),
            stroke_thickness: default_stroke_thickness(),
            adornment_position: AdornmentPosition::default(),
            visible: true,
            toggled_indices: IndexSet::new(),
            transposed: false,
        }
    }

    /// Parses both binding paths and builds a default config.
    pub fn for_fields(kind: SeriesKind, x_path: &str, y_path: &str) -> ChartResult<Self> {
        Ok(Self::new(kind, BindingPath::parse(y_path)?).with_x_path(BindingPath::parse(x_path)?))
    }

    #[must_use]
    pub fn with_x_path(mut self, path: BindingPath) -> Self {
        self.x_path = Some(path);
        self
    }

    #[must_use]
    pub fn with_stack_group(mut self, group: impl Into<String>) -> Self {
        self.stack_group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_gap_ratio(mut self, gap_ratio: f64) -> Self {
        self.gap_ratio = gap_ratio;
        self
    }

    #[must_use]
    pub fn with_segment_spacing(mut self, spacing: f64) -> Self {
        self.segment_spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_explode_index(mut self, index: usize) -> Self {
        self.explode_index = Some(index);
        self
    }

    #[must_use]
    pub fn with_explode_all(mut self, explode_all: bool) -> Self {
        self.explode_all = explode_all;
        self
    }

    #[must_use]
    pub fn with_funnel_mode(mut self, mode: FunnelMode) -> Self {
        self.funnel_mode = mode;
        self
    }

    #[must_use]
    pub fn with_pyramid_mode(mut self, mode: PyramidMode) -> Self {
        self.pyramid_mode = mode;
        self
    }

    #[must_use]
    pub fn with_arrange_by_index(mut self, arrange_by_index: bool) -> Self {
        self.arrange_by_index = arrange_by_index;
        self
    }

    #[must_use]
    pub fn with_scatter_extent(mut self, width: f64, height: f64) -> Self {
        self.scatter_width = width;
        self.scatter_height = height;
        self
    }

    #[must_use]
    pub fn with_stroke_thickness(mut self, thickness: f64) -> Self {
        self.stroke_thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_adornment_position(mut self, position: AdornmentPosition) -> Self {
        self.adornment_position = position;
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_toggled_index(mut self, index: usize) -> Self {
        self.toggled_indices.insert(index);
        self
    }

    #[must_use]
    pub fn is_transposed(&self) -> bool {
        self.transposed || self.kind.is_transposed()
    }

    /// Stack group label, empty for the default group.
    #[must_use]
    pub fn stack_group_label(&self) -> &str {
        self.stack_group.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn segment_params(&self) -> SegmentParams {
        SegmentParams {
            gap_ratio: self.gap_ratio,
            explode_index: self.explode_index,
            explode_all: self.explode_all,
            min_width: self.min_width,
            funnel_mode: self.funnel_mode,
            pyramid_mode: self.pyramid_mode,
            scatter_width: self.scatter_width,
            scatter_height: self.scatter_height,
            toggled_indices: self.toggled_indices.clone(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.gap_ratio.is_finite() || !(0.0..1.0).contains(&self.gap_ratio) {
            return Err(ChartError::config("gap_ratio", "must be finite and in [0, 1)"));
        }
        if !self.segment_spacing.is_finite() || !(0.0..=1.0).contains(&self.segment_spacing) {
            return Err(ChartError::config(
                "segment_spacing",
                "must be finite and in [0, 1]",
            ));
        }
        if !self.min_width.is_finite() || !(0.0..=1.0).contains(&self.min_width) {
            return Err(ChartError::config("min_width", "must be finite and in [0, 1]"));
        }
        if !self.explode_offset_px.is_finite() || self.explode_offset_px < 0.0 {
            return Err(ChartError::config(
                "explode_offset_px",
                "must be finite and >= 0",
            ));
        }
        for (value, field) in [
            (self.scatter_width, "scatter_width"),
            (self.scatter_height, "scatter_height"),
            (self.stroke_thickness, "stroke_thickness"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::config(field, "must be finite and > 0"));
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize series config: {e}")))
    }

    /// Deserializes and validates a config.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse series config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

/// Engine bootstrap configuration: plot size and axis windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub viewport: Viewport,
    pub x_start: f64,
    pub x_end: f64,
    pub y_start: f64,
    pub y_end: f64,
    #[serde(default)]
    pub x_inversed: bool,
    #[serde(default)]
    pub y_inversed: bool,
    /// Half side of the square hit region around the cursor, in pixels.
    #[serde(default = "default_hit_tolerance_px")]
    pub hit_tolerance_px: f64,
}

impl EngineConfig {
    /// Creates a config with a `[0, 1]` y range.
    #[must_use]
    pub fn new(viewport: Viewport, x_start: f64, x_end: f64) -> Self {
        Self {
            viewport,
            x_start,
            x_end,
            y_start: 0.0,
            y_end: 1.0,
            x_inversed: false,
            y_inversed: false,
            hit_tolerance_px: default_hit_tolerance_px(),
        }
    }

    #[must_use]
    pub fn with_y_range(mut self, y_start: f64, y_end: f64) -> Self {
        self.y_start = y_start;
        self.y_end = y_end;
        self
    }

    #[must_use]
    pub fn with_x_inversed(mut self, inversed: bool) -> Self {
        self.x_inversed = inversed;
        self
    }

    #[must_use]
    pub fn with_y_inversed(mut self, inversed: bool) -> Self {
        self.y_inversed = inversed;
        self
    }

    #[must_use]
    pub fn with_hit_tolerance_px(mut self, tolerance: f64) -> Self {
        self.hit_tolerance_px = tolerance;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.hit_tolerance_px.is_finite() || self.hit_tolerance_px < 0.0 {
            return Err(ChartError::config(
                "hit_tolerance_px",
                "must be finite and >= 0",
            ));
        }
        Ok(self)
    }

    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_true() -> bool {
    true
}

fn default_explode_offset_px() -> f64 {
    30.0
}

fn default_min_width() -> f64 {
    0.1
}

fn default_scatter_extent() -> f64 {
    20.0
}

fn default_stroke_thickness() -> f64 {
    2.0
}

fn default_hit_tolerance_px() -> f64 {
    2.0
}
