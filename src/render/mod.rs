mod frame;
mod null_renderer;
mod primitives;
mod projection;

pub use frame::{RenderFrame, SeriesFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    EllipsePrimitive, LabelPrimitive, LinePrimitive, PolygonPrimitive, PolylinePrimitive,
    RectPrimitive,
};
pub use projection::{ProjectionContext, project_series};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` so drawing code stays
/// isolated from segment generation and hit-testing.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
