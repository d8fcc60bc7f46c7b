//! chart-series: geometry core for cartesian and accumulation chart series.
//!
//! The crate resolves bound records into numeric values, lays series out side
//! by side or in stacks, generates data-space segments per series kind and
//! projects them into pixel primitives for rendering and hit-testing.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{
    EngineConfig, InvalidationLevel, SeriesConfig, SeriesConfigField, SeriesEngine, SeriesHit,
    SeriesId, TooltipInfo,
};
pub use core::{RegenerationMode, SeriesKind};
pub use error::{ChartError, ChartResult};
