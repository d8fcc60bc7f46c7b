//! Host-facing engine facade.
//!
//! `SeriesEngine` is split across focused `impl` blocks: data binding,
//! configuration changes, regeneration, interaction and snapshots.

mod config;
mod config_controller;
mod data_controller;
mod engine;
mod engine_snapshot;
mod interaction_controller;
mod invalidation;
mod regeneration_coordinator;
mod series;

pub use config::{EngineConfig, SeriesConfig};
pub use engine::SeriesEngine;
pub use engine_snapshot::{EngineSnapshot, SeriesSnapshot};
pub use interaction_controller::{SeriesHit, TooltipInfo};
pub use invalidation::{InvalidationLevel, SeriesConfigField};
pub use regeneration_coordinator::SeriesRegeneration;
pub use series::{ChartSeries, SeriesId};
