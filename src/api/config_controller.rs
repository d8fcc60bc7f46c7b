use tracing::debug;

use crate::error::ChartResult;
use crate::render::Renderer;

use super::{InvalidationLevel, SeriesConfig, SeriesConfigField, SeriesEngine, SeriesId};

impl<R: Renderer> SeriesEngine<R> {
    /// Stores a new configuration without scheduling any work.
    ///
    /// Hosts follow up with [`Self::on_configuration_changed`] for each field
    /// they touched.
    pub fn update_series_config(&mut self, id: SeriesId, config: SeriesConfig) -> ChartResult<()> {
        config.validate()?;
        self.series_mut(id)?.config = config;
        Ok(())
    }

    /// Records that `field` changed on series `id` and returns the level the
    /// next [`Self::regenerate`] call will honor for it.
    ///
    /// Layout-level changes invalidate every series, since sibling slots and
    /// stacks depend on each other.
    pub fn on_configuration_changed(
        &mut self,
        id: SeriesId,
        field: SeriesConfigField,
    ) -> ChartResult<InvalidationLevel> {
        let level = field.invalidation_level();
        self.series_mut(id)?.invalidate(level);
        if level.affects_siblings() {
            self.invalidate_all(level);
        }
        debug!(%id, ?field, ?level, "series configuration changed");
        Ok(level)
    }

    /// Applies `update` to a copy of the config, stores it and reports
    /// `field` as changed.
    pub fn modify_series_config(
        &mut self,
        id: SeriesId,
        field: SeriesConfigField,
        update: impl FnOnce(&mut SeriesConfig),
    ) -> ChartResult<InvalidationLevel> {
        let mut config = self.series(id)?.config.clone();
        update(&mut config);
        self.update_series_config(id, config)?;
        self.on_configuration_changed(id, field)
    }
}
