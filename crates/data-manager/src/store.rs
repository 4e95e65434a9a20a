//! Series store: loads records, aggregates, caches

use dashboard_chart_config::ChartSettings;
use dashboard_chart_shared::SeriesPoint;
use std::sync::Arc;

use crate::{aggregate_monthly, embed_script, DataError, DataResult, RequestRecord, SeriesCache};

/// Where request records come from (the database in production)
pub trait RecordSource: Send + Sync {
    fn load_records(&self) -> DataResult<Vec<RequestRecord>>;
}

impl<F> RecordSource for F
where
    F: Fn() -> DataResult<Vec<RequestRecord>> + Send + Sync,
{
    fn load_records(&self) -> DataResult<Vec<RequestRecord>> {
        self()
    }
}

/// Produces the series embedded into the dashboard page
pub struct SeriesStore<S: RecordSource> {
    source: S,
    cache: SeriesCache,
    settings: ChartSettings,
}

impl<S: RecordSource> SeriesStore<S> {
    pub fn new(source: S, settings: ChartSettings) -> Self {
        Self {
            source,
            cache: SeriesCache::new(settings.cache_timeout()),
            settings,
        }
    }

    /// Current series, from cache when enabled and fresh.
    ///
    /// A failing source or label format degrades to an empty series so the
    /// page renders its "no data" state instead of failing.
    pub fn series(&self) -> Arc<Vec<SeriesPoint>> {
        if self.settings.cache_enabled {
            if let Some(series) = self.cache.get() {
                log::debug!("Series served from cache");
                return series;
            }
        }

        let series = match self.load() {
            Ok(series) => Arc::new(series),
            Err(e) => {
                log::error!("Failed to load request series: {e}");
                return Arc::new(Vec::new());
            }
        };
        log::info!("Monthly request series loaded: {} months", series.len());

        if self.settings.cache_enabled {
            self.cache.insert(series.clone());
            log::debug!("Series cached for {}s", self.cache.ttl().as_secs());
        } else {
            log::debug!("Cache disabled - series not stored");
        }

        series
    }

    /// The current series as the `<script>` element the admin page embeds
    pub fn embed(&self) -> DataResult<String> {
        embed_script(&self.series(), &self.settings.data_global)
    }

    /// Drop the cached series; the next call reloads
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    fn load(&self) -> DataResult<Vec<SeriesPoint>> {
        let zone = self
            .settings
            .utc_offset()
            .map_err(|e| DataError::Settings(e.to_string()))?;
        let records = self.source.load_records()?;
        aggregate_monthly(&records, &zone, &self.settings.label_format)
    }
}
