//! Chart initializer
//!
//! Finds the drawing surface, maps the series into the line chart
//! configuration and hands it to the charting library. The page and the
//! library are reached through [`PageHost`] and [`ChartFactory`] so the same
//! logic runs against the browser or against test doubles.

use dashboard_chart_config::ChartSettings;
use std::cell::RefCell;
use dashboard_chart_shared::{
    build_chart_config, ChartConfiguration, ChartResult, InitOutcome, SeriesPoint,
};

use crate::instance_manager::InstanceRegistry;

/// A chart the library has constructed
pub trait ChartHandle {
    /// Release the chart and its listeners on the surface
    fn destroy(&self);
}

/// The page the chart is drawn on
pub trait PageHost {
    type Surface;

    fn find_surface(&self, id: &str) -> Option<Self::Surface>;

    /// Hide the element containing the surface (the "no data" state)
    fn hide_container(&self, surface: &Self::Surface) -> ChartResult<()>;
}

/// The charting library's constructor
pub trait ChartFactory<S> {
    type Chart: ChartHandle;

    fn construct(&self, surface: &S, config: &ChartConfiguration) -> ChartResult<Self::Chart>;
}

pub struct ChartInitializer {
    settings: ChartSettings,
}

impl ChartInitializer {
    pub fn new(settings: ChartSettings) -> Self {
        Self { settings }
    }

    /// Build the chart once per surface.
    ///
    /// Never fails: every path ends in an [`InitOutcome`], and a surface that
    /// already carries a registered chart is left untouched. The registry is
    /// only borrowed between calls into the host and the factory.
    pub fn initialize<H, F>(
        &self,
        host: &H,
        factory: &F,
        registry: &RefCell<InstanceRegistry<F::Chart>>,
        series: &[SeriesPoint],
    ) -> InitOutcome
    where
        H: PageHost,
        F: ChartFactory<H::Surface>,
    {
        let surface_id = self.settings.surface_id.as_str();

        let Some(surface) = host.find_surface(surface_id) else {
            log::warn!("Canvas element #{surface_id} not found");
            return InitOutcome::SurfaceMissing;
        };

        if registry.borrow().contains(surface_id) {
            log::warn!("Chart already initialized on #{surface_id}");
            return InitOutcome::AlreadyRendered;
        }

        if series.is_empty() {
            log::warn!("No data available for dashboard chart");
            if let Err(e) = host.hide_container(&surface) {
                log::warn!("Could not hide chart container: {e}");
            }
            return InitOutcome::NoData;
        }

        let config = build_chart_config(series, &self.settings.axis_captions());

        if !registry.borrow_mut().reserve(surface_id) {
            log::warn!("Chart already initialized on #{surface_id}");
            return InitOutcome::AlreadyRendered;
        }
        let constructed = factory.construct(&surface, &config);

        let mut charts = registry.borrow_mut();
        match constructed {
            Ok(chart) => {
                charts.insert(surface_id, chart);
                log::info!(
                    "Dashboard chart rendered on #{surface_id}: {} points",
                    series.len()
                );
                InitOutcome::Rendered
            }
            Err(e) => {
                charts.release(surface_id);
                log::error!("Error initializing chart: {e}");
                InitOutcome::ConstructionFailed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Destroy any chart registered on the surface, then initialize again
    pub fn reinitialize<H, F>(
        &self,
        host: &H,
        factory: &F,
        registry: &RefCell<InstanceRegistry<F::Chart>>,
        series: &[SeriesPoint],
    ) -> InitOutcome
    where
        H: PageHost,
        F: ChartFactory<H::Surface>,
    {
        dispose(registry, &self.settings.surface_id);
        self.initialize(host, factory, registry, series)
    }
}

/// Destroy and forget the chart on `surface_id`. Returns whether one existed.
pub fn dispose<C: ChartHandle>(registry: &RefCell<InstanceRegistry<C>>, surface_id: &str) -> bool {
    let removed = registry.borrow_mut().remove(surface_id);
    match removed {
        Some(chart) => {
            chart.destroy();
            log::debug!("Disposed chart on #{surface_id}");
            true
        }
        None => false,
    }
}
