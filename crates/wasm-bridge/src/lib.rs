//! WASM Bridge crate for the dashboard series chart
//! Wires the admin page, the embedded series and Chart.js together

use dashboard_chart_config::{ChartSettings, ConfigValidator};
use dashboard_chart_shared::{InitOutcome, SeriesPoint};
use wasm_bindgen::prelude::*;

// Core modules
pub mod initializer;
pub mod instance_manager;
pub mod lifecycle;
pub mod page;

use initializer::ChartInitializer;
use instance_manager::with_browser_registry;
use page::{BrowserPage, ChartJsFactory};

/// Initialize the WASM module.
///
/// Loading the module is enough to get the chart: with default settings it
/// renders from the page global once the DOM is ready. Pages that configure
/// a different surface call [`init_dashboard_chart`] with their options.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Another module on the page may already own the logger
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = schedule_from_global(ChartSettings::default()) {
        log::error!("Could not schedule dashboard chart: {e:?}");
    }
}

/// Render the chart from the page-global series once the DOM is ready.
///
/// Once the automatic run from [`start`] has rendered on the default
/// surface, calling this for that surface is a no-op (`already_rendered`)
/// unless the chart was disposed first.
#[wasm_bindgen]
pub fn init_dashboard_chart(options: JsValue) -> Result<(), JsValue> {
    schedule_from_global(settings_from_js(options)?)
}

/// Render the chart now from an explicit series. Returns `{status, message?}`.
#[wasm_bindgen]
pub fn render_dashboard_chart(series: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let settings = settings_from_js(options)?;
    let series = page::decode_series_value(series);
    to_js(&render(&settings, &series, false))
}

/// Destroy any chart already on the surface, then render again
#[wasm_bindgen]
pub fn rerender_dashboard_chart(series: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let settings = settings_from_js(options)?;
    let series = page::decode_series_value(series);
    to_js(&render(&settings, &series, true))
}

/// Destroy the chart on `surface_id`. Returns whether one existed.
#[wasm_bindgen]
pub fn dispose_dashboard_chart(surface_id: &str) -> bool {
    with_browser_registry(|registry| initializer::dispose(registry, surface_id))
}

/// The configuration object the chart would be built with
#[wasm_bindgen]
pub fn build_chart_config(series: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let settings = settings_from_js(options)?;
    let series = page::decode_series_value(series);
    let config = dashboard_chart_shared::build_chart_config(&series, &settings.axis_captions());
    to_js(&config)
}

fn schedule_from_global(settings: ChartSettings) -> Result<(), JsValue> {
    lifecycle::on_dom_ready(move || {
        let series = page::read_series_global(&settings.data_global);
        let outcome = render(&settings, &series, false);
        log::debug!("Dashboard chart initialization finished: {outcome}");
    })
}

fn render(settings: &ChartSettings, series: &[SeriesPoint], replace: bool) -> InitOutcome {
    let page = match BrowserPage::current() {
        Ok(page) => page,
        Err(e) => {
            log::warn!("{e}");
            return InitOutcome::SurfaceMissing;
        }
    };
    let initializer = ChartInitializer::new(settings.clone());

    with_browser_registry(|registry| {
        if replace {
            initializer.reinitialize(&page, &ChartJsFactory, registry, series)
        } else {
            initializer.initialize(&page, &ChartJsFactory, registry, series)
        }
    })
}

/// Partial settings object from JS; `undefined` or `null` means defaults
fn settings_from_js(options: JsValue) -> Result<ChartSettings, JsValue> {
    let settings = if options.is_undefined() || options.is_null() {
        ChartSettings::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };

    ConfigValidator::validate(&settings).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(settings)
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(Into::into)
}
