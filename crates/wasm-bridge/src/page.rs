//! Browser page and Chart.js bindings

use dashboard_chart_shared::{
    decode_series, format_tooltip_label, ChartConfiguration, ChartError, ChartResult, SeriesPoint,
};
use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement};

use crate::initializer::{ChartFactory, ChartHandle, PageHost};

#[wasm_bindgen]
extern "C" {
    /// Chart.js chart, loaded by the page as the global `Chart`
    pub type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(surface: &HtmlCanvasElement, config: &JsValue) -> Result<Chart, JsValue>;

    #[wasm_bindgen(method, js_name = destroy)]
    fn destroy_chart(this: &Chart);
}

impl ChartHandle for Chart {
    fn destroy(&self) {
        self.destroy_chart();
    }
}

/// The document the module was loaded into
pub struct BrowserPage {
    document: Document,
}

impl BrowserPage {
    pub fn current() -> ChartResult<Self> {
        let document = web_sys::window()
            .ok_or_else(|| interop("No window found"))?
            .document()
            .ok_or_else(|| interop("No document found"))?;
        Ok(Self { document })
    }
}

impl PageHost for BrowserPage {
    type Surface = HtmlCanvasElement;

    fn find_surface(&self, id: &str) -> Option<HtmlCanvasElement> {
        let element = self.document.get_element_by_id(id)?;
        match element.dyn_into::<HtmlCanvasElement>() {
            Ok(canvas) => Some(canvas),
            Err(_) => {
                log::warn!("Element #{id} is not a canvas");
                None
            }
        }
    }

    fn hide_container(&self, surface: &HtmlCanvasElement) -> ChartResult<()> {
        let container = surface
            .parent_element()
            .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| ChartError::MissingContainer { id: surface.id() })?;

        container
            .style()
            .set_property("display", "none")
            .map_err(|e| interop(&describe_js_error(&e)))
    }
}

/// Constructs charts through the global Chart.js constructor
pub struct ChartJsFactory;

impl ChartFactory<HtmlCanvasElement> for ChartJsFactory {
    type Chart = Chart;

    fn construct(&self, surface: &HtmlCanvasElement, config: &ChartConfiguration) -> ChartResult<Chart> {
        let js_config = serde_wasm_bindgen::to_value(config).map_err(|e| ChartError::Serialization {
            message: e.to_string(),
        })?;
        attach_tooltip_formatter(&js_config)?;

        Chart::new(surface, &js_config).map_err(|e| ChartError::Construction {
            message: describe_js_error(&e),
        })
    }
}

/// Install `options.plugins.tooltip.callbacks.label`
fn attach_tooltip_formatter(js_config: &JsValue) -> ChartResult<()> {
    let callbacks = ["options", "plugins", "tooltip", "callbacks"]
        .iter()
        .try_fold(js_config.clone(), |object, key| {
            Reflect::get(&object, &JsValue::from_str(key))
        })
        .map_err(|e| interop(&describe_js_error(&e)))?;

    let label = Closure::<dyn Fn(JsValue) -> JsValue>::new(|context: JsValue| {
        let dataset_label = Reflect::get(&context, &"dataset".into())
            .and_then(|dataset| Reflect::get(&dataset, &"label".into()))
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default();
        let formatted_value = Reflect::get(&context, &"formattedValue".into())
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default();

        JsValue::from_str(&format_tooltip_label(&dataset_label, &formatted_value))
    });

    // The chart owns the callback for the rest of the page's life
    Reflect::set(&callbacks, &"label".into(), &label.into_js_value())
        .map_err(|e| interop(&describe_js_error(&e)))?;
    Ok(())
}

/// Read the series the server wrote to `window[name]`
pub fn read_series_global(name: &str) -> Vec<SeriesPoint> {
    match Reflect::get(&js_sys::global(), &JsValue::from_str(name)) {
        Ok(value) => decode_series_value(value),
        Err(e) => {
            log::warn!("Could not read window.{name}: {}", describe_js_error(&e));
            Vec::new()
        }
    }
}

/// Decode a JS series value; absent or malformed input is an empty series
pub fn decode_series_value(value: JsValue) -> Vec<SeriesPoint> {
    if value.is_undefined() || value.is_null() {
        return Vec::new();
    }

    let json: serde_json::Value = match serde_wasm_bindgen::from_value(value) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Unreadable dashboard series: {e}");
            return Vec::new();
        }
    };

    decode_series(&json).unwrap_or_else(|e| {
        log::warn!("{e}; treating as empty");
        Vec::new()
    })
}

pub fn describe_js_error(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn interop(message: &str) -> ChartError {
    ChartError::JsInterop {
        message: message.to_string(),
    }
}
