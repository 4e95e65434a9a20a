//! Page-load lifecycle

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Run `f` once the document's structure is parsed.
///
/// While the document is still loading, `f` waits for `DOMContentLoaded`;
/// otherwise it runs immediately.
pub fn on_dom_ready<F>(f: F) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    let document = web_sys::window()
        .ok_or("No window found")?
        .document()
        .ok_or("No document found")?;

    if document.ready_state() == "loading" {
        let callback = Closure::once_into_js(f);
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
        log::debug!("Chart initialization deferred to DOMContentLoaded");
    } else {
        f();
    }

    Ok(())
}
