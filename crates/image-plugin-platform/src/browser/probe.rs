use wasm_bindgen::JsValue;

use image_plugin_core::{EnvironmentMarker, EnvironmentProbe, NativeOs, MARKER_GLOBAL};

use super::invoke::from_js;

/// Reads the marker the host injects into `globalThis`.
///
/// A page without the marker, or with one that does not parse, is plain web.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserProbe;

impl BrowserProbe {
    pub fn marker(&self) -> EnvironmentMarker {
        let global = js_sys::global();
        let value = match js_sys::Reflect::get(&global, &JsValue::from_str(MARKER_GLOBAL)) {
            Ok(value) if value.is_object() => value,
            _ => return EnvironmentMarker::web(),
        };
        from_js(&value).unwrap_or_else(|err| {
            tracing::warn!("malformed {MARKER_GLOBAL} marker: {err}");
            EnvironmentMarker::web()
        })
    }
}

impl EnvironmentProbe for BrowserProbe {
    fn has_desktop_bridge(&self) -> bool {
        self.marker().desktop_bridge
    }

    fn native_os(&self) -> Option<NativeOs> {
        self.marker().native_os
    }
}
