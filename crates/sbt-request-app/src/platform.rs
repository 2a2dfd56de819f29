//! Clipboard and timer adapters.

use sbt::{Clipboard, SbtError, Sleep};
use std::time::Duration;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// `navigator.clipboard`. Fails cleanly where the API is missing
/// (insecure contexts, old browsers) or permission is denied.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebClipboard;

impl Clipboard for WebClipboard {
    async fn write_text(&self, text: &str) -> Result<(), SbtError> {
        let window = web_sys::window().ok_or_else(|| SbtError::Clipboard("No window".into()))?;
        let navigator = window.navigator();

        let available = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .map(|v| !v.is_undefined() && !v.is_null())
            .unwrap_or(false);
        if !available {
            return Err(SbtError::Clipboard("Clipboard API unavailable".into()));
        }

        JsFuture::from(navigator.clipboard().write_text(text))
            .await
            .map(|_| ())
            .map_err(|e| SbtError::Clipboard(format!("{:?}", e)))
    }
}

/// `setTimeout`-backed sleep.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimerSleep;

impl Sleep for TimerSleep {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
