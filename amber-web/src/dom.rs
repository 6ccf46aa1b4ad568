use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Query string of the current location, including the leading `?`.
#[must_use]
pub fn location_search() -> Option<String> {
    window()?.location().search().ok()
}

/// A `setTimeout` registration that is cleared when dropped.
///
/// Dropping the value before it fires cancels the callback, so a timer owned
/// by an effect never outlives the effect that scheduled it.
pub struct Timeout {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    /// Schedule `on_fire` to run once after `delay_ms`.
    ///
    /// Returns `None` outside a browser or when the browser refuses the timer.
    pub fn schedule(delay_ms: u64, on_fire: impl FnOnce() + 'static) -> Option<Self> {
        let window = window()?;
        let mut on_fire = Some(on_fire);
        let callback = Closure::wrap(Box::new(move || {
            if let Some(on_fire) = on_fire.take() {
                on_fire();
            }
        }) as Box<dyn FnMut()>);
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(handle) => Some(Self {
                handle,
                _callback: callback,
            }),
            Err(err) => {
                console_error(&format!("setTimeout failed: {}", js_error_message(&err)));
                None
            }
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(window) = window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}
