//! `IntersectionObserver` wrapper.

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::SetupError;

/// Owns an observer and its callback; disconnects on drop.
pub struct Observer {
    inner: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Observer {
    /// Calls `on_enter` for every observed element that starts intersecting.
    pub fn new<F>(root_margin: &str, threshold: f64, mut on_enter: F) -> Result<Self, SetupError>
    where
        F: FnMut(&Element, &IntersectionObserver) + 'static,
    {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        on_enter(&entry.target(), &observer);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_root_margin(root_margin);
        init.set_threshold(&JsValue::from_f64(threshold));
        let inner =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            inner,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.inner.observe(element);
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.inner.disconnect();
    }
}
