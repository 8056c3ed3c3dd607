//! Wires every enhancement to the page and exposes the JS entry points.

use std::cell::RefCell;

use gloo::events::EventListener;
use synapse_core::PageConfig;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::canvas::NeuralCanvas;
use crate::components::DetailView;
use crate::dom::{self, NavHandle, RevealHandle, StepperHandle};
use crate::error::SetupError;

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

/// Everything attached to the current document. Dropping it detaches all
/// listeners, observers and the animation loop.
pub struct Page {
    _reveals: Option<RevealHandle>,
    _nav: Option<NavHandle>,
    _steppers: Vec<StepperHandle>,
    canvas: Option<NeuralCanvas>,
    overview: Option<DetailView>,
    concept: Option<DetailView>,
}

/// Logs a failed setup and carries on without it.
fn settle<T>(what: &str, result: Result<T, SetupError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::error!(%err, "failed to set up {what}");
            None
        }
    }
}

impl Page {
    pub fn init(document: &Document, config: &PageConfig) -> Self {
        let reveals = settle("scroll reveals", dom::init_reveals(document, &config.reveal)).flatten();
        let nav = settle(
            "section navigation",
            dom::init_nav(document, &config.nav, &config.reveal),
        )
        .flatten();
        let steppers = settle("steppers", dom::init_steppers(document, &config.stepper))
            .unwrap_or_default();
        let canvas = settle(
            "neural canvas",
            NeuralCanvas::init(document, &config.canvas_id, &config.field),
        )
        .flatten();

        let detail = &config.detail;
        Self {
            _reveals: reveals,
            _nav: nav,
            _steppers: steppers,
            canvas,
            overview: DetailView::load(document, &detail.overview, &detail.visible_class),
            concept: DetailView::load(document, &detail.concept, &detail.visible_class),
        }
    }
}

fn mount(config: &PageConfig) {
    let page = Page::init(&gloo::utils::document(), config);
    PAGE.with_borrow_mut(|slot| *slot = Some(page));
}

/// Mounts now if the DOM is parsed, otherwise on `DOMContentLoaded`.
pub fn mount_when_ready(config: PageConfig) {
    let document = gloo::utils::document();
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", move |_| mount(&config)).forget();
    } else {
        mount(&config);
    }
}

/// Installs the page's JS entry points (`showDetail`, `showConceptDetail`,
/// `pulseBackground`, `destroyEnhancements`) on `window`, so inline
/// handlers such as `onclick="showDetail('attention')"` work.
pub fn expose_globals() -> Result<(), SetupError> {
    let window = gloo::utils::window();

    let keyed: [(&str, fn(&str)); 2] = [
        ("showDetail", show_detail),
        ("showConceptDetail", show_concept_detail),
    ];
    for (name, handler) in keyed {
        let closure = Closure::<dyn Fn(JsValue)>::new(move |key: JsValue| {
            if let Some(key) = key.as_string() {
                handler(&key);
            }
        });
        js_sys::Reflect::set(&window, &JsValue::from_str(name), closure.as_ref())?;
        closure.forget();
    }

    let plain: [(&str, fn()); 2] = [
        ("pulseBackground", pulse_background),
        ("destroyEnhancements", destroy_enhancements),
    ];
    for (name, handler) in plain {
        let closure = Closure::<dyn Fn()>::new(handler);
        js_sys::Reflect::set(&window, &JsValue::from_str(name), closure.as_ref())?;
        closure.forget();
    }
    Ok(())
}

fn show_detail(key: &str) {
    PAGE.with_borrow_mut(|page| {
        if let Some(view) = page.as_mut().and_then(|p| p.overview.as_mut()) {
            view.show(key);
        }
    });
}

fn show_concept_detail(key: &str) {
    PAGE.with_borrow_mut(|page| {
        if let Some(view) = page.as_mut().and_then(|p| p.concept.as_mut()) {
            view.show(key);
        }
    });
}

fn pulse_background() {
    PAGE.with_borrow(|page| {
        if let Some(canvas) = page.as_ref().and_then(|p| p.canvas.as_ref()) {
            canvas.pulse();
        }
    });
}

fn destroy_enhancements() {
    if PAGE.with_borrow_mut(Option::take).is_some() {
        tracing::info!("page enhancements removed");
    }
}
