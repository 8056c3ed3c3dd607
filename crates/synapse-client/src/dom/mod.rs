//! DOM bindings for the page enhancements.

mod nav;
mod observer;
mod reveal;
mod stepper;

pub use nav::NavHandle;
pub use observer::Observer;
pub use reveal::{RevealHandle, reveal_section};
pub use stepper::StepperHandle;

pub(crate) use nav::init as init_nav;
pub(crate) use reveal::init as init_reveals;
pub(crate) use stepper::init_all as init_steppers;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList};

use crate::error::SetupError;

/// Selector queries shared by `Document` and `Element`.
pub trait Query {
    fn query_all(&self, selector: &str) -> Result<Vec<Element>, SetupError>;
    fn query(&self, selector: &str) -> Result<Option<Element>, SetupError>;
}

impl Query for Document {
    fn query_all(&self, selector: &str) -> Result<Vec<Element>, SetupError> {
        Ok(elements(&self.query_selector_all(selector)?))
    }

    fn query(&self, selector: &str) -> Result<Option<Element>, SetupError> {
        Ok(self.query_selector(selector)?)
    }
}

impl Query for Element {
    fn query_all(&self, selector: &str) -> Result<Vec<Element>, SetupError> {
        Ok(elements(&self.query_selector_all(selector)?))
    }

    fn query(&self, selector: &str) -> Result<Option<Element>, SetupError> {
        Ok(self.query_selector(selector)?)
    }
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn add_class(element: &Element, class: &str) {
    if let Err(err) = element.class_list().add_1(class) {
        tracing::warn!(?err, class, "failed to add class");
    }
}

pub fn toggle_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        tracing::warn!(?err, class, "failed to toggle class");
    }
}

/// Sets a CSS custom property such as `--stagger`.
pub fn set_style_property(element: &Element, name: &str, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        if let Err(err) = element.style().set_property(name, value) {
            tracing::warn!(?err, name, "failed to set style property");
        }
    }
}
