//! Tabbed step-through widgets.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use synapse_core::{Stepper, StepperSelectors};
use web_sys::{Document, Element};

use super::{Query, toggle_class};
use crate::error::SetupError;

struct StepperDom {
    root: Element,
    tabs: Vec<Element>,
    steps: Vec<Element>,
    prev: Option<Element>,
    next: Option<Element>,
    indicator: Option<Element>,
    active_class: String,
}

impl StepperDom {
    fn render(&self, stepper: &Stepper) {
        let view = stepper.view();

        for (i, tab) in self.tabs.iter().enumerate() {
            toggle_class(tab, &self.active_class, stepper.is_active(i));
        }
        for (i, step) in self.steps.iter().enumerate() {
            toggle_class(step, &self.active_class, stepper.is_active(i));
        }
        if let Some(prev) = &self.prev {
            set_disabled(prev, view.prev_disabled);
        }
        if let Some(next) = &self.next {
            set_disabled(next, view.next_disabled);
        }
        if let Some(indicator) = &self.indicator {
            indicator.set_text_content(Some(&view.indicator));
        }
        if let Err(err) = self
            .root
            .set_attribute("data-current-step", &view.current.to_string())
        {
            tracing::warn!(?err, "failed to record current step");
        }
    }
}

fn set_disabled(button: &Element, disabled: bool) {
    if let Err(err) = button.toggle_attribute_with_force("disabled", disabled) {
        tracing::warn!(?err, disabled, "failed to toggle disabled");
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    GoTo(isize),
    Prev,
    Next,
}

/// One bound stepper; dropping it removes the click listeners.
pub struct StepperHandle {
    _listeners: Vec<EventListener>,
}

/// Binds every stepper on the page.
pub fn init_all(
    document: &Document,
    selectors: &StepperSelectors,
) -> Result<Vec<StepperHandle>, SetupError> {
    let mut handles = Vec::new();
    for root in document.query_all(&selectors.root)? {
        if let Some(handle) = bind(root, selectors)? {
            handles.push(handle);
        }
    }
    if !handles.is_empty() {
        tracing::info!(count = handles.len(), "steppers ready");
    }
    Ok(handles)
}

/// Binds one stepper root. Returns `Ok(None)` if it has no steps.
pub fn bind(root: Element, selectors: &StepperSelectors) -> Result<Option<StepperHandle>, SetupError> {
    let steps = root.query_all(&selectors.step)?;
    if steps.is_empty() {
        return Ok(None);
    }

    let dom = Rc::new(StepperDom {
        tabs: root.query_all(&selectors.tab)?,
        prev: root.query(&selectors.prev)?,
        next: root.query(&selectors.next)?,
        indicator: root.query(&selectors.indicator)?,
        active_class: selectors.active_class.clone(),
        steps,
        root,
    });
    let state = Rc::new(RefCell::new(Stepper::new(dom.steps.len())));

    let update = {
        let dom = dom.clone();
        let state = state.clone();
        Rc::new(move |action: Action| {
            let mut stepper = state.borrow_mut();
            match action {
                Action::GoTo(index) => stepper.go_to(index),
                Action::Prev => stepper.prev(),
                Action::Next => stepper.next(),
            };
            dom.render(&stepper);
            tracing::debug!(step = stepper.current(), "stepper moved");
        })
    };

    let mut listeners = Vec::new();
    let mut on_click = |target: &Element, action: Action| {
        let update = update.clone();
        listeners.push(EventListener::new(target, "click", move |_| update(action)));
    };
    for (i, tab) in dom.tabs.iter().enumerate() {
        on_click(tab, Action::GoTo(isize::try_from(i).unwrap_or(isize::MAX)));
    }
    if let Some(prev) = &dom.prev {
        on_click(prev, Action::Prev);
    }
    if let Some(next) = &dom.next {
        on_click(next, Action::Next);
    }

    dom.render(&state.borrow());

    Ok(Some(StepperHandle {
        _listeners: listeners,
    }))
}
