//! Animated particle background.
//!
//! Owns the [`NeuralField`] simulation, drives it from
//! `requestAnimationFrame`, and feeds it window size and pointer input.

mod renderer;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use synapse_core::{FieldConfig, NeuralField, Viewport};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, MouseEvent, Window};

use crate::error::SetupError;

type FrameClosure = Closure<dyn FnMut(f64)>;

struct Surface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    field: RefCell<NeuralField>,
}

impl Surface {
    /// Matches the backing store to the window and scales drawing so the
    /// simulation works in CSS pixels.
    fn fit(&self, viewport: &Viewport) {
        let (width, height) = viewport.backing_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let style = self.canvas.style();
        let width = style.set_property("width", &format!("{}px", viewport.width));
        let height = style.set_property("height", &format!("{}px", viewport.height));
        if let Err(err) = width.and(height) {
            tracing::warn!(?err, "failed to size canvas");
        }

        if let Err(err) = self
            .ctx
            .set_transform(viewport.dpr, 0.0, 0.0, viewport.dpr, 0.0, 0.0)
        {
            tracing::warn!(?err, "failed to scale canvas");
        }
    }
}

fn window_viewport(window: &Window, max_dpr: f64) -> Viewport {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Viewport::new(
        dimension(window.inner_width()),
        dimension(window.inner_height()),
        window.device_pixel_ratio(),
        max_dpr,
    )
}

/// Field settings from the canvas `data-config` attribute, if any.
fn field_config(canvas: &HtmlCanvasElement, base: &FieldConfig) -> FieldConfig {
    let Some(json) = canvas.get_attribute("data-config") else {
        return base.clone();
    };
    match FieldConfig::from_json(&json) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(%err, "ignoring canvas data-config");
            base.clone()
        }
    }
}

fn request_frame(closure: &FrameClosure) -> Option<i32> {
    web_sys::window()?
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

/// Running background animation. Stops and detaches on drop.
pub struct NeuralCanvas {
    surface: Rc<Surface>,
    running: Rc<Cell<bool>>,
    frame_id: Rc<Cell<Option<i32>>>,
    frame: Rc<RefCell<Option<FrameClosure>>>,
    listeners: Vec<EventListener>,
}

impl NeuralCanvas {
    /// Starts the animation on the canvas with `canvas_id`.
    ///
    /// Returns `Ok(None)` when the page has no such canvas.
    pub fn init(
        document: &Document,
        canvas_id: &str,
        base: &FieldConfig,
    ) -> Result<Option<Self>, SetupError> {
        let Some(element) = document.get_element_by_id(canvas_id) else {
            return Ok(None);
        };
        let Ok(canvas) = element.dyn_into::<HtmlCanvasElement>() else {
            tracing::warn!(canvas_id, "element is not a canvas");
            return Ok(None);
        };

        let ctx = canvas
            .get_context("2d")?
            .ok_or(SetupError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SetupError::NoContext)?;

        let config = field_config(&canvas, base);
        let window = gloo::utils::window();
        let viewport = window_viewport(&window, config.max_dpr);
        let field = NeuralField::new(config, viewport, rand::random())?;
        tracing::info!(
            nodes = field.nodes().len(),
            width = viewport.width,
            height = viewport.height,
            dpr = viewport.dpr,
            "neural canvas ready"
        );

        let surface = Rc::new(Surface {
            canvas,
            ctx,
            field: RefCell::new(field),
        });
        surface.fit(&viewport);

        let mut background = Self {
            surface,
            running: Rc::new(Cell::new(true)),
            frame_id: Rc::new(Cell::new(None)),
            frame: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
        };
        background.listen(&window, document);
        background.start();
        Ok(Some(background))
    }

    fn listen(&mut self, window: &Window, document: &Document) {
        let surface = self.surface.clone();
        let resize_window = window.clone();
        self.listeners.push(EventListener::new(window, "resize", move |_| {
            let max_dpr = surface.field.borrow().config().max_dpr;
            let viewport = window_viewport(&resize_window, max_dpr);
            surface.field.borrow_mut().resize(viewport);
            surface.fit(&viewport);
        }));

        // gloo listeners are passive by default.
        let surface = self.surface.clone();
        self.listeners
            .push(EventListener::new(window, "mousemove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    surface
                        .field
                        .borrow_mut()
                        .set_pointer(f64::from(event.client_x()), f64::from(event.client_y()));
                }
            }));

        let surface = self.surface.clone();
        self.listeners
            .push(EventListener::new(document, "mouseleave", move |_| {
                surface.field.borrow_mut().clear_pointer();
            }));

        let surface = self.surface.clone();
        self.listeners.push(EventListener::new(window, "click", move |_| {
            surface.field.borrow_mut().pulse();
        }));
    }

    fn start(&self) {
        let surface = self.surface.clone();
        let running = self.running.clone();
        let frame_id = self.frame_id.clone();
        let next_frame = self.frame.clone();

        *self.frame.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            if !running.get() {
                return;
            }

            {
                let mut field = surface.field.borrow_mut();
                field.step(timestamp);
                if let Err(err) = renderer::draw(&surface.ctx, &field) {
                    tracing::error!(?err, "failed to draw frame");
                }
            }

            if let Some(closure) = next_frame.borrow().as_ref() {
                frame_id.set(request_frame(closure));
            }
        }));

        if let Some(closure) = self.frame.borrow().as_ref() {
            self.frame_id.set(request_frame(closure));
        }
    }

    /// Fires a pulse wave from a random node.
    pub fn pulse(&self) {
        self.surface.field.borrow_mut().pulse();
    }

    /// Stops the loop and removes every listener.
    pub fn destroy(&mut self) {
        self.running.set(false);
        if let Some(id) = self.frame_id.take() {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.cancel_animation_frame(id) {
                    tracing::warn!(?err, "failed to cancel animation frame");
                }
            }
        }
        // Break the closure's reference to its own slot.
        *self.frame.borrow_mut() = None;
        self.listeners.clear();
    }
}

impl Drop for NeuralCanvas {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_missing_canvas_is_noop() {
        let document = gloo::utils::document();
        let result = NeuralCanvas::init(&document, "no-such-canvas", &FieldConfig::default());
        assert!(result.unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn test_canvas_sized_to_window() {
        let document = gloo::utils::document();
        let canvas = document.create_element("canvas").unwrap();
        canvas.set_id("test-neural-canvas");
        document.body().unwrap().append_child(&canvas).unwrap();

        let mut background =
            NeuralCanvas::init(&document, "test-neural-canvas", &FieldConfig::default())
                .unwrap()
                .unwrap();

        let viewport = *background.surface.field.borrow().viewport();
        let (width, height) = viewport.backing_size();
        let canvas = canvas.dyn_into::<HtmlCanvasElement>().unwrap();
        assert_eq!(canvas.width(), width);
        assert_eq!(canvas.height(), height);
        let style = canvas.style();
        assert_eq!(
            style.get_property_value("width").unwrap(),
            format!("{}px", viewport.width)
        );
        assert!(!background.surface.field.borrow().nodes().is_empty());

        background.pulse();
        background.destroy();
        assert!(!background.running.get());
        assert!(background.frame.borrow().is_none());
    }

    #[wasm_bindgen_test]
    fn test_bad_data_config_falls_back() {
        let document = gloo::utils::document();
        let canvas = document
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        canvas.set_attribute("data-config", "{\"max_nodes\": 5}").unwrap();
        let config = field_config(&canvas, &FieldConfig::default());
        assert_eq!(config, FieldConfig::default());

        canvas.set_attribute("data-config", "{\"max_nodes\": 30}").unwrap();
        assert_eq!(field_config(&canvas, &FieldConfig::default()).max_nodes, 30);
    }
}
