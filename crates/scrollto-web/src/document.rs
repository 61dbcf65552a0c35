//! `ScrollHost` over the live browser DOM

use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use scrollto_core::{ActivationHost, Axis, BoxMetrics, Error, Position, Result, ScrollHost};

/// The page the library runs in
#[derive(Debug, Clone)]
pub struct WebDocument {
    window: Window,
    document: Document,
    body: Element,
    html: Element,
}

impl WebDocument {
    /// Capture the global window, document, `body` and `html` elements.
    /// Fails before the body has been parsed.
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| Error::Host("no global window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| Error::Host("window has no document".into()))?;
        let body: Element = document
            .body()
            .ok_or_else(|| Error::Host("document has no body".into()))?
            .into();
        let html = document
            .document_element()
            .ok_or_else(|| Error::Host("document has no root element".into()))?;

        Ok(Self {
            window,
            document,
            body,
            html,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

/// Layout properties (`offsetTop`, `offsetParent`, ...) only exist on HTML
/// elements; anything else (SVG) measures as zero.
fn as_html(element: &Element) -> Option<&HtmlElement> {
    element.dyn_ref::<HtmlElement>()
}

/// DOM scroll setters take whole pixels
pub(crate) fn to_pixels(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32
}

impl ScrollHost for WebDocument {
    type Element = Element;

    fn query_selector(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(e) => {
                warn!(selector, error = ?e, "Invalid selector");
                None
            }
        }
    }

    fn body(&self) -> Element {
        self.body.clone()
    }

    fn document_element(&self) -> Element {
        self.html.clone()
    }

    fn offset_parent(&self, element: &Element) -> Option<Element> {
        as_html(element).and_then(|el| el.offset_parent())
    }

    fn layout_offset(&self, element: &Element) -> Position {
        as_html(element)
            .map(|el| Position::new(el.offset_top() as f64, el.offset_left() as f64))
            .unwrap_or_default()
    }

    fn box_metrics(&self, element: &Element) -> BoxMetrics {
        let (offset_width, offset_height) = as_html(element)
            .map(|el| (el.offset_width() as f64, el.offset_height() as f64))
            .unwrap_or_default();

        BoxMetrics {
            scroll_width: element.scroll_width() as f64,
            scroll_height: element.scroll_height() as f64,
            offset_width,
            offset_height,
            client_width: element.client_width() as f64,
            client_height: element.client_height() as f64,
        }
    }

    fn element_scroll(&self, element: &Element, axis: Axis) -> f64 {
        match axis {
            Axis::X => element.scroll_left() as f64,
            Axis::Y => element.scroll_top() as f64,
        }
    }

    fn set_element_scroll(&self, element: &Element, axis: Axis, value: f64) {
        match axis {
            Axis::X => element.set_scroll_left(to_pixels(value)),
            Axis::Y => element.set_scroll_top(to_pixels(value)),
        }
    }

    fn window_scroll(&self, axis: Axis) -> f64 {
        let offset = match axis {
            Axis::X => self.window.scroll_x(),
            Axis::Y => self.window.scroll_y(),
        };
        offset.unwrap_or_default()
    }
}

impl ActivationHost for WebDocument {
    type Listener = [EventListener; 2];

    fn on_activate(&self, node: &Element, handler: Rc<dyn Fn()>) -> Self::Listener {
        ["click", "touchstart"].map(|event| {
            let handler = Rc::clone(&handler);
            EventListener::new_with_options(
                node,
                event,
                EventListenerOptions::enable_prevent_default(),
                move |e| {
                    e.prevent_default();
                    handler();
                },
            )
        })
    }
}
