//! Environment seams: the document being scrolled, activation events, and
//! the frame clock.
//!
//! Hosts use interior mutability the way the DOM does, so every method takes
//! `&self` and a host can be shared through `Rc` between the service and the
//! frame loops it starts.

use std::fmt;
use std::rc::Rc;

/// Scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal (`scrollLeft`)
    X,
    /// Vertical (`scrollTop`)
    Y,
}

/// Layout position relative to an offset parent or to the document origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

impl Position {
    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// Coordinates handed to lifecycle callbacks
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coords {
    pub x: f64,
    pub y: f64,
}

/// Box dimensions of an element
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxMetrics {
    pub scroll_width: f64,
    pub scroll_height: f64,
    pub offset_width: f64,
    pub offset_height: f64,
    pub client_width: f64,
    pub client_height: f64,
}

impl BoxMetrics {
    /// Box whose visible area equals its border box
    pub fn new(width: f64, height: f64, scroll_width: f64, scroll_height: f64) -> Self {
        Self {
            scroll_width,
            scroll_height,
            offset_width: width,
            offset_height: height,
            client_width: width,
            client_height: height,
        }
    }

    /// Largest scroll offset a browser accepts on the given axis
    pub fn max_scroll(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => (self.scroll_width - self.client_width).max(0.0),
            Axis::Y => (self.scroll_height - self.client_height).max(0.0),
        }
    }
}

/// A document whose elements can be measured and scrolled
pub trait ScrollHost {
    /// Concrete element handle
    type Element: Clone + PartialEq + fmt::Debug + 'static;

    /// First element matching `selector`
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// The `body` element
    fn body(&self) -> Self::Element;

    /// The document (`html`) element
    fn document_element(&self) -> Self::Element;

    /// Nearest positioned ancestor, `None` at the document root
    fn offset_parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// `offsetTop` / `offsetLeft` relative to the offset parent
    fn layout_offset(&self, element: &Self::Element) -> Position;

    fn box_metrics(&self, element: &Self::Element) -> BoxMetrics;

    /// The element's own scroll offset
    fn element_scroll(&self, element: &Self::Element, axis: Axis) -> f64;

    fn set_element_scroll(&self, element: &Self::Element, axis: Axis, value: f64);

    /// Window-level scroll offset (`pageXOffset` / `pageYOffset`)
    fn window_scroll(&self, axis: Axis) -> f64;
}

/// A host that can report click/touch activation of an element
pub trait ActivationHost: ScrollHost {
    /// Guard that keeps the listeners attached until dropped
    type Listener;

    /// Call `handler` on click and touchstart of `node`, preventing the
    /// default action of the event.
    fn on_activate(&self, node: &Self::Element, handler: Rc<dyn Fn()>) -> Self::Listener;
}

/// Frame callback: receives the frame timestamp, returns whether to keep
/// running.
pub type FrameCallback = Box<dyn FnMut(f64) -> bool>;

/// The host's display refresh primitive
pub trait FrameScheduler {
    /// Monotonic time in milliseconds
    fn now(&self) -> f64;

    /// Run `callback` once per frame, starting with the next frame, until it
    /// returns false.
    fn request_loop(&self, callback: FrameCallback);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_scroll() {
        let metrics = BoxMetrics::new(300.0, 400.0, 900.0, 1000.0);
        assert_eq!(metrics.max_scroll(Axis::Y), 600.0);
        assert_eq!(metrics.max_scroll(Axis::X), 600.0);

        let short = BoxMetrics::new(300.0, 400.0, 300.0, 100.0);
        assert_eq!(short.max_scroll(Axis::Y), 0.0);
    }
}
