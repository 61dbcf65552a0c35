//! Reading layout geometry and scroll offsets
//!
//! The page root scroller is handled here so the animator never needs to know
//! whether the browser exposes page scroll on the window, the document
//! element or `body`.

use crate::host::{Axis, Position, ScrollHost};

/// Position of `element` relative to the document origin
pub fn cumulative_offset<H: ScrollHost>(host: &H, element: &H::Element) -> Position {
    let mut total = Position::default();
    let mut current = Some(element.clone());

    while let Some(el) = current {
        let offset = host.layout_offset(&el);
        total.top += offset.top;
        total.left += offset.left;
        current = host.offset_parent(&el);
    }

    total
}

/// Whether `element` scrolls itself rather than through the page root
pub fn is_direct_scroll<H: ScrollHost>(host: &H, element: &H::Element) -> bool {
    *element != host.body() && *element != host.document_element()
}

pub fn get_scroll<H: ScrollHost>(host: &H, container: &H::Element, axis: Axis) -> f64 {
    if is_direct_scroll(host, container) {
        return host.element_scroll(container, axis);
    }

    // Browsers disagree on which of these carries the page offset; take the
    // first non-zero one.
    [
        host.window_scroll(axis),
        host.element_scroll(&host.document_element(), axis),
        host.element_scroll(&host.body(), axis),
    ]
    .into_iter()
    .find(|value| *value != 0.0 && !value.is_nan())
    .unwrap_or(0.0)
}

pub fn set_scroll<H: ScrollHost>(host: &H, container: &H::Element, axis: Axis, value: f64) {
    if is_direct_scroll(host, container) {
        host.set_element_scroll(container, axis, value);
    } else {
        host.set_element_scroll(&host.document_element(), axis, value);
        host.set_element_scroll(&host.body(), axis, value);
    }
}

#[inline]
pub fn get_scroll_top<H: ScrollHost>(host: &H, container: &H::Element) -> f64 {
    get_scroll(host, container, Axis::Y)
}

#[inline]
pub fn set_scroll_top<H: ScrollHost>(host: &H, container: &H::Element, value: f64) {
    set_scroll(host, container, Axis::Y, value)
}

#[inline]
pub fn get_scroll_left<H: ScrollHost>(host: &H, container: &H::Element) -> f64 {
    get_scroll(host, container, Axis::X)
}

#[inline]
pub fn set_scroll_left<H: ScrollHost>(host: &H, container: &H::Element, value: f64) {
    set_scroll(host, container, Axis::X, value)
}

/// Vertical scroll target that puts `container` at its bottom
pub fn max_scroll_extent<H: ScrollHost>(host: &H, container: &H::Element) -> f64 {
    if is_direct_scroll(host, container) {
        let metrics = host.box_metrics(container);
        return metrics.scroll_height - metrics.offset_height;
    }

    let body = host.box_metrics(&host.body());
    let html = host.box_metrics(&host.document_element());
    [
        body.scroll_height,
        body.offset_height,
        html.client_height,
        html.scroll_height,
        html.offset_height,
    ]
    .into_iter()
    .fold(0.0, f64::max)
}
