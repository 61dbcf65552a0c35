//! Browser backend for scrollto
//!
//! Wires [`ScrollService`] to the live DOM and `requestAnimationFrame`.
//!
//! ```ignore
//! let scroller = scrollto_web::page_scroller()?;
//! scroller.scroll_to(AnimationOptions::new().element_selector("#pricing").offset(-64.0))?;
//!
//! let top = AnimationOptions::new().into();
//! let action = scrollto_web::attach(&scroller, &link, ActionKind::ScrollToTop, top);
//! ```

pub mod document;
pub mod frame;

use std::rc::Rc;

use tracing::debug;
use web_sys::Element;

use scrollto_core::{ActionKind, ActionOptions, Result, ScrollAction, ScrollConfig, ScrollService};

pub use document::WebDocument;
pub use frame::AnimationFrameScheduler;

pub type WebScroller = ScrollService<WebDocument, AnimationFrameScheduler>;

/// A scroller for the current page with the built-in defaults
pub fn page_scroller() -> Result<Rc<WebScroller>> {
    page_scroller_with_config(&ScrollConfig::default())
}

/// A scroller for the current page whose defaults come from `config`
pub fn page_scroller_with_config(config: &ScrollConfig) -> Result<Rc<WebScroller>> {
    let document = WebDocument::new()?;
    let scheduler = AnimationFrameScheduler::new(document.window().clone())?;
    debug!(duration_ms = config.duration_ms, easing = %config.easing, "Page scroller ready");
    Ok(Rc::new(ScrollService::with_config(
        Rc::new(document),
        Rc::new(scheduler),
        config,
    )))
}

/// Run `kind` whenever `node` is clicked or touched
pub fn attach(
    scroller: &Rc<WebScroller>,
    node: &Element,
    kind: ActionKind,
    options: ActionOptions<Element>,
) -> ScrollAction<WebDocument> {
    ScrollAction::attach(scroller, node, kind, options)
}
