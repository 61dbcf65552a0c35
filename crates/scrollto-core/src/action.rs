//! Bind a scroll to an element's click/touch activation
//!
//! ```ignore
//! let mut action = ScrollAction::attach(&service, &link, ActionKind::ScrollTo, "#pricing".into());
//! action.update(AnimationOptions::new().element_selector("#faq").into());
//! action.destroy();
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::warn;

use crate::host::{ActivationHost, FrameScheduler, ScrollHost};
use crate::options::AnimationOptions;
use crate::scroll::ScrollHandle;
use crate::service::ScrollService;
use crate::Result;

/// Which service operation an activation triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    ScrollTo,
    ScrollToTop,
    ScrollToBottom,
}

/// Options bound to an action: a bare selector is shorthand for
/// `{ element: selector }`
#[derive(Clone)]
pub enum ActionOptions<E> {
    Selector(String),
    Options(AnimationOptions<E>),
}

impl<E> ActionOptions<E> {
    pub fn into_animation_options(self) -> AnimationOptions<E> {
        match self {
            ActionOptions::Selector(selector) => AnimationOptions::new().element_selector(selector),
            ActionOptions::Options(options) => options,
        }
    }
}

impl<E> From<&str> for ActionOptions<E> {
    fn from(selector: &str) -> Self {
        ActionOptions::Selector(selector.to_string())
    }
}

impl<E> From<AnimationOptions<E>> for ActionOptions<E> {
    fn from(options: AnimationOptions<E>) -> Self {
        ActionOptions::Options(options)
    }
}

impl<E: fmt::Debug> fmt::Debug for ActionOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOptions::Selector(selector) => write!(f, "Selector({:?})", selector),
            ActionOptions::Options(options) => fmt::Debug::fmt(options, f),
        }
    }
}

impl<H, S> ScrollService<H, S>
where
    H: ScrollHost + 'static,
    S: FrameScheduler,
{
    /// Run the operation named by `kind`
    pub fn run_action(
        &self,
        kind: ActionKind,
        options: AnimationOptions<H::Element>,
    ) -> Result<ScrollHandle> {
        match kind {
            ActionKind::ScrollTo => self.scroll_to(options),
            ActionKind::ScrollToTop => self.scroll_to_top(options),
            ActionKind::ScrollToBottom => self.scroll_to_bottom(options),
        }
    }
}

/// A scroll operation attached to a node until destroyed
pub struct ScrollAction<H: ActivationHost> {
    current: Rc<RefCell<ActionOptions<H::Element>>>,
    listener: Option<H::Listener>,
}

impl<H: ActivationHost + 'static> ScrollAction<H> {
    /// Run `kind` through `service` every time `node` is clicked or touched.
    /// The options are read at activation time, so `update` takes effect on
    /// the next activation.
    pub fn attach<S>(
        service: &Rc<ScrollService<H, S>>,
        node: &H::Element,
        kind: ActionKind,
        options: ActionOptions<H::Element>,
    ) -> Self
    where
        S: FrameScheduler + 'static,
    {
        let current = Rc::new(RefCell::new(options));

        let handler_service = Rc::clone(service);
        let handler_options = Rc::clone(&current);
        let handler = Rc::new(move || {
            let options = handler_options.borrow().clone().into_animation_options();
            if let Err(e) = handler_service.run_action(kind, options) {
                warn!(error = %e, ?kind, "Scroll action failed");
            }
        });

        let listener = service.host().on_activate(node, handler);
        Self {
            current,
            listener: Some(listener),
        }
    }

    /// Replace the options used by later activations
    pub fn update(&self, options: ActionOptions<H::Element>) {
        *self.current.borrow_mut() = options;
    }

    /// Detach the listeners. Later activations do nothing.
    pub fn destroy(&mut self) {
        self.listener.take();
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Axis, BoxMetrics, Position, ScrollHost};
    use crate::memory::{ActivationEvent, MemoryDocument, NodeId};
    use crate::scheduler::TickScheduler;

    type Service = ScrollService<MemoryDocument, TickScheduler>;

    fn setup() -> (Rc<Service>, MemoryDocument, NodeId) {
        let doc = MemoryDocument::new(BoxMetrics::new(1024.0, 768.0, 1024.0, 6000.0));
        let link = doc.append("a.nav", None, Position::new(10.0, 10.0), BoxMetrics::default());
        doc.append("#pricing", None, Position::new(2000.0, 0.0), BoxMetrics::default());
        doc.append("#faq", None, Position::new(3500.0, 0.0), BoxMetrics::default());
        let service = Rc::new(ScrollService::new(
            Rc::new(doc.clone()),
            Rc::new(TickScheduler::new()),
        ));
        (service, doc, link)
    }

    fn settle(service: &Service) {
        service.scheduler().run_until_idle(16.0, 200);
    }

    #[test]
    fn test_selector_shorthand_scrolls_to_element() {
        let (service, doc, link) = setup();
        let _action = ScrollAction::attach(
            &service,
            &link,
            ActionKind::ScrollTo,
            "#pricing".into(),
        );

        assert_eq!(doc.click(&link), 1);
        settle(&service);
        assert_eq!(doc.window_scroll(Axis::Y), 2000.0);
    }

    #[test]
    fn test_update_applies_to_next_activation() {
        let (service, doc, link) = setup();
        let action = ScrollAction::attach(&service, &link, ActionKind::ScrollTo, "#pricing".into());
        action.update(AnimationOptions::new().element_selector("#faq").offset(-50.0).into());

        doc.dispatch(&link, ActivationEvent::TouchStart);
        settle(&service);
        assert_eq!(doc.window_scroll(Axis::Y), 3450.0);
    }

    #[test]
    fn test_top_and_bottom_actions() {
        let (service, doc, link) = setup();
        let footer_link = doc.append("a.bottom", None, Position::default(), BoxMetrics::default());
        let _top = ScrollAction::attach(
            &service,
            &link,
            ActionKind::ScrollToTop,
            AnimationOptions::new().into(),
        );
        let _bottom = ScrollAction::attach(
            &service,
            &footer_link,
            ActionKind::ScrollToBottom,
            AnimationOptions::new().into(),
        );

        doc.click(&footer_link);
        settle(&service);
        // The root extent is the full document height; the write clamps to
        // the last reachable offset.
        assert_eq!(doc.window_scroll(Axis::Y), 6000.0 - 768.0);

        doc.click(&link);
        settle(&service);
        assert_eq!(doc.window_scroll(Axis::Y), 0.0);
    }

    #[test]
    fn test_destroy_detaches_listeners() {
        let (service, doc, link) = setup();
        let mut action = ScrollAction::attach(
            &service,
            &link,
            ActionKind::ScrollTo,
            "#pricing".into(),
        );
        assert!(action.is_attached());

        action.destroy();
        assert!(!action.is_attached());
        assert_eq!(doc.listener_count(&link), 0);
        assert_eq!(doc.click(&link), 0);
        assert!(service.scheduler().is_idle());
    }

    #[test]
    fn test_failed_activation_is_contained() {
        let (service, doc, link) = setup();
        let _action = ScrollAction::attach(
            &service,
            &link,
            ActionKind::ScrollTo,
            "#nowhere".into(),
        );

        assert_eq!(doc.click(&link), 1);
        assert!(service.scheduler().is_idle());
        assert_eq!(doc.scroll_writes(&doc.body()).len(), 0);
    }
}
