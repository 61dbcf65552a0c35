//! Scroll options: what callers pass, the defaults they fall back to, and the
//! resolved record the animator consumes.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::config::ScrollConfig;
use crate::host::{Coords, ScrollHost};
use crate::scroll::easing::Easing;
use crate::{Error, Result};

/// Lifecycle hook: receives the target element (if any) and the requested
/// coordinates
pub type ScrollCallback<E> = Rc<dyn Fn(Option<&E>, Coords)>;

/// An element given directly or by selector
#[derive(Debug, Clone, PartialEq)]
pub enum ElementRef<E> {
    Selector(String),
    Element(E),
}

impl<E: Clone> ElementRef<E> {
    pub fn selector(selector: impl Into<String>) -> Self {
        ElementRef::Selector(selector.into())
    }

    /// Look the element up once; a selector that matches nothing is an error
    pub fn resolve<H>(&self, host: &H) -> Result<E>
    where
        H: ScrollHost<Element = E>,
    {
        match self {
            ElementRef::Element(element) => Ok(element.clone()),
            ElementRef::Selector(selector) => host
                .query_selector(selector)
                .ok_or_else(|| Error::ElementNotFound(selector.clone())),
        }
    }
}

/// Adjustment added to the target on both axes
#[derive(Clone)]
pub enum OffsetSource {
    Fixed(f64),
    /// Evaluated once, when the animation begins
    Deferred(Rc<dyn Fn() -> f64>),
}

impl OffsetSource {
    pub fn resolve(&self) -> f64 {
        match self {
            OffsetSource::Fixed(value) => *value,
            OffsetSource::Deferred(f) => f(),
        }
    }
}

impl Default for OffsetSource {
    fn default() -> Self {
        OffsetSource::Fixed(0.0)
    }
}

impl From<f64> for OffsetSource {
    fn from(value: f64) -> Self {
        OffsetSource::Fixed(value)
    }
}

impl fmt::Debug for OffsetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetSource::Fixed(value) => write!(f, "Fixed({})", value),
            OffsetSource::Deferred(_) => write!(f, "Deferred"),
        }
    }
}

/// Caller-supplied options for one animation. Unset fields fall back to the
/// service defaults.
#[derive(Clone)]
pub struct AnimationOptions<E> {
    pub container: Option<ElementRef<E>>,
    pub element: Option<ElementRef<E>>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub offset: Option<OffsetSource>,
    pub duration: Option<f64>,
    pub delay: Option<f64>,
    pub easing: Option<Easing>,
    pub scroll_x: Option<bool>,
    pub scroll_y: Option<bool>,
    pub on_start: Option<ScrollCallback<E>>,
    pub on_done: Option<ScrollCallback<E>>,
    pub on_aborting: Option<ScrollCallback<E>>,
}

impl<E> Default for AnimationOptions<E> {
    fn default() -> Self {
        Self {
            container: None,
            element: None,
            x: None,
            y: None,
            offset: None,
            duration: None,
            delay: None,
            easing: None,
            scroll_x: None,
            scroll_y: None,
            on_start: None,
            on_done: None,
            on_aborting: None,
        }
    }
}

impl<E> AnimationOptions<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container(mut self, container: E) -> Self {
        self.container = Some(ElementRef::Element(container));
        self
    }

    pub fn container_selector(mut self, selector: impl Into<String>) -> Self {
        self.container = Some(ElementRef::Selector(selector.into()));
        self
    }

    pub fn element(mut self, element: E) -> Self {
        self.element = Some(ElementRef::Element(element));
        self
    }

    pub fn element_selector(mut self, selector: impl Into<String>) -> Self {
        self.element = Some(ElementRef::Selector(selector.into()));
        self
    }

    pub fn x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    pub fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = Some(OffsetSource::Fixed(offset));
        self
    }

    /// Offset computed by `f` when the animation begins
    pub fn offset_with<F>(mut self, f: F) -> Self
    where
        F: Fn() -> f64 + 'static,
    {
        self.offset = Some(OffsetSource::Deferred(Rc::new(f)));
        self
    }

    pub fn duration(mut self, duration_ms: f64) -> Self {
        self.duration = Some(duration_ms);
        self
    }

    pub fn delay(mut self, delay_ms: f64) -> Self {
        self.delay = Some(delay_ms);
        self
    }

    pub fn easing(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    pub fn scroll_x(mut self, enabled: bool) -> Self {
        self.scroll_x = Some(enabled);
        self
    }

    pub fn scroll_y(mut self, enabled: bool) -> Self {
        self.scroll_y = Some(enabled);
        self
    }

    pub fn on_start<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&E>, Coords) + 'static,
    {
        self.on_start = Some(Rc::new(f));
        self
    }

    pub fn on_done<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&E>, Coords) + 'static,
    {
        self.on_done = Some(Rc::new(f));
        self
    }

    pub fn on_aborting<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&E>, Coords) + 'static,
    {
        self.on_aborting = Some(Rc::new(f));
        self
    }
}

impl<E: fmt::Debug> fmt::Debug for AnimationOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationOptions")
            .field("container", &self.container)
            .field("element", &self.element)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("offset", &self.offset)
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("easing", &self.easing)
            .field("scroll_x", &self.scroll_x)
            .field("scroll_y", &self.scroll_y)
            .finish_non_exhaustive()
    }
}

/// Fallback options shared by every call made through one service
#[derive(Clone)]
pub struct DefaultOptions<E> {
    pub container: ElementRef<E>,
    pub offset: OffsetSource,
    pub duration: f64,
    pub delay: f64,
    pub easing: Easing,
    pub scroll_x: bool,
    pub scroll_y: bool,
    pub on_start: Option<ScrollCallback<E>>,
    pub on_done: Option<ScrollCallback<E>>,
    pub on_aborting: Option<ScrollCallback<E>>,
}

impl<E> DefaultOptions<E> {
    pub fn from_config(config: &ScrollConfig) -> Self {
        Self {
            container: ElementRef::Selector(config.container.clone()),
            offset: OffsetSource::Fixed(config.offset),
            duration: config.duration_ms,
            delay: config.delay_ms,
            easing: Easing::Preset(config.easing),
            scroll_x: config.scroll_x,
            scroll_y: config.scroll_y,
            on_start: None,
            on_done: None,
            on_aborting: None,
        }
    }

    /// Overwrite every field `options` sets. Target fields are not defaults
    /// and are ignored.
    pub fn merge(&mut self, options: AnimationOptions<E>) {
        if options.element.is_some() || options.x.is_some() || options.y.is_some() {
            debug!("Ignoring target fields in default options");
        }

        if let Some(container) = options.container {
            self.container = container;
        }
        if let Some(offset) = options.offset {
            self.offset = offset;
        }
        if let Some(duration) = options.duration {
            self.duration = duration;
        }
        if let Some(delay) = options.delay {
            self.delay = delay;
        }
        if let Some(easing) = options.easing {
            self.easing = easing;
        }
        if let Some(scroll_x) = options.scroll_x {
            self.scroll_x = scroll_x;
        }
        if let Some(scroll_y) = options.scroll_y {
            self.scroll_y = scroll_y;
        }
        if options.on_start.is_some() {
            self.on_start = options.on_start;
        }
        if options.on_done.is_some() {
            self.on_done = options.on_done;
        }
        if options.on_aborting.is_some() {
            self.on_aborting = options.on_aborting;
        }
    }
}

impl<E> Default for DefaultOptions<E> {
    fn default() -> Self {
        Self::from_config(&ScrollConfig::default())
    }
}

impl<E: fmt::Debug> fmt::Debug for DefaultOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultOptions")
            .field("container", &self.container)
            .field("offset", &self.offset)
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("easing", &self.easing)
            .field("scroll_x", &self.scroll_x)
            .field("scroll_y", &self.scroll_y)
            .finish_non_exhaustive()
    }
}

/// Fully populated options with concrete elements
#[derive(Clone)]
pub struct ResolvedOptions<E> {
    pub container: E,
    pub element: Option<E>,
    pub x: f64,
    pub y: f64,
    pub offset: OffsetSource,
    pub duration: f64,
    pub delay: f64,
    pub easing: Easing,
    pub scroll_x: bool,
    pub scroll_y: bool,
    pub on_start: Option<ScrollCallback<E>>,
    pub on_done: Option<ScrollCallback<E>>,
    pub on_aborting: Option<ScrollCallback<E>>,
}

impl<E: fmt::Debug> fmt::Debug for ResolvedOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedOptions")
            .field("container", &self.container)
            .field("element", &self.element)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("offset", &self.offset)
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("easing", &self.easing)
            .field("scroll_x", &self.scroll_x)
            .field("scroll_y", &self.scroll_y)
            .finish_non_exhaustive()
    }
}

/// Merge `options` over `defaults` and resolve element references
pub fn resolve<H: ScrollHost>(
    host: &H,
    defaults: &DefaultOptions<H::Element>,
    options: AnimationOptions<H::Element>,
) -> Result<ResolvedOptions<H::Element>> {
    let container = options
        .container
        .as_ref()
        .unwrap_or(&defaults.container)
        .resolve(host)?;
    let element = options
        .element
        .as_ref()
        .map(|element| element.resolve(host))
        .transpose()?;

    Ok(ResolvedOptions {
        container,
        element,
        x: options.x.unwrap_or(0.0),
        y: options.y.unwrap_or(0.0),
        offset: options.offset.unwrap_or_else(|| defaults.offset.clone()),
        duration: options.duration.unwrap_or(defaults.duration),
        delay: options.delay.unwrap_or(defaults.delay),
        easing: options.easing.unwrap_or_else(|| defaults.easing.clone()),
        scroll_x: options.scroll_x.unwrap_or(defaults.scroll_x),
        scroll_y: options.scroll_y.unwrap_or(defaults.scroll_y),
        on_start: options.on_start.or_else(|| defaults.on_start.clone()),
        on_done: options.on_done.or_else(|| defaults.on_done.clone()),
        on_aborting: options.on_aborting.or_else(|| defaults.on_aborting.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EasingType;
    use crate::host::{BoxMetrics, Position};
    use crate::memory::{MemoryDocument, NodeId};

    fn page() -> MemoryDocument {
        MemoryDocument::new(BoxMetrics::new(800.0, 600.0, 800.0, 2000.0))
    }

    #[test]
    fn test_defaults_fill_unset_fields() {
        let doc = page();
        let defaults = DefaultOptions::default();
        let resolved = resolve(&doc, &defaults, AnimationOptions::new().y(300.0)).unwrap();

        assert_eq!(resolved.container, doc.body());
        assert_eq!(resolved.element, None);
        assert_eq!(resolved.y, 300.0);
        assert_eq!(resolved.x, 0.0);
        assert_eq!(resolved.duration, 500.0);
        assert_eq!(resolved.delay, 0.0);
        assert!(!resolved.scroll_x);
        assert!(resolved.scroll_y);
        assert!(resolved.on_done.is_none());
    }

    #[test]
    fn test_caller_wins_key_by_key() {
        let doc = page();
        let panel = doc.append("#panel", None, Position::default(), BoxMetrics::default());
        let defaults = DefaultOptions::default();
        let options = AnimationOptions::new()
            .container_selector("#panel")
            .duration(120.0)
            .scroll_x(true)
            .easing(EasingType::Linear);
        let resolved = resolve(&doc, &defaults, options).unwrap();

        assert_eq!(resolved.container, panel);
        assert_eq!(resolved.duration, 120.0);
        assert_eq!(resolved.delay, 0.0);
        assert!(resolved.scroll_x);
        assert!(resolved.scroll_y);
        assert_eq!(resolved.easing.apply(0.3), 0.3);
    }

    #[test]
    fn test_missing_selector_is_an_error() {
        let doc = page();
        let defaults = DefaultOptions::<NodeId>::default();

        let err = resolve(&doc, &defaults, AnimationOptions::new().element_selector("#nope"))
            .unwrap_err();
        assert!(matches!(err, Error::ElementNotFound(ref s) if s == "#nope"));

        let err = resolve(&doc, &defaults, AnimationOptions::new().container_selector("#gone"))
            .unwrap_err();
        assert!(matches!(err, Error::ElementNotFound(_)));
    }

    #[test]
    fn test_merge_ignores_target_fields() {
        let mut defaults = DefaultOptions::<NodeId>::default();
        defaults.merge(
            AnimationOptions::new()
                .duration(1000.0)
                .offset(-60.0)
                .y(400.0)
                .element_selector("#x"),
        );

        assert_eq!(defaults.duration, 1000.0);
        assert_eq!(defaults.offset.resolve(), -60.0);
        assert_eq!(defaults.delay, 0.0);
        assert!(matches!(defaults.container, ElementRef::Selector(ref s) if s == "body"));
    }

    #[test]
    fn test_default_callbacks_carry_over() {
        let doc = page();
        let mut defaults = DefaultOptions::<NodeId>::default();
        defaults.merge(AnimationOptions::new().on_done(|_, _| {}));

        let resolved = resolve(&doc, &defaults, AnimationOptions::new()).unwrap();
        assert!(resolved.on_done.is_some());
        assert!(resolved.on_start.is_none());
    }
}
