//! Scroll service: the public entry points
//!
//! A service owns a host, a frame scheduler and the defaults context every
//! call falls back to. Independent services never share defaults.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::config::ScrollConfig;
use crate::host::{FrameScheduler, ScrollHost};
use crate::options::{resolve, AnimationOptions, DefaultOptions, ResolvedOptions};
use crate::position::max_scroll_extent;
use crate::scroll::{FrameStatus, ScrollAnimation, ScrollHandle};
use crate::Result;

pub struct ScrollService<H: ScrollHost, S> {
    host: Rc<H>,
    scheduler: Rc<S>,
    defaults: RefCell<DefaultOptions<H::Element>>,
}

impl<H, S> ScrollService<H, S>
where
    H: ScrollHost + 'static,
    S: FrameScheduler,
{
    /// Create a service with the built-in defaults
    pub fn new(host: Rc<H>, scheduler: Rc<S>) -> Self {
        Self::with_config(host, scheduler, &ScrollConfig::default())
    }

    /// Create a service whose defaults come from `config`
    pub fn with_config(host: Rc<H>, scheduler: Rc<S>, config: &ScrollConfig) -> Self {
        Self {
            host,
            scheduler,
            defaults: RefCell::new(DefaultOptions::from_config(config)),
        }
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    pub fn scheduler(&self) -> &Rc<S> {
        &self.scheduler
    }

    /// Snapshot of the current defaults
    pub fn defaults(&self) -> DefaultOptions<H::Element> {
        self.defaults.borrow().clone()
    }

    /// Merge `options` into the defaults used by every later call
    pub fn set_global_options(&self, options: AnimationOptions<H::Element>) {
        self.defaults.borrow_mut().merge(options);
        debug!(defaults = ?self.defaults.borrow(), "Updated scroll defaults");
    }

    /// Animate to an element or to explicit coordinates
    pub fn scroll_to(&self, options: AnimationOptions<H::Element>) -> Result<ScrollHandle> {
        let resolved = self.resolve(options)?;
        Ok(self.animate(resolved))
    }

    /// Animate the container to vertical offset 0
    pub fn scroll_to_top(&self, mut options: AnimationOptions<H::Element>) -> Result<ScrollHandle> {
        options.element = None;
        options.y = Some(0.0);
        let resolved = self.resolve(options)?;
        Ok(self.animate(resolved))
    }

    /// Animate the container to its maximum vertical scroll extent
    pub fn scroll_to_bottom(
        &self,
        mut options: AnimationOptions<H::Element>,
    ) -> Result<ScrollHandle> {
        options.element = None;
        let mut resolved = self.resolve(options)?;
        resolved.y = max_scroll_extent(&*self.host, &resolved.container);
        Ok(self.animate(resolved))
    }

    fn resolve(
        &self,
        options: AnimationOptions<H::Element>,
    ) -> Result<ResolvedOptions<H::Element>> {
        resolve(&*self.host, &self.defaults.borrow(), options)
    }

    /// Begin the animation now and hand its step function to the scheduler
    fn animate(&self, resolved: ResolvedOptions<H::Element>) -> ScrollHandle {
        let mut animation = ScrollAnimation::begin(&*self.host, resolved, self.scheduler.now());
        let handle = animation.handle();

        let host = Rc::clone(&self.host);
        self.scheduler.request_loop(Box::new(move |now| {
            animation.step(&*host, now) == FrameStatus::Continue
        }));

        handle
    }
}
