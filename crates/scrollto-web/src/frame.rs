//! `requestAnimationFrame`-driven frame scheduler

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{trace, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Performance, Window};

use scrollto_core::host::FrameCallback;
use scrollto_core::{Error, FrameScheduler, Result};

type FrameClosure = Closure<dyn FnMut(f64)>;

pub struct AnimationFrameScheduler {
    window: Window,
    performance: Performance,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window) -> Result<Self> {
        let performance = window
            .performance()
            .ok_or_else(|| Error::Host("window has no performance timer".into()))?;
        Ok(Self {
            window,
            performance,
        })
    }
}

fn request_frame(window: &Window, closure: &FrameClosure) {
    if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        warn!(error = ?e, "requestAnimationFrame failed");
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    /// `performance.now()`, the clock rAF timestamps are measured against
    fn now(&self) -> f64 {
        self.performance.now()
    }

    fn request_loop(&self, mut callback: FrameCallback) {
        // The closure keeps a handle to itself so it can re-request; taking
        // it out of the cell on the last frame drops it and breaks the cycle.
        let slot: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
        let this_frame = Rc::clone(&slot);
        let window = self.window.clone();

        *slot.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            if callback(timestamp) {
                if let Some(closure) = this_frame.borrow().as_ref() {
                    request_frame(&window, closure);
                }
            } else {
                trace!(timestamp, "Frame loop finished");
                drop(this_frame.borrow_mut().take());
            }
        }));

        let first = slot.borrow();
        if let Some(closure) = first.as_ref() {
            request_frame(&self.window, closure);
        }
    }
}
