//! Manually driven frame clock
//!
//! [`TickScheduler`] plays the role of `requestAnimationFrame` outside the
//! browser: the owner moves time forward and every active loop runs once per
//! frame.

use std::cell::{Cell, RefCell};

use crate::host::{FrameCallback, FrameScheduler};

#[derive(Default)]
pub struct TickScheduler {
    now: Cell<f64>,
    frames: Cell<u64>,
    active: RefCell<Vec<FrameCallback>>,
    /// Loops requested since the last frame; they join on the next one
    incoming: RefCell<Vec<FrameCallback>>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheduler whose clock starts at `now`
    pub fn starting_at(now: f64) -> Self {
        let scheduler = Self::default();
        scheduler.now.set(now);
        scheduler
    }

    /// Number of frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frames.get()
    }

    /// Loops still running (including ones waiting for their first frame)
    pub fn active_loops(&self) -> usize {
        self.active.borrow().len() + self.incoming.borrow().len()
    }

    pub fn is_idle(&self) -> bool {
        self.active_loops() == 0
    }

    /// Move the clock to `now` and run one frame
    pub fn frame_at(&self, now: f64) {
        self.now.set(now);
        self.frames.set(self.frames.get() + 1);

        let mut loops = std::mem::take(&mut *self.active.borrow_mut());
        loops.append(&mut self.incoming.borrow_mut());

        // Callbacks may request new loops; those land in `incoming`
        loops.retain_mut(|callback| callback(now));

        let mut active = self.active.borrow_mut();
        loops.append(&mut active);
        *active = loops;
    }

    /// Advance the clock by `ms` and run one frame
    pub fn advance(&self, ms: f64) {
        self.frame_at(self.now.get() + ms);
    }

    /// Run fixed-length frames until no loop remains or `max_frames` ran.
    /// Returns the number of frames run.
    pub fn run_until_idle(&self, frame_ms: f64, max_frames: usize) -> usize {
        let mut ran = 0;
        while !self.is_idle() && ran < max_frames {
            self.advance(frame_ms);
            ran += 1;
        }
        ran
    }
}

impl FrameScheduler for TickScheduler {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn request_loop(&self, callback: FrameCallback) {
        self.incoming.borrow_mut().push(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_loop_runs_until_false() {
        let scheduler = TickScheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);

        scheduler.request_loop(Box::new(move |now| {
            log.borrow_mut().push(now);
            now < 48.0
        }));
        assert_eq!(scheduler.active_loops(), 1);

        let ran = scheduler.run_until_idle(16.0, 100);
        assert_eq!(ran, 3);
        assert_eq!(*seen.borrow(), vec![16.0, 32.0, 48.0]);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_loop_requested_mid_frame_waits_for_next_frame() {
        let scheduler = Rc::new(TickScheduler::new());
        let nested_runs = Rc::new(Cell::new(0));

        let inner = Rc::clone(&scheduler);
        let runs = Rc::clone(&nested_runs);
        scheduler.request_loop(Box::new(move |_| {
            let runs = Rc::clone(&runs);
            inner.request_loop(Box::new(move |_| {
                runs.set(runs.get() + 1);
                false
            }));
            false
        }));

        scheduler.advance(16.0);
        assert_eq!(nested_runs.get(), 0);
        assert_eq!(scheduler.active_loops(), 1);

        scheduler.advance(16.0);
        assert_eq!(nested_runs.get(), 1);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_run_until_idle_respects_limit() {
        let scheduler = TickScheduler::starting_at(100.0);
        scheduler.request_loop(Box::new(|_| true));

        assert_eq!(scheduler.run_until_idle(10.0, 5), 5);
        assert_eq!(scheduler.now(), 150.0);
        assert_eq!(scheduler.frame_count(), 5);
    }
}
