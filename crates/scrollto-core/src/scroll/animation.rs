//! Scroll animation state machine
//!
//! Combines easing and timing to move one container from its current offset
//! to a target. The animation owns no loop: whatever drives frames calls
//! [`ScrollAnimation::step`] once per refresh until it reports
//! [`FrameStatus::Finished`].

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use super::timing::{lerp, FrameWindow};
use crate::host::{Coords, ScrollHost};
use crate::options::{ResolvedOptions, ScrollCallback};
use crate::position::{
    cumulative_offset, get_scroll_left, get_scroll_top, set_scroll_left, set_scroll_top,
};

/// Lifecycle of one animation. `Completed` and `Aborted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    /// Waiting for the start time (the delay has not elapsed)
    Pending,
    Running,
    Completed,
    Aborted,
}

impl AnimationPhase {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnimationPhase::Completed | AnimationPhase::Aborted)
    }
}

/// Whether the frame driver should keep calling `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Finished,
}

#[derive(Debug)]
struct HandleState {
    cancelled: Cell<bool>,
    phase: Cell<AnimationPhase>,
}

/// Cancellation handle returned to the caller of a scroll
///
/// Cancelling is cooperative: the animation notices on its next frame, fires
/// `on_aborting` and stops writing.
#[derive(Debug, Clone)]
pub struct ScrollHandle {
    state: Rc<HandleState>,
}

impl ScrollHandle {
    fn new() -> Self {
        Self {
            state: Rc::new(HandleState {
                cancelled: Cell::new(false),
                phase: Cell::new(AnimationPhase::Pending),
            }),
        }
    }

    /// Request the animation to stop. Has no effect once it finished.
    pub fn cancel(&self) {
        self.state.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get()
    }

    pub fn phase(&self) -> AnimationPhase {
        self.state.phase.get()
    }

    pub fn is_finished(&self) -> bool {
        self.phase().is_terminal()
    }
}

/// One in-flight scroll animation
pub struct ScrollAnimation<E> {
    options: ResolvedOptions<E>,
    window: FrameWindow,
    initial: Coords,
    target: Coords,
    handle: ScrollHandle,
}

impl<E: Clone + PartialEq + std::fmt::Debug + 'static> ScrollAnimation<E> {
    /// Compute start and target offsets and hold the container at its start
    /// position. `now` is the current frame clock time.
    pub fn begin<H>(host: &H, options: ResolvedOptions<E>, now: f64) -> Self
    where
        H: ScrollHost<Element = E>,
    {
        let offset = options.offset.resolve();

        // An element target is measured from the container's origin; literal
        // coordinates are already container offsets.
        let target = match &options.element {
            Some(element) => {
                let container_origin = cumulative_offset(host, &options.container);
                let element_origin = cumulative_offset(host, element);
                Coords {
                    x: element_origin.left - container_origin.left + offset,
                    y: element_origin.top - container_origin.top + offset,
                }
            }
            None => Coords {
                x: options.x + offset,
                y: options.y + offset,
            },
        };

        let initial = Coords {
            x: get_scroll_left(host, &options.container),
            y: get_scroll_top(host, &options.container),
        };

        let window = FrameWindow::new(now, options.delay, options.duration);
        debug!(
            from_x = initial.x,
            from_y = initial.y,
            to_x = target.x,
            to_y = target.y,
            start = window.start,
            end = window.end,
            "Scroll animation scheduled"
        );

        let animation = Self {
            options,
            window,
            initial,
            target,
            handle: ScrollHandle::new(),
        };
        animation.tick(host, 0.0);
        animation
    }

    pub fn handle(&self) -> ScrollHandle {
        self.handle.clone()
    }

    pub fn phase(&self) -> AnimationPhase {
        self.handle.phase()
    }

    /// Offset the container held when the animation began
    pub fn initial(&self) -> Coords {
        self.initial
    }

    /// Offset the container ends at
    pub fn target(&self) -> Coords {
        self.target
    }

    pub fn window(&self) -> FrameWindow {
        self.window
    }

    /// Advance the animation to frame time `now`
    pub fn step<H>(&mut self, host: &H, now: f64) -> FrameStatus
    where
        H: ScrollHost<Element = E>,
    {
        let phase = self.phase();
        if phase.is_terminal() {
            return FrameStatus::Finished;
        }

        if self.handle.is_cancelled() {
            self.set_phase(AnimationPhase::Aborted);
            debug!(now, "Scroll animation aborted");
            self.fire(&self.options.on_aborting);
            return FrameStatus::Finished;
        }

        if phase == AnimationPhase::Pending && self.window.has_started(now) {
            self.set_phase(AnimationPhase::Running);
            self.fire(&self.options.on_start);
        }

        if self.phase() != AnimationPhase::Running {
            return FrameStatus::Continue;
        }

        if self.window.is_complete(now) {
            self.tick(host, 1.0);
            self.set_phase(AnimationPhase::Completed);
            debug!(now, "Scroll animation completed");
            self.fire(&self.options.on_done);
            return FrameStatus::Finished;
        }

        let eased = self.options.easing.apply(self.window.progress(now));
        self.tick(host, eased);
        FrameStatus::Continue
    }

    /// Write the offset at `progress` on every enabled axis
    fn tick<H>(&self, host: &H, progress: f64)
    where
        H: ScrollHost<Element = E>,
    {
        let container = &self.options.container;
        if self.options.scroll_x {
            set_scroll_left(host, container, lerp(self.initial.x, self.target.x, progress));
        }
        if self.options.scroll_y {
            set_scroll_top(host, container, lerp(self.initial.y, self.target.y, progress));
        }
    }

    fn set_phase(&self, phase: AnimationPhase) {
        self.handle.state.phase.set(phase);
    }

    fn fire(&self, callback: &Option<ScrollCallback<E>>) {
        if let Some(callback) = callback {
            let coords = Coords {
                x: self.options.x,
                y: self.options.y,
            };
            callback(self.options.element.as_ref(), coords);
        }
    }
}
