//! Smooth scroll animation
//!
//! - `easing` - Pure easing curves (quad, cubic, quint, sine, expo)
//! - `timing` - Frame window and interpolation helpers
//! - `animation` - The per-frame state machine built from the two
//!
//! # Usage
//!
//! ```ignore
//! use scrollto_core::scroll::{FrameStatus, ScrollAnimation};
//!
//! let mut animation = ScrollAnimation::begin(&host, resolved, scheduler.now());
//! let handle = animation.handle();
//!
//! // Once per display refresh
//! if animation.step(&host, frame_time) == FrameStatus::Finished {
//!     // stop scheduling
//! }
//!
//! // From anywhere else
//! handle.cancel();
//! ```

pub mod animation;
pub mod easing;
pub mod timing;

pub use animation::{AnimationPhase, FrameStatus, ScrollAnimation, ScrollHandle};
pub use easing::{Easing, EasingType, EasingTypeExt};
pub use timing::FrameWindow;
