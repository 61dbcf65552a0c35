pub mod action;
pub mod config;
pub mod error;
pub mod host;
pub mod memory;
pub mod options;
pub mod position;
pub mod scheduler;
pub mod scroll;
pub mod service;

pub use action::{ActionKind, ActionOptions, ScrollAction};
pub use config::{EasingType, ScrollConfig};
pub use error::{Error, Result};
pub use host::{ActivationHost, Axis, BoxMetrics, Coords, FrameScheduler, Position, ScrollHost};
pub use memory::MemoryDocument;
pub use options::{AnimationOptions, DefaultOptions, ElementRef, OffsetSource, ResolvedOptions};
pub use scheduler::TickScheduler;
pub use scroll::{AnimationPhase, Easing, ScrollHandle};
pub use service::ScrollService;
