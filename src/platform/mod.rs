//! Platform abstraction layer
//!
//! The simulation never owns a clock. Hosts provide:
//! - a frame ticker (request/cancel the next frame)
//! - a periodic timer (start/clear an interval)
//! - input events (fire, resize, start) delivered as [`Task`]s
//!
//! [`TaskQueue`] implements all of this as a single-threaded, virtual-time
//! event loop so every mutation of a round is serialized through one owner.

pub mod task_queue;

pub use task_queue::TaskQueue;

use glam::Vec2;

/// Handle for a pending frame request or a running interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Host scheduling services
pub trait Timers {
    /// Ask for one `Task::Frame` on the next frame
    fn request_frame(&mut self) -> TimerId;

    /// Drop a pending frame request (no-op if it already fired)
    fn cancel_frame(&mut self, id: TimerId);

    /// Deliver `Task::Interval` every `period_ms` until cleared
    fn set_interval(&mut self, period_ms: u32) -> TimerId;

    /// Stop an interval (no-op if unknown)
    fn clear_interval(&mut self, id: TimerId);
}

/// Work delivered to a round, one at a time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Task {
    /// A requested frame is due
    Frame(TimerId),
    /// An interval period elapsed
    Interval(TimerId),
    /// Begin (or restart) a round
    Start,
    /// Pointer click at a viewport position
    Fire(Vec2),
    /// Viewport changed size
    Resize { width: f32, height: f32 },
}
