//! Long-running services that keep view state in sync with the runtime.
pub mod progress;

pub use progress::TimelineDriver;
