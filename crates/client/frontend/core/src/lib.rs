//! Cross-frontend primitives for presenting a round.
//!
//! Houses the stage timeline reducer, the progress view model, message
//! logging and the event consumer that feeds them from the runtime's stage
//! bus. Nothing here renders; CLI and graphical clients build on these types.
pub mod config;
pub mod event;
pub mod message;
pub mod services;
pub mod timeline;
pub mod view_model;

pub use config::{FrontendConfig, MessageConfig, ProgressConfig};
pub use event::{EventImpact, TimelineConsumer};
pub use message::{MessageEntry, MessageLevel, MessageLog};
pub use services::TimelineDriver;
pub use timeline::{TimelineAction, TimelinePhase, TimelineState};
pub use view_model::{ProgressView, TimelineEntryView};
