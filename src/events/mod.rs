pub mod client;
pub mod messages;

pub use client::EventPublisher;
pub use messages::{RecordingSavedMessage, StateChangedMessage};
