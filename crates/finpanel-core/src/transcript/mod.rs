//! Conversational transcript types.

pub mod model;

pub use model::{Speaker, Transcript, Turn, TurnId, TurnStatus};
