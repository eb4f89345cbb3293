//! Session flag domain: the login gate and its durable marker.

pub mod model;
pub mod repository;

pub use model::{LoginMethod, SessionMarker, SESSION_MARKER_KEY};
pub use repository::SessionStore;
