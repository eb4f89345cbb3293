//! Finpanel application layer.
//!
//! Owns the session gate, the navigator that mounts views for the current
//! route, and the per-view panels that turn user input into backend calls.

pub mod error;
pub mod home;
pub mod navigator;
pub mod panels;
pub mod session_gate;

#[cfg(test)]
pub(crate) mod testing;

pub use error::PanelError;
pub use home::HomeView;
pub use navigator::{ActiveView, Navigator};
pub use panels::{AdvisorPanel, LoanFormPanel, LoanOutcome, StockAnalysisPanel};
pub use session_gate::SessionGate;
