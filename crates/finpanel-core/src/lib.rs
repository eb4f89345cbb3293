//! Domain types and seams for the Finpanel client.

pub mod api;
pub mod config;
pub mod error;
pub mod loan;
pub mod panel;
pub mod route;
pub mod session;
pub mod stock;
pub mod transcript;

pub use api::{FinanceApi, HealthStatus, QuestionAnswer};
pub use error::{FinpanelError, Result};
pub use panel::PanelState;
pub use route::{Resolution, Route, RouteTable, ServiceChoice};
