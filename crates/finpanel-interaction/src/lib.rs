//! HTTP implementation of the Finpanel backend API.

pub mod backend_client;

pub use backend_client::BackendClient;
