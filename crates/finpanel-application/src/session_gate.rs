//! The login gate.
//!
//! The durable store is the source of truth. The flag is read from it once
//! when the gate is loaded; every change writes the store first and only
//! then updates the in-memory copy.

use std::sync::Arc;

use finpanel_core::error::{FinpanelError, Result};
use finpanel_core::session::{LoginMethod, SessionMarker, SessionStore};
use tokio::sync::Mutex;

pub struct SessionGate {
    store: Arc<dyn SessionStore>,
    /// Cached flag. The lock is held across the store write so the two
    /// never disagree when observed through the gate.
    authenticated: Mutex<bool>,
}

impl SessionGate {
    /// Rehydrates the flag from the store. A missing marker means logged out.
    pub async fn load(store: Arc<dyn SessionStore>) -> Result<Self> {
        let raw = store.read_marker().await?;
        let authenticated = SessionMarker::parse(raw.as_deref());
        tracing::debug!(authenticated, "Session flag loaded");

        Ok(Self {
            store,
            authenticated: Mutex::new(authenticated),
        })
    }

    pub async fn is_authenticated(&self) -> bool {
        *self.authenticated.lock().await
    }

    /// Accepts a completed password form or a successful OAuth callback.
    ///
    /// Credentials are not checked against anything. An incomplete form or
    /// the OAuth error callback leaves the session unchanged.
    pub async fn login(&self, method: &LoginMethod) -> Result<()> {
        if !method.is_complete() {
            match method {
                LoginMethod::OAuth { .. } => tracing::error!("OAuth login failed"),
                LoginMethod::Password { .. } => {
                    tracing::debug!("Password form submitted with missing fields")
                }
            }
            return Err(FinpanelError::invalid_input(format!(
                "{} login is missing required fields",
                method.label()
            )));
        }

        self.set_authenticated(true).await?;
        tracing::info!(method = method.label(), "Logged in");
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        self.set_authenticated(false).await?;
        tracing::info!("Logged out");
        Ok(())
    }

    async fn set_authenticated(&self, value: bool) -> Result<()> {
        let mut cached = self.authenticated.lock().await;
        if value {
            self.store
                .write_marker(&SessionMarker::new(true).value)
                .await?;
        } else {
            self.store.remove_marker().await?;
        }
        *cached = value;
        Ok(())
    }
}
