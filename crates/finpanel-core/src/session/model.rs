//! Session domain models.

use serde::{Deserialize, Serialize};

/// Key under which the durable store keeps the session marker.
pub const SESSION_MARKER_KEY: &str = "isAuthenticated";

/// The durable form of the session flag.
///
/// Only the literal string `"true"` means authenticated; anything else,
/// including a missing or malformed marker, reads as logged out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMarker {
    #[serde(rename = "isAuthenticated")]
    pub value: String,
}

impl SessionMarker {
    pub fn new(authenticated: bool) -> Self {
        Self {
            value: authenticated.to_string(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.value == "true"
    }

    /// Interprets an optional raw marker value.
    pub fn parse(raw: Option<&str>) -> bool {
        matches!(raw, Some("true"))
    }
}

/// How the user claimed to be logged in.
///
/// Neither method is verified: the gate is presentational, not a
/// security boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginMethod {
    /// The e-mail/password form.
    Password { email: String, password: String },
    /// A third-party identity callback. An empty credential is the
    /// provider's error callback.
    OAuth { credential: String },
}

impl LoginMethod {
    /// Short label for logs; never includes the credential itself.
    pub fn label(&self) -> &'static str {
        match self {
            LoginMethod::Password { .. } => "password",
            LoginMethod::OAuth { .. } => "oauth",
        }
    }

    /// Whether the form or callback carries every required field.
    pub fn is_complete(&self) -> bool {
        match self {
            LoginMethod::Password { email, password } => {
                !email.trim().is_empty() && !password.is_empty()
            }
            LoginMethod::OAuth { credential } => !credential.trim().is_empty(),
        }
    }
}
