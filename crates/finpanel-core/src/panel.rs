//! Busy state shared by every panel.

use serde::{Deserialize, Serialize};

use crate::transcript::TurnId;

/// Lifecycle of a panel's single outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PanelState {
    /// Nothing sent yet.
    #[default]
    Idle,
    /// A request is in flight; further sends are refused.
    Pending { request_id: TurnId },
    /// The last request finished (successfully or not).
    Done,
}

impl PanelState {
    pub fn is_pending(&self) -> bool {
        matches!(self, PanelState::Pending { .. })
    }

    pub fn request_id(&self) -> Option<TurnId> {
        match self {
            PanelState::Pending { request_id } => Some(*request_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(PanelState::default(), PanelState::Idle);
        assert!(!PanelState::Done.is_pending());
    }

    #[test]
    fn test_pending_carries_request_id() {
        let id = TurnId::new();
        let state = PanelState::Pending { request_id: id };
        assert!(state.is_pending());
        assert_eq!(state.request_id(), Some(id));
        assert_eq!(PanelState::Idle.request_id(), None);
    }
}
