//! The financial advisor chat.

use std::sync::Arc;

use finpanel_core::api::FinanceApi;
use finpanel_core::panel::PanelState;
use finpanel_core::transcript::{Transcript, TurnId};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::until_cancelled;
use crate::error::PanelError;

pub const ADVISOR_GREETING: &str =
    "Welcome to the Financial Advisor! How can I assist you with your financial planning today?";

pub const ADVISOR_FALLBACK: &str =
    "I apologize, but I encountered an error processing your request. Please try again.";

#[derive(Debug)]
struct AdvisorState {
    transcript: Transcript,
    state: PanelState,
}

/// Question/answer chat against the advisor endpoint.
#[derive(Clone)]
pub struct AdvisorPanel {
    api: Arc<dyn FinanceApi>,
    inner: Arc<Mutex<AdvisorState>>,
    cancel: CancellationToken,
}

impl AdvisorPanel {
    pub fn new(api: Arc<dyn FinanceApi>) -> Self {
        Self {
            api,
            inner: Arc::new(Mutex::new(AdvisorState {
                transcript: Transcript::with_greeting(ADVISOR_GREETING),
                state: PanelState::Idle,
            })),
            cancel: CancellationToken::new(),
        }
    }

    pub async fn transcript(&self) -> Transcript {
        self.inner.lock().await.transcript.clone()
    }

    pub async fn state(&self) -> PanelState {
        self.inner.lock().await.state
    }

    /// Abandons any call in flight. Used when the view is left.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Sends one question and waits for its answer.
    ///
    /// The user turn and a pending reply slot are appended before the call;
    /// the reply fills that slot by id. A failed call fills it with
    /// [`ADVISOR_FALLBACK`]. Returns the id of the reply turn.
    pub async fn send(&self, input: &str) -> Result<TurnId, PanelError> {
        let question = input.trim();
        if question.is_empty() {
            return Err(PanelError::EmptyInput);
        }

        let request_id = {
            let mut inner = self.inner.lock().await;
            if inner.state.is_pending() {
                return Err(PanelError::Busy);
            }
            inner.transcript.push_user(question);
            let request_id = inner.transcript.push_pending("");
            inner.state = PanelState::Pending { request_id };
            request_id
        };

        tracing::debug!(%request_id, "Advisor question sent");
        let result = until_cancelled(&self.cancel, self.api.ask_question(question)).await?;

        let reply = match result {
            Ok(answer) => answer.answer,
            Err(e) => {
                tracing::warn!(%request_id, "Advisor question failed: {}", e);
                ADVISOR_FALLBACK.to_string()
            }
        };

        let mut inner = self.inner.lock().await;
        inner.transcript.resolve(request_id, reply);
        inner.state = PanelState::Done;
        Ok(request_id)
    }
}
