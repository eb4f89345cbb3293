//! Loan application form.

use std::sync::Arc;

use finpanel_core::api::FinanceApi;
use finpanel_core::error::Result as CoreResult;
use finpanel_core::loan::{LoanApplicationDraft, LoanDecision, LoanField};
use finpanel_core::panel::PanelState;
use finpanel_core::transcript::TurnId;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::until_cancelled;
use crate::error::PanelError;

pub const SUBMIT_LABEL: &str = "Submit Application";
pub const PROCESSING_LABEL: &str = "Processing...";

/// The single banner shown after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanOutcome {
    Approved,
    Rejected,
    Error,
}

impl LoanOutcome {
    pub fn banner(&self) -> &'static str {
        match self {
            LoanOutcome::Approved => "Congratulations! Your loan application has been approved.",
            LoanOutcome::Rejected => {
                "Application Status: We regret to inform you that your loan application has been rejected."
            }
            LoanOutcome::Error => {
                "An error occurred while processing your loan application. Please try again."
            }
        }
    }
}

impl From<LoanDecision> for LoanOutcome {
    fn from(decision: LoanDecision) -> Self {
        match decision {
            LoanDecision::Approved => LoanOutcome::Approved,
            LoanDecision::Rejected => LoanOutcome::Rejected,
        }
    }
}

#[derive(Debug, Default)]
struct LoanState {
    draft: LoanApplicationDraft,
    outcome: Option<LoanOutcome>,
    state: PanelState,
}

#[derive(Clone)]
pub struct LoanFormPanel {
    api: Arc<dyn FinanceApi>,
    inner: Arc<Mutex<LoanState>>,
    cancel: CancellationToken,
}

impl LoanFormPanel {
    pub fn new(api: Arc<dyn FinanceApi>) -> Self {
        Self {
            api,
            inner: Arc::new(Mutex::new(LoanState::default())),
            cancel: CancellationToken::new(),
        }
    }

    pub async fn draft(&self) -> LoanApplicationDraft {
        self.inner.lock().await.draft.clone()
    }

    /// Edits one field. Editing stays open while a submission is pending;
    /// the submission already holds its own snapshot.
    pub async fn set_field(&self, field: LoanField, value: &str) -> CoreResult<()> {
        self.inner.lock().await.draft.set(field, value)
    }

    /// The banner currently shown, if any.
    pub async fn outcome(&self) -> Option<LoanOutcome> {
        self.inner.lock().await.outcome
    }

    pub async fn state(&self) -> PanelState {
        self.inner.lock().await.state
    }

    pub async fn submit_label(&self) -> &'static str {
        if self.state().await.is_pending() {
            PROCESSING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Submits a snapshot of the draft and records exactly one outcome.
    ///
    /// The previous banner is cleared as soon as the submission starts.
    /// Numeric fields that do not parse are sent as `null` and left for the
    /// backend to judge.
    pub async fn submit(&self) -> Result<LoanOutcome, PanelError> {
        let (request_id, application) = {
            let mut inner = self.inner.lock().await;
            if inner.state.is_pending() {
                return Err(PanelError::Busy);
            }
            let request_id = TurnId::new();
            inner.outcome = None;
            inner.state = PanelState::Pending { request_id };
            (request_id, inner.draft.to_application())
        };

        let non_numeric = application.non_numeric_fields();
        if !non_numeric.is_empty() {
            let names: Vec<&str> = non_numeric.iter().map(LoanField::wire_name).collect();
            tracing::warn!(%request_id, fields = ?names, "Submitting non-numeric loan fields as null");
        }

        let result = until_cancelled(
            &self.cancel,
            self.api.submit_loan_application(&application),
        )
        .await?;

        let outcome = match result.and_then(|prediction| prediction.decision()) {
            Ok(decision) => LoanOutcome::from(decision),
            Err(e) => {
                tracing::warn!(%request_id, "Loan application failed: {}", e);
                LoanOutcome::Error
            }
        };
        tracing::info!(%request_id, ?outcome, "Loan application processed");

        let mut inner = self.inner.lock().await;
        inner.outcome = Some(outcome);
        inner.state = PanelState::Done;
        Ok(outcome)
    }
}
