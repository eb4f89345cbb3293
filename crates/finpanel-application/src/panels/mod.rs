//! Panels: self-contained views that own their local state and calls.
//!
//! Every panel is cheap to clone (state behind an `Arc`) so a caller can
//! hand a copy to a spawned task while keeping one for rendering.

mod advisor;
mod loan;
mod stock;

pub use advisor::{AdvisorPanel, ADVISOR_FALLBACK, ADVISOR_GREETING};
pub use loan::{LoanFormPanel, LoanOutcome, PROCESSING_LABEL, SUBMIT_LABEL};
pub use stock::{
    StockAnalysisPanel, ANALYSIS_FALLBACK, FETCH_FAILED, STOCK_GREETING, SYMBOL_FAILED,
};

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::PanelError;

/// Awaits `future` unless the panel is cancelled first.
async fn until_cancelled<F>(token: &CancellationToken, future: F) -> Result<F::Output, PanelError>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(PanelError::Cancelled),
        output = future => Ok(output),
    }
}
