//! The backend seam.
//!
//! `FinanceApi` is what panels talk to. The HTTP implementation lives in
//! `finpanel-interaction`; tests substitute scripted implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::loan::{LoanApplication, LoanPrediction};
use crate::stock::{StockAnalysis, StockBar, SymbolLookup};

/// Response body of the question endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// Response body of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// The backend operations the client issues.
///
/// Every call is a single attempt. A failure is reported as an opaque
/// `FinpanelError`; callers decide what to show.
#[async_trait]
pub trait FinanceApi: Send + Sync {
    async fn ask_question(&self, question: &str) -> Result<QuestionAnswer>;

    async fn resolve_stock_symbol(&self, company_name: &str) -> Result<SymbolLookup>;

    async fn analyze_stock(&self, company_name: &str) -> Result<StockAnalysis>;

    /// Most recent weekly bars, newest first.
    async fn fetch_history(&self, company_name: &str) -> Result<Vec<StockBar>>;

    async fn submit_loan_application(&self, application: &LoanApplication) -> Result<LoanPrediction>;

    async fn health(&self) -> Result<HealthStatus>;
}
