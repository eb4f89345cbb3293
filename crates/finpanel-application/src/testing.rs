//! Scripted `FinanceApi` for panel tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use finpanel_core::api::{FinanceApi, HealthStatus, QuestionAnswer};
use finpanel_core::error::{FinpanelError, Result};
use finpanel_core::loan::{LoanApplication, LoanPrediction};
use finpanel_core::stock::{StockAnalysis, StockBar, SymbolLookup};
use tokio::sync::Notify;

/// Responses are queued per operation (histories and analyses per company).
/// An unscripted call fails with a transport error.
///
/// With `gated()`, every call signals `started` and then waits on `release`
/// before answering, which keeps it in flight for as long as a test needs.
#[derive(Default)]
pub struct MockApi {
    answers: Mutex<VecDeque<Result<String>>>,
    symbols: Mutex<VecDeque<Result<String>>>,
    histories: Mutex<HashMap<String, Result<Vec<StockBar>>>>,
    analyses: Mutex<HashMap<String, Result<String>>>,
    loan_codes: Mutex<VecDeque<Result<Option<String>>>>,
    submitted: Mutex<Vec<LoanApplication>>,
    calls: Mutex<Vec<String>>,
    gated: bool,
    pub started: Notify,
    pub release: Notify,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self {
            gated: true,
            ..Self::default()
        }
    }

    pub fn answer(self, result: Result<&str>) -> Self {
        self.answers
            .lock()
            .unwrap()
            .push_back(result.map(str::to_string));
        self
    }

    pub fn symbol(self, result: Result<&str>) -> Self {
        self.symbols
            .lock()
            .unwrap()
            .push_back(result.map(str::to_string));
        self
    }

    pub fn history(self, company: &str, result: Result<Vec<StockBar>>) -> Self {
        self.histories
            .lock()
            .unwrap()
            .insert(company.to_string(), result);
        self
    }

    pub fn analysis(self, company: &str, result: Result<&str>) -> Self {
        self.analyses
            .lock()
            .unwrap()
            .insert(company.to_string(), result.map(str::to_string));
        self
    }

    pub fn loan_code(self, code: Result<Option<&str>>) -> Self {
        self.loan_codes
            .lock()
            .unwrap()
            .push_back(code.map(|c| c.map(str::to_string)));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<LoanApplication> {
        self.submitted.lock().unwrap().clone()
    }

    async fn enter(&self, call: String) {
        self.calls.lock().unwrap().push(call);
        if self.gated {
            self.started.notify_one();
            self.release.notified().await;
        }
    }
}

fn unscripted() -> FinpanelError {
    FinpanelError::transport("connection refused")
}

pub fn bar(date: &str, close: &str) -> StockBar {
    StockBar {
        date: date.to_string(),
        open: close.to_string(),
        high: close.to_string(),
        low: close.to_string(),
        close: close.to_string(),
        volume: None,
    }
}

#[async_trait]
impl FinanceApi for MockApi {
    async fn ask_question(&self, question: &str) -> Result<QuestionAnswer> {
        self.enter(format!("ask:{}", question)).await;
        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))?;
        Ok(QuestionAnswer {
            question: question.to_string(),
            answer,
        })
    }

    async fn resolve_stock_symbol(&self, company_name: &str) -> Result<SymbolLookup> {
        self.enter(format!("symbol:{}", company_name)).await;
        let stock_symbol = self
            .symbols
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))?;
        Ok(SymbolLookup {
            company_name: company_name.to_string(),
            stock_symbol,
        })
    }

    async fn analyze_stock(&self, company_name: &str) -> Result<StockAnalysis> {
        self.enter(format!("analyze:{}", company_name)).await;
        let analysis = self
            .analyses
            .lock()
            .unwrap()
            .remove(company_name)
            .unwrap_or_else(|| Err(unscripted()))?;
        Ok(StockAnalysis {
            company_name: company_name.to_string(),
            stock_symbol: company_name.to_uppercase(),
            analysis,
        })
    }

    async fn fetch_history(&self, company_name: &str) -> Result<Vec<StockBar>> {
        self.enter(format!("history:{}", company_name)).await;
        self.histories
            .lock()
            .unwrap()
            .remove(company_name)
            .unwrap_or_else(|| Err(unscripted()))
    }

    async fn submit_loan_application(&self, application: &LoanApplication) -> Result<LoanPrediction> {
        self.enter("loan".to_string()).await;
        self.submitted.lock().unwrap().push(application.clone());
        let code = self
            .loan_codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))?;
        Ok(LoanPrediction { code })
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.enter("health".to_string()).await;
        Ok(HealthStatus {
            status: "healthy".to_string(),
            message: String::new(),
        })
    }
}
