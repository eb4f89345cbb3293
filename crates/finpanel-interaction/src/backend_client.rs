//! BackendClient - REST implementation of [`FinanceApi`].
//!
//! One request per call: no retry, no timeout, no cancellation. Anything
//! other than `200 OK` is a failure, and a body that does not decode into
//! the expected shape is an invalid response.

use async_trait::async_trait;
use finpanel_core::api::{FinanceApi, HealthStatus, QuestionAnswer};
use finpanel_core::error::{FinpanelError, Result};
use finpanel_core::loan::{LoanApplication, LoanPrediction};
use finpanel_core::stock::{StockAnalysis, StockBar, SymbolLookup};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const ASK_QUESTION_PATH: &str = "/ask-question";
pub const STOCK_SYMBOL_PATH: &str = "/get-stock-symbol/";
pub const ANALYZE_STOCK_PATH: &str = "/analyze-stock-data/";
pub const HISTORY_PATH: &str = "/getPast5Week";
pub const LOAN_PATH: &str = "/getLoanApprove";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Serialize)]
struct QuestionRequest<'a> {
    question: &'a str,
}

#[derive(Debug, Serialize)]
struct CompanyRequest<'a> {
    company_name: &'a str,
}

/// Client for the fixed backend address.
#[derive(Clone, Debug)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client for `base_url` (scheme, host and port; an optional
    /// path prefix is kept).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| FinpanelError::config(format!("Invalid backend URL {:?}: {}", base_url, e)))?;

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a fixed endpoint path.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| FinpanelError::internal(format!("Failed to build URL for {}: {}", path, e)))
    }

    /// History URL with the company name as one encoded path segment.
    pub fn history_url(&self, company_name: &str) -> Result<Url> {
        let mut url = self.endpoint(HISTORY_PATH)?;
        url.path_segments_mut()
            .map_err(|_| FinpanelError::internal("Backend URL cannot carry path segments"))?
            .push(company_name);
        Ok(url)
    }

    async fn post_json<B, R>(&self, operation: &'static str, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        self.execute(operation, self.client.post(url).json(body)).await
    }

    async fn get_json<R>(&self, operation: &'static str, url: Url) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.execute(operation, self.client.get(url)).await
    }

    async fn execute<R>(&self, operation: &'static str, request: RequestBuilder) -> Result<R>
    where
        R: DeserializeOwned,
    {
        tracing::debug!(operation, "Sending backend request");

        let response = request.send().await.map_err(|e| {
            tracing::warn!(operation, "Backend request failed: {}", e);
            FinpanelError::transport(e.to_string())
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(operation, status = status.as_u16(), "Unexpected response status");
            return Err(FinpanelError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!(operation, "Failed to read response body: {}", e);
            FinpanelError::transport(e.to_string())
        })?;

        serde_json::from_slice::<R>(&bytes).map_err(|e| {
            tracing::warn!(operation, "Failed to decode response: {}", e);
            FinpanelError::invalid_response(format!("{}: {}", operation, e))
        })
    }
}

fn require(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(FinpanelError::invalid_input(format!("{} must not be empty", what)))
    } else {
        Ok(())
    }
}

#[async_trait]
impl FinanceApi for BackendClient {
    async fn ask_question(&self, question: &str) -> Result<QuestionAnswer> {
        require(question, "question")?;
        self.post_json("ask_question", ASK_QUESTION_PATH, &QuestionRequest { question })
            .await
    }

    async fn resolve_stock_symbol(&self, company_name: &str) -> Result<SymbolLookup> {
        require(company_name, "company name")?;
        self.post_json(
            "resolve_stock_symbol",
            STOCK_SYMBOL_PATH,
            &CompanyRequest { company_name },
        )
        .await
    }

    async fn analyze_stock(&self, company_name: &str) -> Result<StockAnalysis> {
        require(company_name, "company name")?;
        self.post_json(
            "analyze_stock",
            ANALYZE_STOCK_PATH,
            &CompanyRequest { company_name },
        )
        .await
    }

    async fn fetch_history(&self, company_name: &str) -> Result<Vec<StockBar>> {
        require(company_name, "company name")?;
        let url = self.history_url(company_name)?;
        self.get_json("fetch_history", url).await
    }

    async fn submit_loan_application(&self, application: &LoanApplication) -> Result<LoanPrediction> {
        self.post_json("submit_loan_application", LOAN_PATH, application)
            .await
    }

    async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint(HEALTH_PATH)?;
        self.get_json("health", url).await
    }
}
