//! Stock history viewer with a chat-style analysis transcript.

use std::sync::Arc;

use finpanel_core::api::FinanceApi;
use finpanel_core::panel::PanelState;
use finpanel_core::stock::StockSeries;
use finpanel_core::transcript::{Transcript, TurnId};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::until_cancelled;
use crate::error::PanelError;

pub const STOCK_GREETING: &str =
    "Welcome to Stock Past Analysis! Please enter a company name to analyze.";

pub const FETCH_FAILED: &str = "Sorry, I couldn't fetch the stock data. Please try again.";

pub const ANALYSIS_FALLBACK: &str =
    "I apologize, but I couldn't analyze the stock data at this moment. Please try again later.";

pub const SYMBOL_FAILED: &str = "Sorry, I couldn't find a stock symbol for that company.";

fn placeholder(company: &str) -> String {
    format!("Fetching and analyzing stock data for {}...", company)
}

#[derive(Debug, Default)]
struct StockState {
    transcript: Transcript,
    series: StockSeries,
    symbol: Option<String>,
    state: PanelState,
}

#[derive(Clone)]
pub struct StockAnalysisPanel {
    api: Arc<dyn FinanceApi>,
    inner: Arc<Mutex<StockState>>,
    cancel: CancellationToken,
}

impl StockAnalysisPanel {
    pub fn new(api: Arc<dyn FinanceApi>) -> Self {
        Self {
            api,
            inner: Arc::new(Mutex::new(StockState {
                transcript: Transcript::with_greeting(STOCK_GREETING),
                ..StockState::default()
            })),
            cancel: CancellationToken::new(),
        }
    }

    pub async fn transcript(&self) -> Transcript {
        self.inner.lock().await.transcript.clone()
    }

    /// The bars on display. Empty until the first successful fetch.
    pub async fn series(&self) -> StockSeries {
        self.inner.lock().await.series.clone()
    }

    /// Company whose bars are on display. Only a successful fetch changes it.
    pub async fn company(&self) -> Option<String> {
        let inner = self.inner.lock().await;
        (!inner.series.company.is_empty()).then(|| inner.series.company.clone())
    }

    /// Ticker reported by the last analysis or symbol lookup.
    pub async fn symbol(&self) -> Option<String> {
        self.inner.lock().await.symbol.clone()
    }

    pub async fn state(&self) -> PanelState {
        self.inner.lock().await.state
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Reserves a pending slot, or refuses while another request runs.
    async fn begin(&self, user_text: Option<&str>, pending_text: String) -> Result<TurnId, PanelError> {
        let mut inner = self.inner.lock().await;
        if inner.state.is_pending() {
            return Err(PanelError::Busy);
        }
        if let Some(text) = user_text {
            inner.transcript.push_user(text);
        }
        let request_id = inner.transcript.push_pending(pending_text);
        inner.state = PanelState::Pending { request_id };
        Ok(request_id)
    }

    /// Fetches the recent history for `input`, then asks for an analysis.
    ///
    /// The history replaces the displayed series wholesale. A failed fetch
    /// keeps the previous series and still runs the analysis; its
    /// [`FETCH_FAILED`] turn goes just above the placeholder slot, which is
    /// filled with the analysis text or [`ANALYSIS_FALLBACK`].
    pub async fn send(&self, input: &str) -> Result<TurnId, PanelError> {
        let company = input.trim();
        if company.is_empty() {
            return Err(PanelError::EmptyInput);
        }

        let request_id = self.begin(Some(company), placeholder(company)).await?;
        tracing::debug!(%request_id, company, "Stock analysis started");

        let history = until_cancelled(&self.cancel, self.api.fetch_history(company)).await?;
        {
            let mut inner = self.inner.lock().await;
            match history {
                Ok(bars) => {
                    tracing::debug!(%request_id, bars = bars.len(), "Stock history received");
                    inner.series = StockSeries::new(company, bars);
                }
                Err(e) => {
                    tracing::warn!(%request_id, company, "Stock history fetch failed: {}", e);
                    inner.transcript.insert_assistant_before(request_id, FETCH_FAILED);
                }
            }
        }

        let analysis = until_cancelled(&self.cancel, self.api.analyze_stock(company)).await?;

        let mut inner = self.inner.lock().await;
        let reply = match analysis {
            Ok(analysis) => {
                inner.symbol = Some(analysis.stock_symbol);
                analysis.analysis
            }
            Err(e) => {
                tracing::warn!(%request_id, company, "Stock analysis failed: {}", e);
                ANALYSIS_FALLBACK.to_string()
            }
        };
        inner.transcript.resolve(request_id, reply);
        inner.state = PanelState::Done;
        Ok(request_id)
    }

    /// Looks up the ticker for `input` and reports it as an assistant turn.
    pub async fn resolve_symbol(&self, input: &str) -> Result<TurnId, PanelError> {
        let company = input.trim();
        if company.is_empty() {
            return Err(PanelError::EmptyInput);
        }

        let request_id = self
            .begin(None, format!("Looking up the stock symbol for {}...", company))
            .await?;

        let result = until_cancelled(&self.cancel, self.api.resolve_stock_symbol(company)).await?;

        let mut inner = self.inner.lock().await;
        let reply = match result {
            Ok(lookup) => {
                let reply = format!(
                    "The stock symbol for {} is {}.",
                    lookup.company_name, lookup.stock_symbol
                );
                inner.symbol = Some(lookup.stock_symbol);
                reply
            }
            Err(e) => {
                tracing::warn!(%request_id, company, "Symbol lookup failed: {}", e);
                SYMBOL_FAILED.to_string()
            }
        };
        inner.transcript.resolve(request_id, reply);
        inner.state = PanelState::Done;
        Ok(request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bar, MockApi};
    use finpanel_core::error::FinpanelError;
    use finpanel_core::transcript::Speaker;

    #[tokio::test]
    async fn test_send_replaces_series_and_fills_placeholder() {
        let api = Arc::new(
            MockApi::new()
                .history("ACME", Ok(vec![bar("2024-01-08", "12.5"), bar("2024-01-01", "11")]))
                .analysis("ACME", Ok("ACME is climbing.")),
        );
        let panel = StockAnalysisPanel::new(api.clone());

        let id = panel.send(" ACME ").await.unwrap();
        let transcript = panel.transcript().await;

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.turns()[1].speaker, Speaker::User);
        assert_eq!(transcript.turns()[1].text, "ACME");
        assert_eq!(transcript.turns()[2].id, id);
        assert_eq!(transcript.turns()[2].text, "ACME is climbing.");
        assert!(!transcript.has_pending());

        let series = panel.series().await;
        assert_eq!(series.company, "ACME");
        assert_eq!(series.bars.len(), 2);
        assert_eq!(panel.symbol().await.as_deref(), Some("ACME"));
        assert_eq!(panel.company().await.as_deref(), Some("ACME"));
        assert_eq!(
            api.calls(),
            vec!["history:ACME".to_string(), "analyze:ACME".to_string()]
        );
    }

    #[tokio::test]
    async fn test_second_company_leaves_no_residual_rows() {
        let api = Arc::new(
            MockApi::new()
                .history(
                    "ACME",
                    Ok(vec![
                        bar("2024-01-15", "13"),
                        bar("2024-01-08", "12"),
                        bar("2024-01-01", "11"),
                    ]),
                )
                .analysis("ACME", Ok("up"))
                .history("OTHER", Ok(vec![bar("2024-01-15", "99")]))
                .analysis("OTHER", Ok("flat")),
        );
        let panel = StockAnalysisPanel::new(api);

        panel.send("ACME").await.unwrap();
        panel.send("OTHER").await.unwrap();

        let series = panel.series().await;
        assert_eq!(series.company, "OTHER");
        assert_eq!(series.bars, vec![bar("2024-01-15", "99")]);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_series_and_still_analyzes() {
        let api = Arc::new(
            MockApi::new()
                .history("ACME", Ok(vec![bar("2024-01-01", "11")]))
                .analysis("ACME", Ok("up"))
                .history("OTHER", Err(FinpanelError::Status { status: 404 }))
                .analysis("OTHER", Ok("no data but here is a view")),
        );
        let panel = StockAnalysisPanel::new(api.clone());

        panel.send("ACME").await.unwrap();
        let before = panel.transcript().await.len();
        let id = panel.send("OTHER").await.unwrap();

        let transcript = panel.transcript().await;
        assert_eq!(transcript.len(), before + 3);
        let added: Vec<&str> = transcript.turns()[before..]
            .iter()
            .map(|turn| turn.text.as_str())
            .collect();
        assert_eq!(added, vec!["OTHER", FETCH_FAILED, "no data but here is a view"]);
        assert_eq!(transcript.last().unwrap().id, id);

        let series = panel.series().await;
        assert_eq!(series.company, "ACME");
        assert_eq!(series.trend_title(), "ACME Stock Price Trend");
        assert_eq!(panel.company().await.as_deref(), Some("ACME"));
        assert!(api.calls().contains(&"analyze:OTHER".to_string()));
    }

    #[tokio::test]
    async fn test_no_company_before_first_successful_fetch() {
        let api = Arc::new(
            MockApi::new()
                .history("ACME", Err(FinpanelError::transport("down")))
                .analysis("ACME", Ok("up")),
        );
        let panel = StockAnalysisPanel::new(api);

        assert_eq!(panel.company().await, None);
        panel.send("ACME").await.unwrap();
        assert_eq!(panel.company().await, None);
    }

    #[tokio::test]
    async fn test_analysis_failure_uses_fallback() {
        let api = Arc::new(MockApi::new().history("ACME", Ok(vec![])));
        let panel = StockAnalysisPanel::new(api);

        let id = panel.send("ACME").await.unwrap();
        let transcript = panel.transcript().await;
        assert_eq!(transcript.get(id).unwrap().text, ANALYSIS_FALLBACK);
        assert_eq!(panel.state().await, PanelState::Done);
        assert!(panel.series().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_company_is_refused() {
        let api = Arc::new(MockApi::new());
        let panel = StockAnalysisPanel::new(api.clone());
        assert_eq!(panel.send("").await, Err(PanelError::EmptyInput));
        assert_eq!(panel.resolve_symbol("  ").await, Err(PanelError::EmptyInput));
        assert!(api.calls().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_busy_while_fetching() {
        let api = Arc::new(
            MockApi::gated()
                .history("ACME", Ok(vec![bar("2024-01-01", "11")]))
                .analysis("ACME", Ok("up")),
        );
        let panel = StockAnalysisPanel::new(api.clone());

        let task = {
            let panel = panel.clone();
            tokio::spawn(async move { panel.send("ACME").await })
        };
        api.started.notified().await;

        assert_eq!(panel.send("OTHER").await, Err(PanelError::Busy));
        assert_eq!(panel.resolve_symbol("OTHER").await, Err(PanelError::Busy));
        let pending = panel.transcript().await;
        assert_eq!(pending.last().unwrap().text, placeholder("ACME"));

        api.release.notify_one();
        api.started.notified().await;
        api.release.notify_one();

        let id = task.await.unwrap().unwrap();
        assert_eq!(panel.transcript().await.get(id).unwrap().text, "up");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cancel_between_fetch_and_analysis() {
        let api = Arc::new(
            MockApi::gated()
                .history("ACME", Ok(vec![bar("2024-01-01", "11")]))
                .analysis("ACME", Ok("up")),
        );
        let panel = StockAnalysisPanel::new(api.clone());

        let task = {
            let panel = panel.clone();
            tokio::spawn(async move { panel.send("ACME").await })
        };
        api.started.notified().await;
        api.release.notify_one();
        api.started.notified().await;

        let snapshot = panel.transcript().await;
        panel.cancel();
        assert_eq!(task.await.unwrap(), Err(PanelError::Cancelled));
        api.release.notify_one();

        assert_eq!(panel.transcript().await, snapshot);
        assert!(snapshot.last().unwrap().is_pending());
    }

    #[tokio::test]
    async fn test_symbol_lookup() {
        let api = Arc::new(
            MockApi::new()
                .symbol(Ok("AAPL"))
                .symbol(Err(FinpanelError::transport("down"))),
        );
        let panel = StockAnalysisPanel::new(api);

        let id = panel.resolve_symbol("Apple").await.unwrap();
        let transcript = panel.transcript().await;
        assert_eq!(transcript.len(), 2);
        assert_eq!(
            transcript.get(id).unwrap().text,
            "The stock symbol for Apple is AAPL."
        );
        assert_eq!(panel.symbol().await.as_deref(), Some("AAPL"));

        let id = panel.resolve_symbol("Nothing").await.unwrap();
        assert_eq!(panel.transcript().await.get(id).unwrap().text, SYMBOL_FAILED);
        assert_eq!(panel.symbol().await.as_deref(), Some("AAPL"));
    }
}
