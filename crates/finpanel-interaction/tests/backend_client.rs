//! BackendClient against an in-process stub backend.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use finpanel_core::error::FinpanelError;
use finpanel_core::loan::{LoanApplicationDraft, LoanDecision, LoanField};
use finpanel_core::FinanceApi;
use finpanel_interaction::BackendClient;
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Recorded {
    bodies: Arc<Mutex<Vec<Value>>>,
    history_names: Arc<Mutex<Vec<String>>>,
}

async fn ask(State(rec): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    let question = body["question"].as_str().unwrap_or_default().to_string();
    rec.bodies.lock().unwrap().push(body);
    Json(json!({ "question": question, "answer": "Diversify." }))
}

async fn symbol(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "company_name": body["company_name"], "stock_symbol": "AAPL" }))
}

async fn analyze(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "company_name": body["company_name"],
        "stock_symbol": "AAPL",
        "analysis": "Upward trend."
    }))
}

async fn history(State(rec): State<Recorded>, Path(name): Path<String>) -> Json<Value> {
    rec.history_names.lock().unwrap().push(name);
    Json(json!([
        { "Date": "2024-01-08", "Open": "185.1", "High": "187", "Low": 183.5, "Close": "186.25" },
        { "Date": "2024-01-01", "Open": "180", "High": "184", "Low": "179", "Close": "182", "Volume": 1000 }
    ]))
}

async fn loan(State(rec): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    let approve = body["Credit_History"] == json!(1.0);
    rec.bodies.lock().unwrap().push(body);
    Json(json!({ "Loan_Approval_Prediction": if approve { "Y" } else { "N" } }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "message": "ok" }))
}

async fn spawn_backend(rec: Recorded) -> BackendClient {
    let app = Router::new()
        .route("/ask-question", post(ask))
        .route("/get-stock-symbol/", post(symbol))
        .route("/analyze-stock-data/", post(analyze))
        .route("/getPast5Week/:name", get(history))
        .route("/getLoanApprove", post(loan))
        .route("/health", get(health))
        .with_state(rec);
    serve(app).await
}

async fn serve(app: Router) -> BackendClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    BackendClient::new(format!("http://{}", addr)).unwrap()
}

#[tokio::test]
async fn ask_question_posts_question_body() {
    let rec = Recorded::default();
    let client = spawn_backend(rec.clone()).await;

    let answer = client.ask_question("How should I save?").await.unwrap();
    assert_eq!(answer.question, "How should I save?");
    assert_eq!(answer.answer, "Diversify.");
    assert_eq!(
        rec.bodies.lock().unwrap().as_slice(),
        &[json!({ "question": "How should I save?" })]
    );
}

#[tokio::test]
async fn stock_endpoints_decode() {
    let rec = Recorded::default();
    let client = spawn_backend(rec.clone()).await;

    let lookup = client.resolve_stock_symbol("Apple").await.unwrap();
    assert_eq!(lookup.stock_symbol, "AAPL");

    let analysis = client.analyze_stock("Apple").await.unwrap();
    assert_eq!(analysis.analysis, "Upward trend.");

    let bars = client.fetch_history("Johnson & Johnson").await.unwrap();
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].low, "183.5");
    assert_eq!(bars[1].volume.as_deref(), Some("1000"));
    assert_eq!(
        rec.history_names.lock().unwrap().as_slice(),
        &["Johnson & Johnson".to_string()]
    );
}

#[tokio::test]
async fn loan_submission_sends_wire_names() {
    let rec = Recorded::default();
    let client = spawn_backend(rec.clone()).await;

    let mut draft = LoanApplicationDraft::new();
    draft.set(LoanField::ApplicantIncome, "5000").unwrap();
    draft.set(LoanField::LoanAmount, "abc").unwrap();
    let prediction = client
        .submit_loan_application(&draft.to_application())
        .await
        .unwrap();
    assert_eq!(prediction.decision().unwrap(), LoanDecision::Approved);

    let bodies = rec.bodies.lock().unwrap();
    let body = &bodies[0];
    assert_eq!(body["Gender"], "Male");
    assert_eq!(body["ApplicantIncome"], json!(5000.0));
    assert_eq!(body["LoanAmount"], Value::Null);
    assert_eq!(body["Property_Area"], "Urban");
    assert_eq!(body.as_object().unwrap().len(), 11);
}

#[tokio::test]
async fn health_probe() {
    let client = spawn_backend(Recorded::default()).await;
    let status = client.health().await.unwrap();
    assert_eq!(status.status, "healthy");
}

#[tokio::test]
async fn non_ok_status_is_a_failure() {
    let app = Router::new()
        .route(
            "/ask-question",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/health", get(|| async { StatusCode::CREATED }));
    let client = serve(app).await;

    let err = client.ask_question("hi").await.unwrap_err();
    assert_eq!(err, FinpanelError::Status { status: 500 });
    let err = client.health().await.unwrap_err();
    assert_eq!(err, FinpanelError::Status { status: 201 });
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let app = Router::new()
        .route(
            "/get-stock-symbol/",
            post(|| async { Json(json!({ "company_name": "Apple" })) }),
        )
        .route("/getPast5Week/:name", get(|| async { "not json" }));
    let client = serve(app).await;

    assert!(client
        .resolve_stock_symbol("Apple")
        .await
        .unwrap_err()
        .is_invalid_response());
    assert!(client
        .fetch_history("Apple")
        .await
        .unwrap_err()
        .is_invalid_response());
}

#[tokio::test]
async fn unreachable_backend_is_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BackendClient::new(format!("http://{}", addr)).unwrap();
    let err = client.ask_question("hi").await.unwrap_err();
    assert!(matches!(err, FinpanelError::Transport(_)));
}
