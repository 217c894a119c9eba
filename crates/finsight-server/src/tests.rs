//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use finsight_core::test_utils::{sample_ai_data, MockMainBackend};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn setup_test_app(backend_url: &str) -> Router {
    let state = Arc::new(AppState {
        ai: Some(AIClient::mock()),
        backend: BackendClient::new(backend_url),
    });
    create_router_with_state(state, ServerConfig::default())
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", "Bearer test-token")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ========== Health ==========

#[tokio::test]
async fn test_health_reports_ai_status() {
    let backend = MockMainBackend::start(sample_ai_data()).await;
    let app = setup_test_app(backend.url());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["ai"]["configured"], true);
    assert_eq!(json["ai"]["healthy"], true);
}

// ========== Expense Prediction ==========

#[tokio::test]
async fn test_expense_prediction_requires_bearer_token() {
    let backend = MockMainBackend::start(sample_ai_data()).await;
    let app = setup_test_app(backend.url());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/ai/expense-prediction")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expense_prediction_defaults_to_six_periods() {
    let backend = MockMainBackend::start(sample_ai_data()).await;
    let app = setup_test_app(backend.url());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/ai/expense-prediction")
                .header("authorization", "Bearer test-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["projections"].as_array().unwrap().len(), 6);
    assert_eq!(json["currentBalance"], 20100.0);
    assert!(json["trends"]["savingsRate"].as_f64().unwrap() > 0.0);
    assert!(!json["insights"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_expense_prediction_honors_custom_period() {
    let backend = MockMainBackend::start(sample_ai_data()).await;
    let app = setup_test_app(backend.url());

    let response = app
        .oneshot(post_json(
            "/api/ai/expense-prediction",
            serde_json::json!({ "forecastPeriod": 3 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let projections = json["projections"].as_array().unwrap();
    assert_eq!(projections.len(), 3);
    assert_eq!(projections[0]["period"], 1);
    assert_eq!(projections[2]["period"], 3);
}

#[tokio::test]
async fn test_expense_prediction_rejects_invalid_period() {
    let backend = MockMainBackend::start(sample_ai_data()).await;

    for period in [0u32, 25] {
        let app = setup_test_app(backend.url());
        let response = app
            .oneshot(post_json(
                "/api/ai/expense-prediction",
                serde_json::json!({ "forecastPeriod": period }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

// ========== Investment Advice ==========

#[tokio::test]
async fn test_investment_advice_includes_sip_projection() {
    let backend = MockMainBackend::start(sample_ai_data()).await;
    let app = setup_test_app(backend.url());

    let response = app
        .oneshot(post_json(
            "/api/ai/investment-advice",
            serde_json::json!({
                "sipAmount": 1000.0,
                "sipDuration": 10,
                "expectedReturn": 12.0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(!json["recommendations"].as_array().unwrap().is_empty());

    let sip = &json["sipProjection"];
    assert_eq!(sip["investedAmount"], 120000.0);
    assert!(sip["maturityAmount"].as_f64().unwrap() > 120000.0);
}

#[tokio::test]
async fn test_investment_advice_omits_sip_without_plan() {
    let backend = MockMainBackend::start(sample_ai_data()).await;
    let app = setup_test_app(backend.url());

    let response = app
        .oneshot(post_json("/api/ai/investment-advice", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json.get("sipProjection").is_none());
    assert!(json["financialHealth"]["monthlySavings"].as_f64().is_some());
}

// ========== Needs Forecast ==========

#[tokio::test]
async fn test_forecast_needs_returns_six_month_history() {
    let backend = MockMainBackend::start(sample_ai_data()).await;
    let app = setup_test_app(backend.url());

    let response = app
        .oneshot(post_json("/api/ai/forecast-needs", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["history"].as_array().unwrap().len(), 6);
    assert_eq!(json["confidence"], 0.85);

    let base = json["breakdown"]["base"].as_f64().unwrap();
    let buffer = json["breakdown"]["buffer"].as_f64().unwrap();
    let forecast = json["forecastedAmount"].as_f64().unwrap();
    assert!((forecast - (base + buffer)).abs() < 0.02);
}

#[tokio::test]
async fn test_forecast_needs_requires_bearer_token() {
    let backend = MockMainBackend::start(sample_ai_data()).await;
    let app = setup_test_app(backend.url());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/ai/forecast-needs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ========== Categorization ==========

#[tokio::test]
async fn test_categorize_transaction() {
    let backend = MockMainBackend::start(sample_ai_data()).await;
    let app = setup_test_app(backend.url());

    let response = app
        .oneshot(post_json(
            "/api/ai/categorize",
            serde_json::json!({ "title": "Uber ride home", "amount": 18.5 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["category"], "Transport");
    assert!(json["confidence"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_categorize_rejects_empty_title() {
    let backend = MockMainBackend::start(sample_ai_data()).await;
    let app = setup_test_app(backend.url());

    let response = app
        .oneshot(post_json(
            "/api/ai/categorize",
            serde_json::json!({ "title": "   ", "amount": 10.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Chat ==========

#[tokio::test]
async fn test_chat_personal_question_gets_context() {
    let backend = MockMainBackend::start(sample_ai_data()).await;
    let app = setup_test_app(backend.url());

    let response = app
        .oneshot(post_json(
            "/api/ai/chat",
            serde_json::json!({ "message": "How are my savings doing?" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // The mock backend prefixes grounded answers with the balance.
    let json = get_body_json(response).await;
    assert!(json["response"]
        .as_str()
        .unwrap()
        .starts_with("With a balance of"));
}

#[tokio::test]
async fn test_chat_general_question_gets_no_context() {
    // Even with a working main backend, a general question must be
    // answered without the user's financial profile.
    let backend = MockMainBackend::start(sample_ai_data()).await;
    let app = setup_test_app(backend.url());

    let response = app
        .oneshot(post_json(
            "/api/ai/chat",
            serde_json::json!({ "message": "What is a good savings rate?" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json["response"]
        .as_str()
        .unwrap()
        .starts_with("General advice on:"));
}

#[tokio::test]
async fn test_chat_survives_backend_failure() {
    // Point at the mock server with a mangled base path so the AI-data
    // fetch 404s; a personal question should degrade to a context-free
    // answer instead of failing.
    let backend = MockMainBackend::start(sample_ai_data()).await;
    let bad_url = format!("{}/nope", backend.url());
    let app = setup_test_app(&bad_url);

    let response = app
        .oneshot(post_json(
            "/api/ai/chat",
            serde_json::json!({ "message": "Can I afford a vacation this year?" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json["response"]
        .as_str()
        .unwrap()
        .starts_with("General advice on:"));
}

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let backend = MockMainBackend::start(sample_ai_data()).await;
    let app = setup_test_app(backend.url());

    let response = app
        .oneshot(post_json("/api/ai/chat", serde_json::json!({ "message": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Fallbacks without an AI backend ==========

#[tokio::test]
async fn test_prediction_serves_fallback_insight_without_ai() {
    let backend = MockMainBackend::start(sample_ai_data()).await;
    let state = Arc::new(AppState {
        ai: None,
        backend: BackendClient::new(backend.url()),
    });
    let app = create_router_with_state(state, ServerConfig::default());

    let response = app
        .oneshot(post_json(
            "/api/ai/expense-prediction",
            serde_json::json!({ "forecastPeriod": 2 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let insights = json["insights"].as_array().unwrap();
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0]["title"], "AI Unavailable");
}
