//! Test utilities for finsight-core
//!
//! This module provides testing infrastructure including a mock main-backend
//! server that serves the `/transactions/ai-data` endpoint for development
//! and integration tests.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::sync::oneshot;

use crate::models::{AiData, FinancialStats, Transaction, TransactionType};

/// Mock main-backend server for testing and development
pub struct MockMainBackend {
    url: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockMainBackend {
    /// Start the mock server on an available port, serving the given payload
    pub async fn start(data: AiData) -> Self {
        let app = Router::new()
            .route("/transactions/ai-data", get(handle_ai_data))
            .with_state(data);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Base URL for this mock server
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockMainBackend {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Serves the AI payload, requiring a non-empty bearer token
async fn handle_ai_data(
    State(data): State<AiData>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("");
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({ "data": data })))
}

/// A small, realistic AI payload: six months of salary and spending
pub fn sample_ai_data() -> AiData {
    let mut transactions = Vec::new();
    for month in 1..=6u32 {
        transactions.push(Transaction {
            date: format!("2025-{:02}-01", month),
            kind: TransactionType::Income,
            amount: 5000.0,
            category: "Salary".to_string(),
            title: "Monthly salary".to_string(),
            necessity: None,
        });
        transactions.push(Transaction {
            date: format!("2025-{:02}-05", month),
            kind: TransactionType::Expense,
            amount: 1200.0,
            category: "Rent".to_string(),
            title: "Apartment rent".to_string(),
            necessity: None,
        });
        transactions.push(Transaction {
            date: format!("2025-{:02}-12", month),
            kind: TransactionType::Expense,
            amount: 450.0,
            category: "Food".to_string(),
            title: "Groceries".to_string(),
            necessity: None,
        });
    }

    AiData {
        transactions,
        stats: FinancialStats {
            total_income: 30000.0,
            total_expense: 9900.0,
            balance: 20100.0,
        },
    }
}
