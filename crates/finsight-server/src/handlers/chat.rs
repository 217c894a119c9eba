//! Financial chat handler

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;
use tracing::warn;

use crate::{bearer_token, AppError, AppState, MAX_CHAT_MESSAGE_LEN};
use finsight_core::context::{assemble_context, is_personal_finance_question};
use finsight_core::models::{ChatMessage, ChatReply};
use finsight_core::AIBackend;

/// Request body for chat
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// POST /api/ai/chat - Answer a finance question
///
/// Personal questions are grounded in the caller's finances; general
/// questions skip the data fetch entirely so no financial profile leaks
/// into the prompt. A failed fetch degrades to a context-free answer
/// rather than failing the request.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let token = bearer_token(&headers)?;

    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::bad_request("message is required"));
    }
    if message.len() > MAX_CHAT_MESSAGE_LEN {
        return Err(AppError::bad_request("message is too long"));
    }

    let context = if is_personal_finance_question(message) {
        match state.backend.fetch_ai_data(token).await {
            Ok(data) => Some(assemble_context(&data)),
            Err(e) => {
                warn!(error = %e, "Context fetch failed, answering without financial context");
                None
            }
        }
    } else {
        None
    };

    let reply = match &state.ai {
        Some(ai) => match ai.chat(message, &request.history, context.as_ref()).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Chat generation failed, serving fallback");
                ChatReply::fallback()
            }
        },
        None => ChatReply::fallback(),
    };

    Ok(Json(reply))
}
