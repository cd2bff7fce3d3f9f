//! Farming chatbot (`POST /api/chat`).

use axum::{extract::rejection::JsonRejection, Json};
use krishimitra_core::{respond, ChatTopic};
use krishimitra_logging::{EventLogger, ServiceEvent};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: &'static str,
}

/// The `question` of a chat body. Anything unusable counts as empty.
fn question_of(payload: &Result<Json<Value>, JsonRejection>) -> &str {
    match payload {
        Ok(Json(body)) => body.get("question").and_then(Value::as_str).unwrap_or(""),
        Err(_) => "",
    }
}

/// Handler for `POST /api/chat`.
pub async fn chat(payload: Result<Json<Value>, JsonRejection>) -> Json<ChatResponse> {
    let question = question_of(&payload);
    let topic = ChatTopic::detect(question);

    EventLogger::log_event(
        &uuid::Uuid::new_v4().to_string(),
        ServiceEvent::Chat {
            question: question.to_string(),
            topic: topic.map(|t| t.keyword().to_string()),
        },
    );

    Json(ChatResponse {
        response: respond(question),
    })
}
