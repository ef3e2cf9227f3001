use askdoc::{AnswerLength, Turn};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub language: Option<String>,
    pub length: Option<AnswerLength>,
}

#[derive(Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub answer: String,
    /// Base64-encoded MP3 audio, absent when synthesis failed or is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

/// One turn as rendered over the API, with audio base64-encoded.
#[derive(Serialize)]
pub struct TurnView {
    pub role: &'static str,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

impl From<&Turn> for TurnView {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role.as_str(),
            content: turn.content.clone(),
            audio: turn
                .audio
                .as_ref()
                .map(|bytes| general_purpose::STANDARD.encode(bytes)),
        }
    }
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub turns: Vec<TurnView>,
}

#[derive(Deserialize)]
pub struct FeedbackRequest {
    pub feedback: String,
}

#[derive(Serialize)]
pub struct FeedbackResponse {
    pub message: String,
}
