//! # API Route Handlers
//!
//! The Axum route handlers for the conversational surface: session creation,
//! the per-turn chat flow, history listing, answer download, and feedback
//! submission.

use crate::{
    errors::AppError,
    state::{AppState, Session},
    types::{
        ChatRequest, ChatResponse, CreateSessionRequest, CreateSessionResponse, FeedbackRequest,
        FeedbackResponse, HistoryResponse, TurnView,
    },
};
use askdoc::StyleOptions;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use tracing::info;
use uuid::Uuid;

/// The root handler.
pub async fn root() -> &'static str {
    "askdoc server is running."
}

/// The health check handler.
pub async fn health_check() -> &'static str {
    "OK"
}

/// Creates a new session with its own style options and empty conversation.
pub async fn create_session_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Json<CreateSessionResponse>, AppError> {
    let defaults = StyleOptions::default();
    let options = StyleOptions {
        language: payload.language.unwrap_or(defaults.language),
        length: payload.length.unwrap_or(defaults.length),
    };

    if !app_state.config.policy.supports_language(&options.language) {
        return Err(AppError::BadRequest(format!(
            "Unsupported answer language '{}'.",
            options.language
        )));
    }

    let session_id = Uuid::new_v4();
    let mut sessions = app_state
        .sessions
        .write()
        .map_err(|_| AppError::lock_poisoned())?;
    sessions.insert(session_id, Session::new(options));
    info!(%session_id, "Created session.");

    Ok(Json(CreateSessionResponse { session_id }))
}

/// Executes one conversational turn for a session.
///
/// The user turn is appended before the provider calls; the assistant turn,
/// with synthesized audio when available, is appended after. The session lock
/// is released while the provider calls run.
pub async fn chat_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let question = payload.question.trim().to_string();
    if question.is_empty() {
        return Err(AppError::BadRequest("Question must not be empty.".to_string()));
    }
    info!(%session_id, "Received chat question.");

    let (options, history) = {
        let mut sessions = app_state
            .sessions
            .write()
            .map_err(|_| AppError::lock_poisoned())?;
        let session = sessions
            .get_mut(&session_id)
            .ok_or(AppError::SessionNotFound(session_id))?;

        // Snapshot the windowed history before appending the question, so the
        // prompt embeds only prior turns.
        let history = session
            .conversation
            .recent(app_state.config.history_window)
            .to_vec();
        session.conversation.push_user(question.clone());
        session.last_question = Some(question.clone());
        (session.options.clone(), history)
    };

    let outcome = app_state
        .chat_client
        .execute_turn(&question, app_state.document.text(), &history, &options)
        .await;

    let audio_b64 = outcome
        .audio
        .as_ref()
        .map(|bytes| general_purpose::STANDARD.encode(bytes));

    {
        let mut sessions = app_state
            .sessions
            .write()
            .map_err(|_| AppError::lock_poisoned())?;
        let session = sessions
            .get_mut(&session_id)
            .ok_or(AppError::SessionNotFound(session_id))?;
        session
            .conversation
            .push_assistant(outcome.answer.clone(), outcome.audio);
        session.last_answer = Some(outcome.answer.clone());
    }

    Ok(Json(ChatResponse {
        answer: outcome.answer,
        audio: audio_b64,
    }))
}

/// Returns the full turn history of a session, in submission order.
pub async fn history_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, AppError> {
    let sessions = app_state
        .sessions
        .read()
        .map_err(|_| AppError::lock_poisoned())?;
    let session = sessions
        .get(&session_id)
        .ok_or(AppError::SessionNotFound(session_id))?;

    let turns = session.conversation.turns().iter().map(TurnView::from).collect();
    Ok(Json(HistoryResponse { turns }))
}

/// Serves the most recent answer as a plain-text download.
pub async fn download_answer_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let answer = {
        let sessions = app_state
            .sessions
            .read()
            .map_err(|_| AppError::lock_poisoned())?;
        let session = sessions
            .get(&session_id)
            .ok_or(AppError::SessionNotFound(session_id))?;
        session.last_answer.clone()
    };

    let answer = answer.ok_or_else(|| {
        AppError::BadRequest("No answer available to download yet.".to_string())
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"answer.txt\"",
            ),
        ],
        answer,
    )
        .into_response())
}

/// Appends a feedback row carrying the session's last Q/A pair.
pub async fn feedback_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let (question, answer) = {
        let sessions = app_state
            .sessions
            .read()
            .map_err(|_| AppError::lock_poisoned())?;
        let session = sessions
            .get(&session_id)
            .ok_or(AppError::SessionNotFound(session_id))?;
        (
            session.last_question.clone().unwrap_or_default(),
            session.last_answer.clone().unwrap_or_default(),
        )
    };

    app_state
        .feedback
        .record(&payload.feedback, &question, &answer)?;

    Ok(Json(FeedbackResponse {
        message: format!("Saved to {}", app_state.feedback.path().display()),
    }))
}
