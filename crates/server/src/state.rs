//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The `AppState` holds all shared resources: the
//! configuration, the loaded reference document, the chat client with its
//! instantiated providers, the feedback log, and the per-session store.

use crate::config::AppConfig;
use askdoc::{
    providers::{
        ai::{gemini::GeminiProvider, local::LocalAiProvider, AiProvider},
        speech::{translate::TranslateTtsProvider, SpeechProvider},
    },
    ChatClient, ChatClientBuilder, Conversation, DocumentStore, FeedbackLog, StyleOptions,
};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};
use uuid::Uuid;

/// The state of one interactive session: its style options, its append-only
/// conversation, and the last Q/A pair for feedback and download.
pub struct Session {
    pub options: StyleOptions,
    pub conversation: Conversation,
    pub last_question: Option<String>,
    pub last_answer: Option<String>,
}

impl Session {
    pub fn new(options: StyleOptions) -> Self {
        Self {
            options,
            conversation: Conversation::new(),
            last_question: None,
            last_answer: None,
        }
    }
}

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// The reference document, extracted once at startup and read-only after.
    pub document: Arc<DocumentStore>,
    /// The client executing turns against the configured providers.
    pub chat_client: Arc<ChatClient>,
    /// The append-only feedback log.
    pub feedback: Arc<FeedbackLog>,
    /// All live sessions, keyed by session id. The lock is only ever held for
    /// short, synchronous critical sections, never across provider calls.
    pub sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

/// Builds the shared application state from the configuration.
///
/// This loads the reference document (a missing or unreadable document is
/// fatal) and instantiates the generation and speech providers selected in
/// the configuration.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let ai_provider: Box<dyn AiProvider> = match config.provider.provider.as_str() {
        "gemini" => {
            let api_key = config
                .provider
                .api_key
                .clone()
                .ok_or_else(|| anyhow::anyhow!("api_key is required for the gemini provider"))?;
            // If api_url is not provided in config, construct it from the model name.
            let api_url = config.provider.api_url.clone().unwrap_or_else(|| {
                format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                    config.provider.model_name
                )
            });
            Box::new(GeminiProvider::new(api_url, api_key)?)
        }
        "local" => {
            let api_url = config.provider.api_url.clone().ok_or_else(|| {
                anyhow::anyhow!("api_url is required for the local provider")
            })?;
            Box::new(LocalAiProvider::new(
                api_url,
                config.provider.api_key.clone(),
                Some(config.provider.model_name.clone()),
            )?)
        }
        other => {
            return Err(anyhow::anyhow!("Unsupported AI provider type '{other}'"));
        }
    };

    let document = DocumentStore::load(&config.document_path)
        .map_err(|e| anyhow::anyhow!("Failed to load reference document: {e}"))?;
    tracing::info!(path = %config.document_path, "Loaded reference document.");

    let mut builder = ChatClientBuilder::new()
        .ai_provider(ai_provider)
        .policy(config.policy.clone());
    if config.speech.enabled {
        let speech: Box<dyn SpeechProvider> =
            Box::new(TranslateTtsProvider::new(config.speech.api_url.clone())?);
        builder = builder.speech_provider(speech);
    }
    let chat_client = builder.build()?;

    let feedback = FeedbackLog::new(&config.feedback_path);

    Ok(AppState {
        config: Arc::new(config),
        document: Arc::new(document),
        chat_client: Arc::new(chat_client),
        feedback: Arc::new(feedback),
        sessions: Arc::new(RwLock::new(HashMap::new())),
    })
}
