use crate::errors::PromptError;
use crate::providers::{ai::AiProvider, speech::SpeechProvider};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Requested answer verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerLength {
    #[default]
    Short,
    Detailed,
}

impl AnswerLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerLength::Short => "short",
            AnswerLength::Detailed => "detailed",
        }
    }
}

/// Per-session presentation options, read by the prompt builder on every turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleOptions {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub length: AnswerLength,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            language: default_language(),
            length: AnswerLength::default(),
        }
    }
}

fn default_language() -> String {
    "English".to_string()
}

/// The scope-restriction policy embedded in every prompt.
///
/// The two historical deployments of this assistant differed only in their
/// refusal wording and their answer-language to speech-code mapping; both are
/// configuration here, so a single code path serves either policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopePolicy {
    /// What the document covers, used to phrase the assistant's role.
    #[serde(default = "default_subject")]
    pub subject: String,
    /// The exact reply for questions outside the document's scope.
    #[serde(default = "default_refusal_message")]
    pub refusal_message: String,
    /// The exact reply for greeting-only messages.
    #[serde(default = "default_greeting_message")]
    pub greeting_message: String,
    /// Answer-language display names mapped to speech-synthesis codes. The
    /// key set doubles as the enumerated language selector for sessions.
    #[serde(default = "default_voices")]
    pub voices: HashMap<String, String>,
}

impl ScopePolicy {
    /// The speech-synthesis code for an answer language. Unknown names fall
    /// back to English rather than failing the turn.
    pub fn voice_for(&self, language: &str) -> &str {
        self.voices
            .get(language)
            .map(String::as_str)
            .unwrap_or("en")
    }

    pub fn supports_language(&self, language: &str) -> bool {
        self.voices.contains_key(language)
    }
}

impl Default for ScopePolicy {
    fn default() -> Self {
        Self {
            subject: default_subject(),
            refusal_message: default_refusal_message(),
            greeting_message: default_greeting_message(),
            voices: default_voices(),
        }
    }
}

fn default_subject() -> String {
    "the provided document".to_string()
}

fn default_refusal_message() -> String {
    "Out of scope: this question is not within the scope of the provided document.".to_string()
}

fn default_greeting_message() -> String {
    "Hello! How can I help you with the document?".to_string()
}

fn default_voices() -> HashMap<String, String> {
    HashMap::from([
        ("English".to_string(), "en".to_string()),
        ("Urdu".to_string(), "ur".to_string()),
    ])
}

/// The result of one completed turn.
///
/// A turn always produces an answer; `audio` is absent when synthesis failed
/// or no speech provider is configured.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub answer: String,
    pub audio: Option<Vec<u8>>,
}

/// A client that executes conversational turns against the configured
/// generation and speech providers.
pub struct ChatClient {
    pub(crate) ai_provider: Box<dyn AiProvider>,
    pub(crate) speech_provider: Option<Box<dyn SpeechProvider>>,
    pub(crate) policy: ScopePolicy,
}

impl ChatClient {
    pub fn policy(&self) -> &ScopePolicy {
        &self.policy
    }
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("policy", &self.policy)
            .field("has_speech_provider", &self.speech_provider.is_some())
            .finish_non_exhaustive()
    }
}

/// A builder for creating `ChatClient` instances.
#[derive(Default)]
pub struct ChatClientBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    speech_provider: Option<Box<dyn SpeechProvider>>,
    policy: Option<ScopePolicy>,
}

impl ChatClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the generation provider. Required.
    pub fn ai_provider(mut self, provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    /// Sets the speech provider. Turns run text-only without one.
    pub fn speech_provider(mut self, provider: Box<dyn SpeechProvider>) -> Self {
        self.speech_provider = Some(provider);
        self
    }

    /// Overrides the default scope-restriction policy.
    pub fn policy(mut self, policy: ScopePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Builds the `ChatClient`, failing if no generation provider was set.
    pub fn build(self) -> Result<ChatClient, PromptError> {
        let ai_provider = self.ai_provider.ok_or(PromptError::MissingAiProvider)?;
        Ok(ChatClient {
            ai_provider,
            speech_provider: self.speech_provider,
            policy: self.policy.unwrap_or_default(),
        })
    }
}
