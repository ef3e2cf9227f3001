//! # Document-Scoped Question Answering
//!
//! This crate provides a client that answers user questions from the content
//! of a single reference document. A fixed scope-restriction policy is
//! embedded in every prompt sent to the configured AI provider, and answers
//! are optionally rendered as synthesized speech.

pub mod conversation;
pub mod document;
pub mod errors;
pub mod feedback;
pub mod prompts;
pub mod providers;
pub mod types;

pub use conversation::{Conversation, Role, Turn};
pub use document::{DocumentError, DocumentStore};
pub use errors::PromptError;
pub use feedback::{FeedbackError, FeedbackLog};
pub use types::{
    AnswerLength, ChatClient, ChatClientBuilder, ScopePolicy, StyleOptions, TurnOutcome,
};

use prompts::build_turn_prompts;
use tracing::{debug, warn};

impl ChatClient {
    /// Executes one conversational turn.
    ///
    /// The flow is strictly sequential: build the prompt pair, call the
    /// generation provider, then synthesize speech for the answer. Provider
    /// failures are recovered locally so a turn always completes: a failed
    /// generation becomes an `Error: <cause>` answer, and a failed synthesis
    /// becomes a turn without audio. Neither failure prevents the other call
    /// from being attempted.
    pub async fn execute_turn(
        &self,
        question: &str,
        document_text: &str,
        history: &[Turn],
        options: &StyleOptions,
    ) -> TurnOutcome {
        let (system_prompt, user_prompt) =
            build_turn_prompts(question, document_text, history, options, &self.policy);

        debug!(
            system_len = system_prompt.len(),
            user_len = user_prompt.len(),
            "--> Sending prompts to AI provider"
        );

        let answer = match self.ai_provider.generate(&system_prompt, &user_prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Answer generation failed: {e}");
                format!("Error: {e}")
            }
        };

        let audio = match &self.speech_provider {
            Some(speech) => {
                let voice = self.policy.voice_for(&options.language);
                match speech.synthesize(&answer, voice).await {
                    Ok(bytes) => Some(bytes),
                    Err(e) => {
                        warn!("Speech synthesis failed: {e}");
                        None
                    }
                }
            }
            None => None,
        };

        TurnOutcome { answer, audio }
    }
}
