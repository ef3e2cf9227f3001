pub mod translate;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a speech-synthesis provider.
///
/// Callers treat failure as an expected outcome: synthesis may be unavailable
/// for a language, and a turn proceeds with text only when it is.
#[async_trait]
pub trait SpeechProvider: Send + Sync + Debug + DynClone {
    /// Synthesizes `text` into MP3 bytes for the given language code.
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Vec<u8>, PromptError>;
}

dyn_clone::clone_trait_object!(SpeechProvider);
