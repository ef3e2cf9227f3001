use crate::{errors::PromptError, providers::speech::SpeechProvider};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;

/// A provider for a Google-Translate-style text-to-speech endpoint.
///
/// The endpoint takes the text in the `q` query parameter and the language
/// code in `tl`, and responds with MP3 bytes.
#[derive(Clone, Debug)]
pub struct TranslateTtsProvider {
    client: ReqwestClient,
    api_url: String,
}

impl TranslateTtsProvider {
    /// The hosted endpoint used when no override is configured.
    pub const DEFAULT_API_URL: &'static str = "https://translate.google.com/translate_tts";

    /// Creates a new `TranslateTtsProvider`.
    pub fn new(api_url: String) -> Result<Self, PromptError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(PromptError::ReqwestClientBuild)?;
        Ok(Self { client, api_url })
    }
}

#[async_trait]
impl SpeechProvider for TranslateTtsProvider {
    /// Synthesizes `text` with a single GET request.
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Vec<u8>, PromptError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language_code),
                ("q", text),
            ])
            .send()
            .await
            .map_err(PromptError::SpeechRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PromptError::SpeechApi(error_text));
        }

        let audio = response.bytes().await.map_err(PromptError::SpeechRequest)?;
        if audio.is_empty() {
            return Err(PromptError::SpeechApi("empty audio response".to_string()));
        }
        Ok(audio.to_vec())
    }
}
