//! # Common Test Utilities
//!
//! Centralizes the integration-test harness for `askdoc-server`: `TestApp`
//! spawns the real router on a random port, backed by a generated reference
//! PDF and an `httpmock` server standing in for the generation and speech
//! endpoints.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use askdoc_server::{config, router, state::build_app_state};
use askdoc_test_utils::helpers::generate_test_pdf;
use httpmock::MockServer;
use reqwest::Client;
use serde_json::Value;
use std::{fs, net::SocketAddr, path::PathBuf};
use tempfile::TempDir;
use tokio::{net::TcpListener, task::JoinHandle};
use uuid::Uuid;

/// The text of the generated reference document used by every harness.
pub const DOCUMENT_TEXT: &str = "The capital of Testland is Examville.";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub feedback_path: PathBuf,
    _scratch_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    pub async fn spawn() -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();
        let scratch_dir = tempfile::tempdir()?;

        let document_path = scratch_dir.path().join("reference.pdf");
        fs::write(&document_path, generate_test_pdf(DOCUMENT_TEXT)?)?;
        let feedback_path = scratch_dir.path().join("feedback.csv");

        let config_path = scratch_dir.path().join("config.yml");
        let config_content = format!(
            r#"
port: 0
document_path: "{}"
feedback_path: "{}"
history_window: 4
policy:
  subject: "the Testland handbook"
provider:
  provider: "local"
  api_url: "{}"
  api_key: null
  model_name: "mock-chat-model"
speech:
  enabled: true
  api_url: "{}"
"#,
            document_path.display(),
            feedback_path.display(),
            mock_server.url("/v1/chat/completions"),
            mock_server.url("/translate_tts"),
        );
        fs::write(&config_path, config_content)?;

        let config = config::get_config(Some(config_path.to_str().unwrap()))?;
        let app_state = build_app_state(config).await?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                eprintln!("[TestApp] Server error: {e}");
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            feedback_path,
            _scratch_dir: scratch_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Creates a session and returns its id.
    pub async fn create_session(&self, body: Value) -> Result<Uuid> {
        let response = self
            .client
            .post(format!("{}/sessions", self.address))
            .json(&body)
            .send()
            .await?;
        anyhow::ensure!(
            response.status().is_success(),
            "session creation failed with status {}",
            response.status()
        );
        let body: Value = response.json().await?;
        let id = body["session_id"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("session_id missing from response"))?;
        Ok(Uuid::parse_str(id)?)
    }

    /// Posts one chat question for a session and returns the parsed body.
    pub async fn chat(&self, session_id: Uuid, question: &str) -> Result<Value> {
        let response = self
            .client
            .post(format!("{}/sessions/{session_id}/chat", self.address))
            .json(&serde_json::json!({ "question": question }))
            .send()
            .await?;
        anyhow::ensure!(
            response.status().is_success(),
            "chat failed with status {}",
            response.status()
        );
        Ok(response.json().await?)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
