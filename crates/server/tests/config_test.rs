//! # Configuration Tests
//!
//! Validates config defaults, environment-variable substitution inside the
//! YAML file, and top-level environment overrides.

use askdoc_server::config::{get_config, ConfigError};
use std::env;
use std::fs;
use std::sync::Mutex;

// A mutex to ensure that tests modifying the environment run sequentially.
// Environment variables are a shared, global resource, and running these
// tests in parallel could cause them to interfere.
static ENV_LOCK: Mutex<()> = Mutex::new(());

const MINIMAL_CONFIG: &str = r#"
provider:
  provider: "local"
  api_url: "http://localhost:1234/v1/chat/completions"
  api_key: null
  model_name: "test-model"
"#;

fn write_config(content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(&path, content).unwrap();
    let path = path.to_str().unwrap().to_string();
    (dir, path)
}

#[test]
fn test_minimal_config_gets_defaults() {
    let _lock = ENV_LOCK.lock().unwrap();
    env::remove_var("PORT");

    let (_dir, path) = write_config(MINIMAL_CONFIG);
    let config = get_config(Some(&path)).expect("config should load");

    assert_eq!(config.port, 9090);
    assert_eq!(config.document_path, "reference.pdf");
    assert_eq!(config.feedback_path, "feedback.csv");
    assert_eq!(config.history_window, 20);
    assert!(config.speech.enabled);
    assert_eq!(config.provider.provider, "local");
    assert_eq!(config.provider.model_name, "test-model");

    // The default policy supports English with an "en" voice.
    assert!(config.policy.supports_language("English"));
    assert_eq!(config.policy.voice_for("English"), "en");
    assert_eq!(config.policy.voice_for("Klingon"), "en");
}

#[test]
fn test_missing_config_file_is_reported() {
    let _lock = ENV_LOCK.lock().unwrap();

    let err = get_config(Some("/nonexistent/config.yml")).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn test_env_var_substitution_in_yaml() {
    let _lock = ENV_LOCK.lock().unwrap();
    env::set_var("ASKDOC_TEST_API_KEY", "secret-from-env");

    let (_dir, path) = write_config(
        r#"
provider:
  provider: "gemini"
  api_key: "${ASKDOC_TEST_API_KEY}"
  model_name: "gemini-test"
"#,
    );
    let config = get_config(Some(&path)).expect("config should load");
    env::remove_var("ASKDOC_TEST_API_KEY");

    assert_eq!(config.provider.api_key.as_deref(), Some("secret-from-env"));
}

#[test]
fn test_port_env_var_overrides_file() {
    let _lock = ENV_LOCK.lock().unwrap();
    env::set_var("PORT", "7777");

    let (_dir, path) = write_config(MINIMAL_CONFIG);
    let config = get_config(Some(&path)).expect("config should load");
    env::remove_var("PORT");

    assert_eq!(config.port, 7777);
}

#[test]
fn test_policy_overrides_are_honored() {
    let _lock = ENV_LOCK.lock().unwrap();

    let (_dir, path) = write_config(
        r#"
policy:
  subject: "the CSS exam guide"
  refusal_message: "Out of scope: not covered by the CSS guide."
  voices:
    English: "en"
    Urdu: "ur"
provider:
  provider: "local"
  api_url: "http://localhost:1234/v1/chat/completions"
  model_name: "test-model"
"#,
    );
    let config = get_config(Some(&path)).expect("config should load");

    assert_eq!(config.policy.subject, "the CSS exam guide");
    assert_eq!(
        config.policy.refusal_message,
        "Out of scope: not covered by the CSS guide."
    );
    // Fields absent from the file keep their defaults.
    assert!(!config.policy.greeting_message.is_empty());
    assert_eq!(config.policy.voice_for("Urdu"), "ur");
}
