use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::screening::router::{
    OutcomeSpec, DEFAULT_FAIL_NOTE_BODY, DEFAULT_FAIL_NOTE_NAME, DEFAULT_PASS_NOTE_BODY,
    DEFAULT_PASS_NOTE_NAME,
};

/// Application configuration loaded from environment variables.
/// Only the API key is required; every path and template has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub resumes_dir: PathBuf,
    pub pass_dir: PathBuf,
    pub fail_dir: PathBuf,
    pub requirements_path: PathBuf,
    pub prompt_template_path: PathBuf,
    pub pass_note_name: String,
    pub pass_note_body: String,
    pub fail_note_name: String,
    pub fail_note_body: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            resumes_dir: env_or("RESUMES_DIR", "resumes").into(),
            pass_dir: env_or("PASS_DIR", "good").into(),
            fail_dir: env_or("FAIL_DIR", "bad").into(),
            requirements_path: env_or("REQUIREMENTS_FILE", "requirements.txt").into(),
            prompt_template_path: env_or("PROMPT_TEMPLATE_FILE", "promptStructure.txt").into(),
            pass_note_name: env_or("PASS_NOTE_NAME", DEFAULT_PASS_NOTE_NAME),
            pass_note_body: env_or("PASS_NOTE_BODY", DEFAULT_PASS_NOTE_BODY),
            fail_note_name: env_or("FAIL_NOTE_NAME", DEFAULT_FAIL_NOTE_NAME),
            fail_note_body: env_or("FAIL_NOTE_BODY", DEFAULT_FAIL_NOTE_BODY),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Routing spec for documents whose verdict is a pass.
    pub fn pass_outcome(&self) -> OutcomeSpec {
        OutcomeSpec {
            dir: self.pass_dir.clone(),
            note_name: self.pass_note_name.clone(),
            note_body: self.pass_note_body.clone(),
        }
    }

    /// Routing spec for documents whose verdict is a fail or malformed.
    pub fn fail_outcome(&self) -> OutcomeSpec {
        OutcomeSpec {
            dir: self.fail_dir.clone(),
            note_name: self.fail_note_name.clone(),
            note_body: self.fail_note_body.clone(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
