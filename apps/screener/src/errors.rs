use thiserror::Error;

use crate::llm_client::LlmError;
use crate::screening::extract::ExtractError;

/// Application-level error type for the screening pipeline.
///
/// The batch runner decides recovery by variant: extraction and LLM
/// failures skip the affected document, filesystem failures abort the run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
