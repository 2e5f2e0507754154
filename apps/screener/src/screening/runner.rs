//! Batch driver: one pass over the intake directory.
//!
//! Documents are processed strictly one at a time, in the order the
//! directory listing returns them. Extraction and classification failures
//! skip the affected document and leave it in place; filesystem failures
//! abort the batch.

use std::fs;

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::Classifier;
use crate::screening::document::SourceDocument;
use crate::screening::extract::extract_text;
use crate::screening::router::{route, Outcome, OutcomeSpec, Routed};
use crate::screening::verdict::{parse_reply, Verdict};

/// Counts for one completed batch. Malformed replies are part of `failed`
/// and additionally tracked on their own.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub passed: usize,
    pub failed: usize,
    pub malformed_replies: usize,
    pub skipped: usize,
}

/// Screens every file currently in the intake directory and routes it by
/// verdict. The listing is snapshotted up front; files that appear while
/// the batch runs are left for the next run.
pub async fn run_batch(
    config: &Config,
    classifier: &dyn Classifier,
    system_prompt: &str,
) -> Result<BatchSummary, AppError> {
    let pass = config.pass_outcome();
    let fail = config.fail_outcome();
    fs::create_dir_all(&pass.dir)?;
    fs::create_dir_all(&fail.dir)?;

    let mut documents: Vec<SourceDocument> = Vec::new();
    for entry in fs::read_dir(&config.resumes_dir)? {
        let entry = entry?;
        let path = entry.path();
        // Metadata follows symlinks, so a symlinked resume still screens.
        let is_file = fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false);
        if !is_file {
            debug!("Ignoring non-file entry: {}", path.display());
            continue;
        }
        documents.push(SourceDocument::from_path(path));
    }

    info!(
        "Screening {} documents from {}",
        documents.len(),
        config.resumes_dir.display()
    );

    let mut summary = BatchSummary::default();
    for document in &documents {
        match process_document(document, classifier, system_prompt, &pass, &fail).await {
            Ok((routed, verdict)) => {
                match routed.outcome {
                    Outcome::Pass => summary.passed += 1,
                    Outcome::Fail => summary.failed += 1,
                }
                if matches!(verdict, Verdict::Malformed { .. }) {
                    summary.malformed_replies += 1;
                }
                info!(
                    "{} routed to {} (note: {})",
                    document.file_name,
                    routed.moved_to.display(),
                    routed.note_path.display()
                );
            }
            Err(AppError::Extract(e)) => {
                warn!("Skipping {}: {}", document.file_name, e);
                summary.skipped += 1;
            }
            Err(AppError::Llm(e)) => {
                error!(
                    "Classification failed for {}, leaving it in place: {}",
                    document.file_name, e
                );
                summary.skipped += 1;
            }
            // Filesystem errors while routing abort the batch.
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}

/// Extract, classify, parse, route. One document end to end.
async fn process_document(
    document: &SourceDocument,
    classifier: &dyn Classifier,
    system_prompt: &str,
    pass: &OutcomeSpec,
    fail: &OutcomeSpec,
) -> Result<(Routed, Verdict), AppError> {
    debug!("Extracting {} (.{})", document.file_name, document.extension);
    let text = extract_text(&document.path)?;
    let reply = classifier.classify(system_prompt, &text).await?;
    let verdict = parse_reply(&reply);
    let routed = route(document, &verdict, pass, fail)?;
    Ok((routed, verdict))
}
