//! Verdict-driven file routing.
//!
//! Every verdict lands in exactly one outcome directory: the document is
//! moved first, then a companion note is written next to it from the
//! outcome's templates. There is no transaction; if the note write fails
//! the document has already been moved.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::errors::AppError;
use crate::screening::document::SourceDocument;
use crate::screening::verdict::Verdict;

/// Default note filename for passing documents, e.g. `JohnDoe_9.txt`.
pub const DEFAULT_PASS_NOTE_NAME: &str = "{base}_{rating}.txt";
/// Default note body for passing documents: rating first, then reason.
pub const DEFAULT_PASS_NOTE_BODY: &str = "Rating: {rating}\nReason: {reason}";
/// Default note filename for failing documents, e.g. `JohnDoe.txt`.
pub const DEFAULT_FAIL_NOTE_NAME: &str = "{base}.txt";
/// Default note body for failing documents: reason first, then rating.
pub const DEFAULT_FAIL_NOTE_BODY: &str = "Reason: {reason}\nRating: {rating}";

/// Where one outcome's documents go and how its companion notes are shaped.
/// Templates substitute `{base}`, `{rating}` and `{reason}`.
#[derive(Debug, Clone)]
pub struct OutcomeSpec {
    pub dir: PathBuf,
    pub note_name: String,
    pub note_body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail,
}

/// Result of routing one document: where it went and where its note is.
#[derive(Debug)]
pub struct Routed {
    pub outcome: Outcome,
    pub moved_to: PathBuf,
    pub note_path: PathBuf,
}

/// Moves a document into the directory its verdict selects and writes the
/// companion note beside it. Malformed verdicts take the fail route.
pub fn route(
    document: &SourceDocument,
    verdict: &Verdict,
    pass: &OutcomeSpec,
    fail: &OutcomeSpec,
) -> Result<Routed, AppError> {
    let (outcome, spec) = match verdict {
        Verdict::Pass { .. } => (Outcome::Pass, pass),
        Verdict::Fail { .. } => (Outcome::Fail, fail),
        Verdict::Malformed { raw, .. } => {
            warn!(
                "Reply for {} did not follow the three-line format, filing as fail: {:?}",
                document.file_name, raw
            );
            (Outcome::Fail, fail)
        }
    };

    // The document keeps its original filename in the outcome directory.
    let moved_to = spec.dir.join(&document.file_name);
    fs::rename(&document.path, &moved_to)?;

    let note_name = render_note_name(&spec.note_name, &document.base_name, verdict.rating());
    let note_path = spec.dir.join(note_name);
    let note_body = render_note_body(&spec.note_body, verdict.rating(), verdict.reason());
    fs::write(&note_path, note_body)?;

    Ok(Routed {
        outcome,
        moved_to,
        note_path,
    })
}

fn render_note_name(template: &str, base: &str, rating: &str) -> String {
    template.replace("{base}", base).replace("{rating}", rating)
}

fn render_note_body(template: &str, rating: &str, reason: &str) -> String {
    template
        .replace("{rating}", rating)
        .replace("{reason}", reason)
}
