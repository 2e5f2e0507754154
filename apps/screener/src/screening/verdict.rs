//! Parsing of classifier replies into routing verdicts.
//!
//! A well-formed reply is three lines: a rating, a decision token, and a
//! one-line reason. Parsing is total: any reply shape yields a verdict and
//! the decision line alone picks the variant. Replies whose second line is
//! neither token become [`Verdict::Malformed`], which the router files as a
//! fail while keeping the raw reply for the logs.

/// Decision token a candidate must hit to pass. Exact match only.
pub const PASS_TOKEN: &str = "ALL_MET";
/// Decision token for an explicit rejection.
pub const FAIL_TOKEN: &str = "NOT_MET";
/// Substituted when the reply has no third line to quote.
pub const DEFAULT_REASON: &str = "No reason provided.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass {
        rating: String,
        reason: String,
    },
    Fail {
        rating: String,
        reason: String,
    },
    /// The decision line matched neither token. Carries whatever rating and
    /// reason could be salvaged plus the untouched reply for diagnostics.
    Malformed {
        rating: String,
        reason: String,
        raw: String,
    },
}

impl Verdict {
    pub fn rating(&self) -> &str {
        match self {
            Verdict::Pass { rating, .. }
            | Verdict::Fail { rating, .. }
            | Verdict::Malformed { rating, .. } => rating,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            Verdict::Pass { reason, .. }
            | Verdict::Fail { reason, .. }
            | Verdict::Malformed { reason, .. } => reason,
        }
    }
}

/// Splits a raw classifier reply into (rating, decision, reason) by line
/// position and maps the decision token onto a [`Verdict`].
pub fn parse_reply(raw: &str) -> Verdict {
    let lines: Vec<&str> = raw.trim().split('\n').map(str::trim).collect();

    let rating = line_or(&lines, 0, "");
    let decision = line_or(&lines, 1, "");
    let reason = line_or(&lines, 2, DEFAULT_REASON);

    match decision.as_str() {
        PASS_TOKEN => Verdict::Pass { rating, reason },
        FAIL_TOKEN => Verdict::Fail { rating, reason },
        _ => Verdict::Malformed {
            rating,
            reason,
            raw: raw.to_string(),
        },
    }
}

/// Line at `idx`, or `default` when the line is missing or blank.
fn line_or(lines: &[&str], idx: usize, default: &str) -> String {
    match lines.get(idx) {
        Some(line) if !line.is_empty() => (*line).to_string(),
        _ => default.to_string(),
    }
}
