#![allow(dead_code)]

// Prompt assembly for the screening classifier.
// The prompt template and the job requirements live in separate operator-owned
// files; the template marks where the requirements go with a placeholder.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Marker inside the prompt template that the requirements text replaces.
pub const REQUIREMENTS_PLACEHOLDER: &str = "$REQUIREMENTS_PLACEHOLDER$";

/// Canonical template shape. Operators supply their own template file; this
/// constant documents the placeholder and the three-line reply contract the
/// parser expects.
pub const REFERENCE_PROMPT_TEMPLATE: &str = "\
You are an experienced technical recruiter screening resumes.

Job requirements:
$REQUIREMENTS_PLACEHOLDER$

Evaluate the resume you are given against these requirements.
Reply with EXACTLY three lines and nothing else:
Line 1: an integer rating from 1 to 10.
Line 2: ALL_MET if every requirement is met, otherwise NOT_MET.
Line 3: a one-line reason for the decision.";

/// Splices the requirements into the template verbatim. Only the first
/// occurrence of the placeholder is replaced; a template without the
/// placeholder passes through unchanged.
pub fn build_system_prompt(template: &str, requirements: &str) -> String {
    template.replacen(REQUIREMENTS_PLACEHOLDER, requirements, 1)
}

/// Reads the template and requirements files and assembles the system prompt.
pub fn load_system_prompt(template_path: &Path, requirements_path: &Path) -> Result<String> {
    let template = fs::read_to_string(template_path).with_context(|| {
        format!(
            "Failed to read prompt template file: {}",
            template_path.display()
        )
    })?;
    let requirements = fs::read_to_string(requirements_path).with_context(|| {
        format!(
            "Failed to read requirements file: {}",
            requirements_path.display()
        )
    })?;

    Ok(build_system_prompt(&template, &requirements))
}
