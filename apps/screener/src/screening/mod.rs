// Resume screening pipeline: intake, extraction, classification, routing.
// All LLM calls go through llm_client; this module owns everything that
// touches the filesystem.

pub mod document;
pub mod extract;
pub mod prompts;
pub mod router;
pub mod runner;
pub mod verdict;

pub use prompts::load_system_prompt;
pub use runner::run_batch;
