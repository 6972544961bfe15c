// Cold-email composition. Template mode is always available; generative mode
// goes through `llm_client` and falls back to the template.

pub mod composer;
pub mod handlers;
pub mod prompts;
pub mod templates;
