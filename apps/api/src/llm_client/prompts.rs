// Shared prompt fragments for generative-backend calls.
// The email composer defines its own prompts alongside it (email::prompts).

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps generated text to the facts supplied in the payload.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Every claim must be traceable to the candidate profile, the job record \
    or the listed projects in the payload. Do NOT invent employers, metrics, projects, \
    links or years of experience. If the payload does not support a claim, omit it.";
