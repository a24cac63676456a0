// Shared prompt fragments. Each service that calls the generator keeps its own
// prompts.rs alongside it; only cross-cutting instructions live here.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to extraction prompts so absent data stays absent.
pub const NO_INVENTION_INSTRUCTION: &str = "\
    CRITICAL: Only report information that is literally present in the input. \
    Do NOT infer, guess, or invent names, dates, employers, or contact details. \
    Use null for unknown single values and [] for unknown lists.";
