// Cross-cutting prompt fragments. Each operation's own instructions live in
// `analysis::prompts`.

/// Appended to system prompts whose answer must be a bare JSON object.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to system prompts whose answer is free text shown to the candidate as-is.
pub const PLAIN_TEXT_INSTRUCTION: &str = "Respond with the finished document only, as plain text. \
    Do NOT add a preamble, commentary, or markdown formatting.";

/// Keeps generated documents honest about the candidate's background.
pub const GROUNDING_INSTRUCTION: &str = "Use ONLY facts present in the resume. \
    Do NOT invent employers, titles, dates, degrees, metrics, or skills. \
    If the job asks for something the resume does not show, do not claim it.";
