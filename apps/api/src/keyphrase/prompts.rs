// Prompt constants for LLM-backed keyphrase extraction.
// Reuses the JSON-only fragment from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// System prompt for keyphrase extraction.
pub fn keyphrase_system() -> String {
    format!(
        "You are a keyphrase extraction engine for resumes and job descriptions. \
        You return the phrases that best characterise a text, each with a relevance score. {JSON_ONLY_SYSTEM}"
    )
}

/// Keyphrase prompt template. Replace `{limit}` and `{text}` before sending.
pub const KEYPHRASE_PROMPT_TEMPLATE: &str = r#"Extract at most {limit} keyphrases from the text below.

Rules:
- A keyphrase is 1 to 3 words copied verbatim (lowercased) from the text.
- Prefer skills, tools, technologies, domains and responsibilities.
- Never return the same phrase twice.
- score is a non-negative number; higher means more characteristic of the text.

Return a JSON object with this EXACT schema (no extra fields):
{
  "keyphrases": [
    {"phrase": "distributed systems", "score": 4.0},
    {"phrase": "queues", "score": 1.0}
  ]
}

TEXT:
{text}"#;
