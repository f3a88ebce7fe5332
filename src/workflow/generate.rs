//! Commit description generation.
//!
//! The model is asked for a single JSON object. Replies are accepted either as
//! bare JSON or wrapped in a ```` ```json ```` fence; anything else is parsed as
//! is and rejected if it does not match the schema.

use tracing::{debug, error};

use crate::domain::commit_info::CommitInfo;
use crate::error::GenerationError;
use crate::services::LanguageModelService;

pub const SYSTEM_INSTRUCTION: &str =
    "You are a JSON-only response bot. Return valid JSON with no additional text or formatting.";

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

pub fn build_prompt(diff: &str) -> String {
    format!(
        r#"
You are an assistant tasked with analyzing the provided git diff and generating a JSON-only output.
Analyze the code changes in detail and produce a JSON structure that includes:

- A short, meaningful commit "message" (2-10 words) referencing a component or part of the code changed.
- A "small_description": A brief summary of 1-3 key changes without any markdown or bullet points.
- A "large_description": A detailed explanation of 1-5 changes without any markdown or bullet points.
- "file_changes": A list of changed files with brief notes on what was changed, without markdown or bullet points.
- "issue": A list of issues fixed, including issue numbers and simple explanations, without markdown or bullet points.
- "solution": A list of solutions implemented, including solution numbers and plain language explanations, without markdown or bullet points.
- "impact": A number between 1-5 indicating the impact of the commit.
- "priority": A number between 1-5 indicating the priority of the commit.

**Important Instructions:**

- **Return ONLY valid JSON**, with no additional text, markdown, or formatting outside of the JSON structure.
- **All string fields should be plain text** without any markdown syntax (e.g., no `- ` bullet points, no `**bold**`).
- **Use arrays** for fields that represent lists (e.g., "small_description", "large_description", "file_changes", "issue", "solution") instead of single strings with bullet points.

**JSON Structure:**
{{
    "message": "...",
    "small_description": ["...", "..."],
    "large_description": ["...", "..."],
    "file_changes": ["...", "..."],
    "issue": ["...", "..."],
    "solution": ["...", "..."],
    "impact": ...,
    "priority": ...
}}

Git Diff:
{diff}
"#
    )
}

/// Pull the JSON candidate out of a model reply.
///
/// Returns the object inside the first ```` ```json ```` block, ending at the
/// first `}` that is followed only by whitespace and the closing fence.
/// Replies without such a block are returned whole, trimmed.
pub fn extract_json(response: &str) -> String {
    fenced_object(response)
        .unwrap_or(response)
        .trim()
        .to_string()
}

fn fenced_object(response: &str) -> Option<&str> {
    let start = response.find(JSON_FENCE)? + JSON_FENCE.len();
    let body = &response[start..];
    if !body.trim_start().starts_with('{') {
        return None;
    }
    body.match_indices('}')
        .map(|(end, _)| end + 1)
        .find(|&end| body[end..].trim_start().starts_with(FENCE))
        .map(|end| &body[..end])
}

/// Parse and validate a model reply into a [`CommitInfo`].
pub fn parse_response(response: &str) -> Result<CommitInfo, GenerationError> {
    let candidate = extract_json(response);
    let value: serde_json::Value =
        serde_json::from_str(&candidate).map_err(GenerationError::MalformedJson)?;
    CommitInfo::from_value(value)
}

/// Ask the model to describe `diff`. Every failure is logged here with its own cause.
pub async fn generate_commit_info(
    model: &dyn LanguageModelService,
    diff: &str,
) -> Result<CommitInfo, GenerationError> {
    if diff.trim().is_empty() {
        return Err(GenerationError::EmptyDiff);
    }

    let prompt = build_prompt(diff);
    debug!(prompt_len = prompt.len(), "requesting commit description");

    let reply = model
        .complete(SYSTEM_INSTRUCTION, &prompt)
        .await
        .map_err(|err| {
            error!(%err, "language model call failed");
            GenerationError::Transport(err)
        })?;
    debug!(%reply, "language model reply");

    parse_response(&reply).inspect_err(|err| match err {
        GenerationError::MalformedJson(cause) => error!(%cause, "error parsing JSON response"),
        GenerationError::Schema(cause) => error!(%cause, "commit description failed validation"),
        other => error!(%other, "unexpected generation failure"),
    })
}
