use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::validation::{self, ValidationError};
use crate::error::GenerationError;

/// Structured description of a staged change, as produced by the language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub message: String,
    pub small_description: Vec<String>,
    pub large_description: Vec<String>,
    pub file_changes: Vec<String>,
    pub issue: Vec<String>,
    pub solution: Vec<String>,
    pub impact: u8,
    pub priority: u8,
}

impl CommitInfo {
    /// Build from an already-parsed JSON value, rejecting it wholesale if any rule fails.
    pub fn from_value(value: Value) -> Result<Self, GenerationError> {
        validation::check(&value)?;
        serde_json::from_value(value).map_err(GenerationError::MalformedJson)
    }

    /// Re-run the schema rules on this value, exactly as they ran on the raw response.
    pub fn check(&self) -> Result<(), ValidationError> {
        let value = serde_json::to_value(self).unwrap_or(Value::Null);
        validation::check(&value)
    }

    pub fn attach_ticket(&mut self, ticket_key: &str) {
        self.message = format!("{} [{}]", self.message, ticket_key.trim());
    }

    /// The text handed to `git commit`.
    pub fn commit_message(&self) -> String {
        format!(
            "{}\n\n{}\n\n{}\n\nImpact: {}/5\nPriority: {}/5\n\nFiles changed:\n{}\n\nIssue:\n{}\n\nSolution:\n{}",
            self.message,
            lines(&self.small_description),
            lines(&self.large_description),
            self.impact,
            self.priority,
            lines(&self.file_changes),
            lines(&self.issue),
            lines(&self.solution),
        )
    }

    /// Human readable overview shown before the ticket prompt.
    pub fn summary(&self) -> String {
        format!(
            "Message: {}\n\nBrief Description:\n{}\n\nDetailed Description:\n{}\n\nImpact: {}/5\nPriority: {}/5\n\nFile Changes:\n{}\n\nIssue:\n{}\n\nSolution:\n{}",
            self.message,
            lines(&self.small_description),
            lines(&self.large_description),
            self.impact,
            self.priority,
            lines(&self.file_changes),
            lines(&self.issue),
            lines(&self.solution),
        )
    }

    pub fn large_description_text(&self) -> String {
        lines(&self.large_description)
    }

    /// Comment body posted on a linked ticket.
    pub fn ticket_comment(&self) -> String {
        format!(
            "Issue Details:\n{}\n\nSolution Details:\n{}",
            lines(&self.issue),
            lines(&self.solution)
        )
    }
}

fn lines(entries: &[String]) -> String {
    entries.join("\n")
}
