pub mod issue_tracker;
pub mod language_model;
pub mod version_control;

pub use issue_tracker::IssueTrackerService;
pub use language_model::LanguageModelService;
pub use version_control::VersionControlService;

#[cfg(test)]
pub use issue_tracker::MockIssueTrackerService;
#[cfg(test)]
pub use language_model::MockLanguageModelService;
#[cfg(test)]
pub use version_control::MockVersionControlService;
