use std::sync::Arc;

use crate::config::AppConfig;
use crate::infra::git::GitCli;
use crate::infra::jira::JiraClient;
use crate::infra::llm::OpenAiClient;
use crate::services::{IssueTrackerService, LanguageModelService, VersionControlService};

/// Configuration plus the three collaborators the commit workflow talks to.
pub struct AppContext {
    pub config: AppConfig,
    pub version_control: Arc<dyn VersionControlService>,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
    pub language_model: Arc<dyn LanguageModelService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        version_control: Arc<dyn VersionControlService>,
        issue_tracker: Arc<dyn IssueTrackerService>,
        language_model: Arc<dyn LanguageModelService>,
    ) -> Self {
        Self {
            config,
            version_control,
            issue_tracker,
            language_model,
        }
    }

    /// Wire git, Jira and OpenAI adapters from `config`.
    pub fn from_config(config: AppConfig) -> Self {
        let version_control = Arc::new(GitCli::new(config.workspace_root.clone()));
        let issue_tracker = Arc::new(JiraClient::new(config.jira.clone()));
        let language_model = Arc::new(OpenAiClient::new(
            config.openai_api_key.clone(),
            config.openai_model.clone(),
            config.openai_base_url.clone(),
        ));
        Self::new(config, version_control, issue_tracker, language_model)
    }
}
