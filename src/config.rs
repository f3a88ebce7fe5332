use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{AppError, AppResult};

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const JIRA_BASE_URL: &str = "JIRA_BASE_URL";
pub const JIRA_USERNAME: &str = "JIRA_USERNAME";
pub const JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";
pub const JIRA_PROJECT_KEY: &str = "JIRA_PROJECT_KEY";

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_PROJECT_KEY: &str = "DGA";

/// Every environment setting the CLI reads, with a label and whether it is a secret.
pub const SETTINGS: [(&str, &str, bool); 7] = [
    (OPENAI_API_KEY, "OpenAI API key", true),
    (OPENAI_MODEL, "OpenAI model", false),
    (OPENAI_BASE_URL, "OpenAI base URL", false),
    (JIRA_BASE_URL, "Jira base URL", false),
    (JIRA_USERNAME, "Jira username", false),
    (JIRA_API_TOKEN, "Jira API token", true),
    (JIRA_PROJECT_KEY, "Jira project key", false),
];

/// Environment values the CLI reads, resolved once from the process
/// environment and an optional `.env` file.
///
/// Values are trimmed and blank values count as unset. Both [`AppConfig`]
/// and `comet config` read through this type.
#[derive(Debug, Clone)]
pub struct Settings {
    values: HashMap<&'static str, String>,
}

impl Settings {
    /// Read the process environment, falling back to `<workspace_hint>/.env`
    /// for anything the environment leaves unset.
    pub fn from_env(workspace_hint: &Path) -> Self {
        Self::layered(workspace_hint, |name| env::var(name).ok())
    }

    fn layered<F>(workspace_hint: &Path, process: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let dotenv = read_dotenv(&workspace_hint.join(".env"));
        Self::from_lookup(|name| {
            process(name)
                .filter(|value| !value.trim().is_empty())
                .or_else(|| dotenv.get(name).cloned())
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let values = SETTINGS
            .iter()
            .filter_map(|&(name, _, _)| {
                let value = lookup(name)?.trim().to_string();
                (!value.is_empty()).then_some((name, value))
            })
            .collect();
        Self { values }
    }

    /// The explicitly set value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Jira settings that are still unset, in reporting order.
    pub fn jira_missing(&self) -> Vec<&'static str> {
        [JIRA_BASE_URL, JIRA_USERNAME, JIRA_API_TOKEN]
            .into_iter()
            .filter(|&name| self.get(name).is_none())
            .collect()
    }
}

pub fn default_for(name: &str) -> Option<&'static str> {
    match name {
        OPENAI_MODEL => Some(DEFAULT_MODEL),
        OPENAI_BASE_URL => Some(DEFAULT_OPENAI_BASE_URL),
        JIRA_PROJECT_KEY => Some(DEFAULT_PROJECT_KEY),
        _ => None,
    }
}

/// Key/value pairs from a dotenv file. A missing or unreadable file yields nothing.
fn read_dotenv(path: &Path) -> HashMap<String, String> {
    match dotenvy::from_path_iter(path) {
        Ok(entries) => entries
            .filter_map(|entry| {
                entry
                    .inspect_err(|err| warn!(path = %path.display(), %err, "skipping .env entry"))
                    .ok()
            })
            .collect(),
        Err(err) => {
            debug!(path = %path.display(), %err, "no .env file loaded");
            HashMap::new()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraCredentials {
    pub base_url: String,
    pub username: String,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    /// `None` unless base URL, username and token are all set.
    pub jira: Option<JiraCredentials>,
    /// Names of the Jira settings that are unset, empty when `jira` is present.
    pub jira_missing: Vec<&'static str>,
    pub jira_project_key: String,
    pub workspace_root: PathBuf,
}

impl AppConfig {
    pub fn from_env(workspace_hint: &Path) -> AppResult<Self> {
        Self::from_settings(workspace_hint, &Settings::from_env(workspace_hint))
    }

    #[cfg(test)]
    pub fn from_lookup<F>(workspace_hint: &Path, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_settings(workspace_hint, &Settings::from_lookup(lookup))
    }

    pub fn from_settings(workspace_hint: &Path, settings: &Settings) -> AppResult<Self> {
        let owned = |name: &str| settings.get(name).map(str::to_string);

        let openai_api_key = owned(OPENAI_API_KEY).ok_or_else(|| {
            AppError::Configuration(format!(
                "please set the {OPENAI_API_KEY} environment variable"
            ))
        })?;

        let jira = match (owned(JIRA_BASE_URL), owned(JIRA_USERNAME), owned(JIRA_API_TOKEN)) {
            (Some(base_url), Some(username), Some(token)) => Some(JiraCredentials {
                base_url,
                username,
                token,
            }),
            _ => None,
        };

        Ok(Self {
            openai_api_key,
            openai_model: owned(OPENAI_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url: owned(OPENAI_BASE_URL)
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            jira,
            jira_missing: settings.jira_missing(),
            jira_project_key: owned(JIRA_PROJECT_KEY)
                .unwrap_or_else(|| DEFAULT_PROJECT_KEY.to_string()),
            workspace_root: workspace_hint.to_path_buf(),
        })
    }

    /// Apply command line overrides on top of the environment.
    pub fn with_overrides(mut self, project: Option<String>, model: Option<String>) -> Self {
        if let Some(project) = project.filter(|p| !p.trim().is_empty()) {
            self.jira_project_key = project.trim().to_string();
        }
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.openai_model = model.trim().to_string();
        }
        self
    }
}
