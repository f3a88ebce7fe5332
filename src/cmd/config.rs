use std::env;

use crate::config::{OPENAI_API_KEY, SETTINGS, Settings, default_for};
use crate::error::AppResult;

/// Print the resolved configuration with secrets masked.
pub fn run() -> AppResult<()> {
    let cwd = env::current_dir()?;
    println!("{}", render(&Settings::from_env(&cwd)));
    Ok(())
}

fn render(settings: &Settings) -> String {
    let mut lines = SETTINGS
        .iter()
        .map(|&(name, label, secret)| {
            let value = settings.get(name);
            let shown = if secret {
                mask_secret(value)
            } else {
                display_value(value, default_for(name))
            };
            format!("{label} ({name}): {shown}")
        })
        .collect::<Vec<_>>();

    if settings.get(OPENAI_API_KEY).is_none() {
        lines.push(format!(
            "\nWarning: {OPENAI_API_KEY} is not set; commit generation will not start."
        ));
    }

    let missing = settings.jira_missing();
    if missing.is_empty() {
        lines.push("\nJira integration: enabled".to_string());
    } else {
        lines.push(format!(
            "\nJira integration: disabled (missing {})",
            missing.join(", ")
        ));
    }

    lines.join("\n")
}

fn display_value(value: Option<&str>, default: Option<&str>) -> String {
    match (value, default) {
        (Some(v), _) => v.to_string(),
        (None, Some(default)) => format!("{default} (default)"),
        (None, None) => "<not set>".to_string(),
    }
}

fn mask_secret(value: Option<&str>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars = token.chars().collect::<Vec<_>>();
            let prefix = chars[..3].iter().collect::<String>();
            let suffix = chars[chars.len() - 3..].iter().collect::<String>();
            format!("{prefix}***{suffix}")
        }
        Some(_) => "***".to_string(),
        None => "<not set>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config::{AppConfig, JIRA_API_TOKEN, JIRA_BASE_URL, JIRA_USERNAME, OPENAI_MODEL};

    fn render_with(vars: &[(&str, &str)]) -> String {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        render(&Settings::from_lookup(|name| vars.get(name).cloned()))
    }

    #[test]
    fn masks_secrets() {
        assert_eq!(mask_secret(Some("sk-abcdef123")), "sk-***123");
        assert_eq!(mask_secret(Some("short")), "***");
        assert_eq!(mask_secret(None), "<not set>");
    }

    #[test]
    fn shows_defaults_and_disabled_jira() {
        let output = render_with(&[(OPENAI_API_KEY, "sk-abcdef123"), (JIRA_USERNAME, "dev")]);
        assert!(output.contains("OpenAI API key (OPENAI_API_KEY): sk-***123"));
        assert!(output.contains("OpenAI model (OPENAI_MODEL): gpt-4o (default)"));
        assert!(output.contains("Jira project key (JIRA_PROJECT_KEY): DGA (default)"));
        assert!(
            output.contains("Jira integration: disabled (missing JIRA_BASE_URL, JIRA_API_TOKEN)")
        );
        assert!(!output.contains("Warning"));
    }

    #[test]
    fn reports_enabled_jira_and_missing_model_key() {
        let output = render_with(&[
            (JIRA_BASE_URL, "https://x.atlassian.net"),
            (JIRA_USERNAME, "dev"),
            (JIRA_API_TOKEN, "tok-123456789"),
        ]);
        assert!(output.contains("Jira API token (JIRA_API_TOKEN): tok***789"));
        assert!(output.contains("Jira integration: enabled"));
        assert!(output.contains("Warning: OPENAI_API_KEY is not set"));
    }

    #[test]
    fn shows_the_value_the_loader_uses() {
        let vars = HashMap::from([
            (OPENAI_API_KEY.to_string(), "sk-abcdef123".to_string()),
            (OPENAI_MODEL.to_string(), " gpt-4o-mini ".to_string()),
            (JIRA_BASE_URL.to_string(), "   ".to_string()),
        ]);
        let settings = Settings::from_lookup(|name| vars.get(name).cloned());
        let config = AppConfig::from_settings(std::path::Path::new("/repo"), &settings).unwrap();

        let output = render(&settings);
        let model_line = format!("OpenAI model (OPENAI_MODEL): {}\n", config.openai_model);
        assert!(output.contains(&model_line));
        assert!(output.contains("Jira base URL (JIRA_BASE_URL): <not set>"));
        assert!(output.contains(&format!(
            "Jira integration: disabled (missing {})",
            config.jira_missing.join(", ")
        )));
    }
}
