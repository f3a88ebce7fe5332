use async_trait::async_trait;

use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModelService: Send + Sync {
    /// Send one system instruction and one user message, returning the reply text.
    async fn complete(&self, system: &str, prompt: &str) -> AppResult<String>;
}
