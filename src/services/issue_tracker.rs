use async_trait::async_trait;

use crate::domain::ticket::Ticket;
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    /// Whether credentials are present; callers skip every other method when false.
    fn is_configured(&self) -> bool;
    /// Current description of the ticket, empty when it has none.
    async fn fetch_description(&self, key: &str) -> AppResult<String>;
    async fn update_description(&self, key: &str, description: &str) -> AppResult<()>;
    async fn add_comment(&self, key: &str, body: &str) -> AppResult<()>;
    async fn create_ticket(
        &self,
        project_key: &str,
        summary: &str,
        description: &str,
    ) -> AppResult<Ticket>;
}
