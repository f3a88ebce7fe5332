use async_trait::async_trait;

use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Modified or untracked files that are not ignored.
    async fn unstaged_files(&self) -> AppResult<Vec<String>>;
    /// Diff of the index against HEAD; `None` when nothing is staged.
    async fn staged_diff(&self) -> AppResult<Option<String>>;
    async fn stage_all(&self) -> AppResult<()>;
    async fn stage_files(&self, files: &[String]) -> AppResult<()>;
    async fn commit(&self, message: &str) -> AppResult<()>;
}
