use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::change::parse_file_list;
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

/// Version control backed by the `git` executable.
pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    async fn run<I, S>(&self, args: I) -> AppResult<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut command = Command::new("git");
        command.args(args).current_dir(&self.workspace_root);
        debug!(?command, "running git");

        let output = command
            .output()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to run git: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::VersionControl(format!(
                "git exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn unstaged_files(&self) -> AppResult<Vec<String>> {
        let output = self
            .run(["ls-files", "--others", "--modified", "--exclude-standard"])
            .await?;
        Ok(parse_file_list(&output))
    }

    async fn staged_diff(&self) -> AppResult<Option<String>> {
        let diff = self.run(["diff", "--staged"]).await?;
        if diff.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(diff))
        }
    }

    async fn stage_all(&self) -> AppResult<()> {
        self.run(["add", "."]).await.map(|_| ())
    }

    async fn stage_files(&self, files: &[String]) -> AppResult<()> {
        if files.is_empty() {
            return Ok(());
        }
        let args = ["add", "--"]
            .into_iter()
            .map(str::to_string)
            .chain(files.iter().cloned());
        self.run(args).await.map(|_| ())
    }

    async fn commit(&self, message: &str) -> AppResult<()> {
        if message.trim().is_empty() {
            return Err(AppError::VersionControl(
                "commit message cannot be empty".to_string(),
            ));
        }
        self.run(["commit", "-m", message]).await.map(|_| ())
    }
}
