use tracing::{error, info, warn};

use crate::domain::commit_info::CommitInfo;
use crate::domain::ticket::Ticket;
use crate::services::IssueTrackerService;

/// Result of linking a commit description to an existing ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Skipped,
    Linked {
        description_updated: bool,
        comment_added: bool,
    },
}

/// Append the detailed description to `key` and comment with the issue/solution details.
///
/// The description write and the comment post are attempted independently;
/// neither failure stops the other.
pub async fn update_existing(
    tracker: &dyn IssueTrackerService,
    key: &str,
    commit: &CommitInfo,
) -> LinkOutcome {
    if !tracker.is_configured() {
        warn!("Jira configuration not found; skipping Jira updates");
        return LinkOutcome::Skipped;
    }

    let description_updated = match tracker.fetch_description(key).await {
        Ok(current) => {
            let description = append_description(&current, &commit.large_description_text());
            match tracker.update_description(key, &description).await {
                Ok(()) => true,
                Err(err) => {
                    error!(%err, key, "failed to update Jira issue description");
                    false
                }
            }
        }
        Err(err) => {
            // Writing back without the current text would discard it.
            error!(%err, key, "failed to retrieve Jira issue; description left unchanged");
            false
        }
    };

    let comment_added = match tracker.add_comment(key, &commit.ticket_comment()).await {
        Ok(()) => {
            info!(key, "Jira issue updated");
            true
        }
        Err(err) => {
            error!(%err, key, "failed to add comment to Jira issue");
            false
        }
    };

    LinkOutcome::Linked {
        description_updated,
        comment_added,
    }
}

/// Create a Task in `project_key` from the commit description and comment on it.
///
/// Returns the new ticket, or `None` when the tracker is not configured or creation failed.
pub async fn create_new(
    tracker: &dyn IssueTrackerService,
    commit: &CommitInfo,
    project_key: &str,
) -> Option<Ticket> {
    if !tracker.is_configured() {
        warn!("Jira configuration not found; skipping Jira issue creation");
        return None;
    }

    let ticket = match tracker
        .create_ticket(
            project_key,
            &commit.message,
            &commit.large_description_text(),
        )
        .await
    {
        Ok(ticket) => ticket,
        Err(err) => {
            error!(%err, project_key, "failed to create Jira issue");
            return None;
        }
    };

    if let Err(err) = tracker
        .add_comment(&ticket.key, &commit.ticket_comment())
        .await
    {
        error!(%err, key = %ticket.key, "failed to add comment to new Jira issue");
    }

    info!(key = %ticket.key, "created Jira issue");
    Some(ticket)
}

fn append_description(current: &str, addition: &str) -> String {
    if current.trim().is_empty() {
        addition.to_string()
    } else {
        format!("{current}\n\n{addition}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::MockIssueTrackerService;

    fn commit() -> CommitInfo {
        CommitInfo {
            message: "add debug print".to_string(),
            small_description: vec!["added a print".to_string()],
            large_description: vec!["first".to_string(), "second".to_string()],
            file_changes: vec!["x.py".to_string()],
            issue: vec!["no output".to_string()],
            solution: vec!["print".to_string()],
            impact: 1,
            priority: 2,
        }
    }

    fn configured() -> MockIssueTrackerService {
        let mut tracker = MockIssueTrackerService::new();
        tracker.expect_is_configured().return_const(true);
        tracker
    }

    #[tokio::test]
    async fn update_skips_without_credentials() {
        let mut tracker = MockIssueTrackerService::new();
        tracker.expect_is_configured().return_const(false);

        let outcome = update_existing(&tracker, "DGA-1", &commit()).await;
        assert_eq!(outcome, LinkOutcome::Skipped);
    }

    #[tokio::test]
    async fn create_skips_without_credentials() {
        let mut tracker = MockIssueTrackerService::new();
        tracker.expect_is_configured().return_const(false);

        assert!(create_new(&tracker, &commit(), "DGA").await.is_none());
    }

    #[tokio::test]
    async fn update_appends_description_and_comments() {
        let mut tracker = configured();
        tracker
            .expect_fetch_description()
            .withf(|key| key == "DGA-1")
            .times(1)
            .returning(|_| Ok("existing".to_string()));
        tracker
            .expect_update_description()
            .withf(|key, description| key == "DGA-1" && description == "existing\n\nfirst\nsecond")
            .times(1)
            .returning(|_, _| Ok(()));
        tracker
            .expect_add_comment()
            .withf(|key, body| {
                key == "DGA-1" && body == "Issue Details:\nno output\n\nSolution Details:\nprint"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = update_existing(&tracker, "DGA-1", &commit()).await;
        assert_eq!(
            outcome,
            LinkOutcome::Linked {
                description_updated: true,
                comment_added: true
            }
        );
    }

    #[tokio::test]
    async fn empty_description_is_replaced_not_padded() {
        let mut tracker = configured();
        tracker
            .expect_fetch_description()
            .returning(|_| Ok(String::new()));
        tracker
            .expect_update_description()
            .withf(|_, description| description == "first\nsecond")
            .times(1)
            .returning(|_, _| Ok(()));
        tracker.expect_add_comment().returning(|_, _| Ok(()));

        update_existing(&tracker, "DGA-1", &commit()).await;
    }

    #[tokio::test]
    async fn comment_is_posted_even_when_update_fails() {
        let mut tracker = configured();
        tracker
            .expect_fetch_description()
            .returning(|_| Ok("existing".to_string()));
        tracker
            .expect_update_description()
            .times(1)
            .returning(|_, _| Err(AppError::IssueTracker("500".to_string())));
        tracker
            .expect_add_comment()
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = update_existing(&tracker, "DGA-1", &commit()).await;
        assert_eq!(
            outcome,
            LinkOutcome::Linked {
                description_updated: false,
                comment_added: true
            }
        );
    }

    #[tokio::test]
    async fn fetch_failure_skips_write_but_still_comments() {
        let mut tracker = configured();
        tracker
            .expect_fetch_description()
            .returning(|_| Err(AppError::IssueTracker("404".to_string())));
        tracker.expect_update_description().never();
        tracker
            .expect_add_comment()
            .times(1)
            .returning(|_, _| Err(AppError::IssueTracker("404".to_string())));

        let outcome = update_existing(&tracker, "DGA-404", &commit()).await;
        assert_eq!(
            outcome,
            LinkOutcome::Linked {
                description_updated: false,
                comment_added: false
            }
        );
    }

    #[tokio::test]
    async fn create_returns_ticket_and_comments() {
        let mut tracker = configured();
        tracker
            .expect_create_ticket()
            .withf(|project, summary, description| {
                project == "DGA" && summary == "add debug print" && description == "first\nsecond"
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(Ticket {
                    key: "DGA-9".to_string(),
                    url: None,
                })
            });
        tracker
            .expect_add_comment()
            .withf(|key, body| key == "DGA-9" && body.starts_with("Issue Details:\n"))
            .times(1)
            .returning(|_, _| Ok(()));

        let ticket = create_new(&tracker, &commit(), "DGA").await.unwrap();
        assert_eq!(ticket.key, "DGA-9");
    }

    #[tokio::test]
    async fn create_failure_returns_none() {
        let mut tracker = configured();
        tracker
            .expect_create_ticket()
            .times(1)
            .returning(|_, _, _| Err(AppError::IssueTracker("400".to_string())));
        tracker.expect_add_comment().never();

        assert!(create_new(&tracker, &commit(), "DGA").await.is_none());
    }

    #[tokio::test]
    async fn comment_failure_after_create_still_returns_ticket() {
        let mut tracker = configured();
        tracker.expect_create_ticket().returning(|_, _, _| {
            Ok(Ticket {
                key: "DGA-10".to_string(),
                url: None,
            })
        });
        tracker
            .expect_add_comment()
            .returning(|_, _| Err(AppError::IssueTracker("500".to_string())));

        let ticket = create_new(&tracker, &commit(), "DGA").await;
        assert_eq!(ticket.map(|t| t.key), Some("DGA-10".to_string()));
    }
}
