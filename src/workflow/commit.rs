//! Interactive commit flow.
//!
//! Ensure something is staged, generate a description, optionally link a Jira
//! ticket, then confirm and commit. The user can quit at any prompt; quitting
//! never commits.

use std::io::{BufRead, Write};

use tracing::{error, warn};

use crate::console::Console;
use crate::context::AppContext;
use crate::domain::change::{ChangeSet, FileSelection};
use crate::domain::commit_info::CommitInfo;
use crate::domain::ticket::{Decision, TicketChoice};
use crate::error::AppResult;
use crate::workflow::generate::generate_commit_info;
use crate::workflow::ticket::{LinkOutcome, create_new, update_existing};

/// How a run of the commit workflow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    NothingToCommit,
    GenerationFailed,
    Committed,
    CommitFailed,
    Discarded,
    Cancelled,
}

pub async fn run_commit_workflow<R: BufRead, W: Write>(
    ctx: &AppContext,
    console: &mut Console<R, W>,
) -> AppResult<CommitOutcome> {
    console.say("Checking for staged changes...")?;

    let diff = match ensure_staged(ctx, console).await? {
        Staged::Diff(diff) => diff,
        Staged::Nothing => return Ok(CommitOutcome::NothingToCommit),
        Staged::Quit => return cancelled(console),
    };

    console.say("Generating commit information from AI...")?;
    let mut commit = match generate_commit_info(ctx.language_model.as_ref(), &diff).await {
        Ok(commit) => commit,
        Err(_) => {
            console.say("Failed to generate commit information.")?;
            return Ok(CommitOutcome::GenerationFailed);
        }
    };

    if let Err(err) = commit.check() {
        error!(%err, "generated commit information is invalid");
        console.say("Commit information is invalid. Exiting.")?;
        return Ok(CommitOutcome::GenerationFailed);
    }

    console.say(format!("\nAI-Generated Commit Information:\n{}", commit.summary()))?;

    if !link_ticket(ctx, console, &mut commit).await? {
        return cancelled(console);
    }

    confirm_and_commit(ctx, console, &commit).await
}

enum Staged {
    Diff(String),
    Nothing,
    Quit,
}

async fn ensure_staged<R: BufRead, W: Write>(
    ctx: &AppContext,
    console: &mut Console<R, W>,
) -> AppResult<Staged> {
    if let Some(diff) = staged_diff(ctx).await {
        return Ok(Staged::Diff(diff));
    }

    let changes = match ctx.version_control.unstaged_files().await {
        Ok(files) => ChangeSet::new(files),
        Err(err) => {
            warn!(%err, "could not list unstaged changes");
            ChangeSet::default()
        }
    };

    if changes.is_empty() {
        console.say("No unstaged changes found. Nothing to commit.")?;
        return Ok(Staged::Nothing);
    }

    console.say("No staged changes found.")?;
    if !stage_selected(ctx, console, &changes).await? {
        return Ok(Staged::Quit);
    }

    match staged_diff(ctx).await {
        Some(diff) => Ok(Staged::Diff(diff)),
        None => {
            console.say("Still no staged changes. Exiting.")?;
            Ok(Staged::Nothing)
        }
    }
}

async fn staged_diff(ctx: &AppContext) -> Option<String> {
    match ctx.version_control.staged_diff().await {
        Ok(diff) => diff,
        Err(err) => {
            error!(%err, "error getting git diff");
            None
        }
    }
}

/// Let the user pick files to stage. Returns `false` if they chose to quit.
async fn stage_selected<R: BufRead, W: Write>(
    ctx: &AppContext,
    console: &mut Console<R, W>,
    changes: &ChangeSet,
) -> AppResult<bool> {
    console.say(format!(
        "\nThese files have changes but are not staged:\n{}",
        changes.numbered()
    ))?;
    let answer = console.ask(
        "\nEnter the numbers of the files you want to stage separated by spaces\n\
         (press Enter to stage all, or 'q' to quit):",
    )?;
    let selection = answer.map_or(FileSelection::Quit, |line| FileSelection::parse(&line));

    match selection {
        FileSelection::Quit => return Ok(false),
        FileSelection::All => match ctx.version_control.stage_all().await {
            Ok(()) => console.say("All files have been staged.")?,
            Err(err) => console.say(format!("Error staging files: {err}"))?,
        },
        FileSelection::Indices(indices) => {
            let files = changes.pick(&indices);
            if files.is_empty() {
                console.say("No valid files selected. No files were staged.")?;
            } else {
                match ctx.version_control.stage_files(&files).await {
                    Ok(()) => console.say("Selected files have been staged.")?,
                    Err(err) => console.say(format!("Error staging files: {err}"))?,
                }
            }
        }
        FileSelection::Invalid => console.say("Invalid input. No files were staged.")?,
    }

    Ok(true)
}

/// Ticket association step. Returns `false` if the user chose to quit.
async fn link_ticket<R: BufRead, W: Write>(
    ctx: &AppContext,
    console: &mut Console<R, W>,
    commit: &mut CommitInfo,
) -> AppResult<bool> {
    let answer = console.ask(
        "\nDo you have an existing Jira ticket number to associate with this commit?\n\
         (leave blank if no, or enter 'q' to quit):",
    )?;

    match answer.map_or(TicketChoice::Quit, |line| TicketChoice::parse(&line)) {
        TicketChoice::Quit => Ok(false),
        TicketChoice::Existing(key) => {
            commit.attach_ticket(&key);
            console.say(format!("Appending Jira ticket {key} to commit message."))?;
            match update_existing(ctx.issue_tracker.as_ref(), &key, commit).await {
                LinkOutcome::Skipped => {
                    console.say("Jira configuration not found. Skipping Jira updates.")?
                }
                LinkOutcome::Linked {
                    description_updated,
                    comment_added,
                } => {
                    if !description_updated {
                        console.say(format!("Could not update the description of {key}."))?;
                    }
                    if comment_added {
                        console.say(format!("Jira issue {key} successfully updated."))?;
                    } else {
                        console.say(format!("Could not add a comment to {key}."))?;
                    }
                }
            }
            Ok(true)
        }
        TicketChoice::None => {
            let answer = console.ask(
                "No Jira ticket provided. Do you want to create a new ticket? (yes/no/quit)",
            )?;
            match answer.map_or(Decision::Quit, |line| Decision::parse(&line)) {
                Decision::Quit => Ok(false),
                Decision::No => Ok(true),
                Decision::Yes => {
                    let project = &ctx.config.jira_project_key;
                    console.say(format!("Creating new Jira ticket in project {project}..."))?;
                    if let Some(ticket) =
                        create_new(ctx.issue_tracker.as_ref(), commit, project).await
                    {
                        commit.attach_ticket(&ticket.key);
                        console.say(format!(
                            "Appended newly created Jira issue {} to commit message.",
                            ticket.key
                        ))?;
                        if let Some(url) = &ticket.url {
                            console.say(format!("View ticket: {url}"))?;
                        }
                    }
                    Ok(true)
                }
            }
        }
    }
}

async fn confirm_and_commit<R: BufRead, W: Write>(
    ctx: &AppContext,
    console: &mut Console<R, W>,
    commit: &CommitInfo,
) -> AppResult<CommitOutcome> {
    let message = commit.commit_message();
    console.say(format!("\nCommit message:\n{message}"))?;

    let answer =
        console.ask("\nDo you want to use this commit message and commit now? (yes/no/quit):")?;

    match answer.map_or(Decision::Quit, |line| Decision::parse(&line)) {
        Decision::Quit => cancelled(console),
        Decision::No => {
            console.say("Commit message discarded.")?;
            Ok(CommitOutcome::Discarded)
        }
        Decision::Yes => match ctx.version_control.commit(&message).await {
            Ok(()) => {
                console.say("Changes committed successfully.")?;
                Ok(CommitOutcome::Committed)
            }
            Err(err) => {
                error!(%err, "commit failed");
                console.say(format!("Error committing changes: {err}"))?;
                Ok(CommitOutcome::CommitFailed)
            }
        },
    }
}

fn cancelled<R: BufRead, W: Write>(console: &mut Console<R, W>) -> AppResult<CommitOutcome> {
    console.say("Exiting...")?;
    Ok(CommitOutcome::Cancelled)
}
