use crate::console::Console;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::commit::{CommitOutcome, run_commit_workflow};

pub async fn run(ctx: &AppContext) -> AppResult<CommitOutcome> {
    let mut console = Console::stdio();
    run_commit_workflow(ctx, &mut console).await
}
