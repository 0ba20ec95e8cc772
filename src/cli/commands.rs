//! CLI command handlers.

use anyhow::Result;
use askql::error::QueryError;
use askql::{connect_databases, Config, IntentDispatcher, QueryExecutor, QueryOutcome};

use super::output;

/// Exit status of `ask` for a rejected question (HTTP would answer 400).
pub const EXIT_REJECTED: u8 = 2;

/// Run the ask command: answer a question against the configured databases.
///
/// Returns the process exit status.
pub async fn run_ask(config: Config, question: String) -> Result<u8> {
    if question.trim().is_empty() {
        output::print_error(&QueryError::EmptyQuestion.to_string())?;
        return Ok(EXIT_REJECTED);
    }

    let databases = connect_databases(&config).await?;
    let executor = QueryExecutor::from_databases(databases)
        .with_dispatcher(IntentDispatcher::with_default_limit(config.query.default_limit));

    let outcome = executor.ask(&question).await?;
    output::print_outcome(&outcome)?;
    Ok(exit_status(&outcome))
}

fn exit_status(outcome: &QueryOutcome) -> u8 {
    if outcome.is_understood() {
        0
    } else {
        EXIT_REJECTED
    }
}

/// Run the plan command: show the SQL a question maps to without executing it.
pub fn run_plan(config: Config, question: String, json_output: bool) -> Result<()> {
    let dispatcher = IntentDispatcher::with_default_limit(config.query.default_limit);
    let plan = dispatcher.plan(&question);
    output::print_plan(&question, plan.as_ref(), json_output)
}
