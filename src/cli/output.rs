//! Output formatting for CLI commands.
//!
//! Answers are always printed as JSON; plans as JSON or human-readable text.

use anyhow::Result;
use askql::{QueryOutcome, QueryPlan};
use serde_json::json;

use askql::query::NOT_UNDERSTOOD_MESSAGE;

/// Print the answer to a question in the `POST /ask` envelope.
pub fn print_outcome(outcome: &QueryOutcome) -> Result<()> {
    let envelope = match outcome {
        QueryOutcome::Rows(rows) => json!({ "data": rows }),
        QueryOutcome::NotUnderstood => json!({ "error": NOT_UNDERSTOOD_MESSAGE }),
    };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

/// Print a rejected question in the `POST /ask` envelope.
pub fn print_error(message: &str) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&json!({ "error": message }))?);
    Ok(())
}

/// Print the plan a question resolves to.
pub fn print_plan(question: &str, plan: Option<&QueryPlan>, json: bool) -> Result<()> {
    if json {
        let value = match plan {
            Some(plan) => json!({ "question": question, "plan": plan }),
            None => json!({ "question": question, "error": NOT_UNDERSTOOD_MESSAGE }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match plan {
        Some(plan) => {
            println!("Intent: {}", plan.intent.display_name());
            println!("Database: {}", plan.target);
            println!("SQL: {}", plan.sql);
            if plan.params.is_empty() {
                println!("Params: (none)");
            } else {
                let params: Vec<String> = plan.params.iter().map(|p| p.to_string()).collect();
                println!("Params: {}", params.join(", "));
            }
        }
        None => println!("{}", NOT_UNDERSTOOD_MESSAGE),
    }
    Ok(())
}
