//! Query Executor.
//!
//! Runs dispatched plans against the database their template targets.

use std::sync::Arc;
use std::time::Instant;

use crate::error::{QueryError, Result};
use crate::storage::{Database, Databases};

use super::dispatcher::IntentDispatcher;
use super::types::*;

// ============================================================================
// Query Executor
// ============================================================================

/// Answers questions using two injected database capabilities.
pub struct QueryExecutor {
    dispatcher: IntentDispatcher,
    university: Arc<dyn Database>,
    sales: Arc<dyn Database>,
}

impl QueryExecutor {
    /// Create a new query executor.
    pub fn new(university: Arc<dyn Database>, sales: Arc<dyn Database>) -> Self {
        Self {
            dispatcher: IntentDispatcher::new(),
            university,
            sales,
        }
    }

    /// Create an executor over a connected database pair.
    pub fn from_databases(databases: Databases) -> Self {
        Self::new(databases.university, databases.sales)
    }

    /// Replace the dispatcher (e.g. to change the default listing limit).
    pub fn with_dispatcher(mut self, dispatcher: IntentDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn dispatcher(&self) -> &IntentDispatcher {
        &self.dispatcher
    }

    /// Answer a natural language question.
    pub async fn ask(&self, question: &str) -> Result<QueryOutcome> {
        if question.trim().is_empty() {
            return Err(QueryError::EmptyQuestion.into());
        }

        match self.dispatcher.plan(question) {
            Some(plan) => Ok(QueryOutcome::Rows(self.execute(&plan).await?)),
            None => {
                tracing::debug!("No intent matched question");
                Ok(QueryOutcome::NotUnderstood)
            }
        }
    }

    /// Dispatch a question without running it.
    pub fn plan(&self, question: &str) -> Option<QueryPlan> {
        self.dispatcher.plan(question)
    }

    /// Run a plan on its target database.
    pub async fn execute(&self, plan: &QueryPlan) -> Result<Vec<Row>> {
        let expected = plan.placeholder_count();
        if expected != plan.params.len() {
            return Err(QueryError::ParameterMismatch {
                expected,
                got: plan.params.len(),
            }
            .into());
        }

        let database = self.database(plan.target);
        let start = Instant::now();
        let rows = database.fetch_all(&plan.sql, &plan.params).await?;

        tracing::debug!(
            intent = %plan.intent,
            database = database.name(),
            rows = rows.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Query executed"
        );
        Ok(rows)
    }

    fn database(&self, target: DbTarget) -> &dyn Database {
        match target {
            DbTarget::University => self.university.as_ref(),
            DbTarget::Sales => self.sales.as_ref(),
        }
    }
}
