//! In-memory database with canned results.
//!
//! Answers every statement with a fixed row set (or a fixed failure) and
//! records what it was asked to run. Useful for exercising the dispatcher,
//! executor and HTTP layer without a MySQL server.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{DatabaseError, Result};
use crate::query::{Row, SqlParam};

use super::traits::Database;

/// A statement received by a [`MemoryDatabase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedStatement {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

/// Database stand-in returning preset rows.
pub struct MemoryDatabase {
    name: String,
    rows: Vec<Row>,
    failure: Option<String>,
    executed: Mutex<Vec<RecordedStatement>>,
}

impl MemoryDatabase {
    /// A database answering every statement with `rows`.
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
            failure: None,
            executed: Mutex::new(Vec::new()),
        }
    }

    /// A database failing every statement with `message`.
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(name, Vec::new())
        }
    }

    /// Statements received so far, oldest first.
    pub fn executed(&self) -> Vec<RecordedStatement> {
        self.executed.lock().clone()
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_all(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Row>> {
        self.executed.lock().push(RecordedStatement {
            sql: sql.to_string(),
            params: params.to_vec(),
        });

        match &self.failure {
            Some(message) => Err(DatabaseError::Sqlx(sqlx::Error::Protocol(message.clone())).into()),
            None => Ok(self.rows.clone()),
        }
    }
}
