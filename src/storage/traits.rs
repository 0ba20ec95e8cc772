//! Database capability trait.

use async_trait::async_trait;

use crate::query::{Row, SqlParam};

/// A relational database that runs parameterized statements.
///
/// Implementations bind `params` positionally to the `?` placeholders of
/// `sql` and never splice them into the statement text. Any resources used
/// for the statement are released before the call returns, whether it
/// succeeded or not.
#[async_trait]
pub trait Database: Send + Sync {
    /// Name used in logs ("University", "Sales").
    fn name(&self) -> &str;

    /// Run a statement and return every row.
    async fn fetch_all(&self, sql: &str, params: &[SqlParam]) -> crate::error::Result<Vec<Row>>;
}
