//! askql: natural-language questions over the University and Sales databases.
//!
//! A question is matched against an ordered list of intent patterns, the
//! winning intent's SQL template is bound with the entities extracted from
//! the question, and the resulting rows are returned as JSON.

pub mod api;
pub mod config;
pub mod error;
pub mod query;
pub mod storage;
pub mod web;

pub use api::{create_rest_router, serve, ApiState};
pub use config::Config;
pub use error::{AskqlError, Result};
pub use query::{
    find_department, find_limit, find_product, find_year, DbTarget, Intent, IntentDispatcher,
    QueryExecutor, QueryOutcome, QueryPlan, Row, SqlParam,
};
pub use storage::{connect_databases, Database, Databases, MemoryDatabase, MySqlDatabase};
pub use web::create_web_ui_router;
