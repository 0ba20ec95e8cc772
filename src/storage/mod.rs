//! Database access.
//!
//! This module provides:
//! - `Database`: the capability the query executor runs plans against
//! - `MySqlDatabase`: pooled MySQL connections via `sqlx`
//! - `MemoryDatabase`: canned results for tests

mod memory;
mod mysql;
mod traits;

pub use memory::{MemoryDatabase, RecordedStatement};
pub use mysql::MySqlDatabase;
pub use traits::*;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;

/// The two databases questions are answered from.
#[derive(Clone)]
pub struct Databases {
    pub university: Arc<dyn Database>,
    pub sales: Arc<dyn Database>,
}

/// Connect to both configured databases.
pub async fn connect_databases(config: &Config) -> Result<Databases> {
    let (university, sales) = tokio::try_join!(
        MySqlDatabase::connect("University", &config.university),
        MySqlDatabase::connect("Sales", &config.sales),
    )?;

    Ok(Databases {
        university: Arc::new(university),
        sales: Arc::new(sales),
    })
}
