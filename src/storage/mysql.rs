//! MySQL backend over a `sqlx` connection pool.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

use crate::config::DatabaseConfig;
use crate::error::{DatabaseError, Result};
use crate::query::{Row, SqlParam};

use super::traits::Database;

/// A MySQL database reached through a connection pool.
#[derive(Clone)]
pub struct MySqlDatabase {
    name: String,
    pool: MySqlPool,
}

impl MySqlDatabase {
    /// Connect using the given settings. Fails if the server is unreachable.
    pub async fn connect(name: impl Into<String>, config: &DatabaseConfig) -> Result<Self> {
        let name = name.into();
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|source| DatabaseError::Connection {
                database: name.clone(),
                source,
            })?;

        tracing::info!(
            database = %name,
            max_connections = config.max_connections,
            "Connected to database"
        );
        Ok(Self { name, pool })
    }
}

#[async_trait]
impl Database for MySqlDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_all(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Row>> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                SqlParam::Text(s) => query.bind(s.as_str()),
                SqlParam::Integer(n) => query.bind(*n),
            };
        }

        // The connection goes back to the pool when `conn` drops, including
        // on the error paths below.
        let mut conn = self.pool.acquire().await.map_err(DatabaseError::from)?;
        let rows = query
            .fetch_all(&mut *conn)
            .await
            .map_err(DatabaseError::from)?;

        rows.iter().map(decode_row).collect()
    }
}

// ============================================================================
// Row Decoding
// ============================================================================

fn decode_row(row: &MySqlRow) -> Result<Row> {
    let mut out = Row::with_capacity(row.columns().len());
    for column in row.columns() {
        let type_name = column.type_info().name();
        let value = decode_column(row, column.ordinal(), type_name).map_err(|e| {
            DatabaseError::Decode {
                column: column.name().to_string(),
                type_name: type_name.to_string(),
                message: e.to_string(),
            }
        })?;
        out.insert(column.name().to_string(), value);
    }
    Ok(out)
}

fn decode_column(
    row: &MySqlRow,
    index: usize,
    type_name: &str,
) -> std::result::Result<Value, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match type_name {
        "BOOLEAN" => Value::Bool(row.try_get::<bool, _>(index)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            Value::from(row.try_get::<i64, _>(index)?)
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => Value::from(row.try_get::<u64, _>(index)?),
        "FLOAT" => Value::from(f64::from(row.try_get::<f32, _>(index)?)),
        "DOUBLE" => Value::from(row.try_get::<f64, _>(index)?),
        // Sent as text by the server in both protocols; kept exact.
        "DECIMAL" => decimal_value(row.try_get_unchecked::<String, _>(index)?),
        "DATE" => Value::String(row.try_get::<NaiveDate, _>(index)?.to_string()),
        "TIME" => Value::String(row.try_get::<NaiveTime, _>(index)?.to_string()),
        "DATETIME" => Value::String(
            row.try_get::<NaiveDateTime, _>(index)?
                .format("%Y-%m-%dT%H:%M:%S%.f")
                .to_string(),
        ),
        "TIMESTAMP" => Value::String(row.try_get::<DateTime<Utc>, _>(index)?.to_rfc3339()),
        "JSON" => {
            let text = row.try_get_unchecked::<String, _>(index)?;
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        }
        _ => match row.try_get::<String, _>(index) {
            Ok(text) => Value::String(text),
            Err(_) => {
                let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            }
        },
    };

    Ok(value)
}

/// DECIMAL as its exact text, e.g. `"1250.50"`. An f64 would round large sums.
fn decimal_value(text: String) -> Value {
    Value::String(text)
}
