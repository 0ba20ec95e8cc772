//! Error types for askql.

use thiserror::Error;

/// Main error type for askql operations.
#[derive(Error, Debug)]
pub enum AskqlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Database-related errors (connection, execution, row decoding).
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection to {database} failed: {source}")]
    Connection {
        database: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Cannot decode column `{column}` of type {type_name}: {message}")]
    Decode {
        column: String,
        type_name: String,
        message: String,
    },
}

/// Question handling errors.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Question is required.")]
    EmptyQuestion,

    #[error("Template expects {expected} parameters but {got} were bound")]
    ParameterMismatch { expected: usize, got: usize },
}

impl AskqlError {
    /// The underlying fault message, without the category prefix.
    ///
    /// Server-side MySQL errors come out as `1146 (42S02): Table ... doesn't exist`.
    pub fn fault_message(&self) -> String {
        match self {
            AskqlError::Database(DatabaseError::Sqlx(sqlx::Error::Database(db))) => db.to_string(),
            AskqlError::Database(e) => e.to_string(),
            AskqlError::Config(e) => e.to_string(),
            AskqlError::Query(e) => e.to_string(),
            AskqlError::Io(e) => e.to_string(),
            AskqlError::Serialization(e) => e.to_string(),
        }
    }
}

/// Result type alias for askql operations.
pub type Result<T> = std::result::Result<T, AskqlError>;
