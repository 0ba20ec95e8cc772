//! Types for the natural language query system.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Message returned when no intent rule matches a question.
pub const NOT_UNDERSTOOD_MESSAGE: &str = "I could not understand the question.";

// ============================================================================
// Intent
// ============================================================================

/// Question categories, each owning one query template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Total sales per student department (cross-database)
    DepartmentSales,
    /// Every student with their summed purchases (cross-database)
    StudentSales,
    /// Transactions carrying the table-wide maximum amount
    TopTransactions,
    /// Students filtered by department and year
    StudentListing,
    /// Distinct product names
    ProductList,
    /// All transactions ordered by amount, smallest first
    ProductSalesAscending,
    /// Latest transactions, optionally for one product
    TransactionListing,
}

impl Intent {
    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::DepartmentSales => "Department Sales",
            Self::StudentSales => "Student Sales",
            Self::TopTransactions => "Top Transactions",
            Self::StudentListing => "Student Listing",
            Self::ProductList => "Product List",
            Self::ProductSalesAscending => "Product Sales Ascending",
            Self::TransactionListing => "Transaction Listing",
        }
    }

    /// Whether the template joins both databases.
    pub fn is_cross_database(&self) -> bool {
        matches!(self, Self::DepartmentSales | Self::StudentSales)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Database Target
// ============================================================================

/// Which database connection runs a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DbTarget {
    University,
    Sales,
}

impl fmt::Display for DbTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::University => f.write_str("University"),
            Self::Sales => f.write_str("Sales"),
        }
    }
}

// ============================================================================
// Parameters and Plans
// ============================================================================

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlParam {
    Text(String),
    Integer(i64),
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u32> for SqlParam {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl fmt::Display for SqlParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{s}'"),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

/// A selected template together with its bound parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPlan {
    pub intent: Intent,
    pub target: DbTarget,
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryPlan {
    /// Plan for a template without parameters.
    pub fn fixed(intent: Intent, target: DbTarget, sql: &str) -> Self {
        Self {
            intent,
            target,
            sql: sql.to_string(),
            params: Vec::new(),
        }
    }

    /// Number of `?` placeholders in the SQL text.
    pub fn placeholder_count(&self) -> usize {
        placeholder_count(&self.sql)
    }

    /// Whether the parameter list matches the placeholders one-to-one.
    pub fn is_fully_bound(&self) -> bool {
        self.placeholder_count() == self.params.len()
    }
}

/// Count `?` placeholders, ignoring any inside single-quoted literals.
pub fn placeholder_count(sql: &str) -> usize {
    let mut in_literal = false;
    let mut count = 0;
    for c in sql.chars() {
        match c {
            '\'' => in_literal = !in_literal,
            '?' if !in_literal => count += 1,
            _ => {}
        }
    }
    count
}

// ============================================================================
// Results
// ============================================================================

/// One result row: column name to JSON value, in column order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// What answering a question produced.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The matched template ran and returned these rows.
    Rows(Vec<Row>),
    /// No intent rule matched.
    NotUnderstood,
}

impl QueryOutcome {
    pub fn is_understood(&self) -> bool {
        matches!(self, Self::Rows(_))
    }
}
