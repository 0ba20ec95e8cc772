//! Intent Dispatcher.
//!
//! Maps a question to exactly one query template. Rules are an ordered
//! decision list: the first predicate that matches selects the intent, and
//! rule order is the only tie-break between overlapping phrasings.

use std::sync::LazyLock;

use regex::Regex;

use super::extract::{find_department, find_limit, find_product, find_year};
use super::types::*;

/// Row limit used when a listing question does not name one.
pub const DEFAULT_LIMIT: u32 = 20;

// ============================================================================
// Query Templates
// ============================================================================

const DEPARTMENT_SALES_SQL: &str = "\
SELECT s.department, SUM(t.amount) AS total_sales
FROM University.students s
JOIN Sales.transactions t
    ON s.name = t.customer
GROUP BY s.department
ORDER BY total_sales DESC";

const STUDENT_SALES_SQL: &str = "\
SELECT s.name, s.department, s.year, COALESCE(SUM(t.amount), 0) AS total_sales
FROM University.students s
LEFT JOIN Sales.transactions t
    ON s.name = t.customer
GROUP BY s.name, s.department, s.year
ORDER BY total_sales DESC";

const TOP_TRANSACTIONS_SQL: &str = "\
SELECT t.customer, t.product, t.amount
FROM Sales.transactions t
WHERE t.amount = (SELECT MAX(amount) FROM Sales.transactions)";

const PRODUCT_LIST_SQL: &str = "SELECT DISTINCT product FROM transactions ORDER BY product ASC";

const PRODUCT_SALES_ASC_SQL: &str =
    "SELECT id, customer, product, amount FROM transactions ORDER BY amount ASC";

// ============================================================================
// Rules
// ============================================================================

type Rule = (Intent, fn(&str) -> bool);

/// Dispatch rules in priority order.
static RULES: &[Rule] = &[
    (Intent::DepartmentSales, |q: &str| DEPARTMENT_SALES_PATTERN.is_match(q)),
    (Intent::StudentSales, |q: &str| STUDENT_SALES_PATTERN.is_match(q)),
    (Intent::TopTransactions, |q: &str| TOP_TRANSACTION_PATTERN.is_match(q)),
    (Intent::StudentListing, |q: &str| q.contains("student")),
    (Intent::ProductList, |q: &str| {
        PRODUCT_LIST_PATTERN.is_match(q) || matches!(q, "products" | "product list")
    }),
    (Intent::ProductSalesAscending, |q: &str| PRODUCT_SALES_ASC_PATTERN.is_match(q)),
    (Intent::TransactionListing, |q: &str| {
        q.contains("transaction") || q.contains("sale")
    }),
];

/// Lowercase and trim a question before analysis.
pub fn normalize_question(question: &str) -> String {
    question.to_lowercase().trim().to_string()
}

// ============================================================================
// Intent Dispatcher
// ============================================================================

/// Selects and binds the query template for a question.
#[derive(Debug, Clone)]
pub struct IntentDispatcher {
    default_limit: u32,
}

impl Default for IntentDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentDispatcher {
    /// Create a dispatcher with the standard listing limit.
    pub fn new() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Create a dispatcher with a custom listing limit.
    pub fn with_default_limit(default_limit: u32) -> Self {
        Self { default_limit }
    }

    pub fn default_limit(&self) -> u32 {
        self.default_limit
    }

    /// The first intent whose rule matches, if any.
    pub fn classify(&self, question: &str) -> Option<Intent> {
        let q = normalize_question(question);
        classify_normalized(&q)
    }

    /// Classify the question and bind the chosen template.
    pub fn plan(&self, question: &str) -> Option<QueryPlan> {
        let q = normalize_question(question);
        let intent = classify_normalized(&q)?;
        let plan = self.build_plan(intent, &q);
        tracing::debug!(
            intent = %plan.intent,
            target = %plan.target,
            params = plan.params.len(),
            "Question dispatched"
        );
        Some(plan)
    }

    /// Bind the template for `intent`. Extraction happens only here, after
    /// the intent is known.
    fn build_plan(&self, intent: Intent, q: &str) -> QueryPlan {
        match intent {
            Intent::DepartmentSales => {
                QueryPlan::fixed(intent, DbTarget::University, DEPARTMENT_SALES_SQL)
            }
            Intent::StudentSales => {
                QueryPlan::fixed(intent, DbTarget::University, STUDENT_SALES_SQL)
            }
            Intent::TopTransactions => {
                QueryPlan::fixed(intent, DbTarget::Sales, TOP_TRANSACTIONS_SQL)
            }
            Intent::StudentListing => self.student_listing(q),
            Intent::ProductList => with_optional_limit(intent, PRODUCT_LIST_SQL, q),
            Intent::ProductSalesAscending => {
                with_optional_limit(intent, PRODUCT_SALES_ASC_SQL, q)
            }
            Intent::TransactionListing => self.transaction_listing(q),
        }
    }

    fn student_listing(&self, q: &str) -> QueryPlan {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        if let Some(department) = find_department(q) {
            conditions.push("department = ?");
            params.push(SqlParam::from(department));
        }
        if let Some(year) = find_year(q) {
            conditions.push("year = ?");
            params.push(SqlParam::from(year));
        }

        let limit = find_limit(q).unwrap_or(self.default_limit);
        params.push(SqlParam::from(limit));

        QueryPlan {
            intent: Intent::StudentListing,
            target: DbTarget::University,
            sql: format!(
                "SELECT id, name, department, year FROM students{} ORDER BY id ASC LIMIT ?",
                where_clause(&conditions)
            ),
            params,
        }
    }

    fn transaction_listing(&self, q: &str) -> QueryPlan {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        if let Some(product) = find_product(q) {
            conditions.push("product = ?");
            params.push(SqlParam::from(product));
        }

        let limit = find_limit(q).unwrap_or(self.default_limit);
        params.push(SqlParam::from(limit));

        QueryPlan {
            intent: Intent::TransactionListing,
            target: DbTarget::Sales,
            sql: format!(
                "SELECT id, customer, product, amount FROM transactions{} ORDER BY id DESC LIMIT ?",
                where_clause(&conditions)
            ),
            params,
        }
    }
}

fn classify_normalized(q: &str) -> Option<Intent> {
    RULES
        .iter()
        .find(|(_, matches)| matches(q))
        .map(|(intent, _)| *intent)
}

/// Sales-database template with `LIMIT ?` appended only for an explicit limit.
fn with_optional_limit(intent: Intent, base: &str, q: &str) -> QueryPlan {
    match find_limit(q) {
        Some(limit) => QueryPlan {
            intent,
            target: DbTarget::Sales,
            sql: format!("{base} LIMIT ?"),
            params: vec![SqlParam::from(limit)],
        },
        None => QueryPlan::fixed(intent, DbTarget::Sales, base),
    }
}

fn where_clause(conditions: &[&str]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

// ============================================================================
// Regex Patterns
// ============================================================================

static DEPARTMENT_SALES_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(department\s+sales|sales\s+by\s+department|department-?wise\s+sales|sales\s+per\s+department)\b")
        .expect("Invalid regex")
});
static STUDENT_SALES_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(students?\s+with\s+sales|student\s+sales\s+totals|students?\s+and\s+sales|sales\s+per\s+student)\b")
        .expect("Invalid regex")
});
static TOP_TRANSACTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(highest|max|top)\s+(transaction|sale)s?\b").expect("Invalid regex")
});
static PRODUCT_LIST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(all\s+products|products?\s+(available|list|names?)|list\s+products?)\b")
        .expect("Invalid regex")
});
static PRODUCT_SALES_ASC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(product\s+sales?\s+(asc|ascending)|sales?\s+by\s+product\s+(asc|ascending)|ascending\s+product\s+sales?)\b")
        .expect("Invalid regex")
});

// ============================================================================
// Tests
// ============================================================================
