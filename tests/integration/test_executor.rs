//! Question-to-rows tests through the executor.

use std::sync::Arc;

use askql::error::{AskqlError, QueryError};
use askql::{
    Database, DbTarget, Intent, IntentDispatcher, MemoryDatabase, QueryExecutor, QueryOutcome,
    QueryPlan, Row, SqlParam,
};
use serde_json::json;

fn rows(value: serde_json::Value) -> Vec<Row> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
}

struct Fixture {
    university: Arc<MemoryDatabase>,
    sales: Arc<MemoryDatabase>,
    executor: QueryExecutor,
}

fn fixture() -> Fixture {
    let university = Arc::new(MemoryDatabase::new(
        "University",
        rows(json!([{"id": 1, "name": "Asha", "department": "CSE", "year": 2}])),
    ));
    let sales = Arc::new(MemoryDatabase::new(
        "Sales",
        rows(json!([{"id": 9, "customer": "Asha", "product": "Laptop", "amount": 899.5}])),
    ));
    let executor = QueryExecutor::new(
        university.clone() as Arc<dyn Database>,
        sales.clone() as Arc<dyn Database>,
    );
    Fixture {
        university,
        sales,
        executor,
    }
}

#[tokio::test]
async fn test_student_question_hits_university() {
    let f = fixture();

    let outcome = f.executor.ask("Top 5 students in CSE 2nd year").await.unwrap();

    let QueryOutcome::Rows(data) = outcome else {
        panic!("expected rows");
    };
    assert_eq!(data[0]["name"], json!("Asha"));
    assert!(f.sales.executed().is_empty());

    let executed = f.university.executed();
    assert_eq!(executed.len(), 1);
    assert_eq!(
        executed[0].params,
        vec![
            SqlParam::Text("CSE".to_string()),
            SqlParam::Integer(2),
            SqlParam::Integer(5)
        ]
    );
}

#[tokio::test]
async fn test_transaction_question_hits_sales() {
    let f = fixture();

    let outcome = f.executor.ask("show laptop transactions").await.unwrap();

    assert!(outcome.is_understood());
    assert!(f.university.executed().is_empty());
    let executed = f.sales.executed();
    assert!(executed[0].sql.contains("product = ?"));
    assert_eq!(
        executed[0].params,
        vec![SqlParam::Text("Laptop".to_string()), SqlParam::Integer(20)]
    );
}

#[tokio::test]
async fn test_cross_database_questions_run_on_university() {
    let f = fixture();

    f.executor.ask("sales by department").await.unwrap();
    f.executor.ask("students with sales").await.unwrap();

    let executed = f.university.executed();
    assert_eq!(executed.len(), 2);
    assert!(executed.iter().all(|s| s.sql.contains("Sales.transactions")));
    assert!(executed.iter().all(|s| s.params.is_empty()));
}

#[tokio::test]
async fn test_configured_default_limit() {
    let f = fixture();
    let executor = QueryExecutor::new(f.university.clone(), f.sales.clone())
        .with_dispatcher(IntentDispatcher::with_default_limit(3));

    executor.ask("list students").await.unwrap();

    assert_eq!(f.university.executed()[0].params, vec![SqlParam::Integer(3)]);
}

#[tokio::test]
async fn test_unmatched_question_runs_nothing() {
    let f = fixture();

    let outcome = f.executor.ask("what is the weather").await.unwrap();

    assert_eq!(outcome, QueryOutcome::NotUnderstood);
    assert!(f.university.executed().is_empty());
    assert!(f.sales.executed().is_empty());
}

#[tokio::test]
async fn test_blank_question_is_rejected() {
    let f = fixture();

    let err = f.executor.ask(" \t ").await.unwrap_err();
    assert!(matches!(err, AskqlError::Query(QueryError::EmptyQuestion)));
}

#[tokio::test]
async fn test_unbound_plan_is_refused() {
    let f = fixture();
    let plan = QueryPlan {
        intent: Intent::StudentListing,
        target: DbTarget::University,
        sql: "SELECT * FROM students WHERE department = ? LIMIT ?".to_string(),
        params: vec![SqlParam::from("CSE")],
    };

    let err = f.executor.execute(&plan).await.unwrap_err();
    assert!(matches!(
        err,
        AskqlError::Query(QueryError::ParameterMismatch { expected: 2, got: 1 })
    ));
    assert!(f.university.executed().is_empty());
}

#[tokio::test]
async fn test_database_failure_propagates() {
    let executor = QueryExecutor::new(
        Arc::new(MemoryDatabase::new("University", Vec::new())),
        Arc::new(MemoryDatabase::failing("Sales", "Table 'Sales.transactions' doesn't exist")),
    );

    let err = executor.ask("all products").await.unwrap_err();
    assert!(matches!(err, AskqlError::Database(_)));
    assert!(err.to_string().contains("doesn't exist"));
}
