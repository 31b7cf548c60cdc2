//! End-to-end tests for the /ask pipeline over the full route configuration.
//!
//! The generative model is stubbed at the `TextGenerator` seam so tests are
//! deterministic; everything else (routing, schema read, execution, response
//! envelope) runs exactly as in production.

use actix_web::{test, web, App};
use askdb_api::AppState;
use askdb_core::{AskDbError, QueryTranslator, Result, TextGenerator};
use async_trait::async_trait;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

struct FixedGenerator(String);

#[async_trait]
impl TextGenerator for FixedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(AskDbError::Translation("model service unreachable".to_string()))
    }
}

/// Pre-populated e-commerce fixture matching the production schema shape.
fn ecommerce_db(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("ecommerce.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE total_sales (date TEXT, item_id INTEGER, total_sales REAL, total_units_ordered INTEGER);
         CREATE TABLE ad_sales (date TEXT, item_id INTEGER, ad_sales REAL, ad_spend REAL, clicks INTEGER, units_sold INTEGER);
         CREATE TABLE eligibility (item_id INTEGER, eligibility TEXT, message TEXT);
         INSERT INTO total_sales VALUES ('2024-06-01', 1, 120.5, 3);
         INSERT INTO total_sales VALUES ('2024-06-02', 2, 99.5, 2);
         INSERT INTO ad_sales VALUES ('2024-06-01', 1, 80.0, 20.0, 15, 2);
         INSERT INTO eligibility VALUES (1, 'TRUE', NULL);
         INSERT INTO eligibility VALUES (2, 'FALSE', 'listing suppressed');",
    )
    .unwrap();
    path
}

fn state_with(db_path: PathBuf, generator: Arc<dyn TextGenerator>) -> web::Data<AppState> {
    web::Data::new(AppState::new(QueryTranslator::new(generator), db_path))
}

#[actix_web::test]
async fn total_sales_question_returns_single_aggregate_record() {
    let dir = TempDir::new().unwrap();
    let state = state_with(
        ecommerce_db(&dir),
        Arc::new(FixedGenerator(
            "```sql\nSELECT SUM(total_sales) AS total_sales FROM total_sales\n```".to_string(),
        )),
    );
    let app = test::init_service(
        App::new().app_data(state).configure(askdb_server::routes::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/ask?question=What%20is%20my%20total%20sales%3F")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["question"], "What is my total sales?");
    assert_eq!(
        body["generated_sql_query"],
        "SELECT SUM(total_sales) AS total_sales FROM total_sales"
    );

    let answer = body["answer"].as_array().unwrap();
    assert_eq!(answer.len(), 1);
    assert_eq!(answer[0].as_object().unwrap().len(), 1);
    assert_eq!(answer[0]["total_sales"], 220.0);
}

#[actix_web::test]
async fn question_is_echoed_verbatim() {
    let dir = TempDir::new().unwrap();
    let state = state_with(
        ecommerce_db(&dir),
        Arc::new(FixedGenerator("SELECT COUNT(*) AS n FROM eligibility".to_string())),
    );
    let app = test::init_service(
        App::new().app_data(state).configure(askdb_server::routes::configure),
    )
    .await;

    let question = "What is the total number of ineligible products?";
    let req = test::TestRequest::get()
        .uri("/ask?question=What%20is%20the%20total%20number%20of%20ineligible%20products%3F")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["question"], question);
}

#[actix_web::test]
async fn keyed_records_preserve_column_order() {
    let dir = TempDir::new().unwrap();
    let state = state_with(
        ecommerce_db(&dir),
        Arc::new(FixedGenerator(
            "SELECT item_id, ad_spend, clicks FROM ad_sales".to_string(),
        )),
    );
    let app = test::init_service(
        App::new().app_data(state).configure(askdb_server::routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/ask?question=ad%20spend").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let record = body["answer"][0].as_object().unwrap();
    let keys: Vec<_> = record.keys().cloned().collect();
    assert_eq!(keys, vec!["item_id", "ad_spend", "clicks"]);
}

#[actix_web::test]
async fn nonexistent_column_yields_400_naming_the_identifier() {
    let dir = TempDir::new().unwrap();
    let state = state_with(
        ecommerce_db(&dir),
        Arc::new(FixedGenerator("SELECT conversion_rate FROM ad_sales".to_string())),
    );
    let app = test::init_service(
        App::new().app_data(state).configure(askdb_server::routes::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/ask?question=conversion%20rate%3F")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Database error:"), "got: {}", detail);
    assert!(detail.contains("conversion_rate"), "got: {}", detail);
}

#[actix_web::test]
async fn translator_outage_yields_500() {
    let dir = TempDir::new().unwrap();
    let state = state_with(ecommerce_db(&dir), Arc::new(FailingGenerator));
    let app = test::init_service(
        App::new().app_data(state).configure(askdb_server::routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/ask?question=anything").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().starts_with("Unexpected error:"));
}

#[actix_web::test]
async fn missing_database_yields_500_not_a_panic() {
    let dir = TempDir::new().unwrap();
    let state = state_with(
        dir.path().join("missing.db"),
        Arc::new(FixedGenerator("SELECT 1".to_string())),
    );
    let app = test::init_service(
        App::new().app_data(state).configure(askdb_server::routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/ask?question=anything").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
}

#[actix_web::test]
async fn generated_mutation_is_refused_with_400() {
    let dir = TempDir::new().unwrap();
    let db_path = ecommerce_db(&dir);
    let state = state_with(
        db_path.clone(),
        Arc::new(FixedGenerator("DELETE FROM total_sales".to_string())),
    );
    let app = test::init_service(
        App::new().app_data(state).configure(askdb_server::routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/ask?question=clear%20it").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // The store is untouched
    let conn = Connection::open(&db_path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM total_sales", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 2);
}
