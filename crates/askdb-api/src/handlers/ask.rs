//! Handler for `GET /ask` — the question-to-SQL-to-rows pipeline.
//!
//! Flow per request: read the live schema, ask the model for a SQL
//! statement, execute it read-only, and return the envelope. Failures
//! attributable to the generated query map to 400; schema-read and
//! translation failures map to 500. The error body is always
//! `{"detail": "..."}`.

use crate::models::{AskResponse, ErrorResponse};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use askdb_core::{read_schema, run_query, AskDbError};
use log::{debug, error, info};
use serde::Deserialize;
use std::time::Instant;

#[derive(Debug, Deserialize)]
pub struct AskQuery {
    /// Natural-language question about the sales data.
    pub question: String,
}

pub async fn ask(query: web::Query<AskQuery>, state: web::Data<AppState>) -> impl Responder {
    let start = Instant::now();
    let question = query.question.clone();

    if question.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Question cannot be empty"));
    }
    debug!("Received question: {}", question);

    // Schema read and SQL execution are blocking SQLite calls; run them on
    // the blocking pool so worker threads stay free for other requests.
    let db_path = state.db_path.clone();
    let schema = match web::block(move || read_schema(&db_path)).await {
        Ok(Ok(schema)) => schema,
        Ok(Err(e)) => return pipeline_error(&e),
        Err(e) => return blocking_error(&e),
    };

    let sql = match state.translator.translate(&question, &schema).await {
        Ok(sql) => sql,
        Err(e) => return pipeline_error(&e),
    };

    let db_path = state.db_path.clone();
    let exec_sql = sql.clone();
    let answer = match web::block(move || run_query(&db_path, &exec_sql)).await {
        Ok(Ok(rows)) => rows,
        Ok(Err(e)) => return pipeline_error(&e),
        Err(e) => return blocking_error(&e),
    };

    info!(
        "Question answered: {} row(s), took {:?}",
        answer.len(),
        start.elapsed()
    );
    HttpResponse::Ok().json(AskResponse {
        question,
        generated_sql_query: sql,
        answer,
    })
}

fn pipeline_error(err: &AskDbError) -> HttpResponse {
    if err.is_query_fault() {
        error!("Query execution failed: {}", err);
        HttpResponse::BadRequest().json(ErrorResponse::new(format!("Database error: {}", err)))
    } else {
        error!("Request failed: {}", err);
        HttpResponse::InternalServerError()
            .json(ErrorResponse::new(format!("Unexpected error: {}", err)))
    }
}

fn blocking_error(err: &actix_web::error::BlockingError) -> HttpResponse {
    error!("Blocking task failed: {}", err);
    HttpResponse::InternalServerError()
        .json(ErrorResponse::new(format!("Unexpected error: {}", err)))
}
