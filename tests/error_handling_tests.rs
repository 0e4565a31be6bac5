use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use trivia_api::{
    api::*, ApiError, Category, Database, NewQuestion, Question, QuizScope, TriviaRepository, TriviaService,
};

/// Repository whose every call fails like a dropped database connection.
struct UnavailableRepository;

#[async_trait]
impl TriviaRepository for UnavailableRepository {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        Err(anyhow!("connection refused"))
    }

    async fn get_category(&self, _id: i64) -> Result<Option<Category>> {
        Err(anyhow!("connection refused"))
    }

    async fn list_questions(&self) -> Result<Vec<Question>> {
        Err(anyhow!("connection refused"))
    }

    async fn get_question(&self, _id: i64) -> Result<Option<Question>> {
        Err(anyhow!("connection refused"))
    }

    async fn insert_question(&self, _question: NewQuestion) -> Result<i64> {
        Err(anyhow!("connection refused"))
    }

    async fn delete_question(&self, _id: i64) -> Result<bool> {
        Err(anyhow!("connection refused"))
    }

    async fn search_questions(&self, _term: &str) -> Result<Vec<Question>> {
        Err(anyhow!("connection refused"))
    }

    async fn questions_in_category(&self, _category_id: i64) -> Result<Vec<Question>> {
        Err(anyhow!("connection refused"))
    }

    async fn question_ids(&self, _scope: QuizScope) -> Result<Vec<i64>> {
        Err(anyhow!("connection refused"))
    }
}

fn failing_server() -> TestServer {
    let state = AppState {
        trivia_service: TriviaService::new(Arc::new(UnavailableRepository)),
    };
    TestServer::new(create_router(state)).unwrap()
}

fn assert_unprocessable(body: &Value) {
    assert_eq!(
        body,
        &json!({"success": false, "error": 422, "message": "unprocessable"})
    );
}

#[tokio::test]
async fn test_database_connection_failure() {
    let result = Database::new("invalid://url").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_create_reports_persistence_failure_as_unprocessable() {
    let server = failing_server();

    let response = server
        .post("/questions")
        .json(&json!({"question": "Q", "answer": "A", "category": "1", "difficulty": 1}))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    // The internal cause never reaches the client
    assert_unprocessable(&response.json());
}

#[tokio::test]
async fn test_search_reports_persistence_failure_as_unprocessable() {
    let server = failing_server();

    let response = server.post("/questions").json(&json!({"searchTerm": "who"})).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_unprocessable(&response.json());
}

#[tokio::test]
async fn test_delete_reports_persistence_failure_as_unprocessable() {
    let server = failing_server();

    let response = server.delete("/questions/1").await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_unprocessable(&response.json());
}

#[tokio::test]
async fn test_reads_report_persistence_failure_as_unprocessable() {
    let server = failing_server();

    for path in ["/categories", "/questions", "/categories/1/questions"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_unprocessable(&response.json());
    }

    let response = server
        .post("/quizzes")
        .json(&json!({"previous_questions": [], "quiz_category": {"type": "click", "id": 0}}))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_bad_requests_are_rejected_before_the_repository() {
    let server = failing_server();

    let response = server.post("/questions").text("not json").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.post("/questions").json(&json!("searchTerm")).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_service_error_kinds() {
    let service = TriviaService::new(Arc::new(UnavailableRepository));

    assert!(matches!(service.list_categories().await, Err(ApiError::DatabaseError(_))));
    assert!(matches!(service.delete_question(1).await, Err(ApiError::DatabaseError(_))));
    assert!(matches!(
        service.create_question(NewQuestion::default()).await,
        Err(ApiError::DatabaseError(_))
    ));
}
