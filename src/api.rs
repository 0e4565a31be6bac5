use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::{
        header::{self, HeaderValue},
        Method, StatusCode,
    },
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

use crate::{
    errors::{ApiError, ErrorContext, ErrorResponse},
    models::*,
    trivia_service::TriviaService,
};

// Import logging macros
use crate::{api_error, log_api_start, log_api_success, log_api_warn};

const ALLOWED_HEADERS: &str = "Content-Type, Authorization";
const ALLOWED_METHODS: &str = "GET, POST, PATCH, DELETE, OPTIONS";

#[derive(Clone)]
pub struct AppState {
    pub trivia_service: TriviaService,
}

pub type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

// Category endpoints
pub async fn get_categories(State(state): State<AppState>) -> ApiResult<Json<CategoriesResponse>> {
    log_api_start!("get_categories");

    let categories = state
        .trivia_service
        .list_categories()
        .await
        .map_err(|e| e.to_response_with_context(ErrorContext::new("get_categories", "category")))?;

    log_api_success!("get_categories", count = categories.len(), "categories listed");
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

pub async fn get_questions_by_category(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<QuestionList>> {
    let Ok(Path(category_id)) = path else {
        return Err(api_error!(not_found, "get_questions_by_category", "category", "<invalid>"));
    };
    log_api_start!("get_questions_by_category", category_id = category_id);

    let list = state
        .trivia_service
        .questions_in_category(category_id)
        .await
        .map_err(|e| {
            e.to_response_with_context(
                ErrorContext::new("get_questions_by_category", "category").with_id(category_id),
            )
        })?;

    log_api_success!("get_questions_by_category", count = list.total_questions, "questions listed");
    Ok(Json(list))
}

// Question endpoints
pub async fn get_questions(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<QuestionPage>> {
    let page = params.page();
    log_api_start!("get_questions", page = page);

    let questions = state
        .trivia_service
        .list_questions(page)
        .await
        .map_err(|e| e.to_response_with_context(ErrorContext::new("get_questions", "question")))?;

    log_api_success!("get_questions", count = questions.questions.len(), "question page served");
    Ok(Json(questions))
}

pub async fn delete_question(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DeletedResponse>> {
    let Ok(Path(id)) = path else {
        return Err(api_error!(not_found, "delete_question", "question", "<invalid>"));
    };
    log_api_start!("delete_question", question_id = id);

    let deleted = state
        .trivia_service
        .delete_question(id)
        .await
        .map_err(|e| e.to_response_with_context(ErrorContext::new("delete_question", "question").with_id(id)))?;

    log_api_success!("delete_question", question_id = deleted, "question deleted");
    Ok(Json(DeletedResponse {
        success: true,
        deleted,
    }))
}

/// `POST /questions` either searches or creates, depending on the body.
pub async fn submit_question(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let Ok(Json(body)) = body else {
        return Err(api_error!(bad_request, "submit_question", "question", "missing or malformed JSON body"));
    };
    let Some(fields) = body.as_object() else {
        return Err(api_error!(bad_request, "submit_question", "question", "body must be a JSON object"));
    };

    let submission = QuestionSubmission::from_json(fields)
        .map_err(|message| api_error!(validation, "create_question", "question", message))?;

    match submission {
        QuestionSubmission::Search(term) => {
            log_api_start!("search_questions");
            let results = state
                .trivia_service
                .search_questions(&term)
                .await
                .map_err(|e| e.to_response_with_context(ErrorContext::new("search_questions", "question")))?;

            if results.questions.is_empty() {
                log_api_warn!("search_questions", "no questions matched");
            }
            log_api_success!("search_questions", count = results.total_questions, "search completed");
            Ok(Json(results).into_response())
        }
        QuestionSubmission::Create(question) => {
            log_api_start!("create_question");
            let id = state
                .trivia_service
                .create_question(question)
                .await
                .map_err(|e| e.to_response_with_context(ErrorContext::new("create_question", "question")))?;

            log_api_success!("create_question", question_id = id, "question created");
            Ok(Json(CreatedResponse { success: true }).into_response())
        }
    }
}

// Quiz endpoint
pub async fn play_quiz(
    State(state): State<AppState>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResult<Json<QuizResponse>> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return Err(api_error!(bad_request, "play_quiz", "quiz", rejection.body_text()));
        }
    };
    log_api_start!("play_quiz");

    let question = state
        .trivia_service
        .next_quiz_question(&request)
        .await
        .map_err(|e| e.to_response_with_context(ErrorContext::new("play_quiz", "quiz")))?;

    log_api_success!("play_quiz", question_id = question.id, "quiz question selected");
    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

async fn route_not_found() -> (StatusCode, Json<ErrorResponse>) {
    ApiError::NotFound("no route matches the request".to_string())
        .to_response_with_context(ErrorContext::new("route", "endpoint"))
}

/// Give the router's bare 405 responses the JSON error body.
async fn method_not_allowed_body(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut rewritten = ApiError::MethodNotAllowed
        .to_response_with_context(ErrorContext::new("route", "endpoint"))
        .into_response();
    if let Some(allow) = allow {
        rewritten.headers_mut().insert(header::ALLOW, allow);
    }
    rewritten
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Category routes
        .route("/categories", get(get_categories))
        .route("/categories/:id/questions", get(get_questions_by_category))

        // Question routes
        .route("/questions", get(get_questions).post(submit_question))
        .route("/questions/:id", delete(delete_question))

        // Quiz routes
        .route("/quizzes", post(play_quiz))

        .fallback(route_not_found)
        .layer(middleware::map_response(method_not_allowed_body))
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static(ALLOWED_HEADERS),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static(ALLOWED_METHODS),
                ))
                .layer(cors_layer()),
        )
        .with_state(state)
}
