//! HTTP surface — maps the student routes onto the query/mutation services.
//!
//! ## Routes
//!
//! - `GET /health` — liveness check, unauthenticated.
//! - `GET /student/?page=&per_page=&level=` — paginated listing.
//! - `GET /student/id/{student_id}` — single student by opaque id.
//! - `GET /student/matric/{matric_no}` — single student by matric number.
//! - `POST /student/` — create.
//! - `PATCH /student/{student_id}` — partial update.
//!
//! Every student route sits behind the bearer-token middleware, and every
//! outcome is wrapped in the `{status, message, success, data}` envelope.

use crate::auth;
use crate::errors::ApiError;
use crate::model::{CreateStudent, UpdateStudent};
use crate::response::Envelope;
use crate::service::{StudentMutationService, StudentQueryService};
use crate::types::DocumentId;
use axum::extract::{Path, Query, State};
use axum::routing::{get, patch};
use axum::{middleware, Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub query: StudentQueryService,
    pub mutation: StudentMutationService,
    pub api_tokens: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(
        query: StudentQueryService,
        mutation: StudentMutationService,
        api_tokens: Vec<String>,
    ) -> Self {
        Self { query, mutation, api_tokens: Arc::new(api_tokens) }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let student_routes = Router::new()
        .route("/student/", get(get_all_students).post(create_student))
        .route("/student/id/{student_id}", get(get_student_by_id))
        .route("/student/matric/{matric_no}", get(get_student_by_matric_no))
        .route("/student/{student_id}", patch(update_student))
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer));

    Router::new()
        .route("/health", get(health))
        .merge(student_routes)
        .with_state(state)
}

/// Serve the API at the given address (e.g. `"127.0.0.1:8000"`).
pub async fn serve(state: AppState, addr: &str) -> Result<(), std::io::Error> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

#[derive(Debug, Deserialize)]
struct ListStudentsParams {
    page: u64,
    per_page: u64,
    level: Option<i32>,
}

async fn get_all_students(
    State(state): State<AppState>,
    Query(params): Query<ListStudentsParams>,
) -> Result<Envelope, ApiError> {
    let page = state
        .query
        .list_students(params.page, params.per_page, params.level)
        .await?;
    Ok(Envelope::ok("get students successfully", serde_json::to_value(page)?))
}

async fn get_student_by_id(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Envelope, ApiError> {
    let id = parse_student_id(&student_id)?;
    let student = state.query.get_student_by_id(&id).await?;
    Ok(Envelope::ok("get student successfully", json!({ "student": student })))
}

async fn get_student_by_matric_no(
    State(state): State<AppState>,
    Path(matric_no): Path<i64>,
) -> Result<Envelope, ApiError> {
    let student = state.query.get_student_by_matric_no(matric_no).await?;
    Ok(Envelope::ok("get student successfully", json!({ "student": student })))
}

async fn create_student(
    State(state): State<AppState>,
    Json(input): Json<CreateStudent>,
) -> Result<Envelope, ApiError> {
    let student = state.mutation.create_student(input).await?;
    Ok(Envelope::ok("created student successfully", json!({ "student": student })))
}

async fn update_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Json(patch): Json<UpdateStudent>,
) -> Result<Envelope, ApiError> {
    let id = parse_student_id(&student_id)?;
    let student = state.mutation.update_student(&id, patch).await?;
    Ok(Envelope::ok("updated student successfully", json!({ "student": student })))
}

fn parse_student_id(raw: &str) -> Result<DocumentId, ApiError> {
    raw.parse::<DocumentId>()
        .map_err(|_| ApiError::BadRequest("invalid student id".into()))
}
