//! HTTP routes.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/health` | [`health`] |
//! | `GET` | `/api/v1/employee` | [`list_all`] |
//! | `POST` | `/api/v1/employee` | [`create`] |
//! | `GET` | `/api/v1/employee/search/:search_string` | [`search_by_name`] |
//! | `GET` | `/api/v1/employee/highestSalary` | [`highest_salary`] |
//! | `GET` | `/api/v1/employee/topTenHighestEarningEmployeeNames` | [`top_earning_names`] |
//! | `GET` | `/api/v1/employee/:id` | [`get_by_id`] |
//! | `DELETE` | `/api/v1/employee/:id` | [`delete_by_id`] |

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use roster_core::{Employee, EmployeeCreateRequest, DEFAULT_TOP_EARNERS};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::ApiError;
use crate::response::ApiSuccess;
use crate::state::AppState;

type ApiResult<T> = Result<ApiSuccess<T>, ApiError>;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/employee", get(list_all).post(create))
        .route("/api/v1/employee/search/:search_string", get(search_by_name))
        .route("/api/v1/employee/highestSalary", get(highest_salary))
        .route(
            "/api/v1/employee/topTenHighestEarningEmployeeNames",
            get(top_earning_names),
        )
        .route("/api/v1/employee/:id", get(get_by_id).delete(delete_by_id))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

pub async fn health() -> ApiSuccess<&'static str> {
    ApiSuccess("ok")
}

pub async fn list_all(State(state): State<AppState>) -> ApiResult<Vec<Employee>> {
    Ok(ApiSuccess(state.directory.list_all().await?))
}

pub async fn search_by_name(
    State(state): State<AppState>,
    Path(search_string): Path<String>,
) -> ApiResult<Vec<Employee>> {
    Ok(ApiSuccess(state.directory.search_by_name(&search_string).await?))
}

pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Employee> {
    require_uuid(&id)?;
    Ok(ApiSuccess(state.directory.get_by_id(&id).await?))
}

pub async fn highest_salary(State(state): State<AppState>) -> ApiResult<u64> {
    Ok(ApiSuccess(state.directory.highest_salary().await?))
}

pub async fn top_earning_names(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    Ok(ApiSuccess(
        state.directory.top_earning_names(DEFAULT_TOP_EARNERS).await?,
    ))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeCreateRequest>, JsonRejection>,
) -> ApiResult<Employee> {
    let Json(request) = payload.map_err(|rejection| ApiError::invalid_input(rejection.body_text()))?;
    Ok(ApiSuccess(state.directory.create(&request).await?))
}

pub async fn delete_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<String> {
    require_uuid(&id)?;
    Ok(ApiSuccess(state.directory.delete_by_id(&id).await?))
}

fn require_uuid(id: &str) -> Result<(), ApiError> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| ApiError::invalid_input(format!("id '{id}' is not a valid UUID")))
}
