use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};

use crate::DashboardError;
use crate::dashboard::{DashboardHandle, DashboardState, TemperatureTrend};

#[derive(Debug, Serialize, Deserialize)]
pub struct CityRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AcceptedCity {
    pub city: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn error_response(err: &DashboardError) -> (StatusCode, Json<ApiError>) {
    let status = match err {
        DashboardError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DashboardError::Stopped => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ApiError {
            error: err.user_message(),
        }),
    )
}

fn rejected_body(rejection: &JsonRejection) -> (StatusCode, Json<ApiError>) {
    error_response(&DashboardError::validation(rejection.body_text()))
}

pub fn router() -> Router<DashboardHandle> {
    Router::new()
        .route("/health", get(health))
        .route("/dashboard", get(get_dashboard))
        .route("/cities", post(add_city))
        .route("/cities/{name}", delete(remove_city))
        .route("/selection", get(get_selection).put(select_city).delete(clear_selection))
        .route("/chart", get(get_chart))
}

async fn health() -> &'static str {
    "ok"
}

async fn get_dashboard(State(dashboard): State<DashboardHandle>) -> Json<DashboardState> {
    Json(dashboard.snapshot().as_ref().clone())
}

async fn add_city(
    State(dashboard): State<DashboardHandle>,
    payload: Result<Json<CityRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AcceptedCity>)> {
    let Json(payload) = payload.map_err(|e| rejected_body(&e))?;
    let city = dashboard
        .add_city(&payload.name)
        .await
        .map_err(|e| error_response(&e))?;
    Ok((StatusCode::ACCEPTED, Json(AcceptedCity { city })))
}

async fn remove_city(
    State(dashboard): State<DashboardHandle>,
    Path(name): Path<String>,
) -> ApiResult<StatusCode> {
    dashboard
        .remove_city(&name)
        .await
        .map_err(|e| error_response(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_selection(State(dashboard): State<DashboardHandle>) -> Result<Json<CityRequest>, StatusCode> {
    dashboard
        .snapshot()
        .selected_name()
        .map(|name| {
            Json(CityRequest {
                name: name.to_string(),
            })
        })
        .ok_or(StatusCode::NOT_FOUND)
}

async fn select_city(
    State(dashboard): State<DashboardHandle>,
    payload: Result<Json<CityRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(payload) = payload.map_err(|e| rejected_body(&e))?;
    dashboard
        .select_city(&payload.name)
        .await
        .map_err(|e| error_response(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_selection(State(dashboard): State<DashboardHandle>) -> ApiResult<StatusCode> {
    dashboard
        .clear_selection()
        .await
        .map_err(|e| error_response(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_chart(State(dashboard): State<DashboardHandle>) -> Result<Json<TemperatureTrend>, StatusCode> {
    dashboard
        .snapshot()
        .temperature_trend()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
