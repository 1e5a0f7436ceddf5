use crate::models::health_dto::{HealthReport, Liveness};
use crate::routes::router::AppState;
use crate::services::health::check_database;
use axum::extract::State;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Process is up", body = Liveness)
    ),
    tag = "health"
)]
pub async fn liveness() -> Json<Liveness> {
    Json(Liveness::now())
}

// Always 200: a database outage is reported in the body only.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Database connectivity report", body = HealthReport)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(check_database(&state.pool).await)
}
