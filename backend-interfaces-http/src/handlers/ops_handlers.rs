use axum::extract::State;
use axum::http::StatusCode;

use backend_application::AppState;
use backend_domain::ports::HealthCheckService;

pub async fn health_live() -> StatusCode {
    StatusCode::OK
}

pub async fn health_ready(State(state): State<AppState>) -> StatusCode {
    match state.health.check_store().await {
        Ok(true) => StatusCode::OK,
        _ => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub async fn metrics_prometheus(State(state): State<AppState>) -> String {
    state.metrics.render_prometheus()
}
