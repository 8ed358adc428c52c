use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::report_controller::{FleetSummaryResponse, ReportController};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new().route("/summary", get(summary))
}

async fn summary(
    State(state): State<AppState>,
) -> Result<Json<FleetSummaryResponse>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.summary().await?;
    Ok(Json(response))
}
