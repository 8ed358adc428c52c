use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::settlement_controller::SettlementController;
use crate::dto::api_dto::ApiResponse;
use crate::models::settlement::{
    SettleRequest, SettlementHistoryResponse, SettlementResponse, SettlementTypeQuery,
};
use crate::services::due_calculator::DriverDue;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_settlement_router() -> Router<AppState> {
    Router::new()
        .route("/", post(settle))
        .route("/", get(history))
        .route("/dues", get(dues))
}

async fn dues(
    State(state): State<AppState>,
    Query(query): Query<SettlementTypeQuery>,
) -> Result<Json<Vec<DriverDue>>, AppError> {
    let controller = SettlementController::new(state.pool.clone());
    let response = controller.dues(query.settlement_type).await?;
    Ok(Json(response))
}

async fn settle(
    State(state): State<AppState>,
    Json(request): Json<SettleRequest>,
) -> Result<Json<ApiResponse<SettlementResponse>>, AppError> {
    let controller = SettlementController::new(state.pool.clone());
    let response = controller.settle(request).await?;
    Ok(Json(response))
}

async fn history(
    State(state): State<AppState>,
    Query(query): Query<SettlementTypeQuery>,
) -> Result<Json<Vec<SettlementHistoryResponse>>, AppError> {
    let controller = SettlementController::new(state.pool.clone());
    let response = controller.history(query.settlement_type).await?;
    Ok(Json(response))
}
