use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::trip_controller::TripController;
use crate::dto::api_dto::ApiResponse;
use crate::models::trip::{CreateTripRequest, Trip, TripResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_trip))
        .route("/", get(list_trips))
}

async fn create_trip(
    State(state): State<AppState>,
    Json(request): Json<CreateTripRequest>,
) -> Result<Json<ApiResponse<Trip>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_trips(State(state): State<AppState>) -> Result<Json<Vec<TripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}
