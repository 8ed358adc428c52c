use sqlx::PgPool;
use validator::Validate;

use crate::dto::api_dto::ApiResponse;
use crate::models::trip::{CreateTripRequest, Trip, TripResponse};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct TripController {
    trips: TripRepository,
    drivers: DriverRepository,
    routes: RouteRepository,
}

impl TripController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            trips: TripRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            routes: RouteRepository::new(pool),
        }
    }

    /// Registrar un viaje. El valor monetario no se almacena: queda
    /// derivado de la ruta y el modo de pago en cada cálculo.
    pub async fn create(
        &self,
        request: CreateTripRequest,
    ) -> Result<ApiResponse<Trip>, AppError> {
        request.validate()?;

        if self.drivers.find_by_id(request.driver_id).await?.is_none() {
            return Err(not_found_error("Driver", &request.driver_id.to_string()));
        }
        if self.routes.find_by_id(request.route_id).await?.is_none() {
            return Err(not_found_error("Route", &request.route_id.to_string()));
        }

        let trip = self
            .trips
            .create(request.driver_id, request.route_id, request.trip_date)
            .await?;

        Ok(ApiResponse::success_with_message(
            trip,
            "Trip logged successfully".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<TripResponse>, AppError> {
        let trips = self.trips.list_with_joins().await?;
        Ok(trips.into_iter().map(TripResponse::from).collect())
    }
}
