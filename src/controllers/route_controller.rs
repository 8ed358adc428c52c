use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::api_dto::ApiResponse;
use crate::models::route::{CreateRouteRequest, RouteResponse};
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::AppError;

pub struct RouteController {
    repository: RouteRepository,
}

impl RouteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RouteRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateRouteRequest,
    ) -> Result<ApiResponse<RouteResponse>, AppError> {
        request.validate()?;

        // Los montos son valores de moneda, nunca negativos
        if request.batta_amount < Decimal::ZERO {
            return Err(AppError::BadRequest(
                "batta_amount must be non-negative".to_string(),
            ));
        }
        if request.salary_amount < Decimal::ZERO {
            return Err(AppError::BadRequest(
                "salary_amount must be non-negative".to_string(),
            ));
        }

        let route = self
            .repository
            .create(
                request.name,
                request.origin,
                request.destination,
                request.batta_amount,
                request.salary_amount,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            route.into(),
            "Route created successfully".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<RouteResponse>, AppError> {
        let routes = self.repository.list().await?;
        Ok(routes.into_iter().map(RouteResponse::from).collect())
    }
}
