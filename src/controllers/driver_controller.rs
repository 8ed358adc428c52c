use sqlx::PgPool;
use validator::Validate;

use crate::dto::api_dto::ApiResponse;
use crate::models::driver::{CreateDriverRequest, DriverResponse};
use crate::repositories::driver_repository::DriverRepository;
use crate::utils::errors::AppError;

pub struct DriverController {
    repository: DriverRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateDriverRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        request.validate()?;

        if request.name.trim().is_empty() {
            return Err(AppError::BadRequest("Driver name is required".to_string()));
        }

        let driver = self
            .repository
            .create(request.name, request.phone, request.payment_mode)
            .await?;

        Ok(ApiResponse::success_with_message(
            driver.into(),
            "Driver created successfully".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<DriverResponse>, AppError> {
        let drivers = self.repository.list().await?;
        Ok(drivers.into_iter().map(DriverResponse::from).collect())
    }
}
