use sqlx::PgPool;
use validator::Validate;

use crate::dto::api_dto::ApiResponse;
use crate::models::settlement::{
    SettleRequest, SettlementHistoryResponse, SettlementResponse, SettlementType,
};
use crate::repositories::settlement_repository::SettlementRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::services::due_calculator::{calculate_dues, DriverDue};
use crate::services::settlement_service::SettlementService;
use crate::utils::errors::AppError;

pub struct SettlementController {
    trips: TripRepository,
    settlements: SettlementRepository,
    service: SettlementService,
}

impl SettlementController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            trips: TripRepository::new(pool.clone()),
            settlements: SettlementRepository::new(pool.clone()),
            service: SettlementService::new(pool),
        }
    }

    /// Dues pendientes por conductor para la categoría. Las dos lecturas
    /// son independientes y se emiten concurrentes; el resultado es tan
    /// fresco como el snapshot leído acá.
    pub async fn dues(&self, category: SettlementType) -> Result<Vec<DriverDue>, AppError> {
        let (trips, settlements) =
            tokio::try_join!(self.trips.list_with_joins(), self.settlements.list())?;

        Ok(calculate_dues(&trips, &settlements, category))
    }

    pub async fn settle(
        &self,
        request: SettleRequest,
    ) -> Result<ApiResponse<SettlementResponse>, AppError> {
        request.validate()?;

        let settlement = self.service.settle(request).await?;

        Ok(ApiResponse::success_with_message(
            settlement.into(),
            "Settlement processed successfully".to_string(),
        ))
    }

    pub async fn history(
        &self,
        category: SettlementType,
    ) -> Result<Vec<SettlementHistoryResponse>, AppError> {
        let rows = self.settlements.list_history(category).await?;

        rows.into_iter()
            .map(|row| {
                let settlement_type: SettlementType =
                    row.settlement_type.parse().map_err(|_| {
                        AppError::Internal(format!(
                            "Settlement '{}' has corrupt type '{}'",
                            row.id, row.settlement_type
                        ))
                    })?;
                Ok(SettlementHistoryResponse {
                    id: row.id.to_string(),
                    driver_id: row.driver_id.to_string(),
                    driver_name: row.driver_name,
                    settlement_type,
                    amount: row.amount,
                    start_date: row.start_date,
                    end_date: row.end_date,
                    created_at: row.created_at.to_rfc3339(),
                })
            })
            .collect()
    }
}
