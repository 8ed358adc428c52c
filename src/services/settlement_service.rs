//! Escritura de settlements
//!
//! Valida y comete un settlement inmutable. "Nada que liquidar" es un
//! estado válido que nunca debe producir un registro persistido; la
//! serialización por (conductor, categoría) y el chequeo de solapamiento
//! viven en el repositorio, dentro de una única transacción.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::settlement::{NewSettlement, SettleRequest, Settlement};
use crate::repositories::settlement_repository::SettlementRepository;
use crate::services::settlement_period::resolve_period;
use crate::utils::errors::AppError;

/// Rechazar settlements sin nada que pagar antes de tocar el store.
pub fn validate_settlement(amount: Decimal, trip_ids: &[Uuid]) -> Result<(), AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::NothingToSettle(format!(
            "Settlement amount must be positive, got {}",
            amount
        )));
    }
    if trip_ids.is_empty() {
        return Err(AppError::NothingToSettle(
            "A settlement must cover at least one trip".to_string(),
        ));
    }
    Ok(())
}

pub struct SettlementService {
    repository: SettlementRepository,
}

impl SettlementService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SettlementRepository::new(pool),
        }
    }

    /// Liquidar el due pendiente de un conductor para una categoría.
    ///
    /// La escritura es un insert puro sin mutación de estado previo:
    /// si falla, no queda registro parcial y el caller puede reintentar.
    pub async fn settle(&self, request: SettleRequest) -> Result<Settlement, AppError> {
        validate_settlement(request.amount, &request.trip_ids)?;

        let (start_date, end_date) = resolve_period(&request.trip_dates).ok_or_else(|| {
            AppError::NothingToSettle("A settlement must cover at least one trip date".to_string())
        })?;

        let settlement = self
            .repository
            .insert(NewSettlement {
                driver_id: request.driver_id,
                settlement_type: request.settlement_type,
                amount: request.amount,
                start_date,
                end_date,
                trip_ids: request.trip_ids,
            })
            .await?;

        info!(
            settlement_id = %settlement.id,
            driver_id = %settlement.driver_id,
            settlement_type = %settlement.settlement_type,
            amount = %settlement.amount,
            "Settlement recorded"
        );

        Ok(settlement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amount_is_rejected_before_any_write() {
        let err = validate_settlement(Decimal::ZERO, &[Uuid::new_v4()]).unwrap_err();
        assert!(matches!(err, AppError::NothingToSettle(_)));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = validate_settlement(Decimal::from(-50), &[Uuid::new_v4()]).unwrap_err();
        assert!(matches!(err, AppError::NothingToSettle(_)));
    }

    #[test]
    fn empty_trip_list_is_rejected() {
        let err = validate_settlement(Decimal::from(100), &[]).unwrap_err();
        assert!(matches!(err, AppError::NothingToSettle(_)));
    }

    #[test]
    fn positive_amount_with_trips_passes() {
        assert!(validate_settlement(Decimal::from(100), &[Uuid::new_v4()]).is_ok());
    }
}
