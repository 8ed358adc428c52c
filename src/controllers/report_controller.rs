use serde::Serialize;
use sqlx::PgPool;

use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::settlement_repository::SettlementRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::services::report_service::{fleet_totals, FleetTotals};
use crate::utils::errors::AppError;

/// Resumen de flota para el dashboard
#[derive(Debug, Serialize)]
pub struct FleetSummaryResponse {
    pub driver_count: i64,
    pub trip_count: i64,
    #[serde(flatten)]
    pub totals: FleetTotals,
}

pub struct ReportController {
    drivers: DriverRepository,
    trips: TripRepository,
    settlements: SettlementRepository,
}

impl ReportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            drivers: DriverRepository::new(pool.clone()),
            trips: TripRepository::new(pool.clone()),
            settlements: SettlementRepository::new(pool),
        }
    }

    /// Roll-up completo recomputado del snapshot actual, sin caché.
    pub async fn summary(&self) -> Result<FleetSummaryResponse, AppError> {
        let (driver_count, trip_count, trips, settlements) = tokio::try_join!(
            self.drivers.count(),
            self.trips.count(),
            self.trips.list_with_joins(),
            self.settlements.list(),
        )?;

        Ok(FleetSummaryResponse {
            driver_count,
            trip_count,
            totals: fleet_totals(&trips, &settlements),
        })
    }
}
