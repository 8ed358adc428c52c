use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::settlement::{NewSettlement, Settlement, SettlementType};
use crate::utils::errors::AppError;

#[derive(Debug, sqlx::FromRow)]
struct SettlementRow {
    id: Uuid,
    driver_id: Uuid,
    settlement_type: String,
    amount: Decimal,
    start_date: NaiveDate,
    end_date: NaiveDate,
    trip_ids: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl TryFrom<SettlementRow> for Settlement {
    type Error = AppError;

    fn try_from(row: SettlementRow) -> Result<Self, Self::Error> {
        let settlement_type: SettlementType = row.settlement_type.parse().map_err(|_| {
            AppError::Internal(format!(
                "Settlement '{}' has corrupt type '{}'",
                row.id, row.settlement_type
            ))
        })?;
        Ok(Settlement {
            id: row.id,
            driver_id: row.driver_id,
            settlement_type,
            amount: row.amount,
            start_date: row.start_date,
            end_date: row.end_date,
            trip_ids: row.trip_ids,
            created_at: row.created_at,
        })
    }
}

// Historial con el nombre del conductor ya resuelto
#[derive(Debug, sqlx::FromRow)]
pub struct SettlementHistoryRow {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub driver_name: Option<String>,
    pub settlement_type: String,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Clave del advisory lock por (conductor, categoría). Serializa los
/// settles concurrentes del mismo par para cerrar la carrera de doble
/// pago sobre dues calculados de un snapshot viejo.
fn settlement_lock_key(driver_id: Uuid, settlement_type: SettlementType) -> i64 {
    let (hi, _) = driver_id.as_u64_pair();
    let tag: u64 = match settlement_type {
        SettlementType::Weekly => 0x57,
        SettlementType::Monthly => 0x4d,
    };
    (hi ^ tag) as i64
}

pub struct SettlementRepository {
    pool: PgPool,
}

impl SettlementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Settlement>, AppError> {
        let rows = sqlx::query_as::<_, SettlementRow>(
            "SELECT * FROM settlements ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Settlement::try_from).collect()
    }

    pub async fn list_history(
        &self,
        settlement_type: SettlementType,
    ) -> Result<Vec<SettlementHistoryRow>, AppError> {
        let rows = sqlx::query_as::<_, SettlementHistoryRow>(
            r#"
            SELECT s.id, s.driver_id, d.name AS driver_name, s.settlement_type,
                   s.amount, s.start_date, s.end_date, s.created_at
            FROM settlements s
            LEFT JOIN drivers d ON d.id = s.driver_id
            WHERE s.settlement_type = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(settlement_type.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Insertar un settlement de forma atómica.
    ///
    /// La transacción toma primero un advisory lock por (conductor,
    /// categoría) y recién después chequea solapamiento de trip_ids
    /// contra los settlements existentes, así dos settles concurrentes
    /// del mismo par no pueden pasar ambos el chequeo. Solapamiento ->
    /// AlreadySettled, sin registro parcial.
    pub async fn insert(&self, new: NewSettlement) -> Result<Settlement, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(settlement_lock_key(new.driver_id, new.settlement_type))
            .execute(&mut *tx)
            .await?;

        let (overlap,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM settlements
                WHERE driver_id = $1 AND settlement_type = $2 AND trip_ids && $3
            )
            "#,
        )
        .bind(new.driver_id)
        .bind(new.settlement_type.as_str())
        .bind(&new.trip_ids)
        .fetch_one(&mut *tx)
        .await?;

        if overlap {
            return Err(AppError::AlreadySettled(format!(
                "Driver '{}' already has a {} settlement covering some of these trips",
                new.driver_id, new.settlement_type
            )));
        }

        let row = sqlx::query_as::<_, SettlementRow>(
            r#"
            INSERT INTO settlements
                (id, driver_id, settlement_type, amount, start_date, end_date, trip_ids, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.driver_id)
        .bind(new.settlement_type.as_str())
        .bind(new.amount)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(&new.trip_ids)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        row.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_key_distinguishes_categories() {
        let driver_id = Uuid::new_v4();
        assert_ne!(
            settlement_lock_key(driver_id, SettlementType::Weekly),
            settlement_lock_key(driver_id, SettlementType::Monthly)
        );
    }

    #[test]
    fn lock_key_is_stable_per_driver() {
        let driver_id = Uuid::new_v4();
        assert_eq!(
            settlement_lock_key(driver_id, SettlementType::Weekly),
            settlement_lock_key(driver_id, SettlementType::Weekly)
        );
    }
}
