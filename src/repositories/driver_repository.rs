use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::{Driver, PaymentMode};
use crate::utils::errors::AppError;

// Row crudo: payment_mode llega como TEXT y se valida al convertir
#[derive(Debug, sqlx::FromRow)]
struct DriverRow {
    id: Uuid,
    name: String,
    phone: Option<String>,
    payment_mode: String,
    created_at: chrono::DateTime<Utc>,
}

impl TryFrom<DriverRow> for Driver {
    type Error = AppError;

    fn try_from(row: DriverRow) -> Result<Self, Self::Error> {
        let payment_mode: PaymentMode = row.payment_mode.parse().map_err(|_| {
            AppError::InvalidPaymentMode(format!(
                "Driver '{}' has unrecognized payment_mode '{}'",
                row.id, row.payment_mode
            ))
        })?;
        Ok(Driver {
            id: row.id,
            name: row.name,
            phone: row.phone,
            payment_mode,
            created_at: row.created_at,
        })
    }
}

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        phone: Option<String>,
        payment_mode: PaymentMode,
    ) -> Result<Driver, AppError> {
        let row = sqlx::query_as::<_, DriverRow>(
            r#"
            INSERT INTO drivers (id, name, phone, payment_mode, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(phone)
        .bind(payment_mode.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let row = sqlx::query_as::<_, DriverRow>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Driver::try_from).transpose()
    }

    pub async fn list(&self) -> Result<Vec<Driver>, AppError> {
        let rows = sqlx::query_as::<_, DriverRow>("SELECT * FROM drivers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Driver::try_from).collect()
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM drivers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
