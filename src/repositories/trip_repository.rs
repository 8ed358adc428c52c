use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::Driver;
use crate::models::route::Route;
use crate::models::trip::{Trip, TripWithJoins};
use crate::utils::errors::AppError;

// Row del LEFT JOIN: las columnas del driver y la ruta son opcionales
// porque una referencia rota deja el lado entero en NULL
#[derive(Debug, sqlx::FromRow)]
struct TripJoinRow {
    id: Uuid,
    driver_id: Uuid,
    route_id: Uuid,
    trip_date: NaiveDate,
    created_at: DateTime<Utc>,

    d_id: Option<Uuid>,
    d_name: Option<String>,
    d_phone: Option<String>,
    d_payment_mode: Option<String>,
    d_created_at: Option<DateTime<Utc>>,

    r_id: Option<Uuid>,
    r_name: Option<String>,
    r_origin: Option<String>,
    r_destination: Option<String>,
    r_batta_amount: Option<Decimal>,
    r_salary_amount: Option<Decimal>,
    r_created_at: Option<DateTime<Utc>>,
}

impl TryFrom<TripJoinRow> for TripWithJoins {
    type Error = AppError;

    fn try_from(row: TripJoinRow) -> Result<Self, Self::Error> {
        let driver = match (row.d_id, row.d_name, row.d_payment_mode, row.d_created_at) {
            (Some(id), Some(name), Some(payment_mode), Some(created_at)) => {
                let payment_mode = payment_mode.parse().map_err(|_| {
                    AppError::InvalidPaymentMode(format!(
                        "Driver '{}' has unrecognized payment_mode '{}'",
                        id, payment_mode
                    ))
                })?;
                Some(Driver {
                    id,
                    name,
                    phone: row.d_phone,
                    payment_mode,
                    created_at,
                })
            }
            _ => None,
        };

        let route = match (
            row.r_id,
            row.r_name,
            row.r_origin,
            row.r_destination,
            row.r_batta_amount,
            row.r_salary_amount,
            row.r_created_at,
        ) {
            (
                Some(id),
                Some(name),
                Some(origin),
                Some(destination),
                Some(batta_amount),
                Some(salary_amount),
                Some(created_at),
            ) => Some(Route {
                id,
                name,
                origin,
                destination,
                batta_amount,
                salary_amount,
                created_at,
            }),
            _ => None,
        };

        Ok(TripWithJoins {
            trip: Trip {
                id: row.id,
                driver_id: row.driver_id,
                route_id: row.route_id,
                trip_date: row.trip_date,
                created_at: row.created_at,
            },
            driver,
            route,
        })
    }
}

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        driver_id: Uuid,
        route_id: Uuid,
        trip_date: NaiveDate,
    ) -> Result<Trip, AppError> {
        let trip = sqlx::query_as::<_, TripRow>(
            r#"
            INSERT INTO trips (id, driver_id, route_id, trip_date, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(driver_id)
        .bind(route_id)
        .bind(trip_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(trip.into())
    }

    /// Listar todos los viajes con driver y ruta pre-joineados.
    /// Viajes con referencias rotas salen con el lado faltante en None;
    /// el calculador decide qué hacer con ellos.
    pub async fn list_with_joins(&self) -> Result<Vec<TripWithJoins>, AppError> {
        let rows = sqlx::query_as::<_, TripJoinRow>(
            r#"
            SELECT t.id, t.driver_id, t.route_id, t.trip_date, t.created_at,
                   d.id AS d_id, d.name AS d_name, d.phone AS d_phone,
                   d.payment_mode AS d_payment_mode, d.created_at AS d_created_at,
                   r.id AS r_id, r.name AS r_name, r.origin AS r_origin,
                   r.destination AS r_destination, r.batta_amount AS r_batta_amount,
                   r.salary_amount AS r_salary_amount, r.created_at AS r_created_at
            FROM trips t
            LEFT JOIN drivers d ON d.id = t.driver_id
            LEFT JOIN routes r ON r.id = t.route_id
            ORDER BY t.trip_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TripWithJoins::try_from).collect()
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trips")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TripRow {
    id: Uuid,
    driver_id: Uuid,
    route_id: Uuid,
    trip_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl From<TripRow> for Trip {
    fn from(row: TripRow) -> Self {
        Trip {
            id: row.id,
            driver_id: row.driver_id,
            route_id: row.route_id,
            trip_date: row.trip_date,
            created_at: row.created_at,
        }
    }
}
