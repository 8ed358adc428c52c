//! Modelo de Route
//!
//! Una ruta define los dos montos unitarios por viaje: batta (semanal)
//! y salario (mensual). Las ediciones no recalculan settlements pasados.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Route principal - mapea a la tabla routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: Uuid,
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub batta_amount: Decimal,
    pub salary_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Request para crear una nueva ruta
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRouteRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,

    #[validate(length(min = 1, max = 120))]
    pub origin: String,

    #[validate(length(min = 1, max = 120))]
    pub destination: String,

    pub batta_amount: Decimal,

    pub salary_amount: Decimal,
}

/// Response de ruta para la API
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub id: String,
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub batta_amount: Decimal,
    pub salary_amount: Decimal,
    pub created_at: String,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id.to_string(),
            name: route.name,
            origin: route.origin,
            destination: route.destination,
            batta_amount: route.batta_amount,
            salary_amount: route.salary_amount,
            created_at: route.created_at.to_rfc3339(),
        }
    }
}
