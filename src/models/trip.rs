//! Modelo de Trip
//!
//! Un viaje es evidencia permanente de trabajo realizado. Su valor
//! monetario nunca se almacena: se deriva de los montos de la ruta
//! y del modo de pago del conductor al momento de calcular dues.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::driver::Driver;
use crate::models::route::Route;

/// Trip principal - mapea a la tabla trips
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub route_id: Uuid,
    pub trip_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Trip con sus joins resueltos (LEFT JOIN en el repositorio).
/// Un lado faltante queda como None y el calculador lo salta.
#[derive(Debug, Clone)]
pub struct TripWithJoins {
    pub trip: Trip,
    pub driver: Option<Driver>,
    pub route: Option<Route>,
}

/// Request para registrar un viaje
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTripRequest {
    pub driver_id: Uuid,
    pub route_id: Uuid,
    pub trip_date: NaiveDate,
}

/// Response de viaje para listados, con nombres ya resueltos
#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub id: String,
    pub trip_date: NaiveDate,
    pub driver_name: Option<String>,
    pub route_name: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub created_at: String,
}

impl From<TripWithJoins> for TripResponse {
    fn from(joined: TripWithJoins) -> Self {
        Self {
            id: joined.trip.id.to_string(),
            trip_date: joined.trip.trip_date,
            driver_name: joined.driver.map(|d| d.name),
            route_name: joined.route.as_ref().map(|r| r.name.clone()),
            origin: joined.route.as_ref().map(|r| r.origin.clone()),
            destination: joined.route.map(|r| r.destination),
            created_at: joined.trip.created_at.to_rfc3339(),
        }
    }
}
