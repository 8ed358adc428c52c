//! Modelo de Settlement
//!
//! Un settlement es un recibo inmutable: una vez escrito nunca se edita
//! ni se borra. La cobertura se decide por el set explícito de trip_ids,
//! no por pertenencia al rango de fechas; el rango queda como metadata
//! de auditoría.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::utils::errors::AppError;

/// Categoría de pago del settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SettlementType {
    /// Batta semanal
    Weekly,
    /// Salario mensual
    Monthly,
}

impl SettlementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementType::Weekly => "WEEKLY",
            SettlementType::Monthly => "MONTHLY",
        }
    }
}

impl fmt::Display for SettlementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettlementType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WEEKLY" => Ok(SettlementType::Weekly),
            "MONTHLY" => Ok(SettlementType::Monthly),
            other => Err(AppError::BadRequest(format!(
                "Unrecognized settlement type '{}'",
                other
            ))),
        }
    }
}

/// Settlement principal - mapea a la tabla settlements
#[derive(Debug, Clone, Serialize)]
pub struct Settlement {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub settlement_type: SettlementType,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub trip_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Registro nuevo listo para insertar (id y created_at los pone la DB)
#[derive(Debug, Clone)]
pub struct NewSettlement {
    pub driver_id: Uuid,
    pub settlement_type: SettlementType,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub trip_ids: Vec<Uuid>,
}

/// Request para liquidar el due pendiente de un conductor
#[derive(Debug, Deserialize, Validate)]
pub struct SettleRequest {
    pub driver_id: Uuid,

    #[serde(rename = "type")]
    pub settlement_type: SettlementType,

    pub amount: Decimal,

    pub trip_ids: Vec<Uuid>,

    pub trip_dates: Vec<NaiveDate>,
}

/// Filtro de categoría para dues e historial
#[derive(Debug, Deserialize)]
pub struct SettlementTypeQuery {
    #[serde(rename = "type")]
    pub settlement_type: SettlementType,
}

/// Response de settlement para la API
#[derive(Debug, Serialize)]
pub struct SettlementResponse {
    pub id: String,
    pub driver_id: String,
    pub settlement_type: SettlementType,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub trip_ids: Vec<Uuid>,
    pub created_at: String,
}

impl From<Settlement> for SettlementResponse {
    fn from(s: Settlement) -> Self {
        Self {
            id: s.id.to_string(),
            driver_id: s.driver_id.to_string(),
            settlement_type: s.settlement_type,
            amount: s.amount,
            start_date: s.start_date,
            end_date: s.end_date,
            trip_ids: s.trip_ids,
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

/// Entrada del historial de pagos, con el nombre del conductor resuelto
#[derive(Debug, Serialize)]
pub struct SettlementHistoryResponse {
    pub id: String,
    pub driver_id: String,
    pub driver_name: Option<String>,
    pub settlement_type: SettlementType,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: String,
}
