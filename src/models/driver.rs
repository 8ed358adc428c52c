//! Modelo de Driver
//!
//! Este módulo contiene el struct Driver y el modo de pago del conductor.
//! Mapea exactamente a la tabla drivers del schema PostgreSQL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::utils::errors::AppError;

/// Modo de pago del conductor - política cerrada, matching exhaustivo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMode {
    /// Todo el valor del viaje se paga como batta semanal
    Batta,
    /// Todo el valor del viaje se paga como salario mensual
    Salary,
    /// Batta a la categoría semanal, salario a la mensual
    Split,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Batta => "BATTA",
            PaymentMode::Salary => "SALARY",
            PaymentMode::Split => "SPLIT",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMode {
    type Err = AppError;

    /// Un valor fuera del set enumerado es configuración corrupta,
    /// nunca se degrada silenciosamente a un default
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BATTA" => Ok(PaymentMode::Batta),
            "SALARY" => Ok(PaymentMode::Salary),
            "SPLIT" => Ok(PaymentMode::Split),
            other => Err(AppError::InvalidPaymentMode(format!(
                "Unrecognized payment_mode '{}'",
                other
            ))),
        }
    }
}

/// Driver principal - mapea a la tabla drivers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub payment_mode: PaymentMode,
    pub created_at: DateTime<Utc>,
}

/// Request para crear un nuevo conductor
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,

    #[validate(length(min = 5, max = 20))]
    pub phone: Option<String>,

    pub payment_mode: PaymentMode,
}

/// Response de conductor para la API
#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub payment_mode: PaymentMode,
    pub created_at: String,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id.to_string(),
            name: driver.name,
            phone: driver.phone,
            payment_mode: driver.payment_mode,
            created_at: driver.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_mode_round_trips_through_str() {
        for mode in [PaymentMode::Batta, PaymentMode::Salary, PaymentMode::Split] {
            assert_eq!(mode.as_str().parse::<PaymentMode>().unwrap(), mode);
        }
    }

    #[test]
    fn unknown_payment_mode_is_a_data_error() {
        let err = "CASH".parse::<PaymentMode>().unwrap_err();
        assert!(matches!(err, AppError::InvalidPaymentMode(_)));
    }
}
