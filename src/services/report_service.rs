//! Reporte agregado de flota
//!
//! Roll-up puro sobre el dataset completo de viajes y settlements:
//! pendiente por categoría, pagado histórico y subtotales. Sin caché,
//! se recomputa on demand.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::settlement::{Settlement, SettlementType};
use crate::models::trip::TripWithJoins;
use crate::services::due_calculator::calculate_dues;

/// Totales monetarios de la flota
#[derive(Debug, Clone, Serialize)]
pub struct FleetTotals {
    pub pending_weekly: Decimal,
    pub pending_monthly: Decimal,
    pub pending_total: Decimal,
    pub paid_weekly: Decimal,
    pub paid_monthly: Decimal,
    pub total_paid: Decimal,
}

/// Calcular los totales de flota a partir del snapshot actual.
pub fn fleet_totals(trips: &[TripWithJoins], settlements: &[Settlement]) -> FleetTotals {
    let pending_weekly: Decimal = calculate_dues(trips, settlements, SettlementType::Weekly)
        .iter()
        .map(|due| due.amount)
        .sum();
    let pending_monthly: Decimal = calculate_dues(trips, settlements, SettlementType::Monthly)
        .iter()
        .map(|due| due.amount)
        .sum();

    let paid_weekly: Decimal = settlements
        .iter()
        .filter(|s| s.settlement_type == SettlementType::Weekly)
        .map(|s| s.amount)
        .sum();
    let paid_monthly: Decimal = settlements
        .iter()
        .filter(|s| s.settlement_type == SettlementType::Monthly)
        .map(|s| s.amount)
        .sum();

    FleetTotals {
        pending_weekly,
        pending_monthly,
        pending_total: pending_weekly + pending_monthly,
        paid_weekly,
        paid_monthly,
        total_paid: paid_weekly + paid_monthly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::driver::{Driver, PaymentMode};
    use crate::models::route::Route;
    use crate::models::trip::Trip;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn fixture() -> (Vec<TripWithJoins>, Driver) {
        let driver = Driver {
            id: Uuid::new_v4(),
            name: "Kumar".to_string(),
            phone: None,
            payment_mode: PaymentMode::Split,
            created_at: Utc::now(),
        };
        let route = Route {
            id: Uuid::new_v4(),
            name: "Chennai - Madurai".to_string(),
            origin: "Chennai".to_string(),
            destination: "Madurai".to_string(),
            batta_amount: dec(200),
            salary_amount: dec(100),
            created_at: Utc::now(),
        };
        let trips = ["2024-01-01", "2024-01-08"]
            .iter()
            .map(|day| TripWithJoins {
                trip: Trip {
                    id: Uuid::new_v4(),
                    driver_id: driver.id,
                    route_id: route.id,
                    trip_date: date(day),
                    created_at: Utc::now(),
                },
                driver: Some(driver.clone()),
                route: Some(route.clone()),
            })
            .collect();
        (trips, driver)
    }

    #[test]
    fn totals_partition_pending_by_category() {
        let (trips, _) = fixture();
        let totals = fleet_totals(&trips, &[]);

        assert_eq!(totals.pending_weekly, dec(400));
        assert_eq!(totals.pending_monthly, dec(200));
        assert_eq!(totals.pending_total, dec(600));
        assert_eq!(totals.total_paid, Decimal::ZERO);
    }

    #[test]
    fn settling_moves_amounts_from_pending_to_paid() {
        let (trips, driver) = fixture();
        let settlement = Settlement {
            id: Uuid::new_v4(),
            driver_id: driver.id,
            settlement_type: SettlementType::Weekly,
            amount: dec(400),
            start_date: date("2024-01-01"),
            end_date: date("2024-01-08"),
            trip_ids: trips.iter().map(|t| t.trip.id).collect(),
            created_at: Utc::now(),
        };

        let totals = fleet_totals(&trips, &[settlement]);
        assert_eq!(totals.pending_weekly, Decimal::ZERO);
        assert_eq!(totals.pending_monthly, dec(200));
        assert_eq!(totals.paid_weekly, dec(400));
        assert_eq!(totals.paid_monthly, Decimal::ZERO);
        assert_eq!(totals.total_paid, dec(400));
    }

    #[test]
    fn empty_dataset_is_all_zeroes() {
        let totals = fleet_totals(&[], &[]);
        assert_eq!(totals.pending_total, Decimal::ZERO);
        assert_eq!(totals.total_paid, Decimal::ZERO);
    }
}
