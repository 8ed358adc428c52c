//! Calculador de dues
//!
//! Función pura: (trips⋈driver⋈route, settlements, categoría) ->
//! desglose de monto pendiente por conductor. Sin I/O y sin estado:
//! se recalcula completo en cada invocación.
//!
//! Semántica numérica: suma decimal exacta, sin redondeo intermedio.
//! El redondeo para display es responsabilidad de la capa de
//! presentación.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::models::driver::{Driver, PaymentMode};
use crate::models::settlement::{Settlement, SettlementType};
use crate::models::trip::TripWithJoins;

/// Línea de desglose por viaje, para display de auditoría
#[derive(Debug, Clone, Serialize)]
pub struct DueLine {
    pub amount: Decimal,
    pub reason: String,
}

/// Monto pendiente acumulado de un conductor para una categoría
#[derive(Debug, Clone, Serialize)]
pub struct DriverDue {
    pub driver: Driver,
    pub amount: Decimal,
    pub trip_count: u32,
    pub trip_ids: Vec<Uuid>,
    pub trip_dates: Vec<NaiveDate>,
    pub breakdown: Vec<DueLine>,
}

impl DriverDue {
    fn empty(driver: Driver) -> Self {
        Self {
            driver,
            amount: Decimal::ZERO,
            trip_count: 0,
            trip_ids: Vec::new(),
            trip_dates: Vec::new(),
            breakdown: Vec::new(),
        }
    }
}

/// Contribución de un viaje a la categoría dada, según el modo de pago.
///
/// BATTA: valor completo a WEEKLY, nada a MONTHLY.
/// SALARY: valor completo a MONTHLY, nada a WEEKLY.
/// SPLIT: batta a WEEKLY y salario a MONTHLY, acumulados independientes.
fn trip_contribution(
    mode: PaymentMode,
    category: SettlementType,
    batta: Decimal,
    salary: Decimal,
    trip_date: NaiveDate,
) -> (Decimal, String) {
    match (mode, category) {
        (PaymentMode::Batta, SettlementType::Weekly) => {
            (batta + salary, format!("Total (Trip {})", trip_date))
        }
        (PaymentMode::Salary, SettlementType::Monthly) => {
            (batta + salary, format!("Total (Trip {})", trip_date))
        }
        (PaymentMode::Split, SettlementType::Weekly) => {
            (batta, format!("Batta (Trip {})", trip_date))
        }
        (PaymentMode::Split, SettlementType::Monthly) => {
            (salary, format!("Salary (Trip {})", trip_date))
        }
        (PaymentMode::Batta, SettlementType::Monthly)
        | (PaymentMode::Salary, SettlementType::Weekly) => (Decimal::ZERO, String::new()),
    }
}

/// Calcular los dues pendientes por conductor para una categoría.
///
/// Un viaje está cubierto para la categoría si su id aparece en los
/// trip_ids de algún settlement del mismo conductor y tipo; los viajes
/// cubiertos contribuyen cero. Viajes con driver o ruta faltante se
/// saltan con un warning, nunca son fatales.
///
/// Un conductor aparece en el resultado si tiene al menos un viaje no
/// cubierto con joins completos, aunque su monto para la categoría sea
/// cero; conductores sin viajes no cubiertos se omiten. Nunca se
/// fabrican entradas.
pub fn calculate_dues(
    trips: &[TripWithJoins],
    settlements: &[Settlement],
    category: SettlementType,
) -> Vec<DriverDue> {
    // Set de cobertura: (driver, trip) ya pagados en esta categoría
    let covered: HashSet<(Uuid, Uuid)> = settlements
        .iter()
        .filter(|s| s.settlement_type == category)
        .flat_map(|s| s.trip_ids.iter().map(move |trip_id| (s.driver_id, *trip_id)))
        .collect();

    let mut dues: HashMap<Uuid, DriverDue> = HashMap::new();

    for joined in trips {
        let (driver, route) = match (&joined.driver, &joined.route) {
            (Some(driver), Some(route)) => (driver, route),
            _ => {
                // Dato incompleto: se excluye del total, no se aborta
                warn!(
                    trip_id = %joined.trip.id,
                    "Trip references a missing driver or route, skipping"
                );
                continue;
            }
        };

        if covered.contains(&(driver.id, joined.trip.id)) {
            continue;
        }

        let entry = dues
            .entry(driver.id)
            .or_insert_with(|| DriverDue::empty(driver.clone()));

        let (pay, reason) = trip_contribution(
            driver.payment_mode,
            category,
            route.batta_amount,
            route.salary_amount,
            joined.trip.trip_date,
        );

        if pay > Decimal::ZERO {
            entry.amount += pay;
            entry.trip_count += 1;
            entry.trip_ids.push(joined.trip.id);
            entry.trip_dates.push(joined.trip.trip_date);
            entry.breakdown.push(DueLine {
                amount: pay,
                reason,
            });
        }
    }

    let mut result: Vec<DriverDue> = dues.into_values().collect();
    result.sort_by(|a, b| a.driver.name.cmp(&b.driver.name));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::route::Route;
    use crate::models::trip::Trip;
    use chrono::Utc;

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn driver(name: &str, mode: PaymentMode) -> Driver {
        Driver {
            id: Uuid::new_v4(),
            name: name.to_string(),
            phone: None,
            payment_mode: mode,
            created_at: Utc::now(),
        }
    }

    fn route(batta: i64, salary: i64) -> Route {
        Route {
            id: Uuid::new_v4(),
            name: "Chennai - Madurai".to_string(),
            origin: "Chennai".to_string(),
            destination: "Madurai".to_string(),
            batta_amount: dec(batta),
            salary_amount: dec(salary),
            created_at: Utc::now(),
        }
    }

    fn trip(driver: &Driver, route: &Route, day: &str) -> TripWithJoins {
        TripWithJoins {
            trip: Trip {
                id: Uuid::new_v4(),
                driver_id: driver.id,
                route_id: route.id,
                trip_date: date(day),
                created_at: Utc::now(),
            },
            driver: Some(driver.clone()),
            route: Some(route.clone()),
        }
    }

    fn settle_due(due: &DriverDue, category: SettlementType) -> Settlement {
        Settlement {
            id: Uuid::new_v4(),
            driver_id: due.driver.id,
            settlement_type: category,
            amount: due.amount,
            start_date: *due.trip_dates.iter().min().unwrap(),
            end_date: *due.trip_dates.iter().max().unwrap(),
            trip_ids: due.trip_ids.clone(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_trip_set_yields_empty_result() {
        assert!(calculate_dues(&[], &[], SettlementType::Weekly).is_empty());
    }

    #[test]
    fn split_mode_partitions_value_exactly() {
        let d = driver("Kumar", PaymentMode::Split);
        let r = route(100, 50);
        let trips = vec![trip(&d, &r, "2024-01-01")];

        let weekly = calculate_dues(&trips, &[], SettlementType::Weekly);
        let monthly = calculate_dues(&trips, &[], SettlementType::Monthly);

        assert_eq!(weekly[0].amount, dec(100));
        assert_eq!(monthly[0].amount, dec(50));
        assert_eq!(weekly[0].amount + monthly[0].amount, dec(150));
    }

    #[test]
    fn batta_and_salary_modes_are_exclusive() {
        let batta_driver = driver("Ravi", PaymentMode::Batta);
        let salary_driver = driver("Suresh", PaymentMode::Salary);
        let r = route(200, 100);
        let trips = vec![
            trip(&batta_driver, &r, "2024-02-01"),
            trip(&batta_driver, &r, "2024-02-05"),
            trip(&salary_driver, &r, "2024-02-03"),
        ];

        let weekly = calculate_dues(&trips, &[], SettlementType::Weekly);
        let monthly = calculate_dues(&trips, &[], SettlementType::Monthly);

        let weekly_batta = weekly.iter().find(|d| d.driver.id == batta_driver.id).unwrap();
        let weekly_salary = weekly.iter().find(|d| d.driver.id == salary_driver.id).unwrap();
        assert_eq!(weekly_batta.amount, dec(600));
        assert_eq!(weekly_salary.amount, Decimal::ZERO);

        let monthly_batta = monthly.iter().find(|d| d.driver.id == batta_driver.id).unwrap();
        let monthly_salary = monthly.iter().find(|d| d.driver.id == salary_driver.id).unwrap();
        assert_eq!(monthly_batta.amount, Decimal::ZERO);
        assert_eq!(monthly_salary.amount, dec(300));
    }

    #[test]
    fn settling_a_category_makes_it_idempotent() {
        let d = driver("Kumar", PaymentMode::Split);
        let r = route(200, 100);
        let trips = vec![
            trip(&d, &r, "2024-01-01"),
            trip(&d, &r, "2024-01-08"),
        ];

        let weekly = calculate_dues(&trips, &[], SettlementType::Weekly);
        assert_eq!(weekly[0].amount, dec(400));

        let settlement = settle_due(&weekly[0], SettlementType::Weekly);
        let after = calculate_dues(&trips, &[settlement], SettlementType::Weekly);

        // Todos los viajes quedaron cubiertos, el conductor desaparece
        assert!(after.is_empty());
    }

    #[test]
    fn settling_weekly_never_reduces_monthly() {
        let d = driver("Kumar", PaymentMode::Split);
        let r = route(200, 100);
        let trips = vec![
            trip(&d, &r, "2024-01-01"),
            trip(&d, &r, "2024-01-08"),
        ];

        let weekly = calculate_dues(&trips, &[], SettlementType::Weekly);
        let settlement = settle_due(&weekly[0], SettlementType::Weekly);

        let monthly = calculate_dues(&trips, &[settlement], SettlementType::Monthly);
        assert_eq!(monthly[0].amount, dec(200));
    }

    #[test]
    fn missing_joins_contribute_nothing() {
        let d = driver("Ravi", PaymentMode::Batta);
        let r = route(200, 100);
        let mut orphan_driver = trip(&d, &r, "2024-03-01");
        orphan_driver.driver = None;
        let mut orphan_route = trip(&d, &r, "2024-03-02");
        orphan_route.route = None;
        let trips = vec![orphan_driver, orphan_route, trip(&d, &r, "2024-03-03")];

        let weekly = calculate_dues(&trips, &[], SettlementType::Weekly);
        assert_eq!(weekly.len(), 1);
        assert_eq!(weekly[0].amount, dec(300));
        assert_eq!(weekly[0].trip_count, 1);
    }

    #[test]
    fn zero_contribution_driver_appears_with_zero_amount() {
        let d = driver("Ravi", PaymentMode::Batta);
        let r = route(200, 100);
        let trips = vec![trip(&d, &r, "2024-04-01")];

        // Un conductor BATTA no gana nada en la categoría mensual,
        // pero sus viajes no cubiertos lo mantienen visible
        let monthly = calculate_dues(&trips, &[], SettlementType::Monthly);
        assert_eq!(monthly.len(), 1);
        assert_eq!(monthly[0].amount, Decimal::ZERO);
        assert_eq!(monthly[0].trip_count, 0);
        assert!(monthly[0].breakdown.is_empty());
    }

    #[test]
    fn coverage_requires_matching_driver_and_type() {
        let d = driver("Kumar", PaymentMode::Split);
        let other = driver("Ravi", PaymentMode::Split);
        let r = route(200, 100);
        let trips = vec![trip(&d, &r, "2024-01-01")];

        // Settlement de otro conductor que lista el mismo trip id no cubre
        let foreign = Settlement {
            id: Uuid::new_v4(),
            driver_id: other.id,
            settlement_type: SettlementType::Weekly,
            amount: dec(200),
            start_date: date("2024-01-01"),
            end_date: date("2024-01-01"),
            trip_ids: vec![trips[0].trip.id],
            created_at: Utc::now(),
        };

        let weekly = calculate_dues(&trips, &[foreign], SettlementType::Weekly);
        assert_eq!(weekly[0].amount, dec(200));
    }

    #[test]
    fn uncovered_trip_inside_settled_date_range_stays_pending() {
        let d = driver("Kumar", PaymentMode::Batta);
        let r = route(200, 100);
        let paid = trip(&d, &r, "2024-01-01");
        let paid2 = trip(&d, &r, "2024-01-08");

        let weekly = calculate_dues(
            &[paid.clone(), paid2.clone()],
            &[],
            SettlementType::Weekly,
        );
        let settlement = settle_due(&weekly[0], SettlementType::Weekly);

        // Viaje registrado después, con fecha dentro del rango ya liquidado:
        // la cobertura por trip_ids lo deja pendiente
        let late = trip(&d, &r, "2024-01-04");
        let after = calculate_dues(
            &[paid, paid2, late],
            &[settlement],
            SettlementType::Weekly,
        );
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].amount, dec(300));
        assert_eq!(after[0].trip_count, 1);
    }

    #[test]
    fn breakdown_reasons_name_the_trip_date() {
        let d = driver("Kumar", PaymentMode::Split);
        let r = route(200, 100);
        let trips = vec![trip(&d, &r, "2024-01-01")];

        let weekly = calculate_dues(&trips, &[], SettlementType::Weekly);
        assert_eq!(weekly[0].breakdown[0].reason, "Batta (Trip 2024-01-01)");

        let monthly = calculate_dues(&trips, &[], SettlementType::Monthly);
        assert_eq!(monthly[0].breakdown[0].reason, "Salary (Trip 2024-01-01)");
    }

    #[test]
    fn result_is_sorted_by_driver_name() {
        let a = driver("Anand", PaymentMode::Batta);
        let z = driver("Zahir", PaymentMode::Batta);
        let r = route(100, 0);
        let trips = vec![trip(&z, &r, "2024-05-01"), trip(&a, &r, "2024-05-01")];

        let weekly = calculate_dues(&trips, &[], SettlementType::Weekly);
        assert_eq!(weekly[0].driver.name, "Anand");
        assert_eq!(weekly[1].driver.name, "Zahir");
    }
}
