//! Resolución del período de un settlement
//!
//! El rango (min, max) sobre las fechas de los viajes que contribuyeron
//! al due. Desde que la cobertura se decide por trip_ids explícitos, el
//! rango es solo metadata de auditoría del recibo.

use chrono::NaiveDate;

/// Resolver el rango inclusivo que cubre las fechas dadas.
/// Devuelve None si no hay fechas.
pub fn resolve_period(dates: &[NaiveDate]) -> Option<(NaiveDate, NaiveDate)> {
    let start = dates.iter().min()?;
    let end = dates.iter().max()?;
    Some((*start, *end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn empty_dates_have_no_period() {
        assert_eq!(resolve_period(&[]), None);
    }

    #[test]
    fn single_date_is_its_own_period() {
        let d = date("2024-01-05");
        assert_eq!(resolve_period(&[d]), Some((d, d)));
    }

    #[test]
    fn period_is_min_max_regardless_of_order() {
        let dates = [date("2024-01-08"), date("2024-01-01"), date("2024-01-04")];
        assert_eq!(
            resolve_period(&dates),
            Some((date("2024-01-01"), date("2024-01-08")))
        );
    }
}
