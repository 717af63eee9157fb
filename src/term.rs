use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::{LoanError, Result};
use crate::types::TermUnit;

/// days in a year for term conversion, leap years are not adjusted for
pub const DAYS_PER_YEAR: Decimal = dec!(365);
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// convert a term in mixed units into fractional years.
///
/// only DAY, MONTH and YEAR terms convert; WEEK is accepted as a tag but
/// has no conversion and fails like any unknown unit.
pub fn to_years(term_value: Decimal, term_unit: TermUnit) -> Result<Decimal> {
    match term_unit {
        TermUnit::Year => Ok(term_value),
        TermUnit::Month => Ok(term_value / MONTHS_PER_YEAR),
        TermUnit::Day => Ok(term_value / DAYS_PER_YEAR),
        TermUnit::Week => Err(LoanError::InvalidTermUnit {
            unit: term_unit.to_string(),
        }),
    }
}

/// same as [`to_years`] but takes the raw unit tag
pub fn to_years_tagged(term_value: Decimal, term_unit: &str) -> Result<Decimal> {
    to_years(term_value, term_unit.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_years_and_months() {
        assert_eq!(to_years(dec!(2), TermUnit::Year).unwrap(), dec!(2));
        assert_eq!(to_years(dec!(18), TermUnit::Month).unwrap(), dec!(1.5));
    }

    #[test]
    fn test_days_use_flat_365() {
        assert_eq!(to_years(dec!(365), TermUnit::Day).unwrap(), Decimal::ONE);
        assert_eq!(to_years(dec!(73), TermUnit::Day).unwrap(), dec!(0.2));
    }

    #[test]
    fn test_unconvertible_units() {
        assert!(matches!(
            to_years(dec!(4), TermUnit::Week),
            Err(LoanError::InvalidTermUnit { .. })
        ));
        assert!(matches!(
            to_years_tagged(dec!(4), "QUARTER"),
            Err(LoanError::InvalidTermUnit { .. })
        ));
        assert_eq!(to_years_tagged(dec!(6), "MONTH").unwrap(), dec!(0.5));
    }
}
