use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::loan::LoanTerms;

/// simple interest on the full principal for the full term.
/// FLAT and FIXED both land here.
pub fn flat_interest(loan: &LoanTerms) -> Result<Money> {
    let years = loan.years()?;
    Ok(Money::from_decimal(
        loan.principal.as_decimal() * loan.annual_rate.as_fraction() * years,
    ))
}

/// simple interest at the mean of the variable rate series
pub fn variable_interest(loan: &LoanTerms) -> Result<Money> {
    let average = loan
        .average_variable_rate()
        .ok_or(LoanError::MissingRateSeries)?;
    let years = loan.years()?;
    Ok(Money::from_decimal(
        loan.principal.as_decimal() * average / Decimal::ONE_HUNDRED * years,
    ))
}

/// full-term interest split into a fixed-rate part and a variable-rate part,
/// each weighted by its share of the hybrid split. falls back to the annual
/// rate when no variable series is given.
pub fn hybrid_interest(loan: &LoanTerms) -> Result<Money> {
    let split = loan.hybrid_split.ok_or(LoanError::MissingHybridSplit)?;
    let years = loan.years()?;
    let principal = loan.principal.as_decimal();
    let annual = loan.annual_rate.as_percent();
    let variable = loan.average_variable_rate().unwrap_or(annual);

    let fixed_part = Money::from_decimal(
        principal * annual / Decimal::ONE_HUNDRED * years * split.fixed_percent
            / Decimal::ONE_HUNDRED,
    );
    let variable_part = Money::from_decimal(
        principal * variable / Decimal::ONE_HUNDRED * years * split.variable_percent
            / Decimal::ONE_HUNDRED,
    );

    Ok(fixed_part + variable_part)
}

/// the agreed one-time amount, independent of principal and term
pub fn one_time_interest(loan: &LoanTerms) -> Result<Money> {
    loan.one_time_interest_amount
        .ok_or(LoanError::MissingOneTimeAmount)
}
