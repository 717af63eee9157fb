use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::trace;

use crate::decimal::{annuity_payment, Money};
use crate::errors::{LoanError, Result};
use crate::loan::LoanTerms;
use crate::types::InstallmentLine;

/// digits kept on a period count, drops the residue of dividing months by 12
const PERIOD_DP: u32 = 12;

/// number of payment periods, possibly fractional for odd terms
pub fn period_count(loan: &LoanTerms) -> Result<Decimal> {
    let periods = (loan.years()? * Decimal::from(loan.payments_per_year)).round_dp(PERIOD_DP);
    if periods <= Decimal::ZERO {
        return Err(LoanError::CalculationError {
            message: format!("non-positive period count {periods}"),
        });
    }
    Ok(periods)
}

/// declining balance installment, `P*r*(1+r)^n / ((1+r)^n - 1)`
pub fn installment(loan: &LoanTerms) -> Result<Money> {
    let periods = period_count(loan)?;
    let rate = loan.annual_rate.periodic(loan.payments_per_year);
    let principal = loan.principal.as_decimal();

    if rate.is_zero() {
        return Ok(Money::from_decimal(principal / periods));
    }

    Ok(Money::from_decimal(annuity_payment(principal, rate, periods)?))
}

/// interest paid over the life of the loan at the rounded installment,
/// floored at zero when rounding leaves the installments short
pub fn total_interest(loan: &LoanTerms) -> Result<Money> {
    let periods = period_count(loan)?;
    let emi = installment(loan)?;
    Ok(((emi * periods) - loan.principal).max(Money::ZERO))
}

/// period-by-period breakdown, rounded at every step.
///
/// the final line takes whatever balance is left as its principal so the
/// principal column always sums to the original principal.
pub fn schedule(loan: &LoanTerms) -> Result<Vec<InstallmentLine>> {
    let periods = period_count(loan)?;
    let count = periods
        .ceil()
        .to_u32()
        .ok_or_else(|| LoanError::CalculationError {
            message: format!("period count {periods} out of range"),
        })?;
    let rate = loan.annual_rate.periodic(loan.payments_per_year);
    let emi = installment(loan)?;

    let mut lines = Vec::with_capacity(count as usize);
    let mut balance = loan.principal;

    for period in 1..=count {
        let interest = balance * rate;
        let (installment_amount, principal_component) = if period == count {
            (balance + interest, balance)
        } else {
            (emi, emi - interest)
        };
        balance -= principal_component;

        trace!(period, %interest, %principal_component, %balance, "policy schedule line");

        lines.push(InstallmentLine {
            period,
            installment_amount,
            principal_component,
            interest_component: interest,
            outstanding_principal_after: balance,
        });
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::interest::InterestPolicy;
    use crate::types::{InterestMethod, TermUnit};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn loan() -> LoanTerms {
        LoanTerms::new(
            Money::from_major(100_000),
            Rate::from_percent(dec!(12)),
            dec!(1),
            TermUnit::Year,
            InterestMethod::Reducing,
        )
    }

    #[test]
    fn test_installment() {
        assert_eq!(installment(&loan()).unwrap(), Money::from_str_exact("8884.88").unwrap());
    }

    #[test]
    fn test_total_interest() {
        // 8884.88 * 12 - 100000
        assert_eq!(total_interest(&loan()).unwrap(), Money::from_str_exact("6618.56").unwrap());
    }

    #[test]
    fn test_schedule_closes_to_zero() {
        let lines = schedule(&loan()).unwrap();
        assert_eq!(lines.len(), 12);

        let first = &lines[0];
        assert_eq!(first.interest_component, Money::from_major(1_000));
        assert_eq!(first.principal_component, Money::from_str_exact("7884.88").unwrap());

        let principal: Money = lines.iter().map(|l| l.principal_component).sum();
        assert_eq!(principal, Money::from_major(100_000));
        assert_eq!(lines.last().unwrap().outstanding_principal_after, Money::ZERO);

        for line in &lines {
            assert_eq!(line.installment_amount, line.principal_component + line.interest_component);
        }
    }

    #[test]
    fn test_quarterly_payments() {
        let terms = loan().payments_per_year(4);
        let lines = schedule(&terms).unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].interest_component, Money::from_major(3_000));
    }

    #[test]
    fn test_zero_rate() {
        let mut terms = loan();
        terms.annual_rate = Rate::ZERO;
        let lines = schedule(&terms).unwrap();
        assert_eq!(lines[0].installment_amount, Money::from_str_exact("8333.33").unwrap());
        assert_eq!(lines[11].principal_component, Money::from_str_exact("8333.37").unwrap());
        assert_eq!(total_interest(&terms).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_month_terms_give_whole_periods() {
        // 5 / 12 * 12 leaves a residue in the last decimal digit
        for months in [5, 7, 8, 11] {
            let terms = LoanTerms::new(
                Money::from_major(100_000),
                Rate::from_percent(dec!(12)),
                Decimal::from(months),
                TermUnit::Month,
                InterestMethod::Reducing,
            );
            assert_eq!(period_count(&terms).unwrap(), Decimal::from(months));
            assert_eq!(schedule(&terms).unwrap().len(), months as usize);
        }
    }

    #[test]
    fn test_day_terms_round_up_to_a_final_short_period() {
        let terms = LoanTerms::new(
            Money::from_major(100_000),
            Rate::from_percent(dec!(12)),
            dec!(213),
            TermUnit::Day,
            InterestMethod::Reducing,
        );
        let lines = schedule(&terms).unwrap();
        assert_eq!(lines.len(), 8);
        assert!(lines[7].installment_amount < lines[0].installment_amount);
        assert_eq!(lines[7].outstanding_principal_after, Money::ZERO);
    }

    #[test]
    fn test_overflowing_installment_is_an_error() {
        // (1 + 1/12)^720 fits in a decimal, the installment product does not
        let terms = LoanTerms::new(
            Money::from_major(1_000_000),
            Rate::from_percent(dec!(100)),
            dec!(60),
            TermUnit::Year,
            InterestMethod::Reducing,
        );
        assert!(matches!(installment(&terms), Err(LoanError::CalculationError { .. })));
        assert!(matches!(total_interest(&terms), Err(LoanError::CalculationError { .. })));
        assert!(matches!(schedule(&terms), Err(LoanError::CalculationError { .. })));
    }

    fn term_for(unit: TermUnit, raw: u32) -> Decimal {
        match unit {
            TermUnit::Day => Decimal::from(raw.max(10)),
            TermUnit::Month => Decimal::from(raw % 120 + 1),
            _ => Decimal::from(raw % 10 + 1),
        }
    }

    proptest! {
        #[test]
        fn prop_policy_schedule_closes(
            principal in 10_000i64..5_000_000,
            rate_bps in 0u32..2_000,
            unit in prop_oneof![Just(TermUnit::Day), Just(TermUnit::Month), Just(TermUnit::Year)],
            raw_term in 1u32..=1_000,
            mortgage in any::<bool>(),
        ) {
            let method = if mortgage { InterestMethod::Mortgage } else { InterestMethod::Reducing };
            let terms = LoanTerms::new(
                Money::from_major(principal),
                Rate::from_percent(Decimal::new(rate_bps as i64, 2)),
                term_for(unit, raw_term),
                unit,
                method,
            );
            let lines = InterestPolicy::for_loan(&terms).unwrap().schedule(&terms).unwrap();

            let expected_lines = period_count(&terms).unwrap().ceil().to_usize().unwrap();
            prop_assert_eq!(lines.len(), expected_lines);

            let principal_sum: Money = lines.iter().map(|l| l.principal_component).sum();
            prop_assert_eq!(principal_sum, Money::from_major(principal));
            prop_assert_eq!(lines.last().unwrap().outstanding_principal_after, Money::ZERO);

            let mut previous = Money::from_major(principal);
            for line in &lines {
                prop_assert_eq!(
                    line.installment_amount,
                    line.principal_component + line.interest_component
                );
                prop_assert!(!line.principal_component.is_negative());
                prop_assert!(line.outstanding_principal_after <= previous);
                previous = line.outstanding_principal_after;
            }
        }
    }
}
