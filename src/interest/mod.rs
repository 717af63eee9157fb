pub mod penalty;
pub mod reducing;
pub mod simple;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::loan::LoanTerms;
use crate::types::{InstallmentLine, InterestMethod};

pub use penalty::PenaltyCalculator;

/// interest accrual policy selected from a loan's interest method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterestPolicy {
    Flat,
    Fixed,
    Reducing,
    Variable,
    Hybrid,
    OneTime,
    Mortgage,
}

impl InterestPolicy {
    /// select the policy for an interest method.
    ///
    /// compound interest has no policy of its own, it is only scheduled by
    /// the amortization engine.
    pub fn for_method(method: InterestMethod) -> Result<Self> {
        let policy = match method {
            InterestMethod::Flat => InterestPolicy::Flat,
            InterestMethod::Fixed => InterestPolicy::Fixed,
            InterestMethod::Reducing => InterestPolicy::Reducing,
            InterestMethod::Variable => InterestPolicy::Variable,
            InterestMethod::Hybrid => InterestPolicy::Hybrid,
            InterestMethod::OneTime => InterestPolicy::OneTime,
            InterestMethod::Mortgage => InterestPolicy::Mortgage,
            InterestMethod::Compound => {
                return Err(LoanError::UnsupportedInterestMethod {
                    method: method.to_string(),
                })
            }
        };
        debug!(%method, ?policy, "selected interest policy");
        Ok(policy)
    }

    /// select from a raw method tag
    pub fn for_tag(tag: &str) -> Result<Self> {
        Self::for_method(tag.parse()?)
    }

    /// select the policy the loan declares
    pub fn for_loan(loan: &LoanTerms) -> Result<Self> {
        Self::for_method(loan.interest_method)
    }

    pub fn method(&self) -> InterestMethod {
        match self {
            InterestPolicy::Flat => InterestMethod::Flat,
            InterestPolicy::Fixed => InterestMethod::Fixed,
            InterestPolicy::Reducing => InterestMethod::Reducing,
            InterestPolicy::Variable => InterestMethod::Variable,
            InterestPolicy::Hybrid => InterestMethod::Hybrid,
            InterestPolicy::OneTime => InterestMethod::OneTime,
            InterestPolicy::Mortgage => InterestMethod::Mortgage,
        }
    }

    /// total interest payable over the loan term
    pub fn total_interest(&self, loan: &LoanTerms) -> Result<Money> {
        match self {
            InterestPolicy::Flat | InterestPolicy::Fixed => simple::flat_interest(loan),
            InterestPolicy::Reducing | InterestPolicy::Mortgage => reducing::total_interest(loan),
            InterestPolicy::Variable => simple::variable_interest(loan),
            InterestPolicy::Hybrid => simple::hybrid_interest(loan),
            InterestPolicy::OneTime => simple::one_time_interest(loan),
        }
    }

    /// principal plus total interest
    pub fn total_payable(&self, loan: &LoanTerms) -> Result<Money> {
        Ok(loan.principal + self.total_interest(loan)?)
    }

    /// whether this policy can break interest down per period
    pub fn supports_schedule(&self) -> bool {
        matches!(self, InterestPolicy::Reducing | InterestPolicy::Mortgage)
    }

    /// period-by-period breakdown, only for declining balance policies
    pub fn schedule(&self, loan: &LoanTerms) -> Result<Vec<InstallmentLine>> {
        match self {
            InterestPolicy::Reducing | InterestPolicy::Mortgage => reducing::schedule(loan),
            InterestPolicy::Flat
            | InterestPolicy::Fixed
            | InterestPolicy::Variable
            | InterestPolicy::Hybrid
            | InterestPolicy::OneTime => Err(LoanError::ScheduleNotSupported {
                method: self.method().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::types::{HybridSplit, TermUnit};
    use rust_decimal_macros::dec;

    fn loan(method: InterestMethod) -> LoanTerms {
        LoanTerms::new(
            Money::from_major(50_000),
            Rate::from_percent(dec!(10)),
            dec!(2),
            TermUnit::Year,
            method,
        )
    }

    #[test]
    fn test_every_policy_method_resolves() {
        for method in InterestMethod::ALL {
            match InterestPolicy::for_method(method) {
                Ok(policy) => assert_eq!(policy.method(), method),
                Err(e) => {
                    assert_eq!(method, InterestMethod::Compound);
                    assert!(matches!(e, LoanError::UnsupportedInterestMethod { .. }));
                }
            }
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        assert!(matches!(
            InterestPolicy::for_tag("BALLOON"),
            Err(LoanError::UnsupportedInterestMethod { .. })
        ));
        assert_eq!(InterestPolicy::for_tag("one_time").unwrap(), InterestPolicy::OneTime);
    }

    #[test]
    fn test_flat_and_fixed_agree() {
        let flat = InterestPolicy::Flat.total_interest(&loan(InterestMethod::Flat)).unwrap();
        let fixed = InterestPolicy::Fixed.total_interest(&loan(InterestMethod::Fixed)).unwrap();
        assert_eq!(flat, Money::from_major(10_000));
        assert_eq!(flat, fixed);
    }

    #[test]
    fn test_one_time_ignores_principal_and_term() {
        let mut terms = loan(InterestMethod::OneTime).one_time_interest(Money::from_major(2_500));
        let policy = InterestPolicy::for_loan(&terms).unwrap();
        assert_eq!(policy.total_interest(&terms).unwrap(), Money::from_major(2_500));

        terms.principal = Money::from_major(1_000_000);
        terms.term_value = dec!(30);
        assert_eq!(policy.total_interest(&terms).unwrap(), Money::from_major(2_500));
    }

    #[test]
    fn test_mortgage_matches_reducing() {
        let reducing = loan(InterestMethod::Reducing);
        let mortgage = loan(InterestMethod::Mortgage);
        assert_eq!(
            InterestPolicy::Reducing.total_interest(&reducing).unwrap(),
            InterestPolicy::Mortgage.total_interest(&mortgage).unwrap()
        );
        assert_eq!(
            InterestPolicy::Reducing.schedule(&reducing).unwrap(),
            InterestPolicy::Mortgage.schedule(&mortgage).unwrap()
        );
    }

    #[test]
    fn test_schedule_capability() {
        let terms = loan(InterestMethod::Hybrid).hybrid_split(HybridSplit::new(dec!(50), dec!(50)));
        assert!(!InterestPolicy::Hybrid.supports_schedule());
        assert!(matches!(
            InterestPolicy::Hybrid.schedule(&terms),
            Err(LoanError::ScheduleNotSupported { .. })
        ));
        assert_eq!(InterestPolicy::Reducing.schedule(&terms).unwrap().len(), 24);
    }

    #[test]
    fn test_total_payable() {
        let terms = loan(InterestMethod::Flat);
        assert_eq!(
            InterestPolicy::Flat.total_payable(&terms).unwrap(),
            Money::from_major(60_000)
        );
    }
}
