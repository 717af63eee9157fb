use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::term;
use crate::types::{HybridSplit, InterestMethod, TermUnit};

fn default_payments_per_year() -> u32 {
    12
}

/// loan terms consumed by the interest policies.
///
/// only the method-specific fields the declared `interest_method` needs are
/// read; the rest are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    pub principal: Money,
    #[serde(rename = "annualRatePercent")]
    pub annual_rate: Rate,
    pub term_value: Decimal,
    pub term_unit: TermUnit,
    #[serde(default = "default_payments_per_year")]
    pub payments_per_year: u32,
    pub interest_method: InterestMethod,
    #[serde(default)]
    pub variable_rates: Vec<Decimal>,
    #[serde(default)]
    pub hybrid_split: Option<HybridSplit>,
    #[serde(default)]
    pub one_time_interest_amount: Option<Money>,
}

impl LoanTerms {
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        term_value: Decimal,
        term_unit: TermUnit,
        interest_method: InterestMethod,
    ) -> Self {
        Self {
            principal,
            annual_rate,
            term_value,
            term_unit,
            payments_per_year: default_payments_per_year(),
            interest_method,
            variable_rates: Vec::new(),
            hybrid_split: None,
            one_time_interest_amount: None,
        }
    }

    pub fn payments_per_year(mut self, payments: u32) -> Self {
        self.payments_per_year = payments;
        self
    }

    pub fn variable_rates(mut self, rates: Vec<Decimal>) -> Self {
        self.variable_rates = rates;
        self
    }

    pub fn hybrid_split(mut self, split: HybridSplit) -> Self {
        self.hybrid_split = Some(split);
        self
    }

    pub fn one_time_interest(mut self, amount: Money) -> Self {
        self.one_time_interest_amount = Some(amount);
        self
    }

    /// term length in fractional years
    pub fn years(&self) -> Result<Decimal> {
        term::to_years(self.term_value, self.term_unit)
    }

    /// arithmetic mean of the variable rate series, if any
    pub fn average_variable_rate(&self) -> Option<Decimal> {
        if self.variable_rates.is_empty() {
            return None;
        }
        let sum: Decimal = self.variable_rates.iter().sum();
        Some(sum / Decimal::from(self.variable_rates.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builder_defaults() {
        let loan = LoanTerms::new(
            Money::from_major(10_000),
            Rate::from_percent(dec!(10)),
            dec!(12),
            TermUnit::Month,
            InterestMethod::Flat,
        );
        assert_eq!(loan.payments_per_year, 12);
        assert_eq!(loan.years().unwrap(), Decimal::ONE);
        assert_eq!(loan.average_variable_rate(), None);
    }

    #[test]
    fn test_average_variable_rate() {
        let loan = LoanTerms::new(
            Money::from_major(10_000),
            Rate::from_percent(dec!(10)),
            dec!(1),
            TermUnit::Year,
            InterestMethod::Variable,
        )
        .variable_rates(vec![dec!(8), dec!(10), dec!(12)]);
        assert_eq!(loan.average_variable_rate(), Some(dec!(10)));
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let json = r#"{
            "principal": "50000",
            "annualRatePercent": "10",
            "termValue": "2",
            "termUnit": "YEAR",
            "interestMethod": "HYBRID",
            "hybridSplit": { "fixedPercent": "60", "variablePercent": "40" }
        }"#;
        let loan: LoanTerms = serde_json::from_str(json).unwrap();
        assert_eq!(loan.payments_per_year, 12);
        assert_eq!(loan.interest_method, InterestMethod::Hybrid);
        assert_eq!(loan.hybrid_split, Some(HybridSplit::new(dec!(60), dec!(40))));
        assert!(loan.variable_rates.is_empty());
    }
}
