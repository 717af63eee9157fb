pub mod amortization;
pub mod settlement;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::loan::LoanTerms;
use crate::types::{CalculationMethod, LoanCategory};

pub use amortization::{AmortizationSchedule, ScheduledPayment};
pub use settlement::{ForeclosureQuote, PrepaymentQuote, SettlementCalculator};

/// month-indexed loan parameters used by the amortization layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanParameters {
    pub principal_amount: Money,
    #[serde(rename = "interestRatePercent")]
    pub interest_rate: Rate,
    pub tenure_in_months: u32,
    pub method: CalculationMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<LoanCategory>,
}

impl LoanParameters {
    pub fn new(
        principal_amount: Money,
        interest_rate: Rate,
        tenure_in_months: u32,
        method: CalculationMethod,
    ) -> Self {
        Self {
            principal_amount,
            interest_rate,
            tenure_in_months,
            method,
            category: None,
        }
    }

    pub fn category(mut self, category: LoanCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// bridge from policy-layer terms. fails when the interest method has no
    /// amortization counterpart or the term is not a whole number of months.
    pub fn from_terms(terms: &LoanTerms) -> Result<Self> {
        let method = CalculationMethod::try_from(terms.interest_method)?;
        let months = terms.years()? * Decimal::from(12);
        let tenure = months
            .fract()
            .is_zero()
            .then(|| months.to_u32())
            .flatten()
            .ok_or_else(|| LoanError::CalculationError {
                message: format!("term of {months} months is not a whole month count"),
            })?;

        Ok(Self::new(terms.principal, terms.annual_rate, tenure, method))
    }

    /// same loan re-amortized over a new balance and tenure
    pub(crate) fn with_balance(&self, principal_amount: Money, tenure_in_months: u32) -> Self {
        Self {
            principal_amount,
            tenure_in_months,
            ..self.clone()
        }
    }
}
