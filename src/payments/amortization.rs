use chrono::{DateTime, Months, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::decimal::{annuity_payment, compounded_amount, Money};
use crate::errors::{LoanError, Result};
use crate::types::{CalculationMethod, InstallmentLine};

use super::LoanParameters;

/// scheduled payment in a dated amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPayment {
    pub period: u32,
    pub due_date: DateTime<Utc>,
    pub opening_balance: Money,
    pub installment_amount: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    pub outstanding_principal_after: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

impl ScheduledPayment {
    /// undated view of this payment
    pub fn line(&self) -> InstallmentLine {
        InstallmentLine {
            period: self.period,
            installment_amount: self.installment_amount,
            principal_component: self.principal_component,
            interest_component: self.interest_component,
            outstanding_principal_after: self.outstanding_principal_after,
        }
    }
}

/// amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationSchedule {
    pub parameters: LoanParameters,
    pub start_date: DateTime<Utc>,
    pub installment: Money,
    pub payments: Vec<ScheduledPayment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// generate payment schedule
    pub fn generate(params: &LoanParameters, start_date: DateTime<Utc>) -> Result<Self> {
        let installment = compute_installment(params)?;
        let payments = build_schedule(params, start_date)?;

        let total_interest = payments.iter().map(|p| p.interest_component).sum();
        let total_payment = payments.iter().map(|p| p.installment_amount).sum();

        Ok(Self {
            parameters: params.clone(),
            start_date,
            installment,
            payments,
            total_interest,
            total_payment,
        })
    }

    /// get payment for specific period (1-based)
    pub fn get_payment(&self, period: u32) -> Option<&ScheduledPayment> {
        period
            .checked_sub(1)
            .and_then(|i| self.payments.get(i as usize))
    }

    /// balance left once `periods_paid` installments are paid
    pub fn balance_after(&self, periods_paid: u32) -> Money {
        self.get_payment(periods_paid)
            .map(|p| p.outstanding_principal_after)
            .unwrap_or(self.parameters.principal_amount)
    }

    /// interest still scheduled after `periods_paid` installments
    pub fn remaining_interest_from(&self, periods_paid: u32) -> Money {
        self.payments
            .iter()
            .skip(periods_paid as usize)
            .map(|p| p.interest_component)
            .sum()
    }

    pub fn lines(&self) -> Vec<InstallmentLine> {
        self.payments.iter().map(ScheduledPayment::line).collect()
    }
}

/// single installment amount for the loan's calculation method
pub fn compute_installment(params: &LoanParameters) -> Result<Money> {
    let tenure = positive_tenure(params)?;
    let principal = params.principal_amount;
    let monthly_rate = params.interest_rate.monthly();

    let installment = match params.method {
        CalculationMethod::ReducingBalance => {
            if monthly_rate.is_zero() {
                principal / tenure
            } else {
                Money::from_decimal(annuity_payment(principal.as_decimal(), monthly_rate, tenure)?)
            }
        }
        CalculationMethod::FlatRate => {
            let total_interest = flat_total_interest(params, tenure);
            (principal + total_interest) / tenure
        }
        CalculationMethod::CompoundInterest => {
            // the compounded lump is spread evenly, it is not amortized
            let compounded = compounded_amount(principal.as_decimal(), monthly_rate, tenure)?;
            Money::from_decimal(compounded) / tenure
        }
    };

    Ok(installment)
}

/// undated period-by-period breakdown, rounded at every step
pub fn amortize(params: &LoanParameters) -> Result<Vec<InstallmentLine>> {
    let tenure = positive_tenure(params)?;
    let installment = compute_installment(params)?;
    let monthly_rate = params.interest_rate.monthly();
    let count = params.tenure_in_months;

    let mut lines = Vec::with_capacity(count as usize);
    let mut balance = params.principal_amount;

    let (flat_principal, flat_interest) = match params.method {
        CalculationMethod::FlatRate => (
            params.principal_amount / tenure,
            flat_total_interest(params, tenure) / tenure,
        ),
        _ => (Money::ZERO, Money::ZERO),
    };

    for period in 1..=count {
        let (installment_amount, principal_component, interest_component) = match params.method {
            CalculationMethod::FlatRate => (installment, flat_principal, flat_interest),
            CalculationMethod::ReducingBalance if period == count => {
                // close the loan on the last period
                let interest = (installment - balance).max(Money::ZERO);
                (balance + interest, balance, interest)
            }
            CalculationMethod::ReducingBalance | CalculationMethod::CompoundInterest => {
                let interest = balance * monthly_rate;
                (installment, installment - interest, interest)
            }
        };

        balance = (balance - principal_component).max(Money::ZERO);

        trace!(
            period,
            %installment_amount,
            %principal_component,
            %interest_component,
            %balance,
            "amortization line"
        );

        lines.push(InstallmentLine {
            period,
            installment_amount,
            principal_component,
            interest_component,
            outstanding_principal_after: balance,
        });
    }

    Ok(lines)
}

/// dated, cumulative schedule. the first installment falls due one month
/// after `start_date`.
pub fn build_schedule(
    params: &LoanParameters,
    start_date: DateTime<Utc>,
) -> Result<Vec<ScheduledPayment>> {
    let lines = amortize(params)?;

    let mut payments = Vec::with_capacity(lines.len());
    let mut opening_balance = params.principal_amount;
    let mut cumulative_interest = Money::ZERO;
    let mut cumulative_principal = Money::ZERO;

    for line in lines {
        cumulative_interest += line.interest_component;
        cumulative_principal += line.principal_component;

        payments.push(ScheduledPayment {
            period: line.period,
            due_date: add_months(start_date, line.period)?,
            opening_balance,
            installment_amount: line.installment_amount,
            principal_component: line.principal_component,
            interest_component: line.interest_component,
            outstanding_principal_after: line.outstanding_principal_after,
            cumulative_interest,
            cumulative_principal,
        });

        opening_balance = line.outstanding_principal_after;
    }

    debug!(
        method = %params.method,
        periods = payments.len(),
        %cumulative_interest,
        "built amortization schedule"
    );

    Ok(payments)
}

fn positive_tenure(params: &LoanParameters) -> Result<Decimal> {
    if params.tenure_in_months == 0 {
        return Err(LoanError::CalculationError {
            message: "tenure must be at least one month".to_string(),
        });
    }
    Ok(Decimal::from(params.tenure_in_months))
}

/// simple interest over the tenure, `P * rate * (tenure / 12) / 100`
fn flat_total_interest(params: &LoanParameters, tenure: Decimal) -> Money {
    Money::from_decimal(
        params.principal_amount.as_decimal() * params.interest_rate.as_percent() * tenure
            / Decimal::from(12)
            / Decimal::ONE_HUNDRED,
    )
}

/// add calendar months, clamping to the end of shorter months
fn add_months(date: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| LoanError::CalculationError {
            message: format!("due date out of range: {date} + {months} months"),
        })
}
