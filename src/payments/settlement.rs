use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SettlementConfig;
use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::interest::penalty::whole_days_between;
use crate::types::InstallmentLine;

use super::amortization::{amortize, compute_installment, AmortizationSchedule};
use super::LoanParameters;

/// payoff quote for closing a loan early
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeclosureQuote {
    pub periods_paid: u32,
    pub outstanding_principal: Money,
    pub accrued_interest: Money,
    pub foreclosure_charge: Money,
    pub total_payoff: Money,
    /// interest the schedule still had to run
    pub remaining_interest: Money,
    pub interest_saved: Money,
    /// may be negative when the charge outweighs the interest saved
    pub net_savings: Money,
}

/// effect of a partial prepayment on the rest of the loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepaymentQuote {
    pub outstanding_principal: Money,
    pub charge: Money,
    pub net_amount_applied: Money,
    pub new_outstanding_principal: Money,
    pub revised_installment: Money,
    pub revised_remaining_periods: u32,
    pub interest_saved: Money,
    pub periods_reduced: u32,
}

/// foreclosure and prepayment quotes built on the amortization schedule
#[derive(Debug, Clone, Default)]
pub struct SettlementCalculator {
    pub config: SettlementConfig,
}

impl SettlementCalculator {
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    /// foreclosure quote as of the provider's current time
    pub fn foreclosure_quote(
        &self,
        params: &LoanParameters,
        start_date: DateTime<Utc>,
        periods_paid: u32,
        charge_percent: Option<Decimal>,
        time_provider: &SafeTimeProvider,
    ) -> Result<ForeclosureQuote> {
        self.foreclosure_quote_as_of(
            params,
            start_date,
            periods_paid,
            charge_percent,
            time_provider.now(),
        )
    }

    /// foreclosure quote as of an explicit date.
    ///
    /// interest accrues daily on the outstanding principal from the due date
    /// of the last paid installment. nothing accrues before the first
    /// installment is paid.
    pub fn foreclosure_quote_as_of(
        &self,
        params: &LoanParameters,
        start_date: DateTime<Utc>,
        periods_paid: u32,
        charge_percent: Option<Decimal>,
        as_of: DateTime<Utc>,
    ) -> Result<ForeclosureQuote> {
        ensure_open(params, periods_paid)?;

        let schedule = AmortizationSchedule::generate(params, start_date)?;
        let outstanding_principal = schedule.balance_after(periods_paid);
        let remaining_interest = schedule.remaining_interest_from(periods_paid);

        let accrued_interest = match schedule.get_payment(periods_paid) {
            Some(last_paid) => {
                let days = whole_days_between(last_paid.due_date, as_of).max(0);
                Money::from_decimal(
                    Decimal::from(days)
                        * params.interest_rate.daily()
                        * outstanding_principal.as_decimal(),
                )
            }
            None => Money::ZERO,
        };

        let charge_percent = charge_percent.unwrap_or(self.config.foreclosure_charge_percent);
        let foreclosure_charge = outstanding_principal.percentage(charge_percent);
        let total_payoff = outstanding_principal + accrued_interest + foreclosure_charge;
        let interest_saved = (remaining_interest - accrued_interest).max(Money::ZERO);
        let net_savings = interest_saved - foreclosure_charge;

        debug!(
            periods_paid,
            %outstanding_principal,
            %accrued_interest,
            %total_payoff,
            %net_savings,
            "foreclosure quote"
        );

        Ok(ForeclosureQuote {
            periods_paid,
            outstanding_principal,
            accrued_interest,
            foreclosure_charge,
            total_payoff,
            remaining_interest,
            interest_saved,
            net_savings,
        })
    }

    /// quote for a partial prepayment after `periods_paid` installments.
    ///
    /// with `reduce_installment` the remaining period count is kept and the
    /// installment recomputed; otherwise the installment is kept and the loan
    /// finishes sooner.
    pub fn prepayment_quote(
        &self,
        params: &LoanParameters,
        periods_paid: u32,
        amount: Money,
        charge_percent: Option<Decimal>,
        reduce_installment: bool,
    ) -> Result<PrepaymentQuote> {
        ensure_open(params, periods_paid)?;
        if !amount.is_positive() {
            return Err(LoanError::NonPositivePrepayment { amount });
        }

        let lines = amortize(params)?;
        let outstanding_principal = balance_after(&lines, params, periods_paid);
        if amount >= outstanding_principal {
            return Err(LoanError::PrepaymentExceedsBalance {
                amount,
                outstanding: outstanding_principal,
            });
        }

        let charge_percent = charge_percent.unwrap_or(self.config.prepayment_charge_percent);
        let charge = amount.percentage(charge_percent);
        let net_amount_applied = amount - charge;
        let new_outstanding_principal = outstanding_principal - net_amount_applied;

        let remaining_periods = params.tenure_in_months - periods_paid;
        let original_remaining_interest: Money = lines
            .iter()
            .skip(periods_paid as usize)
            .map(|l| l.interest_component)
            .sum();

        let (revised_installment, revised_remaining_periods, interest_saved) = if reduce_installment {
            let revised = params.with_balance(new_outstanding_principal, remaining_periods);
            let revised_installment = compute_installment(&revised)?;
            let revised_interest: Money = amortize(&revised)?
                .iter()
                .map(|l| l.interest_component)
                .sum();
            (
                revised_installment,
                remaining_periods,
                original_remaining_interest - revised_interest,
            )
        } else {
            let installment = compute_installment(params)?;
            let periods = self.periods_to_repay(
                params,
                new_outstanding_principal,
                installment,
                remaining_periods,
            );
            // approximation: residual of the installments over the new balance
            let paid_interest =
                installment * Decimal::from(periods) - new_outstanding_principal;
            (installment, periods, original_remaining_interest - paid_interest)
        };

        let interest_saved = interest_saved.max(Money::ZERO);
        let periods_reduced = remaining_periods.saturating_sub(revised_remaining_periods);

        debug!(
            periods_paid,
            %amount,
            %new_outstanding_principal,
            reduce_installment,
            revised_remaining_periods,
            %interest_saved,
            "prepayment quote"
        );

        Ok(PrepaymentQuote {
            outstanding_principal,
            charge,
            net_amount_applied,
            new_outstanding_principal,
            revised_installment,
            revised_remaining_periods,
            interest_saved,
            periods_reduced,
        })
    }

    /// months needed to clear `balance` at a fixed installment, capped at
    /// `max_periods`
    fn periods_to_repay(
        &self,
        params: &LoanParameters,
        balance: Money,
        installment: Money,
        max_periods: u32,
    ) -> u32 {
        let monthly_rate = params.interest_rate.monthly();
        let mut balance = balance;
        let mut periods = 0;

        while balance > self.config.payoff_tolerance && periods < max_periods {
            let interest = balance * monthly_rate;
            balance -= installment - interest;
            periods += 1;
        }

        periods
    }
}

fn ensure_open(params: &LoanParameters, periods_paid: u32) -> Result<()> {
    if periods_paid >= params.tenure_in_months {
        return Err(LoanError::LoanAlreadyComplete {
            periods_paid,
            tenure: params.tenure_in_months,
        });
    }
    Ok(())
}

fn balance_after(lines: &[InstallmentLine], params: &LoanParameters, periods_paid: u32) -> Money {
    periods_paid
        .checked_sub(1)
        .and_then(|i| lines.get(i as usize))
        .map(|l| l.outstanding_principal_after)
        .unwrap_or(params.principal_amount)
}
