use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PenaltyConfig;
use crate::decimal::Money;

const SECONDS_PER_DAY: i64 = 86_400;

/// whole days from `from` to `to`, floored (negative when `to` is earlier)
pub fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// outcome of paying one installment on a given date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentSettlement {
    pub installment_amount: Money,
    pub days_late: i64,
    pub days_early: i64,
    pub penalty: Money,
    pub rebate: Money,
    /// installment plus penalty less rebate
    pub amount_due: Money,
}

/// late payment penalties and early payment rebates
#[derive(Debug, Clone, Default)]
pub struct PenaltyCalculator {
    pub config: PenaltyConfig,
}

impl PenaltyCalculator {
    pub fn new(config: PenaltyConfig) -> Self {
        Self { config }
    }

    /// penalty for paying after the due date.
    ///
    /// every started block of `days_per_month` days counts as a full month.
    /// `rate_percent` is per month and defaults to the configured rate.
    pub fn late_penalty(
        &self,
        installment_amount: Money,
        due_date: DateTime<Utc>,
        payment_date: DateTime<Utc>,
        rate_percent: Option<Decimal>,
    ) -> Money {
        let days_late = whole_days_between(due_date, payment_date);
        if days_late <= 0 {
            return Money::ZERO;
        }

        let per_month = self.config.days_per_month.max(1);
        let months_late = (days_late + per_month - 1) / per_month;
        let rate = rate_percent.unwrap_or(self.config.late_rate_percent_per_month);

        let penalty = Money::from_decimal(
            installment_amount.as_decimal() * rate * Decimal::from(months_late)
                / Decimal::ONE_HUNDRED,
        );
        debug!(days_late, months_late, %penalty, "late payment penalty");
        penalty
    }

    /// flat rebate for paying at least the minimum number of days early.
    /// the rebate does not grow with the number of days.
    pub fn early_rebate(
        &self,
        installment_amount: Money,
        due_date: DateTime<Utc>,
        payment_date: DateTime<Utc>,
        rate_percent: Option<Decimal>,
    ) -> Money {
        let days_early = whole_days_between(payment_date, due_date);
        if days_early <= 0 || days_early < self.config.early_rebate_min_days {
            return Money::ZERO;
        }

        let rate = rate_percent.unwrap_or(self.config.early_rebate_percent);
        installment_amount.percentage(rate)
    }

    /// penalty or rebate for one installment at the configured rates
    pub fn settle_installment(
        &self,
        installment_amount: Money,
        due_date: DateTime<Utc>,
        payment_date: DateTime<Utc>,
    ) -> InstallmentSettlement {
        let days = whole_days_between(due_date, payment_date);
        let penalty = self.late_penalty(installment_amount, due_date, payment_date, None);
        let rebate = self.early_rebate(installment_amount, due_date, payment_date, None);

        InstallmentSettlement {
            installment_amount,
            days_late: days.max(0),
            days_early: (-days).max(0),
            penalty,
            rebate,
            amount_due: installment_amount + penalty - rebate,
        }
    }
}
