use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::errors::{LoanError, Result as LoanResult};

/// number of fractional digits kept on every monetary value
pub const MONEY_DP: u32 = 2;

/// round a raw decimal to the money unit (half away from zero)
pub fn round_money(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// `(1 + rate)^periods`, exact for whole period counts
pub fn growth_factor(rate: Decimal, periods: Decimal) -> LoanResult<Decimal> {
    let base = Decimal::ONE + rate;
    let factor = if periods.fract().is_zero() {
        periods.to_u64().and_then(|n| base.checked_powu(n))
    } else {
        base.checked_powd(periods)
    };
    factor.ok_or_else(|| LoanError::CalculationError {
        message: format!("growth factor overflow: (1 + {rate})^{periods}"),
    })
}

/// level payment `P*r*(1+r)^n / ((1+r)^n - 1)` for a non-zero periodic rate
pub fn annuity_payment(principal: Decimal, rate: Decimal, periods: Decimal) -> LoanResult<Decimal> {
    let factor = growth_factor(rate, periods)?;
    principal
        .checked_mul(rate)
        .and_then(|d| d.checked_mul(factor))
        .and_then(|d| d.checked_div(factor - Decimal::ONE))
        .ok_or_else(|| LoanError::CalculationError {
            message: format!("installment overflow: {principal} at {rate} over {periods} periods"),
        })
}

/// `P*(1+r)^n`
pub fn compounded_amount(principal: Decimal, rate: Decimal, periods: Decimal) -> LoanResult<Decimal> {
    let factor = growth_factor(rate, periods)?;
    principal
        .checked_mul(factor)
        .ok_or_else(|| LoanError::CalculationError {
            message: format!("compounded amount overflow: {principal} at {rate} over {periods} periods"),
        })
}

/// Money type rounded to cents after every arithmetic step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);
    /// smallest representable amount
    pub const CENT: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(round_money(d))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(round_money(Decimal::from_str(s)?)))
    }

    /// create from integer amount (dollars, rupees, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (cents, paise)
    pub fn from_minor(amount: i64) -> Self {
        Money(Decimal::new(amount, MONEY_DP))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// calculate percentage (e.g., 2% of 1000)
    pub fn percentage(&self, percent: Decimal) -> Self {
        Money::from_decimal(self.0 * percent / Decimal::ONE_HUNDRED)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:.2}", self.0))
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(round_money(self.0 + other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = round_money(self.0 + other.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(round_money(self.0 - other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 = round_money(self.0 - other.0);
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money(round_money(self.0 * other))
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money(round_money(self.0 / other))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + *x)
    }
}

/// annual interest rate held as a percentage (12 means 12% a year)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from percentage (e.g., 12 for 12%)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(p)
    }

    /// create from a fraction (e.g., 0.12 for 12%)
    pub fn from_fraction(f: Decimal) -> Self {
        Rate(f * Decimal::ONE_HUNDRED)
    }

    pub fn as_percent(&self) -> Decimal {
        self.0
    }

    pub fn as_fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// per-period fraction for a given number of periods a year
    pub fn periodic(&self, periods_per_year: u32) -> Decimal {
        self.as_fraction() / Decimal::from(periods_per_year)
    }

    /// monthly fraction, `rate / 12 / 100`
    pub fn monthly(&self) -> Decimal {
        self.0 / Decimal::from(12) / Decimal::ONE_HUNDRED
    }

    /// daily fraction on a 365-day year, `rate / 365 / 100`
    pub fn daily(&self) -> Decimal {
        self.0 / Decimal::from(365) / Decimal::ONE_HUNDRED
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_percent(d)
    }
}
