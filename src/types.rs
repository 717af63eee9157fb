use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::decimal::Money;
use crate::errors::LoanError;

/// interest method tag, the one canonical list for both layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterestMethod {
    /// simple interest on the original principal
    Flat,
    /// same formula as flat, kept as its own tag
    Fixed,
    /// declining balance installments
    Reducing,
    /// simple interest at the average of a rate series
    Variable,
    /// weighted blend of fixed and variable interest
    Hybrid,
    /// a single pre-agreed interest amount
    OneTime,
    /// declining balance, same as reducing
    Mortgage,
    /// monthly compounding, amortization layer only
    Compound,
}

impl InterestMethod {
    pub const ALL: [InterestMethod; 8] = [
        InterestMethod::Flat,
        InterestMethod::Fixed,
        InterestMethod::Reducing,
        InterestMethod::Variable,
        InterestMethod::Hybrid,
        InterestMethod::OneTime,
        InterestMethod::Mortgage,
        InterestMethod::Compound,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterestMethod::Flat => "FLAT",
            InterestMethod::Fixed => "FIXED",
            InterestMethod::Reducing => "REDUCING",
            InterestMethod::Variable => "VARIABLE",
            InterestMethod::Hybrid => "HYBRID",
            InterestMethod::OneTime => "ONE_TIME",
            InterestMethod::Mortgage => "MORTGAGE",
            InterestMethod::Compound => "COMPOUND",
        }
    }
}

impl fmt::Display for InterestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterestMethod {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_uppercase();
        InterestMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == tag)
            .ok_or_else(|| LoanError::UnsupportedInterestMethod {
                method: s.to_string(),
            })
    }
}

/// the subset of interest methods the amortization engine can schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationMethod {
    ReducingBalance,
    FlatRate,
    CompoundInterest,
}

impl CalculationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationMethod::ReducingBalance => "REDUCING_BALANCE",
            CalculationMethod::FlatRate => "FLAT_RATE",
            CalculationMethod::CompoundInterest => "COMPOUND_INTEREST",
        }
    }
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculationMethod {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "REDUCING_BALANCE" => Ok(CalculationMethod::ReducingBalance),
            "FLAT_RATE" => Ok(CalculationMethod::FlatRate),
            "COMPOUND_INTEREST" => Ok(CalculationMethod::CompoundInterest),
            _ => Err(LoanError::UnsupportedInterestMethod {
                method: s.to_string(),
            }),
        }
    }
}

impl TryFrom<InterestMethod> for CalculationMethod {
    type Error = LoanError;

    fn try_from(method: InterestMethod) -> Result<Self, Self::Error> {
        match method {
            InterestMethod::Reducing => Ok(CalculationMethod::ReducingBalance),
            InterestMethod::Flat => Ok(CalculationMethod::FlatRate),
            InterestMethod::Compound => Ok(CalculationMethod::CompoundInterest),
            InterestMethod::Fixed
            | InterestMethod::Variable
            | InterestMethod::Hybrid
            | InterestMethod::OneTime
            | InterestMethod::Mortgage => Err(LoanError::UnsupportedInterestMethod {
                method: method.to_string(),
            }),
        }
    }
}

impl From<CalculationMethod> for InterestMethod {
    fn from(method: CalculationMethod) -> Self {
        match method {
            CalculationMethod::ReducingBalance => InterestMethod::Reducing,
            CalculationMethod::FlatRate => InterestMethod::Flat,
            CalculationMethod::CompoundInterest => InterestMethod::Compound,
        }
    }
}

/// unit a loan term is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TermUnit {
    Day,
    Week,
    Month,
    Year,
}

impl TermUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TermUnit::Day => "DAY",
            TermUnit::Week => "WEEK",
            TermUnit::Month => "MONTH",
            TermUnit::Year => "YEAR",
        }
    }
}

impl fmt::Display for TermUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TermUnit {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAY" => Ok(TermUnit::Day),
            "WEEK" => Ok(TermUnit::Week),
            "MONTH" => Ok(TermUnit::Month),
            "YEAR" => Ok(TermUnit::Year),
            _ => Err(LoanError::InvalidTermUnit {
                unit: s.to_string(),
            }),
        }
    }
}

/// loan product category, drives validation limits and defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanCategory {
    Home,
    Vehicle,
    Personal,
    Business,
    Education,
    Gold,
}

impl LoanCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanCategory::Home => "home",
            LoanCategory::Vehicle => "vehicle",
            LoanCategory::Personal => "personal",
            LoanCategory::Business => "business",
            LoanCategory::Education => "education",
            LoanCategory::Gold => "gold",
        }
    }
}

impl fmt::Display for LoanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanCategory {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(LoanCategory::Home),
            "vehicle" => Ok(LoanCategory::Vehicle),
            "personal" => Ok(LoanCategory::Personal),
            "business" => Ok(LoanCategory::Business),
            "education" => Ok(LoanCategory::Education),
            "gold" => Ok(LoanCategory::Gold),
            _ => Err(LoanError::InvalidConfiguration {
                message: format!("unknown loan category: {s}"),
            }),
        }
    }
}

/// weights applied to the fixed and variable parts of hybrid interest.
/// the two percentages are not required to sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HybridSplit {
    pub fixed_percent: Decimal,
    pub variable_percent: Decimal,
}

impl HybridSplit {
    pub fn new(fixed_percent: Decimal, variable_percent: Decimal) -> Self {
        Self {
            fixed_percent,
            variable_percent,
        }
    }
}

/// one period of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentLine {
    /// 1-based sequence number
    pub period: u32,
    pub installment_amount: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    pub outstanding_principal_after: Money,
}
