use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::types::{CalculationMethod, LoanCategory};

/// engine configuration, every section falls back to its defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub settlement: SettlementConfig,
    pub penalty: PenaltyConfig,
    pub validation: ValidationLimits,
    pub category_defaults: HashMap<LoanCategory, ParameterDefaults>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settlement: SettlementConfig::default(),
            penalty: PenaltyConfig::default(),
            validation: ValidationLimits::default(),
            category_defaults: default_category_table(),
        }
    }
}

impl EngineConfig {
    /// parse overrides from json, missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// foreclosure and prepayment charges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// charged on outstanding principal at foreclosure
    pub foreclosure_charge_percent: Decimal,
    /// charged on the prepaid amount
    pub prepayment_charge_percent: Decimal,
    /// balance at or below this counts as paid off when re-amortizing
    pub payoff_tolerance: Money,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            foreclosure_charge_percent: dec!(2),
            prepayment_charge_percent: dec!(1),
            payoff_tolerance: Money::CENT,
        }
    }
}

/// late penalty and early rebate terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    /// percent of the installment charged per started month late
    pub late_rate_percent_per_month: Decimal,
    /// flat percent of the installment rebated for early payment
    pub early_rebate_percent: Decimal,
    /// minimum days early before a rebate applies
    pub early_rebate_min_days: i64,
    /// days counted as one month of lateness
    pub days_per_month: i64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            late_rate_percent_per_month: dec!(2),
            early_rebate_percent: dec!(0.5),
            early_rebate_min_days: 7,
            days_per_month: 30,
        }
    }
}

/// range limits checked by parameter validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    pub min_rate_percent: Decimal,
    pub max_rate_percent: Decimal,
    pub min_tenure_months: u32,
    pub max_tenure_months: u32,
    pub categories: HashMap<LoanCategory, CategoryLimits>,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        let categories = HashMap::from([
            (LoanCategory::Home, CategoryLimits::new(Money::from_major(100_000), 360)),
            (LoanCategory::Vehicle, CategoryLimits::new(Money::from_major(50_000), 96)),
            (LoanCategory::Personal, CategoryLimits::new(Money::from_major(10_000), 60)),
        ]);

        Self {
            min_rate_percent: Decimal::ZERO,
            max_rate_percent: dec!(50),
            min_tenure_months: 1,
            max_tenure_months: 360,
            categories,
        }
    }
}

/// per-category principal floor and tenure ceiling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryLimits {
    pub min_principal: Money,
    pub max_tenure_months: u32,
}

impl CategoryLimits {
    pub fn new(min_principal: Money, max_tenure_months: u32) -> Self {
        Self {
            min_principal,
            max_tenure_months,
        }
    }
}

/// partial loan parameters suggested for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<CalculationMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate_percent: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenure_in_months: Option<u32>,
}

impl ParameterDefaults {
    pub fn new(method: CalculationMethod, interest_rate_percent: Decimal, tenure_in_months: u32) -> Self {
        Self {
            method: Some(method),
            interest_rate_percent: Some(interest_rate_percent),
            tenure_in_months: Some(tenure_in_months),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.method.is_none() && self.interest_rate_percent.is_none() && self.tenure_in_months.is_none()
    }
}

/// standard method, rate and tenure per loan category
pub fn default_category_table() -> HashMap<LoanCategory, ParameterDefaults> {
    use CalculationMethod::*;

    HashMap::from([
        (LoanCategory::Home, ParameterDefaults::new(ReducingBalance, dec!(8.5), 240)),
        (LoanCategory::Vehicle, ParameterDefaults::new(ReducingBalance, dec!(9.5), 60)),
        (LoanCategory::Personal, ParameterDefaults::new(ReducingBalance, dec!(12), 36)),
        (LoanCategory::Business, ParameterDefaults::new(ReducingBalance, dec!(14), 60)),
        (LoanCategory::Education, ParameterDefaults::new(ReducingBalance, dec!(10), 84)),
        (LoanCategory::Gold, ParameterDefaults::new(FlatRate, dec!(11), 12)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.settlement.foreclosure_charge_percent, dec!(2));
        assert_eq!(config.settlement.prepayment_charge_percent, dec!(1));
        assert_eq!(config.penalty.late_rate_percent_per_month, dec!(2));
        assert_eq!(config.penalty.early_rebate_percent, dec!(0.5));
        assert_eq!(config.validation.max_tenure_months, 360);
        assert_eq!(config.category_defaults.len(), 6);
    }

    #[test]
    fn test_partial_json_override() {
        let config = EngineConfig::from_json(
            r#"{ "settlement": { "foreclosure_charge_percent": "3" } }"#,
        )
        .unwrap();
        assert_eq!(config.settlement.foreclosure_charge_percent, dec!(3));
        assert_eq!(config.settlement.prepayment_charge_percent, dec!(1));
        assert_eq!(config.penalty, PenaltyConfig::default());
        assert_eq!(config.category_defaults, default_category_table());
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig::default();
        let parsed = EngineConfig::from_json(&config.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_bad_json_is_a_configuration_error() {
        assert!(matches!(
            EngineConfig::from_json("{ not json"),
            Err(crate::errors::LoanError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_empty_defaults_serialize_to_empty_object() {
        let json = serde_json::to_string(&ParameterDefaults::default()).unwrap();
        assert_eq!(json, "{}");
        assert!(ParameterDefaults::default().is_empty());
    }
}
