use std::collections::HashMap;

use tracing::debug;

use crate::config::{default_category_table, ParameterDefaults, ValidationLimits};
use crate::payments::LoanParameters;
use crate::types::LoanCategory;

/// range and per-category checks on amortization parameters
#[derive(Debug, Clone, Default)]
pub struct ParameterValidator {
    pub limits: ValidationLimits,
}

impl ParameterValidator {
    pub fn new(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    /// every violation found, empty when the parameters are acceptable.
    /// does not stop at the first problem.
    pub fn validate(&self, params: &LoanParameters) -> Vec<String> {
        let limits = &self.limits;
        let mut violations = Vec::new();

        if !params.principal_amount.is_positive() {
            violations.push("principal amount must be greater than 0".to_string());
        }

        let rate = params.interest_rate.as_percent();
        if rate < limits.min_rate_percent || rate > limits.max_rate_percent {
            violations.push(format!(
                "interest rate must be between {}% and {}%",
                limits.min_rate_percent, limits.max_rate_percent
            ));
        }

        let tenure = params.tenure_in_months;
        if tenure < limits.min_tenure_months || tenure > limits.max_tenure_months {
            violations.push(format!(
                "tenure must be between {} and {} months",
                limits.min_tenure_months, limits.max_tenure_months
            ));
        }

        if let Some(category) = params.category {
            if let Some(category_limits) = limits.categories.get(&category) {
                if params.principal_amount < category_limits.min_principal {
                    violations.push(format!(
                        "{category} loans require a minimum principal of {}",
                        category_limits.min_principal
                    ));
                }
                if tenure > category_limits.max_tenure_months {
                    violations.push(format!(
                        "{category} loans allow a maximum tenure of {} months",
                        category_limits.max_tenure_months
                    ));
                }
            }
        }

        if !violations.is_empty() {
            debug!(count = violations.len(), "loan parameters rejected");
        }
        violations
    }
}

/// validate against the default limits
pub fn validate_parameters(params: &LoanParameters) -> Vec<String> {
    ParameterValidator::default().validate(params)
}

/// per-category suggested method, rate and tenure
#[derive(Debug, Clone)]
pub struct PolicyDefaults {
    table: HashMap<LoanCategory, ParameterDefaults>,
}

impl Default for PolicyDefaults {
    fn default() -> Self {
        Self::new(default_category_table())
    }
}

impl PolicyDefaults {
    pub fn new(table: HashMap<LoanCategory, ParameterDefaults>) -> Self {
        Self { table }
    }

    pub fn for_category(&self, category: LoanCategory) -> ParameterDefaults {
        self.table.get(&category).copied().unwrap_or_default()
    }

    /// defaults for a raw category tag, empty for unknown categories
    pub fn defaults_for(&self, category: &str) -> ParameterDefaults {
        category
            .parse::<LoanCategory>()
            .map(|c| self.for_category(c))
            .unwrap_or_default()
    }
}

/// defaults from the standard table
pub fn defaults_for(category: &str) -> ParameterDefaults {
    PolicyDefaults::default().defaults_for(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::types::CalculationMethod;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn params(principal: i64, rate: rust_decimal::Decimal, tenure: u32) -> LoanParameters {
        LoanParameters::new(
            Money::from_major(principal),
            Rate::from_percent(rate),
            tenure,
            CalculationMethod::ReducingBalance,
        )
    }

    #[test]
    fn test_valid_parameters() {
        assert!(validate_parameters(&params(100_000, dec!(12), 12)).is_empty());
        assert!(validate_parameters(&params(1, dec!(0), 1)).is_empty());
        assert!(validate_parameters(&params(1, dec!(50), 360)).is_empty());
    }

    #[test]
    fn test_collects_every_violation() {
        let violations = validate_parameters(&params(0, dec!(50.01), 361));
        assert_eq!(
            violations,
            vec![
                "principal amount must be greater than 0".to_string(),
                "interest rate must be between 0% and 50%".to_string(),
                "tenure must be between 1 and 360 months".to_string(),
            ]
        );

        let negative_rate = validate_parameters(&params(1_000, dec!(-1), 0));
        assert_eq!(negative_rate.len(), 2);
    }

    #[test]
    fn test_category_limits() {
        let home = params(99_999, dec!(8.5), 240).category(LoanCategory::Home);
        assert_eq!(
            validate_parameters(&home),
            vec!["home loans require a minimum principal of 100000.00".to_string()]
        );

        let vehicle = params(60_000, dec!(9.5), 120).category(LoanCategory::Vehicle);
        assert_eq!(
            validate_parameters(&vehicle),
            vec!["vehicle loans allow a maximum tenure of 96 months".to_string()]
        );

        let personal = params(5_000, dec!(14), 72).category(LoanCategory::Personal);
        assert_eq!(validate_parameters(&personal).len(), 2);

        // categories without limits only get the general checks
        let gold = params(1_000, dec!(11), 12).category(LoanCategory::Gold);
        assert!(validate_parameters(&gold).is_empty());
    }

    #[test]
    fn test_defaults_for_category() {
        let home = defaults_for("home");
        assert_eq!(home.method, Some(CalculationMethod::ReducingBalance));
        assert_eq!(home.interest_rate_percent, Some(dec!(8.5)));
        assert_eq!(home.tenure_in_months, Some(240));

        let gold = defaults_for("GOLD");
        assert_eq!(gold.method, Some(CalculationMethod::FlatRate));

        for category in ["vehicle", "personal", "business", "education"] {
            assert!(!defaults_for(category).is_empty());
        }
    }

    #[test]
    fn test_unknown_category_has_no_defaults() {
        assert_eq!(defaults_for("yacht"), ParameterDefaults::default());
        assert!(defaults_for("").is_empty());
    }
}
