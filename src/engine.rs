use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;

use crate::config::{EngineConfig, ParameterDefaults};
use crate::decimal::Money;
use crate::errors::Result;
use crate::interest::{InterestPolicy, PenaltyCalculator};
use crate::loan::LoanTerms;
use crate::payments::{
    amortization, AmortizationSchedule, ForeclosureQuote, LoanParameters, PrepaymentQuote,
    SettlementCalculator,
};
use crate::types::InstallmentLine;
use crate::validation::{ParameterValidator, PolicyDefaults};

/// entry point wiring every calculator to one configuration
#[derive(Debug, Clone)]
pub struct LoanEngine {
    config: EngineConfig,
    penalties: PenaltyCalculator,
    settlement: SettlementCalculator,
    validator: ParameterValidator,
    defaults: PolicyDefaults,
}

impl Default for LoanEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl LoanEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            penalties: PenaltyCalculator::new(config.penalty.clone()),
            settlement: SettlementCalculator::new(config.settlement.clone()),
            validator: ParameterValidator::new(config.validation.clone()),
            defaults: PolicyDefaults::new(config.category_defaults.clone()),
            config,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(EngineConfig::from_json(json)?))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// total interest under the loan's declared policy
    pub fn total_interest(&self, terms: &LoanTerms) -> Result<Money> {
        InterestPolicy::for_loan(terms)?.total_interest(terms)
    }

    /// per-period breakdown under the loan's declared policy
    pub fn interest_schedule(&self, terms: &LoanTerms) -> Result<Vec<InstallmentLine>> {
        InterestPolicy::for_loan(terms)?.schedule(terms)
    }

    pub fn installment(&self, params: &LoanParameters) -> Result<Money> {
        amortization::compute_installment(params)
    }

    pub fn schedule(
        &self,
        params: &LoanParameters,
        start_date: DateTime<Utc>,
    ) -> Result<AmortizationSchedule> {
        AmortizationSchedule::generate(params, start_date)
    }

    pub fn validate(&self, params: &LoanParameters) -> Vec<String> {
        self.validator.validate(params)
    }

    pub fn defaults_for(&self, category: &str) -> ParameterDefaults {
        self.defaults.defaults_for(category)
    }

    pub fn foreclosure_quote(
        &self,
        params: &LoanParameters,
        start_date: DateTime<Utc>,
        periods_paid: u32,
        time_provider: &SafeTimeProvider,
    ) -> Result<ForeclosureQuote> {
        self.settlement
            .foreclosure_quote(params, start_date, periods_paid, None, time_provider)
    }

    pub fn prepayment_quote(
        &self,
        params: &LoanParameters,
        periods_paid: u32,
        amount: Money,
        reduce_installment: bool,
    ) -> Result<PrepaymentQuote> {
        self.settlement
            .prepayment_quote(params, periods_paid, amount, None, reduce_installment)
    }

    pub fn late_penalty(
        &self,
        installment_amount: Money,
        due_date: DateTime<Utc>,
        payment_date: DateTime<Utc>,
    ) -> Money {
        self.penalties
            .late_penalty(installment_amount, due_date, payment_date, None)
    }

    pub fn early_rebate(
        &self,
        installment_amount: Money,
        due_date: DateTime<Utc>,
        payment_date: DateTime<Utc>,
    ) -> Money {
        self.penalties
            .early_rebate(installment_amount, due_date, payment_date, None)
    }

    /// foreclosure charge percent in effect
    pub fn foreclosure_charge_percent(&self) -> Decimal {
        self.config.settlement.foreclosure_charge_percent
    }
}
